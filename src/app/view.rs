// SPDX-License-Identifier: MPL-2.0
//! View rendering: the settings form, action buttons, validation report,
//! and the preview pane.

use super::{App, FormMessage, Message, Status};
use crate::settings::{AutoHintingMode, LcdFilter, PixelGeometry, RenderPolicy};
use iced::widget::image::Image;
use iced::widget::{button, container, pick_list, scrollable, text, text_input, Column, Row};
use iced::{Alignment, Color, Element, Length};

const LABEL_WIDTH: f32 = 170.0;
const ERROR_COLOR: Color = Color {
    r: 0.78,
    g: 0.16,
    b: 0.16,
    a: 1.0,
};
const OK_COLOR: Color = Color {
    r: 0.16,
    g: 0.55,
    b: 0.25,
    a: 1.0,
};

fn section(title: &str) -> Element<'_, Message> {
    text(title).size(18).into()
}

fn field_row<'a>(
    label: &'a str,
    control: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    Row::new()
        .push(text(label).width(Length::Fixed(LABEL_WIDTH)))
        .push(control)
        .spacing(10)
        .align_y(Alignment::Center)
        .into()
}

fn int_input<'a>(
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> FormMessage + 'a,
) -> Element<'a, Message> {
    text_input(placeholder, value)
        .on_input(move |v| Message::Form(on_input(v)))
        .width(Length::Fixed(120.0))
        .into()
}

fn form_view(app: &App) -> Element<'_, Message> {
    let form = &app.form;

    let freetype = Column::new()
        .push(section("FreeType"))
        .push(field_row(
            "LCD filter",
            pick_list(LcdFilter::ALL, form.lcd_filter, |v| {
                Message::Form(FormMessage::LcdFilterSelected(v))
            })
            .placeholder("not set"),
        ))
        .spacing(8);

    let font = Column::new()
        .push(section("Font"))
        .push(field_row(
            "Auto-hinting",
            pick_list(AutoHintingMode::ALL, form.auto_hinting, |v| {
                Message::Form(FormMessage::AutoHintingSelected(v))
            })
            .placeholder("not set"),
        ))
        .push(field_row(
            "Embedded bitmap",
            pick_list([0, 1], form.embedded_bitmap, |v| {
                Message::Form(FormMessage::EmbeddedBitmapSelected(v))
            })
            .placeholder("not set"),
        ))
        .push(field_row(
            "Embolden (-1000..1000)",
            int_input("0", &form.embolden, FormMessage::EmboldenChanged),
        ))
        .push(field_row(
            "Hinting",
            pick_list([0, 1, 2, 3], form.hinting, |v| {
                Message::Form(FormMessage::HintingSelected(v))
            })
            .placeholder("not set"),
        ))
        .push(field_row(
            "Kerning",
            pick_list([0, 1], form.kerning, |v| {
                Message::Form(FormMessage::KerningSelected(v))
            })
            .placeholder("not set"),
        ))
        .push(field_row(
            "Renderer",
            int_input("0", &form.renderer, FormMessage::RendererChanged),
        ))
        .spacing(8);

    let gamma = Column::new()
        .push(section("Gamma"))
        .push(field_row(
            "Red",
            int_input("1.0", &form.gamma_red, FormMessage::GammaRedChanged),
        ))
        .push(field_row(
            "Green",
            int_input("1.0", &form.gamma_green, FormMessage::GammaGreenChanged),
        ))
        .push(field_row(
            "Blue",
            int_input("1.0", &form.gamma_blue, FormMessage::GammaBlueChanged),
        ))
        .spacing(8);

    let render_mode = Column::new()
        .push(section("Render mode"))
        .push(field_row(
            "Mono",
            pick_list(RenderPolicy::ALL, form.render_mono, |v| {
                Message::Form(FormMessage::RenderMonoSelected(v))
            })
            .placeholder("not set"),
        ))
        .push(field_row(
            "Gray",
            pick_list(RenderPolicy::ALL, form.render_gray, |v| {
                Message::Form(FormMessage::RenderGraySelected(v))
            })
            .placeholder("not set"),
        ))
        .push(field_row(
            "Subpixel",
            pick_list(RenderPolicy::ALL, form.render_subpixel, |v| {
                Message::Form(FormMessage::RenderSubpixelSelected(v))
            })
            .placeholder("not set"),
        ))
        .push(field_row(
            "Pixel geometry",
            pick_list(PixelGeometry::ALL, form.pixel_geometry, |v| {
                Message::Form(FormMessage::PixelGeometrySelected(v))
            })
            .placeholder("not set"),
        ))
        .push(field_row(
            "Aliased text",
            pick_list([0, 1], form.aliased_text, |v| {
                Message::Form(FormMessage::AliasedTextSelected(v))
            })
            .placeholder("not set"),
        ))
        .spacing(8);

    let shadow = Column::new()
        .push(section("Shadow"))
        .push(field_row(
            "Offset X",
            int_input("0", &form.shadow_offset_x, FormMessage::ShadowOffsetXChanged),
        ))
        .push(field_row(
            "Offset Y",
            int_input("0", &form.shadow_offset_y, FormMessage::ShadowOffsetYChanged),
        ))
        .push(field_row(
            "Alpha (0..255)",
            int_input("0", &form.shadow_alpha, FormMessage::ShadowAlphaChanged),
        ))
        .spacing(8);

    Column::new()
        .push(freetype)
        .push(font)
        .push(gamma)
        .push(render_mode)
        .push(shadow)
        .spacing(16)
        .into()
}

fn actions_view(app: &App) -> Element<'_, Message> {
    Row::new()
        .push(button(text("Open...")).on_press(Message::OpenDocumentDialog))
        .push(button(text("Reload")).on_press(Message::ReloadRequested))
        .push(button(text("Validate")).on_press(Message::ValidateRequested))
        .push(button(text("Save")).on_press(Message::SaveRequested))
        .push(
            button(text(if app.preview_in_flight {
                "Rendering..."
            } else {
                "Update preview"
            }))
            .on_press_maybe((!app.preview_in_flight).then_some(Message::PreviewRequested)),
        )
        .spacing(8)
        .into()
}

fn report_view(app: &App) -> Element<'_, Message> {
    let Some(report) = &app.report else {
        return Column::new().into();
    };

    if report.is_valid() {
        return text("All values are correct.").color(OK_COLOR).into();
    }

    let mut column = Column::new()
        .push(text("Missing or out-of-range fields:").color(ERROR_COLOR))
        .spacing(2);
    for field in report.incorrect_fields() {
        column = column.push(text(format!("  - {}", field)).color(ERROR_COLOR));
    }
    column.into()
}

fn status_view(app: &App) -> Element<'_, Message> {
    match &app.status {
        Status::Idle => Column::new().into(),
        Status::Info(message) => text(message.as_str()).color(OK_COLOR).into(),
        Status::Error(message) => text(message.as_str()).color(ERROR_COLOR).into(),
    }
}

fn preview_view(app: &App) -> Element<'_, Message> {
    let content: Element<'_, Message> = match &app.preview_handle {
        Some(handle) => Image::new(handle.clone()).width(Length::Fill).into(),
        None => text("No preview yet. Press \"Update preview\".").into(),
    };

    Column::new()
        .push(section("Preview"))
        .push(container(content).padding(8))
        .spacing(8)
        .into()
}

pub(super) fn view(app: &App) -> Element<'_, Message> {
    let header = text(format!("Document: {}", app.document_path.display())).size(14);

    let left = scrollable(
        Column::new()
            .push(header)
            .push(form_view(app))
            .push(actions_view(app))
            .push(report_view(app))
            .push(status_view(app))
            .spacing(16)
            .padding(16),
    )
    .width(Length::FillPortion(3));

    let right = container(preview_view(app))
        .width(Length::FillPortion(2))
        .padding(16);

    Row::new()
        .push(left)
        .push(right)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_renders_default_state() {
        let app = App::default();
        let _element = view(&app);
        // Smoke test to ensure the view builds without panicking.
    }

    #[test]
    fn view_renders_report_and_frame() {
        let mut app = App::default();
        let _ = app.update(Message::ValidateRequested);
        let _ = app.update(Message::PreviewFinished(Ok(
            crate::preview::CapturedFrame::from_parts(1, 1, vec![0, 0, 0, 255]),
        )));
        let _element = view(&app);
    }
}
