// SPDX-License-Identifier: MPL-2.0
//! Form state for the editing session.
//!
//! Enumerated fields are edited through pick lists and stored as their
//! typed selections; numeric and gamma fields are edited through text
//! inputs, so the raw buffer is kept here and only converted to a typed
//! field when a record is needed. An empty or unparseable buffer maps to
//! the unset state, which validation then reports by name.

use crate::settings::values::parse_int;
use crate::settings::{
    AutoHintingMode, LcdFilter, PixelGeometry, RenderPolicy, SettingsRecord,
};

/// One edit to the form, produced by the view's controls.
#[derive(Debug, Clone)]
pub enum FormMessage {
    AutoHintingSelected(AutoHintingMode),
    EmbeddedBitmapSelected(i32),
    EmboldenChanged(String),
    LcdFilterSelected(LcdFilter),
    GammaRedChanged(String),
    GammaGreenChanged(String),
    GammaBlueChanged(String),
    HintingSelected(i32),
    KerningSelected(i32),
    RenderMonoSelected(RenderPolicy),
    RenderGraySelected(RenderPolicy),
    RenderSubpixelSelected(RenderPolicy),
    RendererChanged(String),
    PixelGeometrySelected(PixelGeometry),
    ShadowOffsetXChanged(String),
    ShadowOffsetYChanged(String),
    ShadowAlphaChanged(String),
    AliasedTextSelected(i32),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub auto_hinting: Option<AutoHintingMode>,
    pub embedded_bitmap: Option<i32>,
    pub embolden: String,
    pub lcd_filter: Option<LcdFilter>,
    pub gamma_red: String,
    pub gamma_green: String,
    pub gamma_blue: String,
    pub hinting: Option<i32>,
    pub kerning: Option<i32>,
    pub render_mono: Option<RenderPolicy>,
    pub render_gray: Option<RenderPolicy>,
    pub render_subpixel: Option<RenderPolicy>,
    pub renderer: String,
    pub pixel_geometry: Option<PixelGeometry>,
    pub shadow_offset_x: String,
    pub shadow_offset_y: String,
    pub shadow_alpha: String,
    pub aliased_text: Option<i32>,
}

fn int_buffer(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl FormState {
    pub fn from_record(record: &SettingsRecord) -> Self {
        Self {
            auto_hinting: record.auto_hinting,
            embedded_bitmap: record.embedded_bitmap,
            embolden: int_buffer(record.embolden),
            lcd_filter: record.lcd_filter,
            gamma_red: record.gamma_red.clone().unwrap_or_default(),
            gamma_green: record.gamma_green.clone().unwrap_or_default(),
            gamma_blue: record.gamma_blue.clone().unwrap_or_default(),
            hinting: record.hinting,
            kerning: record.kerning,
            render_mono: record.render_mono,
            render_gray: record.render_gray,
            render_subpixel: record.render_subpixel,
            renderer: int_buffer(record.renderer),
            pixel_geometry: record.pixel_geometry,
            shadow_offset_x: int_buffer(record.shadow_offset_x),
            shadow_offset_y: int_buffer(record.shadow_offset_y),
            shadow_alpha: int_buffer(record.shadow_alpha),
            aliased_text: record.aliased_text,
        }
    }

    /// Snapshot of the form as a typed record (what validate/save/preview
    /// consume).
    pub fn to_record(&self) -> SettingsRecord {
        let gamma = |buffer: &str| {
            let trimmed = buffer.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        };
        SettingsRecord {
            auto_hinting: self.auto_hinting,
            embedded_bitmap: self.embedded_bitmap,
            embolden: parse_int(&self.embolden),
            lcd_filter: self.lcd_filter,
            gamma_red: gamma(&self.gamma_red),
            gamma_green: gamma(&self.gamma_green),
            gamma_blue: gamma(&self.gamma_blue),
            hinting: self.hinting,
            kerning: self.kerning,
            render_mono: self.render_mono,
            render_gray: self.render_gray,
            render_subpixel: self.render_subpixel,
            renderer: parse_int(&self.renderer),
            pixel_geometry: self.pixel_geometry,
            shadow_offset_x: parse_int(&self.shadow_offset_x),
            shadow_offset_y: parse_int(&self.shadow_offset_y),
            shadow_alpha: parse_int(&self.shadow_alpha),
            aliased_text: self.aliased_text,
        }
    }

    pub fn apply(&mut self, message: FormMessage) {
        match message {
            FormMessage::AutoHintingSelected(v) => self.auto_hinting = Some(v),
            FormMessage::EmbeddedBitmapSelected(v) => self.embedded_bitmap = Some(v),
            FormMessage::EmboldenChanged(v) => self.embolden = v,
            FormMessage::LcdFilterSelected(v) => self.lcd_filter = Some(v),
            FormMessage::GammaRedChanged(v) => self.gamma_red = v,
            FormMessage::GammaGreenChanged(v) => self.gamma_green = v,
            FormMessage::GammaBlueChanged(v) => self.gamma_blue = v,
            FormMessage::HintingSelected(v) => self.hinting = Some(v),
            FormMessage::KerningSelected(v) => self.kerning = Some(v),
            FormMessage::RenderMonoSelected(v) => self.render_mono = Some(v),
            FormMessage::RenderGraySelected(v) => self.render_gray = Some(v),
            FormMessage::RenderSubpixelSelected(v) => self.render_subpixel = Some(v),
            FormMessage::RendererChanged(v) => self.renderer = v,
            FormMessage::PixelGeometrySelected(v) => self.pixel_geometry = Some(v),
            FormMessage::ShadowOffsetXChanged(v) => self.shadow_offset_x = v,
            FormMessage::ShadowOffsetYChanged(v) => self.shadow_offset_y = v,
            FormMessage::ShadowAlphaChanged(v) => self.shadow_alpha = v,
            FormMessage::AliasedTextSelected(v) => self.aliased_text = Some(v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> SettingsRecord {
        SettingsRecord {
            auto_hinting: Some(AutoHintingMode::Disabled),
            embedded_bitmap: Some(1),
            embolden: Some(-40),
            lcd_filter: Some(LcdFilter::Light),
            gamma_red: Some("1.2".to_string()),
            gamma_green: Some("1.0".to_string()),
            gamma_blue: Some("0.8".to_string()),
            hinting: Some(1),
            kerning: Some(0),
            render_mono: Some(RenderPolicy::Disabled),
            render_gray: Some(RenderPolicy::Enabled),
            render_subpixel: Some(RenderPolicy::Enabled),
            renderer: Some(2),
            pixel_geometry: Some(PixelGeometry::Bgr),
            shadow_offset_x: Some(0),
            shadow_offset_y: Some(0),
            shadow_alpha: Some(0),
            aliased_text: Some(0),
        }
    }

    #[test]
    fn record_round_trips_through_the_form() {
        let record = sample_record();
        let form = FormState::from_record(&record);
        assert_eq!(form.to_record(), record);
    }

    #[test]
    fn unset_fields_become_empty_buffers_and_back() {
        let form = FormState::from_record(&SettingsRecord::default());
        assert_eq!(form.embolden, "");
        assert_eq!(form.auto_hinting, None);
        assert_eq!(form.to_record(), SettingsRecord::default());
    }

    #[test]
    fn unparseable_buffer_maps_to_unset() {
        let mut form = FormState::default();
        form.apply(FormMessage::EmboldenChanged("12x".to_string()));
        assert_eq!(form.to_record().embolden, None);

        form.apply(FormMessage::EmboldenChanged("-12".to_string()));
        assert_eq!(form.to_record().embolden, Some(-12));
    }

    #[test]
    fn apply_updates_enum_selections() {
        let mut form = FormState::default();
        form.apply(FormMessage::LcdFilterSelected(LcdFilter::Legacy));
        form.apply(FormMessage::RenderSubpixelSelected(RenderPolicy::Forced));
        assert_eq!(form.lcd_filter, Some(LcdFilter::Legacy));
        assert_eq!(form.render_subpixel, Some(RenderPolicy::Forced));
    }
}
