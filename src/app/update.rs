// SPDX-License-Identifier: MPL-2.0
//! Update logic: message handlers wiring the form to the settings mapper
//! and the preview capturer.

use super::{App, FormState, Message, Status};
use crate::preview;
use crate::settings::document;
use crate::config;
use iced::widget::image::Handle;
use iced::Task;
use std::path::PathBuf;

/// Schedules a document load off the UI thread.
pub(super) fn load_document_task(path: PathBuf) -> Task<Message> {
    Task::perform(
        async move { document::load(&path) },
        Message::DocumentLoaded,
    )
}

/// Remembers a picked document path for the next session; a missing
/// preferences location disables persistence.
fn persist_document_path(app: &App, path: &PathBuf) {
    if let Some(prefs_path) = &app.prefs_path {
        let mut prefs = config::load_from_path(prefs_path).unwrap_or_default();
        prefs.document_path = Some(path.clone());
        if let Err(error) = config::save_to_path(&prefs, prefs_path) {
            eprintln!("Failed to save preferences: {:?}", error);
        }
    }
}

pub(super) fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Form(form_message) => {
            app.form.apply(form_message);
            // Stale findings would mislabel fields the user just fixed.
            app.report = None;
            Task::none()
        }

        Message::OpenDocumentDialog => Task::perform(
            async {
                rfd::AsyncFileDialog::new()
                    .set_title("Open gdipp settings document")
                    .add_filter("gdipp settings", &["xml"])
                    .pick_file()
                    .await
                    .map(|handle| handle.path().to_path_buf())
            },
            Message::OpenDocumentDialogResult,
        ),

        Message::OpenDocumentDialogResult(Some(path)) => {
            persist_document_path(app, &path);
            app.document_path = path;
            load_document_task(app.document_path.clone())
        }
        Message::OpenDocumentDialogResult(None) => Task::none(),

        Message::ReloadRequested => load_document_task(app.document_path.clone()),

        Message::DocumentLoaded(Ok(record)) => {
            app.form = FormState::from_record(&record);
            app.report = None;
            app.status = Status::Info(format!("Loaded {}", app.document_path.display()));
            Task::none()
        }
        Message::DocumentLoaded(Err(error)) => {
            app.status = Status::Error(error.to_string());
            Task::none()
        }

        Message::ValidateRequested => {
            let report = app.form.to_record().validate();
            app.status = if report.is_valid() {
                Status::Info("All values are within their domains.".to_string())
            } else {
                Status::Error(format!(
                    "{} field(s) missing or out of range.",
                    report.incorrect_fields().len()
                ))
            };
            app.report = Some(report);
            Task::none()
        }

        Message::SaveRequested => {
            let record = app.form.to_record();
            let report = record.validate();
            if !report.is_valid() {
                // Never write a document gdipp would choke on.
                app.status = Status::Error(format!(
                    "Not saved: {} field(s) missing or out of range.",
                    report.incorrect_fields().len()
                ));
                app.report = Some(report);
                return Task::none();
            }
            app.report = Some(report);
            let path = app.document_path.clone();
            Task::perform(
                async move { document::save(&path, &record) },
                Message::SaveFinished,
            )
        }

        Message::SaveFinished(Ok(())) => {
            app.status = Status::Info(format!("Saved {}", app.document_path.display()));
            Task::none()
        }
        Message::SaveFinished(Err(error)) => {
            app.status = Status::Error(error.to_string());
            Task::none()
        }

        Message::PreviewRequested => {
            if app.preview_in_flight {
                return Task::none();
            }
            app.preview_in_flight = true;
            app.status = Status::Info("Rendering preview...".to_string());
            Task::perform(
                preview::run_cycle(
                    app.renderer_path.clone(),
                    app.form.to_record(),
                    app.sample_text.clone(),
                ),
                Message::PreviewFinished,
            )
        }

        Message::PreviewFinished(Ok(frame)) => {
            app.preview_in_flight = false;
            app.status = Status::Info(format!(
                "Preview updated ({}x{}).",
                frame.width(),
                frame.height()
            ));
            // Installing the new frame drops the previous one; a failed
            // cycle below never reaches this point, so the old frame
            // survives failures.
            app.preview_handle = Some(Handle::from_rgba(
                frame.width(),
                frame.height(),
                frame.pixels().to_vec(),
            ));
            app.preview_frame = Some(frame);
            Task::none()
        }
        Message::PreviewFinished(Err(error)) => {
            app.preview_in_flight = false;
            app.status = Status::Error(error.to_string());
            Task::none()
        }
    }
}
