// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::error::Error;
use crate::preview::CapturedFrame;
use crate::settings::SettingsRecord;
use std::path::PathBuf;

use super::form::FormMessage;

/// Command-line overrides collected by `main.rs`.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub document: Option<PathBuf>,
    pub renderer: Option<PathBuf>,
    pub sample: Option<String>,
}

/// Top-level messages consumed by `App::update`. Form edits are forwarded
/// as one nested variant to keep a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Form(FormMessage),
    /// Open the file dialog to pick a different settings document.
    OpenDocumentDialog,
    /// Result from the document picker dialog.
    OpenDocumentDialogResult(Option<PathBuf>),
    /// Discard form edits and re-read the document.
    ReloadRequested,
    DocumentLoaded(Result<SettingsRecord, Error>),
    ValidateRequested,
    SaveRequested,
    SaveFinished(Result<(), Error>),
    /// Kick off one preview cycle.
    PreviewRequested,
    PreviewFinished(Result<CapturedFrame, Error>),
}
