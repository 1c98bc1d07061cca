// SPDX-License-Identifier: MPL-2.0
//! The settings mapper: a typed view over gdipp's XML settings document.

pub mod document;
pub mod values;

pub use values::{
    AutoHintingMode, LcdFilter, PixelGeometry, RenderPolicy, SettingsRecord, ValidationReport,
};

use std::path::PathBuf;

/// Fixed installation path of the gdipp settings document.
#[cfg(target_os = "windows")]
pub fn default_document_path() -> PathBuf {
    PathBuf::from("C:\\Program Files\\gdipp\\gdipp_setting.xml")
}

/// Fixed installation path of the gdipp settings document.
#[cfg(not(target_os = "windows"))]
pub fn default_document_path() -> PathBuf {
    PathBuf::from("/etc/gdipp/gdipp_setting.xml")
}
