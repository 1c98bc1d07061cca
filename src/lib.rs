// SPDX-License-Identifier: MPL-2.0
//! `glyphtune` is a configuration editor for the gdipp font-rendering
//! subsystem, built with the Iced GUI framework.
//!
//! It maps gdipp's XML settings document onto a typed, range-checked form,
//! validates edits field by field, writes them back in place, and shows a
//! live sample rendering produced by the companion `glyphtune_preview`
//! helper process.

pub mod app;
pub mod cmdline;
pub mod config;
pub mod error;
pub mod preview;
pub mod render;
pub mod settings;
