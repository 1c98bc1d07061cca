// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration for the editor.
//!
//! The `App` struct owns the editing session: the settings record loaded
//! from the gdipp document (exposed to the UI through `FormState`), the
//! latest validation report, and the frame captured by the last preview
//! cycle. `update.rs` translates messages into side effects (document
//! load/save, preview cycles), `view.rs` renders the single form screen.

pub mod form;
mod message;
mod update;
mod view;

pub use form::{FormMessage, FormState};
pub use message::{Flags, Message};

use crate::preview::{CapturedFrame, DEFAULT_RENDERER};
use crate::render::DEFAULT_SAMPLE;
use crate::settings::ValidationReport;
use crate::{config, settings};
use iced::widget::image::Handle;
use iced::{window, Element, Task};
use std::path::PathBuf;

pub const WINDOW_DEFAULT_WIDTH: u32 = 960;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 680;
pub const MIN_WINDOW_WIDTH: u32 = 760;
pub const MIN_WINDOW_HEIGHT: u32 = 560;

/// Outcome line shown under the action buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Info(String),
    Error(String),
}

/// Root Iced application state.
pub struct App {
    /// The gdipp settings document this session edits.
    document_path: PathBuf,
    /// Preview renderer binary (name resolved via PATH, or a full path).
    renderer_path: PathBuf,
    sample_text: String,
    form: FormState,
    report: Option<ValidationReport>,
    /// Frame from the last successful preview cycle; replaced wholesale,
    /// never mutated.
    preview_frame: Option<CapturedFrame>,
    /// Display handle derived from `preview_frame`, refreshed alongside it.
    preview_handle: Option<Handle>,
    /// At most one preview cycle may be outstanding.
    preview_in_flight: bool,
    /// Where a picked document path is remembered for the next session;
    /// `None` disables persistence.
    prefs_path: Option<PathBuf>,
    status: Status,
}

impl Default for App {
    fn default() -> Self {
        Self {
            document_path: settings::default_document_path(),
            renderer_path: PathBuf::from(DEFAULT_RENDERER),
            sample_text: DEFAULT_SAMPLE.to_string(),
            form: FormState::default(),
            report: None,
            preview_frame: None,
            preview_handle: None,
            preview_in_flight: false,
            prefs_path: None,
            status: Status::Idle,
        }
    }
}

impl App {
    /// Builds the initial state from CLI flags layered over the persisted
    /// preferences, and schedules the first document load.
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let prefs = config::load().unwrap_or_default();

        let mut app = Self::default();
        app.prefs_path = config::default_config_path();
        if let Some(path) = flags.document.or(prefs.document_path) {
            app.document_path = path;
        }
        if let Some(path) = flags.renderer.or(prefs.renderer_path) {
            app.renderer_path = path;
        }
        if let Some(sample) = flags.sample.or(prefs.sample_text) {
            app.sample_text = sample;
        }

        let task = update::load_document_task(app.document_path.clone());
        (app, task)
    }

    pub fn title(&self) -> String {
        format!("Glyphtune - {}", self.document_path.display())
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    pub fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .window(window_settings())
        .run()
}
