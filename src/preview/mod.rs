// SPDX-License-Identifier: MPL-2.0
//! One preview cycle: launch the renderer, wait for it to paint, pick up
//! the bitmap it produced, tear everything down.
//!
//! The cycle is a single async function so every exit path releases its
//! resources the same way: the temp output file is a [`TempPath`] removed on
//! drop, and the child is spawned with `kill_on_drop` so an error return (or
//! a cancelled future) still reaps the process. A failed cycle reports an
//! [`Error::Process`] and leaves whatever frame the caller was displaying
//! untouched.

use crate::error::{Error, Result};
use crate::settings::SettingsRecord;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Upper bound on one render pass; a wedged renderer must not wedge the
/// editor with it.
pub const RENDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Binary name of the companion renderer, resolved through `PATH` unless
/// the preferences override it with a full path.
pub const DEFAULT_RENDERER: &str = "glyphtune_preview";

/// An owned bitmap produced by one preview cycle. RGBA8, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CapturedFrame {
    /// Builds a frame from raw RGBA8 parts.
    pub fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the frame into `(width, height, rgba_pixels)`, the shape
    /// `iced`'s image handle constructor wants.
    pub fn into_parts(self) -> (u32, u32, Vec<u8>) {
        (self.width, self.height, self.pixels)
    }
}

/// Runs one launch-render-capture-teardown sequence.
///
/// The renderer is invoked with `output=<temp path>`, `sample=<text>`, and
/// one `key=value` argument per set field of the record.
pub async fn run_cycle(
    renderer: PathBuf,
    record: SettingsRecord,
    sample_text: String,
) -> Result<CapturedFrame> {
    run_cycle_with_deadline(renderer, record, sample_text, RENDER_TIMEOUT).await
}

async fn run_cycle_with_deadline(
    renderer: PathBuf,
    record: SettingsRecord,
    sample_text: String,
    deadline: Duration,
) -> Result<CapturedFrame> {
    let output = tempfile::Builder::new()
        .prefix("glyphtune_preview_")
        .suffix(".bmp")
        .tempfile()
        .map_err(|e| Error::Io(format!("unable to create temp bitmap: {}", e)))?;
    // Keep only the path; it unlinks the file when the cycle ends, however
    // the cycle ends.
    let output_path = output.into_temp_path();

    let mut command = Command::new(&renderer);
    command
        .arg(format!("output={}", output_path.display()))
        .arg(format!("sample={}", sample_text))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .kill_on_drop(true);
    for (key, value) in record.to_arg_pairs() {
        command.arg(format!("{}={}", key, value));
    }

    let mut child = command.spawn().map_err(|e| {
        Error::Process(format!(
            "unable to start preview renderer {}: {}",
            renderer.display(),
            e
        ))
    })?;

    let status = match tokio::time::timeout(deadline, child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => {
            let _ = child.start_kill();
            let _ = child.wait().await;
            return Err(Error::Process(format!(
                "failed waiting for preview renderer: {}",
                e
            )));
        }
        Err(_) => {
            let _ = child.start_kill();
            let _ = child.wait().await;
            return Err(Error::Process(format!(
                "preview renderer did not finish within {:?}",
                deadline
            )));
        }
    };

    if !status.success() {
        return Err(Error::Process(format!(
            "preview renderer exited with {}",
            status
        )));
    }

    let bitmap = image_rs::open(&output_path).map_err(|e| {
        Error::Process(format!("preview renderer produced no readable bitmap: {}", e))
    })?;
    let rgba = bitmap.into_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(CapturedFrame {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn launch_failure_is_a_process_error() {
        let err = run_cycle(
            PathBuf::from("/nonexistent/glyphtune_preview"),
            SettingsRecord::default(),
            "sample".to_string(),
        )
        .await
        .expect_err("spawn should fail");
        assert!(matches!(err, Error::Process(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stalled_renderer_is_killed_at_the_deadline() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let renderer = dir.path().join("stalled_renderer.sh");
        std::fs::write(&renderer, "#!/bin/sh\nsleep 30\n").expect("failed to write script");
        let mut perms = std::fs::metadata(&renderer)
            .expect("script should exist")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&renderer, perms).expect("failed to mark executable");

        let started = std::time::Instant::now();
        let err = run_cycle_with_deadline(
            renderer,
            SettingsRecord::default(),
            "sample".to_string(),
            Duration::from_millis(200),
        )
        .await
        .expect_err("deadline should expire");

        assert!(matches!(err, Error::Process(_)));
        assert!(err.to_string().contains("did not finish"));
        // The child was killed and reaped at the deadline, not slept out.
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn frame_exposes_dimensions_and_pixels() {
        let frame = CapturedFrame {
            width: 2,
            height: 1,
            pixels: vec![0, 0, 0, 255, 255, 255, 255, 255],
        };
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 1);
        let (w, h, pixels) = frame.into_parts();
        assert_eq!((w, h), (2, 1));
        assert_eq!(pixels.len(), 8);
    }
}
