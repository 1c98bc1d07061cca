// SPDX-License-Identifier: MPL-2.0
//! End-to-end checks of the preview helper binary and the capture cycle.

use glyphtune::error::Error;
use glyphtune::preview;
use glyphtune::settings::SettingsRecord;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn helper_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_glyphtune_preview"))
}

#[test]
fn helper_writes_a_decodable_bitmap() {
    let dir = tempdir().expect("failed to create temp dir");
    let output = dir.path().join("preview.bmp");

    let status = Command::new(helper_path())
        .arg(format!("output={}", output.display()))
        .arg("sample=Ala ma kota")
        .arg("embolden=250")
        .status()
        .expect("helper should spawn");
    assert!(status.success());

    let bitmap = image_rs::open(&output).expect("output should decode");
    assert!(bitmap.width() > 0 && bitmap.height() > 0);
}

#[test]
fn helper_without_output_argument_fails() {
    let status = Command::new(helper_path())
        .arg("sample=Ala ma kota")
        .status()
        .expect("helper should spawn");
    assert!(!status.success());
}

#[tokio::test]
async fn capture_cycle_produces_a_frame() {
    let frame = preview::run_cycle(
        helper_path(),
        SettingsRecord::default(),
        "Ala ma kota".to_string(),
    )
    .await
    .expect("cycle should succeed");

    assert!(frame.width() > 0 && frame.height() > 0);
    assert_eq!(
        frame.pixels().len(),
        (frame.width() * frame.height() * 4) as usize
    );
}

#[tokio::test]
async fn capture_cycle_with_missing_renderer_is_a_process_error() {
    let err = preview::run_cycle(
        PathBuf::from("/nonexistent/glyphtune_preview"),
        SettingsRecord::default(),
        "sample".to_string(),
    )
    .await
    .expect_err("cycle should fail");
    assert!(matches!(err, Error::Process(_)));
}
