// SPDX-License-Identifier: MPL-2.0
//! Preview-render helper launched by the editor.
//!
//! Reads `key=value` arguments, renders the sample scene, and writes the
//! bitmap to the path given by `output=<path>`. Exits nonzero with a
//! message on stderr when anything goes wrong, which the editor reports as
//! a failed preview cycle.

use glyphtune::cmdline::Arguments;
use glyphtune::render::SampleScene;
use std::process::ExitCode;

fn run() -> Result<(), String> {
    let args = Arguments::parse(std::env::args().skip(1));
    let output = args
        .get("output")
        .filter(|path| !path.is_empty())
        .ok_or("Unable to start. Missing `output` parameter.")?;

    let scene = SampleScene::from_args(&args);
    scene
        .render()
        .save(output)
        .map_err(|e| format!("Unable to save {}: {}", output, e))
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("glyphtune_preview: {}", message);
            ExitCode::FAILURE
        }
    }
}
