// SPDX-License-Identifier: MPL-2.0
//! Load/save mapping between the gdipp XML settings document and
//! [`SettingsRecord`](crate::settings::SettingsRecord).
//!
//! Loading walks the document once with an event reader and copies each
//! recognized leaf's text into its typed field; a leaf whose node is absent
//! leaves the field unset. Saving re-reads the document and splices each
//! recognized leaf's serialized value in place of the old text, so unknown
//! nodes, attributes, comments, and formatting survive byte-for-byte.

use crate::error::{Error, Result};
use crate::settings::values::SettingsRecord;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::Path;

/// Recognized leaves: full node path from the document root, paired with
/// the dotted key used by `SettingsRecord::{apply_node, node_text}`.
const LEAF_PATHS: &[(&[&str], &str)] = &[
    (
        &["gdipp", "gdimm", "process", "freetype", "lcd_filter"],
        "lcd_filter",
    ),
    (&["gdipp", "gdimm", "font", "auto_hinting"], "auto_hinting"),
    (
        &["gdipp", "gdimm", "font", "embedded_bitmap"],
        "embedded_bitmap",
    ),
    (&["gdipp", "gdimm", "font", "embolden"], "embolden"),
    (&["gdipp", "gdimm", "font", "gamma", "red"], "gamma.red"),
    (&["gdipp", "gdimm", "font", "gamma", "green"], "gamma.green"),
    (&["gdipp", "gdimm", "font", "gamma", "blue"], "gamma.blue"),
    (&["gdipp", "gdimm", "font", "hinting"], "hinting"),
    (&["gdipp", "gdimm", "font", "kerning"], "kerning"),
    (
        &["gdipp", "gdimm", "font", "render_mode", "mono"],
        "render_mode.mono",
    ),
    (
        &["gdipp", "gdimm", "font", "render_mode", "gray"],
        "render_mode.gray",
    ),
    (
        &["gdipp", "gdimm", "font", "render_mode", "subpixel"],
        "render_mode.subpixel",
    ),
    (
        &["gdipp", "gdimm", "font", "render_mode", "pixel_geometry"],
        "render_mode.pixel_geometry",
    ),
    (
        &["gdipp", "gdimm", "font", "render_mode", "aliased_text"],
        "render_mode.aliased_text",
    ),
    (&["gdipp", "gdimm", "font", "renderer"], "renderer"),
    (
        &["gdipp", "gdimm", "font", "shadow", "offset_x"],
        "shadow.offset_x",
    ),
    (
        &["gdipp", "gdimm", "font", "shadow", "offset_y"],
        "shadow.offset_y",
    ),
    (
        &["gdipp", "gdimm", "font", "shadow", "alpha"],
        "shadow.alpha",
    ),
];

fn leaf_key(stack: &[String]) -> Option<&'static str> {
    LEAF_PATHS
        .iter()
        .find(|(path, _)| stack.len() == path.len() && stack.iter().zip(path.iter()).all(|(a, b)| a == b))
        .map(|(_, key)| *key)
}

/// Reads the settings document at `path` into a typed record.
pub fn load(path: &Path) -> Result<SettingsRecord> {
    let source = fs::read_to_string(path)
        .map_err(|e| Error::Parse(format!("unable to read {}: {}", path.display(), e)))?;
    load_from_str(&source)
}

/// Same as [`load`] but over an in-memory document.
pub fn load_from_str(source: &str) -> Result<SettingsRecord> {
    let mut reader = Reader::from_str(source);
    let mut record = SettingsRecord::default();
    let mut stack: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Text(t)) => {
                if let Some(key) = leaf_key(&stack) {
                    let text = t
                        .unescape()
                        .map_err(|e| Error::Parse(e.to_string()))?;
                    record.apply_node(key, &text);
                }
            }
            // The default reader config does not flag unclosed elements
            // itself, so a truncated document has to be caught here.
            Ok(Event::Eof) => {
                if let Some(open) = stack.last() {
                    return Err(Error::Parse(format!(
                        "unexpected end of document inside <{}>",
                        open
                    )));
                }
                break;
            }
            Ok(_) => {}
            Err(e) => return Err(Error::Parse(e.to_string())),
        }
    }

    Ok(record)
}

/// Writes the record back into the document at `path`.
///
/// The document is re-read first; a vanished or malformed file is a parse
/// error, a failed write an I/O error. Fields that are unset, and nodes the
/// document does not contain, are left exactly as they were.
pub fn save(path: &Path, record: &SettingsRecord) -> Result<()> {
    let source = fs::read_to_string(path)
        .map_err(|e| Error::Parse(format!("unable to read {}: {}", path.display(), e)))?;
    let rewritten = rewrite(&source, record)?;
    fs::write(path, rewritten).map_err(|e| Error::Io(format!("unable to write {}: {}", path.display(), e)))
}

/// Replaces the text of every recognized, text-bearing leaf with the
/// record's serialized value and returns the new document.
pub fn rewrite(source: &str, record: &SettingsRecord) -> Result<String> {
    let mut reader = Reader::from_str(source);
    let mut stack: Vec<String> = Vec::new();
    // (leaf key, depth, span of the first text child) of the innermost open
    // recognized leaf.
    let mut open_leaf: Option<(&'static str, usize, Option<(usize, usize)>)> = None;
    // Non-overlapping (start, end, replacement) spans in document order.
    let mut edits: Vec<(usize, usize, String)> = Vec::new();

    loop {
        let before = reader.buffer_position() as usize;
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                stack.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                open_leaf = leaf_key(&stack).map(|key| (key, stack.len(), None));
            }
            Ok(Event::Text(_)) => {
                if let Some((_, depth, span @ None)) = open_leaf.as_mut() {
                    if *depth == stack.len() {
                        let end = reader.buffer_position() as usize;
                        // Whitespace-only text is formatting, not a value.
                        if !source[before..end].trim().is_empty() {
                            *span = Some((before, end));
                        }
                    }
                }
            }
            Ok(Event::End(_)) => {
                if let Some((key, depth, span)) = open_leaf.take() {
                    // Only the text node is replaced; a comment or other
                    // sibling inside the leaf stays where it was. A node
                    // with no text child is left untouched, the same as a
                    // node missing from the document.
                    if depth == stack.len() {
                        if let (Some((start, end)), Some(value)) = (span, record.node_text(key)) {
                            edits.push((start, end, escape(value.as_str()).into_owned()));
                        }
                    }
                }
                stack.pop();
            }
            Ok(Event::Eof) => {
                if let Some(open) = stack.last() {
                    return Err(Error::Parse(format!(
                        "unexpected end of document inside <{}>",
                        open
                    )));
                }
                break;
            }
            Ok(_) => {}
            Err(e) => return Err(Error::Parse(e.to_string())),
        }
    }

    let mut rewritten = String::with_capacity(source.len());
    let mut cursor = 0;
    for (start, end, replacement) in edits {
        rewritten.push_str(&source[cursor..start]);
        rewritten.push_str(&replacement);
        cursor = end;
    }
    rewritten.push_str(&source[cursor..]);
    Ok(rewritten)
}
