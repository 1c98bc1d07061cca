// SPDX-License-Identifier: MPL-2.0
//! Command-line format consumed by the preview renderer.
//!
//! Tokens are either `key=value` pairs or bare flags (a bare token maps to
//! itself). Double quotes wrapping a key or value are stripped, so
//! `output="C:\tmp\preview.bmp"` and `output=C:\tmp\preview.bmp` parse the
//! same way. Later duplicates win.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Arguments {
    entries: HashMap<String, String>,
}

fn unquote(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

impl Arguments {
    /// Parses pre-split tokens (typically `std::env::args().skip(1)`).
    pub fn parse<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = HashMap::new();
        for token in tokens {
            let token = token.as_ref();
            match token.split_once('=') {
                Some((key, value)) => {
                    entries.insert(unquote(key).to_string(), unquote(value).to_string());
                }
                None => {
                    let flag = unquote(token).to_string();
                    entries.insert(flag.clone(), flag);
                }
            }
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Iterates over all parsed `(key, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
