// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Failure taxonomy shared by the editor and the preview helper.
///
/// Everything funnels into one of four buckets; the UI surfaces the
/// `Display` text in its status line rather than recovering. Validation
/// findings are data (`ValidationReport`), not an `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The settings document could not be parsed.
    Parse(String),
    /// Reading or writing a file failed.
    Io(String),
    /// The preview renderer failed to start, timed out, or produced no output.
    Process(String),
    /// The editor's own preferences file is unusable.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "Parse Error: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Process(e) => write!(f, "Process Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_parse_error() {
        let err = Error::Parse("unexpected end of document".to_string());
        assert_eq!(
            format!("{}", err),
            "Parse Error: unexpected end of document"
        );
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }
}
