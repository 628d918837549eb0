//! Error types for the engine.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::RCode;

/// Engine error type
#[derive(Debug, Error)]
pub enum Error {
    /// Screen size must be positive in both dimensions
    #[error("Invalid screen size: ({0}, {1})")]
    InvalidScreenSize(i32, i32),

    /// Pixel size must be positive in both dimensions
    #[error("Invalid pixel size: ({0}, {1})")]
    InvalidPixelSize(i32, i32),

    /// A required resource file does not exist
    #[error("File not found: {}", .0.display())]
    NoFile(PathBuf),

    /// A sprite file exists but its contents are unusable
    #[error("Invalid sprite data: {0}")]
    InvalidSprite(String),

    /// Operation is not allowed in the current engine state
    #[error("Cannot {op} while engine is {state}")]
    InvalidState {
        op: &'static str,
        state: &'static str,
    },

    /// Backend failed to open, poll or present
    #[error("Backend error: {0}")]
    Backend(String),

    /// Configuration could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Map to the closest native result code.
    ///
    /// Missing resources become `NoFile`; everything else is `Fail`.
    pub fn rcode(&self) -> RCode {
        match self {
            Error::NoFile(_) => RCode::NoFile,
            Error::Io(e) if e.kind() == io::ErrorKind::NotFound => RCode::NoFile,
            _ => RCode::Fail,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_resources_map_to_no_file() {
        assert_eq!(Error::NoFile(PathBuf::from("font.spr")).rcode(), RCode::NoFile);
        let io = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(Error::from(io).rcode(), RCode::NoFile);
    }

    #[test]
    fn other_errors_map_to_fail() {
        assert_eq!(Error::InvalidScreenSize(0, 10).rcode(), RCode::Fail);
        assert_eq!(Error::Backend("tty".into()).rcode(), RCode::Fail);
        let io = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(Error::from(io).rcode(), RCode::Fail);
    }

    #[test]
    fn messages_name_the_problem() {
        let e = Error::InvalidState {
            op: "start",
            state: "uninitialized",
        };
        assert_eq!(e.to_string(), "Cannot start while engine is uninitialized");
        assert_eq!(Error::InvalidPixelSize(-1, 2).to_string(), "Invalid pixel size: (-1, 2)");
    }
}
