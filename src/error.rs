//! Error types for trace loading and analysis.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while loading or analysing an RSI trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Input file does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Input file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A line could not be turned into a sample or path point.
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// No samples left to analyse.
    #[error("trace is empty: {0}")]
    EmptyTrace(String),

    /// Fewer segment boundaries than the overlay needs.
    #[error("need at least {required} segment boundaries, found {found}")]
    InsufficientSegments { required: usize, found: usize },

    /// Derivative requested on a series that is too short.
    #[error("derivative needs at least 2 samples, got {0}")]
    TooFewSamples(usize),

    /// Two sequences that must be index-aligned have different lengths.
    #[error("channel length mismatch: expected {expected} samples, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// Time axis does not strictly increase.
    #[error("time axis not strictly increasing at sample {0}")]
    NonIncreasingTime(usize),

    /// Overlay range falls outside the trace.
    #[error("boundary index {index} out of range for trace of {len} samples")]
    BoundaryOutOfRange { index: usize, len: usize },

    /// Reference path file contains no points.
    #[error("reference path is empty")]
    EmptyReferencePath,
}

impl TraceError {
    /// Create a Parse error with a message.
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Map an I/O failure on `path`, keeping missing files distinct.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, TraceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_maps_to_file_not_found() {
        let err = TraceError::from_io(
            Path::new("nope.txt"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, TraceError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "file not found: nope.txt");
    }

    #[test]
    fn other_io_errors_keep_source() {
        let err = TraceError::from_io(
            Path::new("log.txt"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, TraceError::Io { .. }));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn insufficient_segments_message() {
        let err = TraceError::InsufficientSegments {
            required: 5,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "need at least 5 segment boundaries, found 3"
        );
    }
}
