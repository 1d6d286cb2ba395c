//! Error types for the plotting pipeline.

use std::fmt;

/// Errors that can occur while generating, analyzing or writing a plot
#[derive(Debug)]
pub enum PlotError {
    /// Configuration rejected before any work started
    InvalidConfig(String),

    /// Buffer handed to a stage does not match what the stage was built for
    InvalidInput(String),

    /// PNG encoding failed
    Encode(String),

    /// Filesystem error while writing an artifact
    Io(std::io::Error),
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            PlotError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PlotError::Encode(msg) => write!(f, "Encoding error: {}", msg),
            PlotError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for PlotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlotError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlotError {
    fn from(err: std::io::Error) -> Self {
        PlotError::Io(err)
    }
}

impl From<png::EncodingError> for PlotError {
    fn from(err: png::EncodingError) -> Self {
        match err {
            png::EncodingError::IoError(io) => PlotError::Io(io),
            other => PlotError::Encode(other.to_string()),
        }
    }
}
