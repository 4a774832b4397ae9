//! Core types for the VEX log decoder library
//!
//! This module defines what the decoder emits when processing a record.
//! The decoder is stateless: every value here is derived from one raw line
//! and the registries, nothing else.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Errors that can occur during decoding
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Invalid time field {field:?}: expected 13 binary digits")]
    InvalidTimeField { field: String },

    #[error("Failed to read log file {path:?}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A structured record, decoded from one line of at least 15 characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedEvent {
    /// The line exactly as read
    pub raw: String,
    /// Elapsed time in hundredths of a second (0..=8191)
    pub time_hundredths: u16,
    /// Device letter at index 13
    pub device_code: char,
    /// Registered device name, or "UNKNOWN"
    pub device: String,
    /// Port digits, leading zeros preserved
    pub port: String,
    /// Everything after the port digits
    pub action_code: String,
    /// Registered action description, or the action code itself
    pub action: String,
}

impl DecodedEvent {
    /// Elapsed time in seconds
    pub fn elapsed_seconds(&self) -> f64 {
        f64::from(self.time_hundredths) / 100.0
    }

    /// Elapsed time with exactly two decimals (e.g. "81.91")
    pub fn time_display(&self) -> String {
        format!("{:.2}", self.elapsed_seconds())
    }
}

impl fmt::Display for DecodedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}) {}s {} {} {}",
            self.raw,
            self.time_display(),
            self.device,
            self.port,
            self.action
        )
    }
}

/// Outcome of decoding one line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodedLine {
    /// A structured record
    Event(DecodedEvent),

    /// Legacy or free text too short to be a record
    PassThrough { raw: String },

    /// A record that failed to decode, isolated during a batch decode
    Invalid { raw: String, reason: String },
}

impl DecodedLine {
    /// The line as it was read
    pub fn raw(&self) -> &str {
        match self {
            DecodedLine::Event(event) => &event.raw,
            DecodedLine::PassThrough { raw } => raw,
            DecodedLine::Invalid { raw, .. } => raw,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, DecodedLine::Invalid { .. })
    }

    pub fn as_event(&self) -> Option<&DecodedEvent> {
        match self {
            DecodedLine::Event(event) => Some(event),
            _ => None,
        }
    }
}

impl fmt::Display for DecodedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodedLine::Event(event) => write!(f, "{}", event),
            DecodedLine::PassThrough { raw } => write!(f, "{}", raw),
            DecodedLine::Invalid { raw, reason } => {
                write!(f, "({}) <invalid record: {}>", raw, reason)
            }
        }
    }
}
