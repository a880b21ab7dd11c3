//! Unified error hierarchy for vdotrs
//!
//! Every failure the engine, the record store and the exporters can produce is
//! expressed as a [`VdotError`]. Errors carry a stable [`ErrorKind`] so the
//! surrounding service can hand a structured `{kind, message}` payload to its
//! client, and a severity that maps onto tracing levels.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all vdotrs operations
#[derive(Debug, Error)]
pub enum VdotError {
    /// Distance is negative, non-finite, or zero where it is used as a divisor
    #[error("Invalid distance: {0}")]
    InvalidDistance(String),

    /// Duration is not three colon-separated non-negative integers
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// No stored performance exists for the requesting user
    #[error("Record not found for user {user_id}{}", record_suffix(.record_id))]
    RecordNotFound { user_id: u64, record_id: Option<u64> },

    /// Numeric failures inside the model
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn record_suffix(record_id: &Option<u64>) -> String {
    record_id
        .map(|id| format!(" (record {})", id))
        .unwrap_or_default()
}

/// Calculation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalculationError {
    /// Division by zero
    #[error("Division by zero in {calculation}")]
    DivisionByZero { calculation: String },

    /// A pace or velocity came out non-positive or non-finite
    #[error("Degenerate pace in {calculation}: {value}")]
    DegeneratePace { calculation: String, value: f64 },
}

/// Report export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// Unsupported output format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Serializer failure
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Writing the export target failed
    #[error("Export failed to {}: {reason}", .path.display())]
    WriteFailed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::Serialization(err.to_string())
    }
}

/// Result type alias for vdotrs operations
pub type Result<T> = std::result::Result<T, VdotError>;

/// Stable error classification handed to API consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidDistance,
    InvalidDuration,
    RecordNotFound,
    DivisionByZero,
    DegeneratePace,
    Export,
    Configuration,
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::InvalidDistance => "invalid_distance",
            ErrorKind::InvalidDuration => "invalid_duration",
            ErrorKind::RecordNotFound => "record_not_found",
            ErrorKind::DivisionByZero => "division_by_zero",
            ErrorKind::DegeneratePace => "degenerate_pace",
            ErrorKind::Export => "export",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Io => "io",
        };
        f.write_str(name)
    }
}

/// Structured error payload: the kind plus a human-readable message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

impl VdotError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            VdotError::InvalidDistance(_) => ErrorKind::InvalidDistance,
            VdotError::InvalidDuration(_) => ErrorKind::InvalidDuration,
            VdotError::RecordNotFound { .. } => ErrorKind::RecordNotFound,
            VdotError::Calculation(CalculationError::DivisionByZero { .. }) => {
                ErrorKind::DivisionByZero
            }
            VdotError::Calculation(CalculationError::DegeneratePace { .. }) => {
                ErrorKind::DegeneratePace
            }
            VdotError::Export(_) => ErrorKind::Export,
            VdotError::Configuration(_) => ErrorKind::Configuration,
            VdotError::Io(_) => ErrorKind::Io,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            VdotError::InvalidDistance(_) | VdotError::InvalidDuration(_) => ErrorSeverity::Warning,
            VdotError::RecordNotFound { .. } => ErrorSeverity::Warning,
            VdotError::Calculation(_) => ErrorSeverity::Error,
            VdotError::Configuration(_) => ErrorSeverity::Error,
            VdotError::Export(_) | VdotError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            VdotError::InvalidDistance(_) => {
                "The recorded distance must be a positive number.".to_string()
            }
            VdotError::InvalidDuration(value) => {
                format!("Time must be written as HH:MM:SS ({})", value)
            }
            VdotError::RecordNotFound { .. } => {
                "No performance has been recorded yet. Add a race result first.".to_string()
            }
            VdotError::Calculation(CalculationError::DivisionByZero { .. }) => {
                "The recorded time must be longer than zero.".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Build the structured payload surfaced to the caller
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            kind: self.kind(),
            message: self.user_message(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation
    Error,
    /// Rejected input; the caller can correct it
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}
