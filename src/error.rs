use thiserror::Error;

/// Every failure the library can report.
///
/// All of these are caller-input errors: they are detected before any weight
/// is touched, so a network that returned an `Err` is left exactly as it was.
#[derive(Debug, Error)]
pub enum Error {
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("label {label} is out of range for {classes} output classes")]
    LabelOutOfRange { label: usize, classes: usize },

    /// A trailing label in a combined row that is not a non-negative integer.
    #[error("value {0} cannot be used as a class label")]
    InvalidLabel(f64),

    #[error("sample set is empty")]
    EmptySampleSet,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("invalid file format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
