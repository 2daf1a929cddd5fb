//! Error taxonomy for the coverage gate

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Cannot retrieve the clover file {}", .0.display())]
    ReportNotFound(PathBuf),

    #[error("Minimal coverage '{value}' is not a base-10 integer: {source}")]
    InvalidThreshold {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Minimal coverage {0} percent must be in [0,100]")]
    ThresholdOutOfRange(String),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing Clover XML at byte {position}: {message}")]
    MalformedXml { position: usize, message: String },

    #[error("No <metrics> element found in the Clover report")]
    MetricsNotFound,

    #[error("<metrics> element has no '{0}' attribute")]
    MissingAttribute(String),

    #[error("Attribute '{attribute}' is not an integer: '{value}'")]
    InvalidCount { attribute: String, value: String },

    #[error("Coverage percentage '{0}' is not a number")]
    InvalidPercent(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
