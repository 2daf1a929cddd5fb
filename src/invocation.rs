//! Validation of the two positional inputs

use std::num::IntErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{GateError, Result};

pub const MIN_THRESHOLD: i64 = 0;
pub const MAX_THRESHOLD: i64 = 100;

/// A validated gate invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub report_path: PathBuf,
    pub minimum_coverage: i64,
}

impl Invocation {
    /// Validate the report path and the raw threshold argument.
    ///
    /// The path is checked before the threshold is parsed, so a missing
    /// report is reported even when the threshold is also bad.
    pub fn validate(report_path: &Path, raw_threshold: &str) -> Result<Self> {
        if !report_path.is_file() {
            return Err(GateError::ReportNotFound(report_path.to_path_buf()));
        }

        let minimum_coverage = parse_threshold(raw_threshold)?;

        Ok(Self {
            report_path: report_path.to_path_buf(),
            minimum_coverage,
        })
    }
}

/// Parse a base-10 threshold and check it lies in [0, 100]
pub fn parse_threshold(raw: &str) -> Result<i64> {
    let digits = raw.trim();
    let value = digits.parse::<i64>().map_err(|source| match source.kind() {
        // Still an integer, just too wide for i64
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            GateError::ThresholdOutOfRange(canonical_integer(digits))
        }
        _ => GateError::InvalidThreshold {
            value: raw.to_string(),
            source,
        },
    })?;

    if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&value) {
        return Err(GateError::ThresholdOutOfRange(value.to_string()));
    }

    Ok(value)
}

/// `+007` -> `7`, `-0012` -> `-12`
fn canonical_integer(digits: &str) -> String {
    let (sign, magnitude) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.strip_prefix('+').unwrap_or(digits)),
    };
    let magnitude = magnitude.trim_start_matches('0');
    if magnitude.is_empty() {
        "0".to_string()
    } else {
        format!("{}{}", sign, magnitude)
    }
}
