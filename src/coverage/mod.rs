//! Coverage module
//!
//! Provides:
//! - Clover XML loading and aggregate metrics extraction
//! - Percentage computation for each metric family
//! - Threshold evaluation

mod clover;
mod threshold;

pub use clover::*;
pub use threshold::*;

use std::collections::HashMap;

use crate::error::{GateError, Result};

/// The four metric families carried by a Clover `<metrics>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricFamily {
    Methods,
    Conditionals,
    Statements,
    /// Statements + conditionals + methods
    Elements,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 4] = [
        MetricFamily::Methods,
        MetricFamily::Conditionals,
        MetricFamily::Statements,
        MetricFamily::Elements,
    ];

    /// Attribute holding the total count, e.g. `methods`
    pub fn total_key(self) -> &'static str {
        match self {
            MetricFamily::Methods => "methods",
            MetricFamily::Conditionals => "conditionals",
            MetricFamily::Statements => "statements",
            MetricFamily::Elements => "elements",
        }
    }

    /// Attribute holding the covered count, e.g. `coveredmethods`
    pub fn covered_key(self) -> &'static str {
        match self {
            MetricFamily::Methods => "coveredmethods",
            MetricFamily::Conditionals => "coveredconditionals",
            MetricFamily::Statements => "coveredstatements",
            MetricFamily::Elements => "coveredelements",
        }
    }

    /// Computed key, e.g. `coveredmethodspercent`
    pub fn percent_key(self) -> &'static str {
        match self {
            MetricFamily::Methods => "coveredmethodspercent",
            MetricFamily::Conditionals => "coveredconditionalspercent",
            MetricFamily::Statements => "coveredstatementspercent",
            MetricFamily::Elements => "coveredelementspercent",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MetricFamily::Methods => "Methods",
            MetricFamily::Conditionals => "Conditionals",
            MetricFamily::Statements => "Statements",
            MetricFamily::Elements => "Elements",
        }
    }
}

/// Aggregate metrics read from the last `<metrics>` element of a report.
///
/// Raw counts are kept exactly as they appeared in the attributes; the
/// `*percent` entries are computed by [`get_percent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    values: HashMap<String, String>,
}

impl MetricsSnapshot {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn total(&self, family: MetricFamily) -> Option<&str> {
        self.get(family.total_key())
    }

    pub fn covered(&self, family: MetricFamily) -> Option<&str> {
        self.get(family.covered_key())
    }

    pub fn percent(&self, family: MetricFamily) -> Option<&str> {
        self.get(family.percent_key())
    }

    /// The `coveredelementspercent` value that drives the gate
    pub fn coverage_percent(&self) -> Option<&str> {
        self.percent(MetricFamily::Elements)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn insert(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// Percentage of `covered` over `total`, formatted as text.
///
/// A zero total yields `"0"`. Otherwise the ratio is computed in floating
/// point as `covered / total * 100` and rendered without rounding.
pub fn get_percent(covered: &str, total: &str, family: MetricFamily) -> Result<String> {
    let total_count = parse_count(total, family.total_key())?;
    if total_count == 0 {
        return Ok("0".to_string());
    }

    let covered_count = parse_count(covered, family.covered_key())?;
    let percent = covered_count as f64 / total_count as f64 * 100.0;

    Ok(format_float(percent))
}

fn parse_count(raw: &str, attribute: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| GateError::InvalidCount {
            attribute: attribute.to_string(),
            value: raw.to_string(),
        })
}

/// Shortest round-trip text for a float.
///
/// Integral values keep a `.0` suffix and magnitudes outside [1e-4, 1e16)
/// switch to exponent notation with a signed two-digit exponent.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{:e}", value);
        if let Some((mantissa, exponent)) = scientific.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
            }
        }
        return scientific;
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}
