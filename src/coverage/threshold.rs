//! Coverage threshold gate

use colored::Colorize;

use super::{MetricFamily, MetricsSnapshot};
use crate::error::{GateError, Result};

/// Result of comparing the aggregate coverage against the minimum
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    /// Aggregate percentage exactly as extracted from the report
    pub coverage_text: String,
    pub coverage: f64,
    pub threshold: f64,
    pub passed: bool,
}

impl GateOutcome {
    /// The single line written to stdout
    pub fn summary_line(&self) -> String {
        format!("The code coverage is {}%", self.coverage_text)
    }

    pub fn delta(&self) -> f64 {
        self.coverage - self.threshold
    }

    pub fn exit_code(&self) -> i32 {
        if self.passed {
            0
        } else {
            1
        }
    }
}

/// Evaluate the aggregate elements coverage against a minimum percentage.
/// Equal coverage passes.
pub fn evaluate(metrics: &MetricsSnapshot, minimum_coverage: i64) -> Result<GateOutcome> {
    let coverage_text = metrics
        .coverage_percent()
        .ok_or_else(|| GateError::MissingAttribute(MetricFamily::Elements.percent_key().to_string()))?
        .to_string();

    let coverage = coverage_text
        .parse::<f64>()
        .map_err(|_| GateError::InvalidPercent(coverage_text.clone()))?;
    let threshold = minimum_coverage as f64;

    Ok(GateOutcome {
        passed: coverage >= threshold,
        coverage_text,
        coverage,
        threshold,
    })
}

/// Per-family breakdown on stderr
pub fn print_breakdown(metrics: &MetricsSnapshot, outcome: &GateOutcome) {
    for family in MetricFamily::ALL {
        let (Some(covered), Some(total), Some(percent)) = (
            metrics.covered(family),
            metrics.total(family),
            metrics.percent(family),
        ) else {
            continue;
        };

        if family == MetricFamily::Elements {
            let status = if outcome.passed { "✓".green() } else { "✗".red() };
            let delta = outcome.delta();
            let delta_str = if delta >= 0.0 {
                format!("+{:.1}%", delta).green()
            } else {
                format!("{:.1}%", delta).red()
            };
            eprintln!(
                "  {} {}: {}/{} = {}% (threshold: {}%, {})",
                status,
                family.label().bold(),
                covered,
                total,
                percent,
                outcome.threshold,
                delta_str
            );
        } else {
            eprintln!(
                "  {} {}: {}/{} = {}%",
                "•".dimmed(),
                family.label(),
                covered,
                total,
                percent
            );
        }
    }
}
