//! Clovergate - Clover coverage gate for CI
//!
//! Reads a Clover XML coverage report and checks its aggregate coverage:
//! - Argument validation (report path, minimum percentage)
//! - Clover XML loading with well-formedness checks
//! - Extraction of the methods/conditionals/statements/elements metrics
//! - Threshold evaluation mapped to a process exit code

pub mod coverage;
pub mod error;
pub mod invocation;

pub use coverage::{
    evaluate, get_metrics, get_percent, load_clover, parse_clover_string, CloverDocument,
    GateOutcome, MetricFamily, MetricsSnapshot,
};
pub use error::GateError;
pub use invocation::Invocation;
