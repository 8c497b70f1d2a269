//! Posture Analyzer
//!
//! Per-frame posture classification:
//! - Sensitivity-scaled rule thresholds and pure rule evaluation
//! - Per-channel smoothing against sensor noise
//! - Bounded adaptive-baseline drift over long sessions
//! - Confidence gating for transient tracking loss
//!
//! The caller drives `analyze` at a cadence of its choosing; the analyzer is
//! fully synchronous, owns all of its state, and never throws for
//! data-quality reasons in the per-frame path.

mod analyzer;
mod config;
mod result;
mod rules;
mod thresholds;

pub use analyzer::PostureAnalyzer;
pub use config::AnalyzerConfig;
pub use result::{ClassificationResult, DetailedAnalysis};
pub use rules::{evaluate, PostureRule, RuleToggles, Violation};
pub use thresholds::RuleThresholds;

use signal_filters::FilterError;
use thiserror::Error;

/// Analyzer construction errors
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid smoothing configuration: {0}")]
    Filter(#[from] FilterError),
}
