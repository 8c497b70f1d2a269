//! Analyzer configuration

use serde::{Deserialize, Serialize};

use crate::rules::RuleToggles;

/// Analyzer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Strictness dial in [0,1]; higher fires rules sooner
    pub sensitivity: f32,

    /// EMA smoothing factor per feature channel, in (0,1]
    pub smoothing_alpha: f32,

    /// Jitter hold threshold for angle channels (degrees)
    pub angle_jitter_threshold: f32,

    /// Jitter hold threshold for ratio channels
    pub ratio_jitter_threshold: f32,

    /// Which rules are evaluated
    pub toggles: RuleToggles,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.5,
            smoothing_alpha: 0.3,
            angle_jitter_threshold: 0.5,
            ratio_jitter_threshold: 0.005,
            toggles: RuleToggles::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Create strict config (fires on smaller deviations)
    pub fn strict() -> Self {
        Self {
            sensitivity: 0.8,
            ..Default::default()
        }
    }

    /// Create lenient config (tolerates larger deviations)
    pub fn lenient() -> Self {
        Self {
            sensitivity: 0.2,
            ..Default::default()
        }
    }
}
