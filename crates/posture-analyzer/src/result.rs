//! Classification results

use posture_features::PostureFeatures;
use serde::{Deserialize, Serialize};

use crate::rules::Violation;

/// One frame's posture classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Whether the posture currently counts as good
    pub is_good: bool,

    /// Rules exceeded this frame (empty when good)
    pub violations: Vec<Violation>,

    /// Trust in this classification, from critical-landmark visibility, [0,1]
    pub confidence: f32,

    /// Snapshot timestamp the result was computed for
    pub timestamp_ms: u64,
}

impl ClassificationResult {
    /// A "no new information" result for a low-confidence frame
    pub(crate) fn low_confidence(confidence: f32, timestamp_ms: u64) -> Self {
        Self {
            is_good: true,
            violations: Vec::new(),
            confidence,
            timestamp_ms,
        }
    }
}

/// Classification plus the intermediate pipeline values, for diagnostic UI
///
/// The intermediates are `None` when the frame was discarded for low
/// confidence (no extraction ran).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedAnalysis {
    pub result: ClassificationResult,

    /// Features as extracted (after tilt compensation, before smoothing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<PostureFeatures>,

    /// Features after per-channel smoothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothed: Option<PostureFeatures>,

    /// Smoothed features minus the operating baseline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deviations: Option<PostureFeatures>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_confidence_result_is_neutral() {
        let result = ClassificationResult::low_confidence(0.2, 99);
        assert!(result.is_good);
        assert!(result.violations.is_empty());
        assert_eq!(result.confidence, 0.2);
        assert_eq!(result.timestamp_ms, 99);
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let result = ClassificationResult {
            is_good: false,
            violations: vec![],
            confidence: 0.9,
            timestamp_ms: 1234,
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: ClassificationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
