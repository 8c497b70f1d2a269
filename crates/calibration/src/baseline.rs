//! Calibration Baseline Records

use posture_features::{FeatureChannel, PostureFeatures, ScreenAngleReference};
use serde::{Deserialize, Serialize};

/// Reference posture a user is judged against
///
/// Created once per calibration session. `angle_references` is populated
/// only by multi-angle calibration, ordered as the batches were closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBaseline {
    /// Per-channel mean of the calibration samples
    pub features: PostureFeatures,
    /// When the baseline was computed (milliseconds since epoch)
    pub timestamp_ms: u64,
    /// Screen-angle reference points, one per closed angle batch
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub angle_references: Vec<ScreenAngleReference>,
}

impl CalibrationBaseline {
    /// Build a single-angle baseline from a feature mean
    pub fn new(features: PostureFeatures, timestamp_ms: u64) -> Self {
        Self {
            features,
            timestamp_ms,
            angle_references: Vec::new(),
        }
    }

    /// The first (canonical) angle reference, if multi-angle calibrated
    pub fn primary_reference(&self) -> Option<&ScreenAngleReference> {
        self.angle_references.first()
    }
}

/// Per-channel population standard deviation of the calibration samples
///
/// Diagnostic only: surfaced to calibration UI so a noisy session is visible,
/// never fed into rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineSpread {
    pub per_channel: PostureFeatures,
}

impl BaselineSpread {
    /// Largest per-channel spread among the angle channels (degrees)
    pub fn max_angle_spread(&self) -> f32 {
        FeatureChannel::ALL
            .iter()
            .filter(|c| c.is_angle())
            .map(|&c| self.per_channel.channel(c))
            .fold(0.0, f32::max)
    }
}

/// Result of reducing a calibration session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineSummary {
    pub baseline: CalibrationBaseline,
    pub spread: BaselineSpread,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_angle_baseline_has_no_references() {
        let baseline = CalibrationBaseline::new(PostureFeatures::default(), 42);
        assert!(baseline.primary_reference().is_none());
        assert_eq!(baseline.timestamp_ms, 42);
    }

    #[test]
    fn test_max_angle_spread_ignores_ratio_channels() {
        let mut per_channel = PostureFeatures::default();
        per_channel.set_channel(FeatureChannel::TorsoAngle, 2.5);
        per_channel.set_channel(FeatureChannel::FaceY, 9.0); // ratio channel
        let spread = BaselineSpread { per_channel };
        assert_eq!(spread.max_angle_spread(), 2.5);
    }
}
