//! Adaptive Baseline
//!
//! Users legitimately relax posture slightly over a long good session. The
//! operating baseline therefore creeps toward sustained good-posture
//! readings, but the cumulative offset from the calibrated baseline is
//! hard-capped per channel: without the cap the system would eventually
//! accept any posture as good.

use posture_features::{FeatureChannel, PostureFeatures};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::baseline::CalibrationBaseline;

/// Sustained good posture required before any drift is applied (seconds)
pub const WARMUP_SECS: f32 = 30.0;

/// Fraction of the remaining gap closed per second of good posture
const ADAPT_RATE_PER_SEC: f32 = 0.002;

/// Operating baseline with bounded drift
///
/// Invariant: `|current[c] - original[c]| <= cap[c]` for every channel, for
/// any input history, any `delta_secs`, and any number of updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveBaseline {
    original: PostureFeatures,
    current: PostureFeatures,
    good_posture_secs: f32,
}

impl AdaptiveBaseline {
    /// Start tracking from a freshly computed calibration baseline
    pub fn new(baseline: &CalibrationBaseline) -> Self {
        Self::from_features(baseline.features)
    }

    /// Start tracking from a bare feature mean
    pub fn from_features(features: PostureFeatures) -> Self {
        Self {
            original: features,
            current: features,
            good_posture_secs: 0.0,
        }
    }

    /// The immutable calibrated baseline
    pub fn original(&self) -> &PostureFeatures {
        &self.original
    }

    /// The operating baseline deviations are measured against
    pub fn current(&self) -> &PostureFeatures {
        &self.current
    }

    /// Seconds of good posture accumulated since the last bad frame
    pub fn good_posture_secs(&self) -> f32 {
        self.good_posture_secs
    }

    /// Feed one classified frame into the drift tracker
    ///
    /// A bad frame zeroes the good-posture accumulator but never rolls back
    /// drift already applied; only future accumulation is interrupted.
    pub fn update(&mut self, is_good: bool, raw: &PostureFeatures, delta_secs: f32) {
        if !is_good {
            self.good_posture_secs = 0.0;
            return;
        }

        let delta_secs = if delta_secs.is_finite() {
            delta_secs.max(0.0)
        } else {
            0.0
        };
        self.good_posture_secs += delta_secs;
        if self.good_posture_secs <= WARMUP_SECS {
            return;
        }

        // Move each channel toward the raw reading, then clamp the
        // cumulative offset. The clamp is the invariant; the blend factor
        // only shapes approach speed and saturates at 1 for huge gaps in
        // delta_secs.
        let blend = (ADAPT_RATE_PER_SEC * delta_secs).min(1.0);
        for &channel in &FeatureChannel::ALL {
            let original = self.original.channel(channel);
            let target = raw.channel(channel);
            if !target.is_finite() {
                continue;
            }
            let cap = channel.drift_cap();
            let drifted =
                self.current.channel(channel) + (target - self.current.channel(channel)) * blend;
            let offset = (drifted - original).clamp(-cap, cap);
            self.current.set_channel(channel, original + offset);
        }

        debug!(
            good_secs = self.good_posture_secs,
            "adaptive baseline updated"
        );
    }

    /// Restore the calibrated baseline and zero the accumulator
    pub fn reset(&mut self) {
        self.current = self.original;
        self.good_posture_secs = 0.0;
    }
}
