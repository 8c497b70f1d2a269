//! Posture Feature Channels

use serde::{Deserialize, Serialize};

/// Drift cap for angle channels (degrees)
pub const ANGLE_DRIFT_CAP: f32 = 8.0;

/// Drift cap for ratio channels
pub const RATIO_DRIFT_CAP: f32 = 0.1;

/// The seven numeric channels derived from one landmark snapshot
///
/// Angle channels are degrees; ratio channels are unitless and derived from
/// frame-normalized landmarks. All channels are finite for any valid
/// snapshot, including degenerate ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PostureFeatures {
    /// Forward lean of the head relative to the shoulders (degrees)
    pub head_forward_angle: f32,
    /// Forward lean of the torso relative to the hips (degrees)
    pub torso_angle: f32,
    /// Head roll, ear line vs horizontal (degrees, signed)
    pub head_tilt_angle: f32,
    /// Horizontal ear span in the visual frame (proximity proxy)
    pub face_frame_ratio: f32,
    /// Nose vertical position in the visual frame
    pub face_y: f32,
    /// Mean nose-to-ear distance over ear span (forward-head proxy)
    pub nose_to_ear_avg: f32,
    /// Angular height difference between shoulders (degrees, magnitude)
    pub shoulder_diff: f32,
}

/// Closed set of posture feature channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureChannel {
    HeadForwardAngle,
    TorsoAngle,
    HeadTiltAngle,
    FaceFrameRatio,
    FaceY,
    NoseToEarAvg,
    ShoulderDiff,
}

impl FeatureChannel {
    /// All channels, in the fixed pipeline order
    pub const ALL: [FeatureChannel; 7] = [
        FeatureChannel::HeadForwardAngle,
        FeatureChannel::TorsoAngle,
        FeatureChannel::HeadTiltAngle,
        FeatureChannel::FaceFrameRatio,
        FeatureChannel::FaceY,
        FeatureChannel::NoseToEarAvg,
        FeatureChannel::ShoulderDiff,
    ];

    /// Whether this channel carries degrees (vs a unitless ratio)
    pub fn is_angle(self) -> bool {
        matches!(
            self,
            FeatureChannel::HeadForwardAngle
                | FeatureChannel::TorsoAngle
                | FeatureChannel::HeadTiltAngle
                | FeatureChannel::ShoulderDiff
        )
    }

    /// Maximum cumulative adaptive-baseline offset for this channel
    pub fn drift_cap(self) -> f32 {
        if self.is_angle() {
            ANGLE_DRIFT_CAP
        } else {
            RATIO_DRIFT_CAP
        }
    }
}

impl PostureFeatures {
    /// Read one channel by tag
    pub fn channel(&self, channel: FeatureChannel) -> f32 {
        match channel {
            FeatureChannel::HeadForwardAngle => self.head_forward_angle,
            FeatureChannel::TorsoAngle => self.torso_angle,
            FeatureChannel::HeadTiltAngle => self.head_tilt_angle,
            FeatureChannel::FaceFrameRatio => self.face_frame_ratio,
            FeatureChannel::FaceY => self.face_y,
            FeatureChannel::NoseToEarAvg => self.nose_to_ear_avg,
            FeatureChannel::ShoulderDiff => self.shoulder_diff,
        }
    }

    /// Write one channel by tag
    pub fn set_channel(&mut self, channel: FeatureChannel, value: f32) {
        match channel {
            FeatureChannel::HeadForwardAngle => self.head_forward_angle = value,
            FeatureChannel::TorsoAngle => self.torso_angle = value,
            FeatureChannel::HeadTiltAngle => self.head_tilt_angle = value,
            FeatureChannel::FaceFrameRatio => self.face_frame_ratio = value,
            FeatureChannel::FaceY => self.face_y = value,
            FeatureChannel::NoseToEarAvg => self.nose_to_ear_avg = value,
            FeatureChannel::ShoulderDiff => self.shoulder_diff = value,
        }
    }

    /// Whether every channel holds a finite value
    pub fn is_finite(&self) -> bool {
        FeatureChannel::ALL
            .iter()
            .all(|&c| self.channel(c).is_finite())
    }
}
