//! Sensitivity-Scaled Rule Thresholds

use serde::{Deserialize, Serialize};

/// Lenient endpoints (sensitivity 0)
const LENIENT: RuleThresholds = RuleThresholds {
    nose_to_ear: 0.25,
    face_frame_ratio: 0.08,
    head_forward_angle: 18.0,
    torso_angle: 15.0,
    head_tilt_angle: 12.0,
    shoulder_diff: 10.0,
};

/// Strict endpoints (sensitivity 1)
const STRICT: RuleThresholds = RuleThresholds {
    nose_to_ear: 0.10,
    face_frame_ratio: 0.03,
    head_forward_angle: 8.0,
    torso_angle: 6.0,
    head_tilt_angle: 5.0,
    shoulder_diff: 4.0,
};

/// Allowed deviation per scored component
///
/// Angle bounds are degrees; ratio bounds are unitless. Every bound shrinks
/// monotonically as sensitivity rises.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Nose-to-ear ratio bound (forward-head composite)
    pub nose_to_ear: f32,
    /// Face-frame-ratio bound (forward-head composite)
    pub face_frame_ratio: f32,
    /// Forward-head angle bound (forward-head composite)
    pub head_forward_angle: f32,
    /// Torso angle bound (slouch)
    pub torso_angle: f32,
    /// Head roll bound (head tilt)
    pub head_tilt_angle: f32,
    /// Shoulder line angle bound (shoulder asymmetry)
    pub shoulder_diff: f32,
}

fn lerp(lenient: f32, strict: f32, t: f32) -> f32 {
    lenient + (strict - lenient) * t
}

impl RuleThresholds {
    /// Interpolate every bound between its lenient and strict endpoint
    ///
    /// `sensitivity` is clamped to [0,1]; higher sensitivity means smaller
    /// (stricter) bounds.
    pub fn scale(sensitivity: f32) -> Self {
        let t = if sensitivity.is_finite() {
            sensitivity.clamp(0.0, 1.0)
        } else {
            0.5
        };
        Self {
            nose_to_ear: lerp(LENIENT.nose_to_ear, STRICT.nose_to_ear, t),
            face_frame_ratio: lerp(LENIENT.face_frame_ratio, STRICT.face_frame_ratio, t),
            head_forward_angle: lerp(LENIENT.head_forward_angle, STRICT.head_forward_angle, t),
            torso_angle: lerp(LENIENT.torso_angle, STRICT.torso_angle, t),
            head_tilt_angle: lerp(LENIENT.head_tilt_angle, STRICT.head_tilt_angle, t),
            shoulder_diff: lerp(LENIENT.shoulder_diff, STRICT.shoulder_diff, t),
        }
    }

    #[cfg(test)]
    fn as_array(&self) -> [f32; 6] {
        [
            self.nose_to_ear,
            self.face_frame_ratio,
            self.head_forward_angle,
            self.torso_angle,
            self.head_tilt_angle,
            self.shoulder_diff,
        ]
    }
}
