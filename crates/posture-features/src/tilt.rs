//! Screen-Tilt Compensation
//!
//! A laptop screen (and its camera) rarely stays at the calibration angle.
//! This module estimates how far the effective viewing angle has moved since
//! calibration from distance-invariant face ratios, and corrects the
//! forward-head channel accordingly. It is the cheap alternative to a full
//! multi-angle calibration; accuracy degrades gracefully for large tilt
//! excursions.

use pose_capture::landmark::{index, Landmark};
use serde::{Deserialize, Serialize};

use crate::features::PostureFeatures;
use crate::geometry::guard_span;

/// Pitch estimate weight on the nose vertical-position delta
const FACE_Y_WEIGHT: f32 = 45.0;

/// Pitch estimate weight on the nose-to-mouth ratio delta
const NOSE_CHIN_WEIGHT: f32 = 30.0;

/// Pitch estimate weight on the eye-to-mouth ratio delta
const EYE_MOUTH_WEIGHT: f32 = 20.0;

/// Fraction of the estimated pitch change applied to the forward-head angle
const PITCH_GAIN: f32 = 0.8;

/// Distance-invariant signals used to detect viewing-angle change
///
/// Derived purely from frame-normalized landmarks. These never feed rule
/// evaluation directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenAngleSignals {
    /// Nose vertical position in the frame
    pub face_y: f32,
    /// Nose to mouth-midpoint distance over ear span
    pub nose_chin_ratio: f32,
    /// Eye-midpoint to mouth-midpoint distance over ear span
    pub eye_mouth_ratio: f32,
}

/// Signals captured at a known screen angle during calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenAngleReference {
    /// Screen tilt the signals were captured at (degrees)
    pub angle_degrees: f32,
    pub signals: ScreenAngleSignals,
}

impl ScreenAngleReference {
    /// Snapshot the given signals as a calibration-time reference
    pub fn capture(angle_degrees: f32, signals: ScreenAngleSignals) -> Self {
        Self {
            angle_degrees,
            signals,
        }
    }
}

fn get(landmarks: &[Landmark], idx: usize) -> Landmark {
    landmarks.get(idx).copied().unwrap_or_default()
}

/// Extract viewing-angle signals from frame-normalized landmarks
pub fn extract_signals(frame: &[Landmark]) -> ScreenAngleSignals {
    let nose = get(frame, index::NOSE);
    let l_ear = get(frame, index::LEFT_EAR);
    let r_ear = get(frame, index::RIGHT_EAR);
    let mouth_mid = Landmark::midpoint(
        &get(frame, index::MOUTH_LEFT),
        &get(frame, index::MOUTH_RIGHT),
    );
    let eye_mid = Landmark::midpoint(&get(frame, index::LEFT_EYE), &get(frame, index::RIGHT_EYE));

    let ear_span = guard_span((l_ear.x - r_ear.x).abs());

    ScreenAngleSignals {
        face_y: nose.y,
        nose_chin_ratio: nose.planar_distance(&mouth_mid) / ear_span,
        eye_mouth_ratio: eye_mid.planar_distance(&mouth_mid) / ear_span,
    }
}

/// Estimate how far the effective viewing angle has moved since calibration
///
/// Fixed-weight linear combination of the three signal deltas, in degrees of
/// pitch. Positive means the camera now looks at the face from lower down.
pub fn estimate_angle_change(current: &ScreenAngleSignals, reference: &ScreenAngleSignals) -> f32 {
    (current.face_y - reference.face_y) * FACE_Y_WEIGHT
        + (current.nose_chin_ratio - reference.nose_chin_ratio) * NOSE_CHIN_WEIGHT
        + (current.eye_mouth_ratio - reference.eye_mouth_ratio) * EYE_MOUTH_WEIGHT
}

/// Correct the forward-head channel for an estimated pitch change
///
/// Only `head_forward_angle` is adjusted; every other channel passes through
/// unchanged.
pub fn compensate(features: &PostureFeatures, pitch_delta: f32) -> PostureFeatures {
    PostureFeatures {
        head_forward_angle: features.head_forward_angle - pitch_delta * PITCH_GAIN,
        ..*features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_signals_estimate_zero() {
        let signals = ScreenAngleSignals {
            face_y: 0.42,
            nose_chin_ratio: 0.55,
            eye_mouth_ratio: 0.48,
        };
        let delta = estimate_angle_change(&signals, &signals);
        assert!(delta.abs() < 0.5);
    }

    #[test]
    fn test_face_y_delta_maps_to_pitch() {
        let reference = ScreenAngleSignals {
            face_y: 0.40,
            nose_chin_ratio: 0.55,
            eye_mouth_ratio: 0.48,
        };
        let current = ScreenAngleSignals {
            face_y: 0.50,
            ..reference
        };
        let delta = estimate_angle_change(&current, &reference);
        assert!((delta - 4.5).abs() < 1.0);
    }

    #[test]
    fn test_compensate_touches_only_forward_head() {
        let features = PostureFeatures {
            head_forward_angle: 20.0,
            torso_angle: 5.0,
            head_tilt_angle: -2.0,
            face_frame_ratio: 0.12,
            face_y: 0.4,
            nose_to_ear_avg: 0.8,
            shoulder_diff: 1.5,
        };
        let out = compensate(&features, 10.0);
        assert_eq!(out.head_forward_angle, 12.0);
        assert_eq!(out.torso_angle, features.torso_angle);
        assert_eq!(out.head_tilt_angle, features.head_tilt_angle);
        assert_eq!(out.face_frame_ratio, features.face_frame_ratio);
        assert_eq!(out.face_y, features.face_y);
        assert_eq!(out.nose_to_ear_avg, features.nose_to_ear_avg);
        assert_eq!(out.shoulder_diff, features.shoulder_diff);
    }

    #[test]
    fn test_signals_from_degenerate_frame_are_finite() {
        let signals = extract_signals(&[]);
        assert!(signals.face_y.is_finite());
        assert!(signals.nose_chin_ratio.is_finite());
        assert!(signals.eye_mouth_ratio.is_finite());
    }

    #[test]
    fn test_reference_capture_is_identity() {
        let signals = ScreenAngleSignals {
            face_y: 0.4,
            nose_chin_ratio: 0.5,
            eye_mouth_ratio: 0.45,
        };
        let reference = ScreenAngleReference::capture(15.0, signals);
        assert_eq!(reference.angle_degrees, 15.0);
        assert_eq!(reference.signals, signals);
    }
}
