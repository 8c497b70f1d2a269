//! Ergonomic Rules and Evaluation

use posture_features::PostureFeatures;
use serde::{Deserialize, Serialize};

use crate::thresholds::RuleThresholds;

/// Ergonomic rule types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostureRule {
    /// Head drifting forward of the shoulders
    ForwardHead,

    /// Torso leaning forward of the hips
    Slouch,

    /// Head rolled toward one shoulder
    HeadTilt,

    /// Face too close to the screen (shares the forward-head scoring path)
    TooClose,

    /// One shoulder sitting higher than the other
    ShoulderAsymmetry,
}

/// Enable flags per rule
///
/// Immutable value type: `with_*` builders return an updated copy, so a
/// toggle set can be shared and swapped atomically. All rules start enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleToggles {
    forward_head: bool,
    slouch: bool,
    head_tilt: bool,
    too_close: bool,
    shoulder_asymmetry: bool,
}

impl Default for RuleToggles {
    fn default() -> Self {
        Self {
            forward_head: true,
            slouch: true,
            head_tilt: true,
            too_close: true,
            shoulder_asymmetry: true,
        }
    }
}

impl RuleToggles {
    /// All rules disabled
    pub fn none() -> Self {
        Self {
            forward_head: false,
            slouch: false,
            head_tilt: false,
            too_close: false,
            shoulder_asymmetry: false,
        }
    }

    pub fn with_forward_head(self, enabled: bool) -> Self {
        Self {
            forward_head: enabled,
            ..self
        }
    }

    pub fn with_slouch(self, enabled: bool) -> Self {
        Self {
            slouch: enabled,
            ..self
        }
    }

    pub fn with_head_tilt(self, enabled: bool) -> Self {
        Self {
            head_tilt: enabled,
            ..self
        }
    }

    pub fn with_too_close(self, enabled: bool) -> Self {
        Self {
            too_close: enabled,
            ..self
        }
    }

    pub fn with_shoulder_asymmetry(self, enabled: bool) -> Self {
        Self {
            shoulder_asymmetry: enabled,
            ..self
        }
    }

    pub fn is_enabled(&self, rule: PostureRule) -> bool {
        match rule {
            PostureRule::ForwardHead => self.forward_head,
            PostureRule::Slouch => self.slouch,
            PostureRule::HeadTilt => self.head_tilt,
            PostureRule::TooClose => self.too_close,
            PostureRule::ShoulderAsymmetry => self.shoulder_asymmetry,
        }
    }
}

/// One rule's determination that posture exceeds its allowed deviation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: PostureRule,
    /// Normalized severity in [0,1]
    pub severity: f32,
    pub message: String,
}

impl Violation {
    fn new(rule: PostureRule, severity: f32, message: &str) -> Self {
        Self {
            rule,
            severity,
            message: message.to_string(),
        }
    }
}

/// Composite weight on the nose-to-ear deviation
const FORWARD_HEAD_NTE_WEIGHT: f32 = 0.6;

/// Composite weight on the face-frame-ratio deviation
const FORWARD_HEAD_FFR_WEIGHT: f32 = 0.2;

/// Composite weight on the forward-head angle deviation
const FORWARD_HEAD_ANGLE_WEIGHT: f32 = 0.2;

fn positive(deviation: f32) -> f32 {
    deviation.max(0.0)
}

/// Severity from a normalized score: 0 at the firing boundary, saturating
/// at twice the threshold
fn severity(score: f32) -> f32 {
    (score - 1.0).clamp(0.0, 1.0)
}

/// Score deviations against thresholds and return the firing violations
///
/// Pure: identical inputs always yield an identical violation set. The
/// forward-head and too-close rules share one combined score; the remaining
/// rules are single-component. Deviations are measured from the operating
/// baseline; the head-tilt deviation is expected as a magnitude (tilting to
/// either side counts).
pub fn evaluate(
    deviations: &PostureFeatures,
    thresholds: &RuleThresholds,
    toggles: &RuleToggles,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    if toggles.forward_head || toggles.too_close {
        let score = FORWARD_HEAD_NTE_WEIGHT * positive(deviations.nose_to_ear_avg)
            / thresholds.nose_to_ear
            + FORWARD_HEAD_FFR_WEIGHT * positive(deviations.face_frame_ratio)
                / thresholds.face_frame_ratio
            + FORWARD_HEAD_ANGLE_WEIGHT * positive(deviations.head_forward_angle)
                / thresholds.head_forward_angle;
        if score >= 1.0 {
            let (rule, message) = if toggles.forward_head {
                (
                    PostureRule::ForwardHead,
                    "Head is drifting forward of the shoulders",
                )
            } else {
                (PostureRule::TooClose, "Sitting too close to the screen")
            };
            violations.push(Violation::new(rule, severity(score), message));
        }
    }

    if toggles.slouch {
        let score = positive(deviations.torso_angle) / thresholds.torso_angle;
        if score >= 1.0 {
            violations.push(Violation::new(
                PostureRule::Slouch,
                severity(score),
                "Torso is slouching forward",
            ));
        }
    }

    if toggles.head_tilt {
        let score = positive(deviations.head_tilt_angle) / thresholds.head_tilt_angle;
        if score >= 1.0 {
            violations.push(Violation::new(
                PostureRule::HeadTilt,
                severity(score),
                "Head is tilted to one side",
            ));
        }
    }

    if toggles.shoulder_asymmetry {
        let score = positive(deviations.shoulder_diff) / thresholds.shoulder_diff;
        if score >= 1.0 {
            violations.push(Violation::new(
                PostureRule::ShoulderAsymmetry,
                severity(score),
                "Shoulders are uneven",
            ));
        }
    }

    violations
}
