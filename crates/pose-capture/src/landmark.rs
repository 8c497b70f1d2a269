//! Body landmark types and index constants

use serde::{Deserialize, Serialize};

/// Number of landmarks per pose (MediaPipe Pose topology)
pub const LANDMARK_COUNT: usize = 33;

/// Landmark indices used by the posture pipeline
pub mod index {
    pub const NOSE: usize = 0;
    pub const LEFT_EYE: usize = 2;
    pub const RIGHT_EYE: usize = 5;
    pub const LEFT_EAR: usize = 7;
    pub const RIGHT_EAR: usize = 8;
    pub const MOUTH_LEFT: usize = 9;
    pub const MOUTH_RIGHT: usize = 10;
    pub const LEFT_SHOULDER: usize = 11;
    pub const RIGHT_SHOULDER: usize = 12;
    pub const LEFT_HIP: usize = 23;
    pub const RIGHT_HIP: usize = 24;
}

/// One tracked body point
///
/// Frame-normalized landmarks carry x,y in [0,1] relative to the visual
/// frame; world landmarks carry metric coordinates with depth. Both use the
/// same index semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Tracking confidence in [0,1]
    pub visibility: f32,
}

impl Landmark {
    /// Create a landmark with full visibility
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x,
            y,
            z,
            visibility: 1.0,
        }
    }

    /// Create a landmark with explicit visibility
    pub fn with_visibility(x: f32, y: f32, z: f32, visibility: f32) -> Self {
        Self { x, y, z, visibility }
    }

    /// Euclidean distance to another landmark in the x/y plane
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Midpoint between two landmarks (visibility is the pairwise minimum)
    pub fn midpoint(a: &Landmark, b: &Landmark) -> Landmark {
        Landmark {
            x: (a.x + b.x) / 2.0,
            y: (a.y + b.y) / 2.0,
            z: (a.z + b.z) / 2.0,
            visibility: a.visibility.min(b.visibility),
        }
    }
}
