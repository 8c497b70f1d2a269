//! Snapshot and visual frame types

use serde::{Deserialize, Serialize};

use crate::landmark::{Landmark, LANDMARK_COUNT};

/// Decoded RGB frame handed to a pose detector
///
/// The posture core never inspects pixels; this record exists so detector
/// implementations share one input shape.
#[derive(Debug, Clone)]
pub struct VisualFrame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    /// Frame width
    pub width: u32,
    /// Frame height
    pub height: u32,
    /// Capture timestamp (milliseconds)
    pub timestamp_ms: u64,
}

/// One pose-detector output
///
/// `landmarks` are frame-normalized (x,y in [0,1]); `world_landmarks` are
/// metric/depth-aware. Both arrays hold [`LANDMARK_COUNT`] entries with the
/// same index semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub landmarks: Vec<Landmark>,
    pub world_landmarks: Vec<Landmark>,
    pub timestamp_ms: u64,
    pub frame_width: u32,
    pub frame_height: u32,
}

impl Snapshot {
    /// Create a snapshot from parallel landmark arrays
    pub fn new(
        landmarks: Vec<Landmark>,
        world_landmarks: Vec<Landmark>,
        timestamp_ms: u64,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        Self {
            landmarks,
            world_landmarks,
            timestamp_ms,
            frame_width,
            frame_height,
        }
    }

    /// Frame-normalized landmark at `idx`, zero landmark when out of range
    ///
    /// A zero landmark carries zero visibility, so a malformed array reads
    /// as untracked rather than panicking in the per-frame path.
    pub fn landmark(&self, idx: usize) -> Landmark {
        self.landmarks.get(idx).copied().unwrap_or_default()
    }

    /// World-space landmark at `idx`, zero landmark when out of range
    pub fn world_landmark(&self, idx: usize) -> Landmark {
        self.world_landmarks.get(idx).copied().unwrap_or_default()
    }

    /// Whether both landmark arrays carry the expected entry count
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == LANDMARK_COUNT && self.world_landmarks.len() == LANDMARK_COUNT
    }
}
