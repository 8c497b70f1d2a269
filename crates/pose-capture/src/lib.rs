//! Pose Capture Interface
//!
//! Data model for pose-detector output and the trait boundary the rest of
//! the pipeline consumes:
//! - Body landmark records (frame-normalized and metric/world space)
//! - Snapshot frames pairing both landmark arrays with timing metadata
//! - The `PoseDetector` trait implemented by the host's vision runtime

pub mod detector;
pub mod landmark;
pub mod snapshot;

pub use detector::{DetectorError, PoseDetector};
pub use landmark::{Landmark, LANDMARK_COUNT};
pub use snapshot::{Snapshot, VisualFrame};
