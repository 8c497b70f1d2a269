//! Posture Feature Engine
//!
//! Converts raw landmark snapshots into the seven named posture channels the
//! rest of the pipeline operates on, and corrects the forward-head channel
//! for camera/screen tilt drift since calibration.
//!
//! Extraction is a pure function: no state, no I/O, no failure paths.
//! Degenerate geometry (coincident landmarks, zero spans) is absorbed by the
//! numeric-safety guard so every output channel is always finite.

mod extractor;
mod features;
mod geometry;
mod tilt;

pub use extractor::extract_features;
pub use features::{FeatureChannel, PostureFeatures};
pub use geometry::guard_span;
pub use tilt::{
    compensate, estimate_angle_change, extract_signals, ScreenAngleReference, ScreenAngleSignals,
};
