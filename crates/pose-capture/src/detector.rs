//! Pose detector trait boundary

use thiserror::Error;

use crate::snapshot::{Snapshot, VisualFrame};

/// Detector error types
#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Detector initialization failed: {0}")]
    Init(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Detector not initialized")]
    NotReady,
}

/// Upstream pose-estimation runtime
///
/// Implemented by the host against its vision model. "No pose found" is a
/// normal outcome (`Ok(None)`), never an error; the analyzer handles missing
/// and low-confidence poses on its own.
pub trait PoseDetector {
    /// Load the model and prepare for inference
    fn initialize(&mut self) -> Result<(), DetectorError>;

    /// Run pose estimation on one frame
    fn detect(
        &mut self,
        frame: &VisualFrame,
        timestamp_ms: u64,
    ) -> Result<Option<Snapshot>, DetectorError>;

    /// Whether `initialize` has completed successfully
    fn is_ready(&self) -> bool;

    /// Release model resources; `is_ready` returns false afterwards
    fn destroy(&mut self);
}
