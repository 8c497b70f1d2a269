//! Posture Calibration
//!
//! Personalizes posture judgment per user:
//! - [`CalibrationSession`] accumulates feature samples during a guided
//!   session (optionally one batch per screen angle) and reduces them to a
//!   [`CalibrationBaseline`]
//! - [`AdaptiveBaseline`] lets the operating baseline creep toward sustained
//!   good-posture readings, hard-capped per channel
//!
//! The baseline is a plain data record; the host persists it and re-supplies
//! it to the analyzer after a restart.

mod adaptive;
mod baseline;
mod session;

pub use adaptive::{AdaptiveBaseline, WARMUP_SECS};
pub use baseline::{BaselineSpread, BaselineSummary, CalibrationBaseline};
pub use session::{CalibrationSession, SampleProgress};

use thiserror::Error;

/// Calibration error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalibrationError {
    /// Baseline requested before any sample was accumulated
    #[error("Cannot compute a baseline from an empty calibration session")]
    EmptySession,

    /// Angle batch closed with zero samples
    #[error("Cannot complete an angle batch with zero samples")]
    EmptyAngleBatch,

    /// Multi-angle baseline requested before any batch was closed
    #[error("Multi-angle baseline requires at least one completed angle batch")]
    NoAngleBatches,
}
