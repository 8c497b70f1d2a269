//! Signal Filters
//!
//! Stateful single-channel smoothing for noisy per-frame posture signals:
//! - [`EmaFilter`]: exponential moving average
//! - [`JitterFilter`]: threshold hold, suppresses sub-threshold flutter
//!
//! One filter instance tracks one channel. `reset()` clears memory without
//! discarding configuration.

mod ema;
mod jitter;

pub use ema::EmaFilter;
pub use jitter::JitterFilter;

use thiserror::Error;

/// Filter construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("EMA alpha {0} is outside (0, 1]")]
    InvalidAlpha(f32),

    #[error("Jitter threshold {0} must be finite and non-negative")]
    InvalidThreshold(f32),
}
