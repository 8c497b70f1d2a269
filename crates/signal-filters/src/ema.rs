//! Exponential Moving Average Filter

use crate::FilterError;

/// Exponential moving average over a single signal channel
///
/// The first update after construction or reset returns the input unchanged,
/// so the filter never injects a synthetic warm-up value.
#[derive(Debug, Clone)]
pub struct EmaFilter {
    alpha: f32,
    prev: Option<f32>,
}

impl EmaFilter {
    /// Create a filter with smoothing factor `alpha` in (0, 1]
    ///
    /// Higher alpha tracks the input faster; alpha of 1 disables smoothing.
    pub fn new(alpha: f32) -> Result<Self, FilterError> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(FilterError::InvalidAlpha(alpha));
        }
        Ok(Self { alpha, prev: None })
    }

    /// Feed a sample and get the smoothed output
    pub fn update(&mut self, value: f32) -> f32 {
        let out = match self.prev {
            Some(prev) => self.alpha * value + (1.0 - self.alpha) * prev,
            None => value,
        };
        self.prev = Some(out);
        out
    }

    /// Clear filter memory, keeping the configured alpha
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Configured smoothing factor
    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}
