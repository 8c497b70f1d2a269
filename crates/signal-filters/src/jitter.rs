//! Threshold-Hold (Jitter) Filter

use crate::FilterError;

/// Holds its output until the input moves by at least `threshold`
///
/// Sub-threshold wiggle is flattened to the last accepted value; a change at
/// or above the threshold snaps the output exactly to the new input.
#[derive(Debug, Clone)]
pub struct JitterFilter {
    threshold: f32,
    prev: Option<f32>,
}

impl JitterFilter {
    /// Create a filter with a non-negative hold threshold
    pub fn new(threshold: f32) -> Result<Self, FilterError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(FilterError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            prev: None,
        })
    }

    /// Feed a sample and get the held or snapped output
    pub fn update(&mut self, value: f32) -> f32 {
        let out = match self.prev {
            Some(prev) if (value - prev).abs() < self.threshold => prev,
            _ => value,
        };
        self.prev = Some(out);
        out
    }

    /// Clear filter memory, keeping the configured threshold
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Configured hold threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_invalid_threshold_rejected() {
        assert!(JitterFilter::new(-0.1).is_err());
        assert!(JitterFilter::new(f32::NAN).is_err());
        assert!(JitterFilter::new(f32::INFINITY).is_err());
        assert!(JitterFilter::new(0.0).is_ok());
    }

    #[test]
    fn test_first_update_passes_through() {
        let mut filter = JitterFilter::new(2.0).unwrap();
        assert_eq!(filter.update(5.0), 5.0);
    }

    #[test]
    fn test_holds_below_threshold() {
        let mut filter = JitterFilter::new(2.0).unwrap();
        filter.update(10.0);
        assert_eq!(filter.update(11.0), 10.0);
        assert_eq!(filter.update(9.5), 10.0);
    }

    #[test]
    fn test_snaps_at_threshold() {
        let mut filter = JitterFilter::new(2.0).unwrap();
        filter.update(10.0);
        assert_eq!(filter.update(12.0), 12.0);
        assert_eq!(filter.update(8.5), 8.5);
    }

    #[test]
    fn test_zero_threshold_tracks_input() {
        let mut filter = JitterFilter::new(0.0).unwrap();
        filter.update(1.0);
        assert_eq!(filter.update(1.0001), 1.0001);
    }

    proptest! {
        #[test]
        fn prop_output_is_held_or_exact(threshold in 0.0f32..10.0, xs in proptest::collection::vec(-100.0f32..100.0, 1..50)) {
            let mut filter = JitterFilter::new(threshold).unwrap();
            let mut prev: Option<f32> = None;
            for &x in &xs {
                let out = filter.update(x);
                match prev {
                    Some(p) if (x - p).abs() < threshold => prop_assert_eq!(out, p),
                    _ => prop_assert_eq!(out, x),
                }
                prev = Some(out);
            }
        }
    }
}
