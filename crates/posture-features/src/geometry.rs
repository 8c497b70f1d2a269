//! Numeric-Safety Helpers

/// Smallest span treated as non-degenerate
const MIN_SPAN: f32 = 1e-6;

/// Guard a landmark-derived denominator against degenerate geometry
///
/// Zero-length (or non-finite) spans are floored to 1.0 so downstream ratios
/// stay finite. This is documented substitution policy, not an error path:
/// coincident landmarks read as "no signal", never as NaN or a panic.
pub fn guard_span(span: f32) -> f32 {
    if !span.is_finite() || span.abs() <= MIN_SPAN {
        1.0
    } else {
        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_span_floored_to_one() {
        assert_eq!(guard_span(0.0), 1.0);
        assert_eq!(guard_span(1e-9), 1.0);
        assert_eq!(guard_span(-1e-9), 1.0);
    }

    #[test]
    fn test_normal_span_passes_through() {
        assert_eq!(guard_span(0.12), 0.12);
        assert_eq!(guard_span(-0.3), -0.3);
    }

    #[test]
    fn test_non_finite_span_floored() {
        assert_eq!(guard_span(f32::NAN), 1.0);
        assert_eq!(guard_span(f32::INFINITY), 1.0);
    }
}
