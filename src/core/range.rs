//! Normalized numeric ranges used by visibility checks and interpolation.
//!
//! Configuration documents have historically disagreed about which bound of a
//! zoom range is the "min" one. Every range here is stored in resolution order
//! (`low <= high`) and swapped on construction, so callers never need to care
//! which convention a document used.

use serde::{Deserialize, Serialize};

/// Closed resolution interval in which a marker or label is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomVisibilityRange {
    low: f64,
    high: f64,
}

impl ZoomVisibilityRange {
    /// Build a range from two bounds given in either order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive on both bounds.
    pub fn contains(&self, resolution: f64) -> bool {
        self.low <= resolution && resolution <= self.high
    }

    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }
}

/// Linear mapping from a resolution interval onto a visual parameter interval.
///
/// When the input bounds arrive reversed, the output bounds are swapped with
/// them so that `inputs.0` still maps to `outputs.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolationRange {
    input: (f64, f64),
    output: (f64, f64),
}

impl InterpolationRange {
    pub fn new(inputs: (f64, f64), outputs: (f64, f64)) -> Self {
        if inputs.0 <= inputs.1 {
            Self {
                input: inputs,
                output: outputs,
            }
        } else {
            Self {
                input: (inputs.1, inputs.0),
                output: (outputs.1, outputs.0),
            }
        }
    }

    /// A range that always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            input: (0.0, 0.0),
            output: (value, value),
        }
    }

    /// Normalized `(low, high)` input bounds.
    pub fn input(&self) -> (f64, f64) {
        self.input
    }

    /// Output bounds matching [`Self::input`] positionally.
    pub fn output(&self) -> (f64, f64) {
        self.output
    }

    pub fn is_degenerate(&self) -> bool {
        self.input.0 == self.input.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_range_swaps_reversed_bounds() {
        let range = ZoomVisibilityRange::new(0.02, 0.001);
        assert_eq!(range.low(), 0.001);
        assert_eq!(range.high(), 0.02);
        assert_eq!(range, ZoomVisibilityRange::new(0.001, 0.02));
    }

    #[test]
    fn test_visibility_range_is_inclusive() {
        let range = ZoomVisibilityRange::new(0.001, 0.01);
        assert!(range.contains(0.001));
        assert!(range.contains(0.01));
        assert!(!range.contains(0.0100001));
        assert!(!range.contains(0.0009999));
    }

    #[test]
    fn test_interpolation_range_swaps_outputs_in_lockstep() {
        let range = InterpolationRange::new((0.02, 0.001), (10.0, 20.0));
        assert_eq!(range.input(), (0.001, 0.02));
        assert_eq!(range.output(), (20.0, 10.0));
    }

    #[test]
    fn test_constant_range_is_degenerate() {
        let range = InterpolationRange::constant(4.0);
        assert!(range.is_degenerate());
        assert_eq!(range.output(), (4.0, 4.0));
    }
}
