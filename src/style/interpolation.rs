use crate::core::range::InterpolationRange;

/// Map `value` from `input` onto `output`, clamping to the input range.
///
/// Both ranges may be given in either order; the input is normalized and the
/// output swapped with it so that `input.0 -> output.0` always holds. A zero
/// width input range yields the output bound paired with the low input.
pub fn interpolate(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    interpolate_range(value, &InterpolationRange::new(input, output))
}

pub fn interpolate_range(value: f64, range: &InterpolationRange) -> f64 {
    let (in_low, in_high) = range.input();
    let (out_low, out_high) = range.output();

    if in_high == in_low {
        return out_low;
    }

    let clamped = value.clamp(in_low, in_high);
    let t = (clamped - in_low) / (in_high - in_low);
    out_low + t * (out_high - out_low)
}

/// Font sizes are whole pixels.
pub fn font_size_px(range: &InterpolationRange, resolution: f64) -> u32 {
    interpolate_range(resolution, range).round().max(0.0) as u32
}

pub fn marker_radius(range: &InterpolationRange, resolution: f64) -> f64 {
    interpolate_range(resolution, range).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_endpoints_map_regardless_of_input_order() {
        for &(a, b) in &[(0.001, 0.02), (0.02, 0.001)] {
            assert!((interpolate(a, (a, b), (8.0, 20.0)) - 8.0).abs() < EPS);
            assert!((interpolate(b, (a, b), (8.0, 20.0)) - 20.0).abs() < EPS);
        }
    }

    #[test]
    fn test_monotonic_walking_from_first_to_second_input() {
        let cases = [
            ((0.001, 0.02), (8.0, 20.0)),
            ((0.02, 0.001), (8.0, 20.0)),
            ((0.001, 0.02), (20.0, 8.0)),
            ((0.02, 0.001), (20.0, 8.0)),
        ];

        for (input, output) in cases {
            let (a, b) = input;
            let (c, d) = output;
            let mut previous = interpolate(a, input, output);
            for step in 1..=100 {
                let v = a + (b - a) * step as f64 / 100.0;
                let y = interpolate(v, input, output);
                if c <= d {
                    assert!(y >= previous - EPS, "{input:?} {output:?} at {v}");
                } else {
                    assert!(y <= previous + EPS, "{input:?} {output:?} at {v}");
                }
                previous = y;
            }
        }
    }

    #[test]
    fn test_values_outside_input_are_clamped() {
        assert_eq!(interpolate(-1.0, (0.0, 1.0), (2.0, 4.0)), 2.0);
        assert_eq!(interpolate(5.0, (0.0, 1.0), (2.0, 4.0)), 4.0);
        assert_eq!(interpolate(0.5, (0.0, 1.0), (2.0, 4.0)), 3.0);
    }

    #[test]
    fn test_degenerate_input_returns_first_output() {
        for v in [-10.0, 0.0, 0.005, 0.01, 100.0] {
            let y = interpolate(v, (0.01, 0.01), (6.0, 14.0));
            assert_eq!(y, 6.0);
            assert!(!y.is_nan());
        }
    }

    #[test]
    fn test_font_size_rounds_to_nearest_pixel() {
        let range = InterpolationRange::new((0.0, 1.0), (10.0, 11.0));
        assert_eq!(font_size_px(&range, 0.49), 10);
        assert_eq!(font_size_px(&range, 0.51), 11);
    }

    #[test]
    fn test_marker_radius_keeps_fraction() {
        let range = InterpolationRange::new((0.0, 1.0), (2.0, 3.0));
        assert!((marker_radius(&range, 0.25) - 2.25).abs() < EPS);
    }
}
