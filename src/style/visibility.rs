use crate::core::range::ZoomVisibilityRange;

/// True iff `resolution` lies inside the normalized range, bounds included.
pub fn is_visible(range: &ZoomVisibilityRange, resolution: f64) -> bool {
    range.contains(resolution)
}

/// Which parts of a feature qualify for drawing at a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Visibility {
    pub marker: bool,
    pub label: bool,
}

impl Visibility {
    pub const NONE: Visibility = Visibility {
        marker: false,
        label: false,
    };

    /// Evaluate the label range and, when the category draws one, the marker range.
    pub fn evaluate(
        label: &ZoomVisibilityRange,
        marker: Option<&ZoomVisibilityRange>,
        resolution: f64,
    ) -> Self {
        Self {
            marker: marker.map_or(false, |range| is_visible(range, resolution)),
            label: is_visible(label, resolution),
        }
    }

    pub fn any(&self) -> bool {
        self.marker || self.label
    }
}

/// Largest resolution at which any part of a category can be drawn.
pub fn visibility_ceiling(
    label: &ZoomVisibilityRange,
    marker: Option<&ZoomVisibilityRange>,
) -> f64 {
    marker.map_or(label.high(), |range| range.high().max(label.high()))
}

/// Whether a resolution is so far zoomed out (or so malformed) that evaluating
/// the ranges is wasted work.
pub fn beyond_early_out(resolution: f64, ceiling: f64, factor: f64) -> bool {
    !resolution.is_finite() || resolution <= 0.0 || resolution > ceiling * factor.max(1.0)
}
