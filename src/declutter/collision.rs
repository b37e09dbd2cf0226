//! Screen-space declutter pass.
//!
//! Candidates are placed in descending priority; a candidate whose box
//! overlaps one already placed is suppressed. Placed boxes live in an R-tree
//! so each placement is a window query rather than a scan.

use rstar::{RTree, RTreeObject, AABB};

use crate::core::constants::{APPROX_GLYPH_WIDTH, APPROX_LINE_HEIGHT};
use crate::data::features::FeatureId;
use crate::declutter::priority::DrawPriority;
use crate::style::descriptor::{FeatureStyle, FontSpec};

/// Measures rendered text, in the same units as the anchors.
pub trait TextMeasurer {
    /// `(width, height)` of `text` set in `font`.
    fn measure(&self, text: &str, font: &FontSpec) -> (f64, f64);
}

/// Fixed-advance estimate for when no renderer is around.
#[derive(Debug, Clone, Copy)]
pub struct ApproxMeasurer {
    pub glyph_width: f64,
    pub line_height: f64,
}

impl Default for ApproxMeasurer {
    fn default() -> Self {
        Self {
            glyph_width: APPROX_GLYPH_WIDTH,
            line_height: APPROX_LINE_HEIGHT,
        }
    }
}

impl TextMeasurer for ApproxMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> (f64, f64) {
        let size = font.size_px as f64;
        let bold = if font.bold { 1.1 } else { 1.0 };
        (
            text.chars().count() as f64 * size * self.glyph_width * bold,
            size * self.line_height,
        )
    }
}

/// Axis-aligned screen rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl ScreenBox {
    pub fn new(a: [f64; 2], b: [f64; 2]) -> Self {
        Self {
            min: [a[0].min(b[0]), a[1].min(b[1])],
            max: [a[0].max(b[0]), a[1].max(b[1])],
        }
    }

    pub fn around(center: [f64; 2], half_width: f64, half_height: f64) -> Self {
        Self::new(
            [center[0] - half_width, center[1] - half_height],
            [center[0] + half_width, center[1] + half_height],
        )
    }

    pub fn union(&self, other: &ScreenBox) -> ScreenBox {
        ScreenBox {
            min: [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            max: [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        }
    }

    /// Overlap with positive area; boxes that only touch do not collide.
    pub fn intersects(&self, other: &ScreenBox) -> bool {
        !(self.max[0] <= other.min[0]
            || other.max[0] <= self.min[0]
            || self.max[1] <= other.min[1]
            || other.max[1] <= self.min[1])
    }

    fn envelope(&self) -> AABB<[f64; 2]> {
        AABB::from_corners(self.min, self.max)
    }
}

/// A feature competing for screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelCandidate {
    pub id: FeatureId,
    pub bounds: ScreenBox,
    pub priority: DrawPriority,
}

impl LabelCandidate {
    /// Box covering the marker and label of `style` drawn at `anchor`.
    ///
    /// The label is centred horizontally on the anchor and shifted by its
    /// vertical offset. Returns `None` for an invisible style.
    pub fn from_style(
        id: FeatureId,
        anchor: [f64; 2],
        style: &FeatureStyle,
        measurer: &dyn TextMeasurer,
    ) -> Option<Self> {
        let marker = style
            .marker
            .as_ref()
            .map(|m| ScreenBox::around(anchor, m.radius, m.radius));

        let label = style.label.as_ref().map(|label| {
            let (width, height) = measurer.measure(&label.text, &label.font);
            ScreenBox::around([anchor[0], anchor[1] + label.offset_y], width / 2.0, height / 2.0)
        });

        let bounds = match (marker, label) {
            (Some(m), Some(l)) => m.union(&l),
            (Some(b), None) | (None, Some(b)) => b,
            (None, None) => return None,
        };

        Some(Self {
            id,
            bounds,
            priority: style.draw_priority,
        })
    }
}

struct Placed {
    bounds: ScreenBox,
}

impl RTreeObject for Placed {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.bounds.envelope()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclutterOutcome {
    /// Kept features, in placement order (highest priority first).
    pub kept: Vec<FeatureId>,
    pub suppressed: Vec<FeatureId>,
}

impl DeclutterOutcome {
    pub fn is_kept(&self, id: FeatureId) -> bool {
        self.kept.contains(&id)
    }
}

/// Greedy priority placement.
///
/// Ties keep their input order. The highlighted feature carries
/// [`DrawPriority::HIGHLIGHT`], so it is always placed first and never
/// suppressed.
pub fn declutter(mut candidates: Vec<LabelCandidate>) -> DeclutterOutcome {
    candidates.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut placed: RTree<Placed> = RTree::new();
    let mut outcome = DeclutterOutcome::default();

    for candidate in candidates {
        let collides = placed
            .locate_in_envelope_intersecting(&candidate.bounds.envelope())
            .any(|other| other.bounds.intersects(&candidate.bounds));

        if collides {
            outcome.suppressed.push(candidate.id);
        } else {
            placed.insert(Placed {
                bounds: candidate.bounds,
            });
            outcome.kept.push(candidate.id);
        }
    }

    #[cfg(feature = "debug")]
    log::debug!(
        "declutter kept {} of {} features",
        outcome.kept.len(),
        outcome.kept.len() + outcome.suppressed.len()
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::color::Color;
    use crate::style::descriptor::{LabelStyle, MarkerStyle, StrokeStyle};
    use std::sync::Arc;

    fn candidate(id: u32, x: f64, priority: i32) -> LabelCandidate {
        LabelCandidate {
            id: FeatureId(id),
            bounds: ScreenBox::around([x, 0.0], 10.0, 5.0),
            priority: DrawPriority(priority),
        }
    }

    #[test]
    fn test_higher_priority_wins_overlap() {
        let outcome = declutter(vec![candidate(0, 0.0, 1), candidate(1, 5.0, 6)]);
        assert_eq!(outcome.kept, vec![FeatureId(1)]);
        assert_eq!(outcome.suppressed, vec![FeatureId(0)]);
    }

    #[test]
    fn test_highlight_is_never_suppressed() {
        let outcome = declutter(vec![
            candidate(0, 0.0, i32::MAX - 1),
            candidate(1, 2.0, DrawPriority::HIGHLIGHT.value()),
        ]);
        assert!(outcome.is_kept(FeatureId(1)));
        assert!(!outcome.is_kept(FeatureId(0)));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let outcome = declutter(vec![candidate(3, 0.0, 2), candidate(4, 5.0, 2)]);
        assert_eq!(outcome.kept, vec![FeatureId(3)]);
    }

    #[test]
    fn test_touching_boxes_do_not_collide() {
        let outcome = declutter(vec![candidate(0, 0.0, 1), candidate(1, 20.0, 1)]);
        assert_eq!(outcome.kept.len(), 2);
    }

    #[test]
    fn test_candidate_covers_marker_and_label() {
        let style = FeatureStyle {
            marker: Some(Arc::new(MarkerStyle {
                radius: 4.0,
                fill: Color::BLACK,
                stroke: StrokeStyle::new(Color::WHITE, 1.0),
            })),
            label: Some(LabelStyle {
                text: "Ab".into(),
                font: FontSpec {
                    size_px: 10,
                    family: "serif".into(),
                    bold: false,
                },
                fill: Color::BLACK,
                stroke: StrokeStyle::new(Color::WHITE, 2.0),
                offset_y: -12.0,
            }),
            draw_priority: DrawPriority(3),
        };

        let measurer = ApproxMeasurer::default();
        let candidate =
            LabelCandidate::from_style(FeatureId(0), [100.0, 100.0], &style, &measurer).unwrap();
        assert_eq!(candidate.bounds.max[1], 104.0);
        assert!((candidate.bounds.min[1] - (88.0 - 6.0)).abs() < 1e-9);
        assert_eq!(candidate.priority, DrawPriority(3));

        assert!(LabelCandidate::from_style(
            FeatureId(1),
            [0.0, 0.0],
            &FeatureStyle::invisible(),
            &ApproxMeasurer::default()
        )
        .is_none());
    }
}
