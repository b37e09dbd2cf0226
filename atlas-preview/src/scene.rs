use atlas_style::prelude::*;
use std::collections::HashSet;

/// Map-to-screen transform: `resolution` map units per pixel around `center`.
#[derive(Debug, Clone, Copy)]
pub struct View {
    pub center: [f64; 2],
    pub resolution: f64,
    pub size: [f64; 2],
}

impl View {
    pub fn new(extent: &MapExtent, resolution: f64, size: [f64; 2]) -> Self {
        let c = extent.0.center();
        Self {
            center: [c.x, c.y],
            resolution,
            size,
        }
    }

    /// Screen position of a map point; y grows downward.
    pub fn project(&self, x: f64, y: f64) -> [f64; 2] {
        [
            self.size[0] / 2.0 + (x - self.center[0]) / self.resolution,
            self.size[1] / 2.0 - (y - self.center[1]) / self.resolution,
        ]
    }

    pub fn on_screen(&self, p: [f64; 2]) -> bool {
        p[0] >= 0.0 && p[1] >= 0.0 && p[0] <= self.size[0] && p[1] <= self.size[1]
    }

    pub fn pan(&mut self, dx_px: f64, dy_px: f64) {
        self.center[0] -= dx_px * self.resolution;
        self.center[1] += dy_px * self.resolution;
    }

    pub fn zoom(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.resolution /= factor;
        }
    }
}

pub struct Placement {
    pub id: FeatureId,
    pub anchor: [f64; 2],
    pub style: FeatureStyle,
}

/// Features that survive visibility and declutter, lowest priority first so
/// they paint underneath.
pub struct Scene {
    pub kept: Vec<Placement>,
    pub suppressed: Vec<FeatureId>,
}

pub fn compose(
    engine: &mut StyleEngine,
    features: &FeatureSet,
    view: &View,
    measurer: &dyn TextMeasurer,
) -> Scene {
    let mut placements = Vec::new();
    let mut candidates = Vec::new();

    for feature in features.iter() {
        let anchor = view.project(feature.position.x(), feature.position.y());
        if !view.on_screen(anchor) {
            continue;
        }
        let style = engine.resolve(feature, view.resolution);
        if let Some(candidate) = LabelCandidate::from_style(feature.id, anchor, &style, measurer) {
            candidates.push(candidate);
            placements.push(Placement {
                id: feature.id,
                anchor,
                style,
            });
        }
    }

    let outcome = declutter(candidates);
    let kept_ids: HashSet<FeatureId> = outcome.kept.iter().copied().collect();
    let mut kept: Vec<Placement> = placements
        .into_iter()
        .filter(|p| kept_ids.contains(&p.id))
        .collect();
    kept.sort_by_key(|p| p.style.draw_priority);

    Scene {
        kept,
        suppressed: outcome.suppressed,
    }
}
