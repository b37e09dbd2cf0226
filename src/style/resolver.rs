//! Shared steps of per-category style resolution.
//!
//! Every resolver runs the same pipeline: look up the category entry, bail
//! out early at extreme zoom-out, evaluate marker and label visibility, then
//! either build a fresh highlighted style or go through the category cache.
//! The category resolvers differ only in how they look entries up and what
//! they cache.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::config::category::{CategoryStyle, MarkerSpec, StyleConfig, TextPaint};
use crate::core::config::{EngineOptions, HighlightPalette};
use crate::data::features::{Category, MapFeature};
use crate::declutter::priority::DrawPriority;
use crate::style::cache::{CacheStats, StyleCache};
use crate::style::descriptor::{
    FeatureStyle, FontSpec, LabelStyle, LabelTemplate, MarkerStyle, StrokeStyle,
};
use crate::style::interpolation::{font_size_px, marker_radius};
use crate::style::visibility::{beyond_early_out, Visibility};
use crate::Result;

/// Identifies a configuration entry a feature asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryKey {
    pub category: Category,
    pub subtype: String,
}

impl CategoryKey {
    pub fn new(category: Category, subtype: impl Into<String>) -> Self {
        Self {
            category,
            subtype: subtype.into(),
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.subtype)
    }
}

/// A style resolver for one feature category.
///
/// Implementations own their cache. They report lookup failures as errors;
/// turning those into "draw nothing" is the engine's job.
pub trait StyleResolver {
    fn category(&self) -> Category;

    /// Resolve the style of `feature` at `resolution`.
    fn resolve(
        &mut self,
        config: &StyleConfig,
        feature: &MapFeature,
        resolution: f64,
        options: &EngineOptions,
    ) -> Result<FeatureStyle>;

    fn clear_cache(&mut self);

    fn cache_stats(&self) -> CacheStats;
}

/// Which parts qualify at `resolution`, or `None` when nothing does.
pub(crate) fn visible_parts(
    style: &CategoryStyle,
    resolution: f64,
    options: &EngineOptions,
) -> Option<Visibility> {
    if beyond_early_out(resolution, style.visibility_ceiling(), options.early_out_factor) {
        return None;
    }

    let visibility = Visibility::evaluate(
        &style.label_visibility,
        style.marker.as_ref().map(|m| &m.visibility),
        resolution,
    );
    visibility.any().then_some(visibility)
}

pub(crate) fn marker_style(spec: &MarkerSpec, resolution: f64) -> MarkerStyle {
    MarkerStyle {
        radius: marker_radius(&spec.radius, resolution),
        fill: spec.fill,
        stroke: spec.stroke,
    }
}

pub(crate) fn label_template(style: &CategoryStyle, resolution: f64) -> LabelTemplate {
    let text: &TextPaint = &style.text;
    LabelTemplate {
        font: FontSpec {
            size_px: font_size_px(&style.font_size, resolution),
            family: text.family.clone(),
            bold: false,
        },
        fill: text.fill,
        stroke: text.stroke,
        offset_y: text.offset_y,
    }
}

pub(crate) fn label_style(style: &CategoryStyle, text: &str, resolution: f64) -> LabelStyle {
    label_template(style, resolution).with_text(text)
}

/// Fresh, uncached style for the highlighted feature.
///
/// Every call allocates a new marker, so a highlighted style never shares
/// identity with a cached one or with another highlighted feature. The parts
/// the plain path caches are sized at the same quantized resolution
/// (`marker_at`, `label_at`), so a highlighted marker is exactly the plain one
/// scaled by the palette multiplier.
pub(crate) fn highlighted_style(
    style: &CategoryStyle,
    visibility: Visibility,
    text: &str,
    marker_at: f64,
    label_at: f64,
    palette: &HighlightPalette,
) -> FeatureStyle {
    let marker = match (&style.marker, visibility.marker) {
        (Some(spec), true) => Some(Arc::new(MarkerStyle {
            radius: marker_radius(&spec.radius, marker_at) * palette.radius_multiplier.max(0.0),
            fill: palette.marker_fill,
            stroke: StrokeStyle::new(palette.marker_stroke, palette.marker_stroke_width),
        })),
        _ => None,
    };

    let label = visibility.label.then(|| {
        let mut label = label_style(style, text, label_at);
        label.font.bold = palette.bold;
        label.fill = palette.text_fill;
        label.stroke = StrokeStyle::new(palette.text_stroke, palette.text_stroke_width);
        label
    });

    FeatureStyle {
        marker,
        label,
        draw_priority: DrawPriority::HIGHLIGHT,
    }
}

/// Marker-and-label pipeline shared by settlements and points of interest.
///
/// The marker goes through `cache` under `key(bucket)`; the cached value is
/// computed at the bucket's resolution so it depends on the key alone. The
/// label carries per-feature text and is always built directly.
pub(crate) fn resolve_point<K, F>(
    cache: &mut StyleCache<K, Arc<MarkerStyle>>,
    key: F,
    style: &CategoryStyle,
    feature: &MapFeature,
    resolution: f64,
    options: &EngineOptions,
) -> FeatureStyle
where
    K: Eq + Hash + Clone,
    F: FnOnce(i64) -> K,
{
    let Some(visibility) = visible_parts(style, resolution, options) else {
        return FeatureStyle::invisible();
    };

    let bucket = options.cache.bucket(resolution);
    let at = options.cache.bucket_resolution(bucket);

    if feature.is_highlighted() {
        let palette = &options.highlight;
        return highlighted_style(style, visibility, &feature.name, at, resolution, palette);
    }

    let marker = match (&style.marker, visibility.marker) {
        (Some(spec), true) => {
            Some(cache.get_or_insert_with(key(bucket), || Arc::new(marker_style(spec, at))))
        }
        _ => None,
    };

    let label = visibility
        .label
        .then(|| label_style(style, &feature.name, resolution));

    FeatureStyle {
        marker,
        label,
        draw_priority: style.draw_priority,
    }
}

/// Label-only pipeline shared by province and water labels.
///
/// Everything but the text is cached per key; the text is stamped on after.
pub(crate) fn resolve_label<K, F>(
    cache: &mut StyleCache<K, Arc<LabelTemplate>>,
    key: F,
    style: &CategoryStyle,
    feature: &MapFeature,
    resolution: f64,
    options: &EngineOptions,
) -> FeatureStyle
where
    K: Eq + Hash + Clone,
    F: FnOnce(i64) -> K,
{
    let Some(visibility) = visible_parts(style, resolution, options) else {
        return FeatureStyle::invisible();
    };

    let bucket = options.cache.bucket(resolution);
    let at = options.cache.bucket_resolution(bucket);

    if feature.is_highlighted() {
        return highlighted_style(style, visibility, &feature.name, at, at, &options.highlight);
    }

    let template = cache.get_or_insert_with(key(bucket), || Arc::new(label_template(style, at)));

    FeatureStyle {
        marker: None,
        label: visibility.label.then(|| template.with_text(&feature.name)),
        draw_priority: style.draw_priority,
    }
}
