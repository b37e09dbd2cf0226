//! Validated, resolved style configuration.
//!
//! [`StyleConfig`] is what the resolvers read. It is immutable once built and
//! is shared behind an `Arc`; replacing it means building a new one.
//! Validation is per entry: a broken entry is skipped and reported as a
//! [`ConfigIssue`], the rest of the document still loads.

use fxhash::FxHashMap;
use std::fmt;

use crate::config::schema::{
    BaseConfigDoc, LabelCategoryDoc, PointCategoryDoc, StylesDocument,
};
use crate::core::constants::DEFAULT_FONT_FAMILY;
use crate::core::range::{InterpolationRange, ZoomVisibilityRange};
use crate::data::features::{Category, SizeRank};
use crate::declutter::priority::DrawPriority;
use crate::style::color::Color;
use crate::style::descriptor::StrokeStyle;
use crate::style::visibility::visibility_ceiling;

const DEFAULT_FONT_SIZE: f64 = 12.0;
const DEFAULT_LABEL_FONT_SIZE: f64 = 14.0;
const DEFAULT_DOT_RADIUS: f64 = 3.0;
const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Marker circle parameters of a point category.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub visibility: ZoomVisibilityRange,
    pub radius: InterpolationRange,
    pub fill: Color,
    pub stroke: StrokeStyle,
}

/// Label paint, minus the size which is interpolated.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPaint {
    pub family: String,
    pub fill: Color,
    pub stroke: StrokeStyle,
    pub offset_y: f64,
}

/// Everything needed to style one category (or settlement size rank).
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStyle {
    pub label_visibility: ZoomVisibilityRange,
    pub font_size: InterpolationRange,
    pub text: TextPaint,
    /// `None` for label-only categories.
    pub marker: Option<MarkerSpec>,
    pub draw_priority: DrawPriority,
}

impl CategoryStyle {
    /// Largest resolution at which anything of this category can be drawn.
    pub fn visibility_ceiling(&self) -> f64 {
        visibility_ceiling(
            &self.label_visibility,
            self.marker.as_ref().map(|m| &m.visibility),
        )
    }
}

/// An entry skipped during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub entry: String,
    pub reason: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entry, self.reason)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleConfig {
    settlements: FxHashMap<SizeRank, CategoryStyle>,
    poi: Option<CategoryStyle>,
    provinces: FxHashMap<String, CategoryStyle>,
    water: FxHashMap<String, CategoryStyle>,
}

impl StyleConfig {
    /// The configuration installed when loading fails: every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entry_count() == 0
    }

    pub fn entry_count(&self) -> usize {
        self.settlements.len()
            + usize::from(self.poi.is_some())
            + self.provinces.len()
            + self.water.len()
    }

    pub fn settlement(&self, rank: SizeRank) -> Option<&CategoryStyle> {
        self.settlements.get(&rank)
    }

    pub fn poi(&self) -> Option<&CategoryStyle> {
        self.poi.as_ref()
    }

    pub fn province(&self, province_type: &str) -> Option<&CategoryStyle> {
        self.provinces.get(province_type)
    }

    pub fn water(&self, waterbody_type: &str) -> Option<&CategoryStyle> {
        self.water.get(waterbody_type)
    }

    pub fn with_settlement(mut self, rank: SizeRank, style: CategoryStyle) -> Self {
        self.settlements.insert(rank, style);
        self
    }

    pub fn with_poi(mut self, style: CategoryStyle) -> Self {
        self.poi = Some(style);
        self
    }

    pub fn with_province(mut self, province_type: &str, style: CategoryStyle) -> Self {
        self.provinces.insert(province_type.to_string(), style);
        self
    }

    pub fn with_water(mut self, waterbody_type: &str, style: CategoryStyle) -> Self {
        self.water.insert(waterbody_type.to_string(), style);
        self
    }

    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> crate::Result<(Self, Vec<ConfigIssue>)> {
        let document = StylesDocument::from_json(json)?;
        Ok(Self::from_document(&document))
    }

    /// Validate a parsed document, skipping entries that cannot be used.
    pub fn from_document(document: &StylesDocument) -> (Self, Vec<ConfigIssue>) {
        let mut config = Self::empty();
        let mut issues = Vec::new();

        let settlements = &document.settlements;
        for (key, entry) in &settlements.size_categories {
            let name = format!("settlements.sizeCategories.{}", key);
            let rank = match key.trim().parse::<u8>().ok().and_then(SizeRank::new) {
                Some(rank) => rank,
                None => {
                    issues.push(issue(&name, "size rank must be an integer in 1..=6"));
                    continue;
                }
            };
            let base = &settlements.base_config;
            match point_category(Category::Settlement, Some(rank), entry, base) {
                Ok(style) => {
                    config.settlements.insert(rank, style);
                }
                Err(reason) => issues.push(issue(&name, &reason)),
            }
        }

        if let Some(entry) = &document.poi.default {
            let base = &document.poi.base_config;
            match point_category(Category::PointOfInterest, None, entry, base) {
                Ok(style) => config.poi = Some(style),
                Err(reason) => issues.push(issue("poi.default", &reason)),
            }
        }

        for (category, section, target) in [
            (Category::Province, &document.provinces, &mut config.provinces),
            (Category::Water, &document.water, &mut config.water),
        ] {
            for (key, entry) in section {
                match label_category(category, entry) {
                    Ok(style) => {
                        target.insert(key.clone(), style);
                    }
                    Err(reason) => issues.push(issue(&format!("{}.{}", category, key), &reason)),
                }
            }
        }

        #[cfg(feature = "debug")]
        for skipped in &issues {
            log::debug!("Skipping style entry {}", skipped);
        }

        (config, issues)
    }
}

fn issue(entry: &str, reason: &str) -> ConfigIssue {
    ConfigIssue {
        entry: entry.to_string(),
        reason: reason.to_string(),
    }
}

type EntryResult<T> = std::result::Result<T, String>;

fn finite(value: Option<f64>, field: &str) -> EntryResult<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(format!("{} is not a finite number", field)),
        other => Ok(other),
    }
}

fn non_negative(value: Option<f64>, field: &str) -> EntryResult<Option<f64>> {
    match finite(value, field)? {
        Some(v) if v < 0.0 => Err(format!("{} must not be negative", field)),
        other => Ok(other),
    }
}

/// A bound pair where a lone bound stands for a constant.
fn pair(
    a: Option<f64>,
    b: Option<f64>,
    fields: (&str, &str),
    check: fn(Option<f64>, &str) -> EntryResult<Option<f64>>,
) -> EntryResult<Option<(f64, f64)>> {
    let a = check(a, fields.0)?;
    let b = check(b, fields.1)?;
    Ok(match (a, b) {
        (Some(a), Some(b)) => Some((a, b)),
        (Some(v), None) | (None, Some(v)) => Some((v, v)),
        (None, None) => None,
    })
}

fn color(value: Option<&String>, field: &str) -> EntryResult<Option<Color>> {
    value
        .map(|raw| raw.parse::<Color>().map_err(|e| format!("{}: {}", field, e)))
        .transpose()
}

fn interpolation(
    inputs: Option<(f64, f64)>,
    outputs: Option<(f64, f64)>,
    fallback: f64,
) -> InterpolationRange {
    match (inputs, outputs) {
        (Some(inputs), Some(outputs)) => InterpolationRange::new(inputs, outputs),
        (None, Some((first, _))) => InterpolationRange::constant(first),
        (_, None) => InterpolationRange::constant(fallback),
    }
}

fn point_category(
    category: Category,
    rank: Option<SizeRank>,
    entry: &PointCategoryDoc,
    base: &BaseConfigDoc,
) -> EntryResult<CategoryStyle> {
    let label_range = pair(
        entry.min_zoom_level_label,
        entry.max_zoom_level_label,
        ("minZoomLevelLabel", "maxZoomLevelLabel"),
        non_negative,
    )?
    .ok_or("missing label zoom range")?;

    let font_size = interpolation(
        pair(entry.min_font_zoom, entry.max_font_zoom, ("minFontZoom", "maxFontZoom"), finite)?,
        pair(
            entry.min_font_size,
            entry.max_font_size,
            ("minFontSize", "maxFontSize"),
            non_negative,
        )?,
        DEFAULT_FONT_SIZE,
    );

    let dot_range = pair(
        entry.min_zoom_level_dot,
        entry.max_zoom_level_dot,
        ("minZoomLevelDot", "maxZoomLevelDot"),
        non_negative,
    )?;

    let marker = match dot_range {
        None => None,
        Some((a, b)) => {
            let fill = color(entry.color.as_ref(), "color")?
                .or(color(base.color.as_ref(), "baseConfig.color")?)
                .ok_or("missing marker color")?;
            let stroke_color = color(entry.stroke_color.as_ref(), "strokeColor")?
                .or(color(base.stroke_color.as_ref(), "baseConfig.strokeColor")?)
                .unwrap_or(Color::BLACK);
            let stroke_width =
                non_negative(entry.stroke_width.or(base.stroke_width), "strokeWidth")?
                .unwrap_or(DEFAULT_STROKE_WIDTH);

            Some(MarkerSpec {
                visibility: ZoomVisibilityRange::new(a, b),
                radius: interpolation(
                    pair(
                        entry.min_dot_radius_zoom,
                        entry.max_dot_radius_zoom,
                        ("minDotRadiusZoom", "maxDotRadiusZoom"),
                        finite,
                    )?,
                    pair(
                        entry.min_dot_radius,
                        entry.max_dot_radius,
                        ("minDotRadius", "maxDotRadius"),
                        non_negative,
                    )?,
                    DEFAULT_DOT_RADIUS,
                ),
                fill,
                stroke: StrokeStyle::new(stroke_color, stroke_width),
            })
        }
    };

    let text = TextPaint {
        family: base
            .text_font
            .clone()
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
        fill: color(base.text_fill_color.as_ref(), "baseConfig.textFillColor")?
            .unwrap_or(Color::BLACK),
        stroke: StrokeStyle::new(
            color(base.text_stroke_color.as_ref(), "baseConfig.textStrokeColor")?
                .unwrap_or(Color::WHITE),
            non_negative(base.text_stroke_width, "baseConfig.textStrokeWidth")?.unwrap_or(0.0),
        ),
        offset_y: finite(base.text_offset_y, "baseConfig.textOffsetY")?.unwrap_or(0.0),
    };

    Ok(CategoryStyle {
        label_visibility: ZoomVisibilityRange::new(label_range.0, label_range.1),
        font_size,
        text,
        marker,
        draw_priority: DrawPriority::for_category(category, rank, entry.z_index),
    })
}

fn label_category(category: Category, entry: &LabelCategoryDoc) -> EntryResult<CategoryStyle> {
    let label_range = pair(
        entry.min_zoom_level,
        entry.max_zoom_level,
        ("minZoomLevel", "maxZoomLevel"),
        non_negative,
    )?
    .ok_or("missing label zoom range")?;

    let fixed_size = non_negative(entry.font_size, "fontSize")?.unwrap_or(DEFAULT_LABEL_FONT_SIZE);
    let font_size = interpolation(
        pair(entry.min_font_zoom, entry.max_font_zoom, ("minFontZoom", "maxFontZoom"), finite)?,
        pair(
            entry.min_font_size,
            entry.max_font_size,
            ("minFontSize", "maxFontSize"),
            non_negative,
        )?,
        fixed_size,
    );

    let text = TextPaint {
        family: entry
            .text_font
            .clone()
            .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
        fill: color(entry.text_fill_color.as_ref(), "textFillColor")?.unwrap_or(Color::BLACK),
        stroke: StrokeStyle::new(
            color(entry.text_stroke_color.as_ref(), "textStrokeColor")?.unwrap_or(Color::WHITE),
            non_negative(entry.text_stroke_width, "textStrokeWidth")?.unwrap_or(0.0),
        ),
        offset_y: finite(entry.text_offset_y, "textOffsetY")?.unwrap_or(0.0),
    };

    Ok(CategoryStyle {
        label_visibility: ZoomVisibilityRange::new(label_range.0, label_range.1),
        font_size,
        text,
        marker: None,
        draw_priority: DrawPriority::for_category(category, None, entry.z_index),
    })
}
