//! Engine tuning for the style resolvers
//!
//! This module provides preset profiles plus a custom escape hatch for the
//! knobs that trade memory against redraw cost: cache capacity, cache key
//! precision, the zoomed-out early-out factor and the highlight palette.

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    CACHE_KEY_PRECISION, EARLY_OUT_FACTOR, HIGHLIGHT_RADIUS_MULTIPLIER, MAX_CACHE_SIZE,
};
use crate::style::color::Color;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineProfile {
    Balanced,
    LowMemory,
    HighDetail,
    Custom(EngineOptions),
}

impl EngineProfile {
    pub fn resolve(&self) -> EngineOptions {
        match self {
            Self::Balanced => EngineOptions {
                cache: StyleCacheConfig {
                    capacity: MAX_CACHE_SIZE,
                    key_precision: CACHE_KEY_PRECISION,
                },
                early_out_factor: EARLY_OUT_FACTOR,
                highlight: HighlightPalette::default(),
            },
            Self::LowMemory => EngineOptions {
                cache: StyleCacheConfig {
                    capacity: 250,
                    key_precision: 3,
                },
                early_out_factor: 1.5,
                highlight: HighlightPalette::default(),
            },
            Self::HighDetail => EngineOptions {
                cache: StyleCacheConfig {
                    capacity: 4000,
                    key_precision: 5,
                },
                early_out_factor: EARLY_OUT_FACTOR,
                highlight: HighlightPalette::default(),
            },
            Self::Custom(options) => options.clone(),
        }
    }
}

impl Default for EngineProfile {
    fn default() -> Self {
        Self::Balanced
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineOptions {
    pub cache: StyleCacheConfig,
    pub early_out_factor: f64,
    pub highlight: HighlightPalette,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineProfile::default().resolve()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StyleCacheConfig {
    /// Entries per category cache before FIFO eviction kicks in.
    pub capacity: usize,
    /// Decimal places kept when quantizing a resolution into a cache key.
    pub key_precision: u32,
}

impl StyleCacheConfig {
    /// Quantize a resolution into an integer bucket at this precision.
    pub fn bucket(&self, resolution: f64) -> i64 {
        (resolution * self.scale()).round() as i64
    }

    /// The resolution a bucket stands for.
    pub fn bucket_resolution(&self, bucket: i64) -> f64 {
        bucket as f64 / self.scale()
    }

    fn scale(&self) -> f64 {
        10f64.powi(self.key_precision.min(12) as i32)
    }
}

impl Default for StyleCacheConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_CACHE_SIZE,
            key_precision: CACHE_KEY_PRECISION,
        }
    }
}

/// Alternate paint applied to the single search-selected feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightPalette {
    pub marker_fill: Color,
    pub marker_stroke: Color,
    pub marker_stroke_width: f64,
    pub radius_multiplier: f64,
    pub text_fill: Color,
    pub text_stroke: Color,
    pub text_stroke_width: f64,
    pub bold: bool,
}

impl Default for HighlightPalette {
    fn default() -> Self {
        Self {
            marker_fill: Color::rgb(255, 215, 0),
            marker_stroke: Color::rgb(139, 0, 0),
            marker_stroke_width: 2.0,
            radius_multiplier: HIGHLIGHT_RADIUS_MULTIPLIER,
            text_fill: Color::rgb(139, 0, 0),
            text_stroke: Color::WHITE,
            text_stroke_width: 3.0,
            bold: true,
        }
    }
}
