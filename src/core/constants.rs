//! Core constants shared by the style engine.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default number of entries each per-category style cache may hold.
pub const MAX_CACHE_SIZE: usize = 1000;

/// Decimal places a resolution is rounded to when forming a cache key.
pub const CACHE_KEY_PRECISION: u32 = 4;

/// A feature is skipped outright once the resolution exceeds its broadest
/// visibility ceiling by this factor.
pub const EARLY_OUT_FACTOR: f64 = 2.0;

/// Marker radius multiplier applied to highlighted features.
pub const HIGHLIGHT_RADIUS_MULTIPLIER: f64 = 1.3;

/// Smallest valid settlement size rank (village).
pub const MIN_SIZE_RANK: u8 = 1;

/// Largest valid settlement size rank (major city).
pub const MAX_SIZE_RANK: u8 = 6;

/// Draw priority for points of interest when the configuration sets none.
pub const POI_DRAW_PRIORITY: i32 = 0;

/// Draw priority for water body labels when the configuration sets none.
pub const WATER_DRAW_PRIORITY: i32 = 7;

/// Draw priority for province labels when the configuration sets none.
pub const PROVINCE_DRAW_PRIORITY: i32 = 8;

/// Font family used when a category omits one.
pub const DEFAULT_FONT_FAMILY: &str = "serif";

/// Rough glyph advance as a fraction of the font size, for headless text measuring.
pub const APPROX_GLYPH_WIDTH: f64 = 0.6;

/// Line height as a fraction of the font size, for headless text measuring.
pub const APPROX_LINE_HEIGHT: f64 = 1.2;
