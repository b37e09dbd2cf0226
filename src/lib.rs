//! # atlas-style
//!
//! Zoom-dependent styling and feature visibility for a fantasy-world map.
//!
//! Given a feature and the current map resolution (map units per pixel),
//! the [`StyleEngine`] decides whether the feature's marker and label are
//! drawn, at what size and in which colours, and with what priority it
//! competes for screen space. Styles come from a JSON configuration that is
//! validated per entry and can be replaced at runtime.

pub mod config;
pub mod core;
pub mod data;
pub mod declutter;
#[cfg(feature = "egui")]
pub mod render;
pub mod style;
pub mod prelude;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{EngineOptions, EngineProfile, HighlightPalette, StyleCacheConfig},
    range::{InterpolationRange, ZoomVisibilityRange},
};

pub use config::{
    category::{ConfigIssue, StyleConfig},
    loader::{ConfigSource, FileSource, HttpSource, StaticSource},
};

pub use data::{
    features::{Category, FeatureId, FeatureKind, FeatureSet, MapFeature, SizeRank},
    geojson::{GeoJson, GeoJsonFeature, MapExtent},
    selection::HighlightSelection,
};

pub use declutter::{
    collision::{declutter, ApproxMeasurer, DeclutterOutcome, LabelCandidate, TextMeasurer},
    priority::DrawPriority,
};

pub use style::{
    color::Color,
    descriptor::{FeatureStyle, LabelStyle, MarkerStyle},
    engine::StyleEngine,
    resolver::CategoryKey,
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, StyleError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("Styles configuration not loaded")]
    ConfigurationUnavailable,

    #[error("No style configured for {0}")]
    UnknownCategory(CategoryKey),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = StyleError;
