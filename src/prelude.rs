//! Prelude module for common atlas-style types and traits
//!
//! `use atlas_style::prelude::*;` brings in everything a redraw loop needs.

pub use crate::core::{
    config::{EngineOptions, EngineProfile, HighlightPalette, StyleCacheConfig},
    range::{InterpolationRange, ZoomVisibilityRange},
};

pub use crate::config::{
    category::{ConfigIssue, StyleConfig},
    loader::{ConfigSource, FileSource, HttpSource, StaticSource},
};

pub use crate::data::{
    features::{Category, FeatureId, FeatureKind, FeatureSet, MapFeature, SizeRank},
    geojson::{GeoJson, GeoJsonFeature, MapExtent},
    loader::{load_features, FeatureCollectionSource},
    selection::HighlightSelection,
};

pub use crate::declutter::{
    collision::{
        declutter, ApproxMeasurer, DeclutterOutcome, LabelCandidate, ScreenBox, TextMeasurer,
    },
    priority::DrawPriority,
};

pub use crate::style::{
    cache::CacheStats,
    color::Color,
    descriptor::{FeatureStyle, FontSpec, LabelStyle, MarkerStyle, StrokeStyle},
    engine::StyleEngine,
    resolver::{CategoryKey, StyleResolver},
};

#[cfg(feature = "egui")]
pub use crate::render::painter::{paint_feature, EguiMeasurer};

pub use crate::{Error, Result, StyleError};
