//! The style engine: an explicit handle owning the configuration, the four
//! category resolvers and their caches.
//!
//! The engine is created once and fed to the redraw loop. It starts without a
//! configuration (everything resolves invisible), is given one by
//! [`StyleEngine::install`] or [`StyleEngine::load_from`], and clears every
//! cache whenever the configuration is replaced.

use fxhash::FxHashSet;
use std::sync::Arc;

use crate::config::category::{ConfigIssue, StyleConfig};
use crate::config::loader::ConfigSource;
use crate::core::config::{EngineOptions, EngineProfile};
use crate::data::features::{Category, MapFeature};
use crate::style::cache::CacheStats;
use crate::style::descriptor::FeatureStyle;
use crate::style::label::AreaLabelResolver;
use crate::style::poi::PoiResolver;
use crate::style::resolver::{CategoryKey, StyleResolver};
use crate::style::settlement::SettlementResolver;
use crate::{Result, StyleError};

pub struct StyleEngine {
    config: Option<Arc<StyleConfig>>,
    options: EngineOptions,
    settlements: SettlementResolver,
    poi: PoiResolver,
    provinces: AreaLabelResolver,
    water: AreaLabelResolver,
    reported_unknown: FxHashSet<CategoryKey>,
}

impl StyleEngine {
    /// An engine with no configuration yet.
    pub fn new(options: EngineOptions) -> Self {
        let capacity = options.cache.capacity;
        Self {
            config: None,
            options,
            settlements: SettlementResolver::new(capacity),
            poi: PoiResolver::new(capacity),
            provinces: AreaLabelResolver::provinces(capacity),
            water: AreaLabelResolver::water(capacity),
            reported_unknown: FxHashSet::default(),
        }
    }

    pub fn with_profile(profile: EngineProfile) -> Self {
        Self::new(profile.resolve())
    }

    pub fn with_config(config: StyleConfig, options: EngineOptions) -> Self {
        let mut engine = Self::new(options);
        engine.install(config);
        engine
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn config(&self) -> Option<&Arc<StyleConfig>> {
        self.config.as_ref()
    }

    /// Whether a configuration (possibly the empty fallback) has been installed.
    pub fn is_ready(&self) -> bool {
        self.config.is_some()
    }

    /// Replace the configuration wholesale and drop every cached style.
    pub fn install(&mut self, config: StyleConfig) {
        #[cfg(feature = "debug")]
        log::info!("Installing style configuration ({} entries)", config.entry_count());

        self.config = Some(Arc::new(config));
        self.reported_unknown.clear();
        self.invalidate();
    }

    /// Drop the configuration; features resolve invisible until the next install.
    pub fn unload(&mut self) {
        self.config = None;
        self.invalidate();
    }

    /// Clear all four category caches.
    pub fn invalidate(&mut self) {
        #[cfg(feature = "debug")]
        log::debug!("Invalidating style caches");

        self.settlements.clear_cache();
        self.poi.clear_cache();
        self.provinces.clear_cache();
        self.water.clear_cache();
    }

    /// Fetch, parse, validate and install a configuration.
    ///
    /// On any failure the empty configuration is installed, so every feature
    /// resolves invisible until a later load succeeds, and the error is
    /// returned for the caller to report or retry.
    pub async fn load_from<S>(&mut self, source: &S) -> Result<Vec<ConfigIssue>>
    where
        S: ConfigSource + ?Sized,
    {
        let loaded = match source.fetch().await {
            Ok(raw) => StyleConfig::from_json(&raw),
            Err(e) => Err(e),
        };

        match loaded {
            Ok((config, issues)) => {
                self.install(config);
                Ok(issues)
            }
            Err(e) => {
                #[cfg(feature = "debug")]
                log::error!(
                    "Error loading styles configuration from {}: {}",
                    source.describe(),
                    e
                );

                self.install(StyleConfig::empty());
                Err(e)
            }
        }
    }

    /// Resolve the style of one feature at the current resolution.
    ///
    /// Never fails: a missing configuration or an unknown category yields the
    /// invisible style for this feature only.
    pub fn resolve(&mut self, feature: &MapFeature, resolution: f64) -> FeatureStyle {
        match self.try_resolve(feature, resolution) {
            Ok(style) => style,
            Err(StyleError::UnknownCategory(key)) => {
                self.report_unknown(key);
                FeatureStyle::invisible()
            }
            Err(_) => FeatureStyle::invisible(),
        }
    }

    /// Like [`Self::resolve`] but surfaces why a feature cannot be styled.
    pub fn try_resolve(&mut self, feature: &MapFeature, resolution: f64) -> Result<FeatureStyle> {
        let config = self
            .config
            .as_ref()
            .ok_or(StyleError::ConfigurationUnavailable)?;

        let resolver: &mut dyn StyleResolver = match feature.category() {
            Category::Settlement => &mut self.settlements,
            Category::PointOfInterest => &mut self.poi,
            Category::Province => &mut self.provinces,
            Category::Water => &mut self.water,
        };
        resolver.resolve(config, feature, resolution, &self.options)
    }

    /// Resolve a batch, pairing each feature with its style.
    pub fn resolve_all<'f, I>(
        &mut self,
        features: I,
        resolution: f64,
    ) -> Vec<(&'f MapFeature, FeatureStyle)>
    where
        I: IntoIterator<Item = &'f MapFeature>,
    {
        features
            .into_iter()
            .map(|feature| (feature, self.resolve(feature, resolution)))
            .collect()
    }

    pub fn cache_stats(&self, category: Category) -> CacheStats {
        match category {
            Category::Settlement => self.settlements.cache_stats(),
            Category::PointOfInterest => self.poi.cache_stats(),
            Category::Province => self.provinces.cache_stats(),
            Category::Water => self.water.cache_stats(),
        }
    }

    /// Unknown keys seen since the last install.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &CategoryKey> {
        self.reported_unknown.iter()
    }

    fn report_unknown(&mut self, key: CategoryKey) {
        if self.reported_unknown.contains(&key) {
            return;
        }

        #[cfg(feature = "debug")]
        log::warn!("No style configured for {}; features will not be drawn", key);

        self.reported_unknown.insert(key);
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::features::FeatureKind;
    use geo_types::Point;

    const DOCUMENT: &str = r##"{
        "settlements": {
            "baseConfig": { "textFont": "serif" },
            "sizeCategories": {
                "3": {
                    "color": "#8B4513",
                    "minZoomLevelLabel": 0.005, "maxZoomLevelLabel": 0.0005,
                    "minZoomLevelDot": 0.010, "maxZoomLevelDot": 0.0005,
                    "minDotRadiusZoom": 0.010, "maxDotRadiusZoom": 0.0005,
                    "minDotRadius": 2, "maxDotRadius": 5
                }
            }
        },
        "water": { "sea": { "minZoomLevel": 0.04, "maxZoomLevel": 0.001 } }
    }"##;

    fn engine() -> StyleEngine {
        let (config, issues) = StyleConfig::from_json(DOCUMENT).unwrap();
        assert!(issues.is_empty());
        StyleEngine::with_config(config, EngineOptions::default())
    }

    #[test]
    fn test_unloaded_engine_resolves_invisible_without_caching() {
        let mut engine = StyleEngine::default();
        let town = MapFeature::settlement(0, "Grunburg", 3);

        assert!(!engine.is_ready());
        assert!(engine.resolve(&town, 0.003).is_invisible());
        assert!(matches!(
            engine.try_resolve(&town, 0.003),
            Err(StyleError::ConfigurationUnavailable)
        ));
        assert_eq!(engine.cache_stats(Category::Settlement), CacheStats::default());
    }

    #[test]
    fn test_unknown_keys_are_reported_once() {
        let mut engine = engine();
        let odd = MapFeature::settlement(0, "Oddville", 7);
        let odder = MapFeature::settlement(1, "Odderville", 7);

        assert!(engine.resolve(&odd, 0.003).is_invisible());
        assert!(engine.resolve(&odder, 0.003).is_invisible());
        assert_eq!(engine.unknown_keys().count(), 1);
    }

    #[test]
    fn test_water_label_uses_its_resolver() {
        let mut engine = engine();
        let sea = MapFeature::new(
            crate::data::features::FeatureId(0),
            "Sea of Claws",
            Point::new(5.0, 56.0),
            FeatureKind::Water {
                waterbody_type: "sea".into(),
            },
        );

        let style = engine.resolve(&sea, 0.01);
        assert_eq!(style.label_text(), Some("Sea of Claws"));
        assert!(!style.marker_visible());
        assert_eq!(engine.cache_stats(Category::Water).entries, 1);
        assert_eq!(engine.cache_stats(Category::Settlement).entries, 0);
    }

    #[test]
    fn test_each_resolver_owns_its_category() {
        let engine = StyleEngine::default();
        assert_eq!(engine.settlements.category(), Category::Settlement);
        assert_eq!(engine.poi.category(), Category::PointOfInterest);
        assert_eq!(engine.provinces.category(), Category::Province);
        assert_eq!(engine.water.category(), Category::Water);
    }

    #[test]
    fn test_install_clears_caches() {
        let mut engine = engine();
        let town = MapFeature::settlement(0, "Grunburg", 3);
        engine.resolve(&town, 0.003);
        assert_eq!(engine.cache_stats(Category::Settlement).entries, 1);

        engine.install(StyleConfig::empty());
        assert_eq!(engine.cache_stats(Category::Settlement).entries, 0);
        assert!(engine.resolve(&town, 0.003).is_invisible());
    }
}
