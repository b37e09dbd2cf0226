use std::sync::Arc;

use crate::config::category::StyleConfig;
use crate::core::config::EngineOptions;
use crate::data::features::{Category, MapFeature};
use crate::style::cache::{CacheStats, StyleCache};
use crate::style::descriptor::{FeatureStyle, MarkerStyle};
use crate::style::resolver::{resolve_point, CategoryKey, StyleResolver};
use crate::{Result, StyleError};

/// Points of interest share a single `default` entry regardless of their type.
#[derive(Debug)]
pub struct PoiResolver {
    cache: StyleCache<i64, Arc<MarkerStyle>>,
}

impl PoiResolver {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: StyleCache::new(capacity),
        }
    }
}

impl StyleResolver for PoiResolver {
    fn category(&self) -> Category {
        Category::PointOfInterest
    }

    fn resolve(
        &mut self,
        config: &StyleConfig,
        feature: &MapFeature,
        resolution: f64,
        options: &EngineOptions,
    ) -> Result<FeatureStyle> {
        let style = config.poi().ok_or_else(|| {
            StyleError::UnknownCategory(CategoryKey::new(Category::PointOfInterest, "default"))
        })?;

        Ok(resolve_point(
            &mut self.cache,
            |bucket| bucket,
            style,
            feature,
            resolution,
            options,
        ))
    }

    fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
