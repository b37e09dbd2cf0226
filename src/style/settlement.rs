use std::sync::Arc;

use crate::config::category::StyleConfig;
use crate::core::config::EngineOptions;
use crate::data::features::{Category, FeatureKind, MapFeature, SizeRank};
use crate::style::cache::{CacheStats, StyleCache};
use crate::style::descriptor::{FeatureStyle, MarkerStyle};
use crate::style::resolver::{resolve_point, CategoryKey, StyleResolver};
use crate::{Result, StyleError};

/// Settlements are styled per size rank; markers are cached by (rank, bucket).
#[derive(Debug)]
pub struct SettlementResolver {
    cache: StyleCache<(SizeRank, i64), Arc<MarkerStyle>>,
}

impl SettlementResolver {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: StyleCache::new(capacity),
        }
    }
}

impl StyleResolver for SettlementResolver {
    fn category(&self) -> Category {
        Category::Settlement
    }

    fn resolve(
        &mut self,
        config: &StyleConfig,
        feature: &MapFeature,
        resolution: f64,
        options: &EngineOptions,
    ) -> Result<FeatureStyle> {
        let FeatureKind::Settlement { size, .. } = &feature.kind else {
            return Err(StyleError::UnknownCategory(CategoryKey::new(
                feature.category(),
                "settlement",
            )));
        };
        let unknown = || {
            StyleError::UnknownCategory(CategoryKey::new(Category::Settlement, size.to_string()))
        };

        let rank = feature.size_rank().ok_or_else(unknown)?;
        let style = config.settlement(rank).ok_or_else(unknown)?;

        Ok(resolve_point(
            &mut self.cache,
            |bucket| (rank, bucket),
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
