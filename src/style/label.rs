//! Province and water body labels.
//!
//! Both are label-only categories keyed by a type string
//! (`province_type` / `waterbody_type`), so one resolver serves both.

use std::sync::Arc;

use crate::config::category::{CategoryStyle, StyleConfig};
use crate::core::config::EngineOptions;
use crate::data::features::{Category, FeatureKind, MapFeature};
use crate::style::cache::{CacheStats, StyleCache};
use crate::style::descriptor::{FeatureStyle, LabelTemplate};
use crate::style::resolver::{resolve_label, CategoryKey, StyleResolver};
use crate::{Result, StyleError};

#[derive(Debug)]
pub struct AreaLabelResolver {
    category: Category,
    cache: StyleCache<(String, i64), Arc<LabelTemplate>>,
}

impl AreaLabelResolver {
    pub fn provinces(capacity: usize) -> Self {
        Self {
            category: Category::Province,
            cache: StyleCache::new(capacity),
        }
    }

    pub fn water(capacity: usize) -> Self {
        Self {
            category: Category::Water,
            cache: StyleCache::new(capacity),
        }
    }

    fn subtype<'a>(&self, feature: &'a MapFeature) -> Option<&'a str> {
        match (&feature.kind, self.category) {
            (FeatureKind::Province { province_type }, Category::Province) => {
                Some(province_type.as_str())
            }
            (FeatureKind::Water { waterbody_type }, Category::Water) => {
                Some(waterbody_type.as_str())
            }
            _ => None,
        }
    }

    fn lookup<'c>(&self, config: &'c StyleConfig, subtype: &str) -> Option<&'c CategoryStyle> {
        match self.category {
            Category::Province => config.province(subtype),
            _ => config.water(subtype),
        }
    }
}

impl StyleResolver for AreaLabelResolver {
    fn category(&self) -> Category {
        self.category
    }

    fn resolve(
        &mut self,
        config: &StyleConfig,
        feature: &MapFeature,
        resolution: f64,
        options: &EngineOptions,
    ) -> Result<FeatureStyle> {
        let subtype = self.subtype(feature).ok_or_else(|| {
            let key = CategoryKey::new(feature.category(), self.category.to_string());
            StyleError::UnknownCategory(key)
        })?;
        let style = self.lookup(config, subtype).ok_or_else(|| {
            StyleError::UnknownCategory(CategoryKey::new(self.category, subtype))
        })?;

        Ok(resolve_label(
            &mut self.cache,
            |bucket| (subtype.to_string(), bucket),
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
