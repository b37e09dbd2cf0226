//! Loading feature collections.

use futures::future::try_join_all;

use crate::config::loader::ConfigSource;
use crate::data::features::{Category, FeatureSet};
use crate::data::geojson::{GeoJson, MapExtent};
use crate::Result;

/// One GeoJSON collection and the category its features belong to.
pub struct FeatureCollectionSource {
    pub category: Category,
    pub source: Box<dyn ConfigSource>,
}

impl FeatureCollectionSource {
    pub fn new(category: Category, source: impl ConfigSource + 'static) -> Self {
        Self {
            category,
            source: Box::new(source),
        }
    }
}

/// Fetch every collection concurrently and merge them into one set.
///
/// Fails on the first collection that cannot be fetched or parsed. Features
/// outside `extent`, without a point position or missing their required
/// attributes are dropped. Ids follow the order of `sources`.
pub async fn load_features(
    sources: &[FeatureCollectionSource],
    extent: Option<&MapExtent>,
) -> Result<FeatureSet> {
    let documents = try_join_all(sources.iter().map(|entry| async move {
        let body = entry.source.fetch().await?;
        GeoJson::from_str(&body)
    }))
    .await?;

    let mut features = FeatureSet::new();
    for (entry, document) in sources.iter().zip(documents) {
        let collection = document.into_features();
        #[cfg_attr(not(feature = "debug"), allow(unused_variables))]
        let total = collection.len();
        #[cfg_attr(not(feature = "debug"), allow(unused_variables))]
        let accepted = features.extend_from_geojson(entry.category, &collection, extent);

        #[cfg(feature = "debug")]
        log::info!(
            "Loaded {} of {} {} features from {}",
            accepted,
            total,
            entry.category,
            entry.source.describe()
        );
    }

    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::StaticSource;
    use crate::StyleError;

    const TOWNS: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"name": "Altdorf", "size_category": 6},
         "geometry": {"type": "Point", "coordinates": [8.0, 50.0]}}
    ]}"#;

    const SEAS: &str = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"name": "Sea of Claws", "waterbody_type": "sea"},
         "geometry": {"type": "Point", "coordinates": [5.0, 56.0]}}
    ]}"#;

    #[tokio::test]
    async fn test_collections_merge_in_source_order() {
        let sources = vec![
            FeatureCollectionSource::new(Category::Settlement, StaticSource::new("towns", TOWNS)),
            FeatureCollectionSource::new(Category::Water, StaticSource::new("seas", SEAS)),
        ];

        let features = load_features(&sources, None).await.unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features.iter().next().unwrap().name, "Altdorf");
        assert_eq!(
            features.find_by_name("Sea of Claws").unwrap().category(),
            Category::Water
        );
    }

    #[tokio::test]
    async fn test_one_bad_collection_fails_the_load() {
        let sources = vec![
            FeatureCollectionSource::new(Category::Settlement, StaticSource::new("towns", TOWNS)),
            FeatureCollectionSource::new(Category::Water, StaticSource::new("broken", "{")),
        ];

        let result = load_features(&sources, None).await;
        assert!(matches!(result, Err(StyleError::ParseError(_))));
    }
}
