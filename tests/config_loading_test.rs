use atlas_style::prelude::*;

/// Loading configuration and features through the async sources
#[cfg(test)]
mod config_loading_tests {
    use super::*;

    fn fixture(name: &str) -> String {
        format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    #[tokio::test]
    async fn test_load_fixture_from_file() {
        let mut engine = StyleEngine::default();
        let issues = engine
            .load_from(&FileSource::new(fixture("styles-config.json")))
            .await
            .unwrap();

        assert!(issues.is_empty());
        assert!(engine.is_ready());
        let config = engine.config().unwrap();
        assert!(config.settlement(SizeRank::new(6).unwrap()).is_some());
        assert!(config.poi().is_some());
        assert!(config.province("grand_county").is_some());
        assert!(config.water("river").is_some());
    }

    /// A failed load leaves the empty configuration installed
    #[tokio::test]
    async fn test_failed_load_installs_empty_config() {
        let mut engine = StyleEngine::default();
        let result = engine
            .load_from(&FileSource::new(fixture("does-not-exist.json")))
            .await;

        assert!(matches!(result, Err(StyleError::Io(_))));
        assert!(engine.is_ready());
        assert!(engine.config().unwrap().is_empty());
        assert!(engine
            .resolve(&MapFeature::settlement(0, "Altdorf", 6), 0.001)
            .is_invisible());
    }

    /// Malformed JSON replaces a previously good configuration too
    #[tokio::test]
    async fn test_bad_reload_clears_previous_config() {
        let mut engine = StyleEngine::default();
        engine
            .load_from(&FileSource::new(fixture("styles-config.json")))
            .await
            .unwrap();
        let altdorf = MapFeature::settlement(0, "Altdorf", 6);
        assert!(!engine.resolve(&altdorf, 0.001).is_invisible());

        let result = engine
            .load_from(&StaticSource::new("truncated", "{\"settlements\": "))
            .await;
        assert!(matches!(result, Err(StyleError::Serialization(_))));
        assert!(engine.resolve(&altdorf, 0.001).is_invisible());

        engine
            .load_from(&FileSource::new(fixture("styles-config.json")))
            .await
            .unwrap();
        assert!(!engine.resolve(&altdorf, 0.001).is_invisible());
    }

    /// Partly broken documents load everything that validates
    #[tokio::test]
    async fn test_partial_document_reports_issues() {
        let document = r##"{
            "settlements": { "sizeCategories": {
                "4": { "color": "#7B3F00", "minZoomLevelLabel": 0.01, "maxZoomLevelLabel": 0.0002 },
                "12": { "color": "#000", "minZoomLevelLabel": 0.01, "maxZoomLevelLabel": 0.0002 }
            } }
        }"##;
        let mut engine = StyleEngine::default();
        let issues = engine
            .load_from(&StaticSource::new("inline", document))
            .await
            .unwrap();

        assert_eq!(issues.len(), 1);
        assert!(issues[0].entry.ends_with("12"));
        let kemperbad = MapFeature::settlement(0, "Kemperbad", 4);
        let style = engine.resolve(&kemperbad, 0.005);
        assert_eq!(style.label_text(), Some("Kemperbad"));
        assert!(!style.marker_visible());
    }

    #[tokio::test]
    async fn test_load_settlement_fixture() {
        let extent = MapExtent::new(
            -4.79269114725315,
            40.30062386071874,
            13.73066378234685,
            58.82397879031875,
        );
        let sources = vec![FeatureCollectionSource::new(
            Category::Settlement,
            FileSource::new(fixture("settlements.geojson")),
        )];

        let features = load_features(&sources, Some(&extent)).await.unwrap();
        assert_eq!(features.len(), 4);
        assert!(features.find_by_name("Beyond the Edge").is_none());
        assert!(features.find_by_name("Nowhere").is_none());
        assert_eq!(
            features.find_by_name("Grunburg").unwrap().size_rank(),
            SizeRank::new(3)
        );
    }

    /// Fixture features resolved together: the unknown rank drops out
    #[tokio::test]
    async fn test_fixture_features_resolve() {
        let mut engine = StyleEngine::default();
        engine
            .load_from(&FileSource::new(fixture("styles-config.json")))
            .await
            .unwrap();
        let sources = vec![FeatureCollectionSource::new(
            Category::Settlement,
            FileSource::new(fixture("settlements.geojson")),
        )];
        let features = load_features(&sources, None).await.unwrap();

        let styled = engine.resolve_all(features.iter(), 0.004);
        let drawn: Vec<&str> = styled
            .iter()
            .filter(|(_, style)| !style.is_invisible())
            .map(|(feature, _)| feature.name.as_str())
            .collect();

        assert!(drawn.contains(&"Altdorf"));
        assert!(drawn.contains(&"Grunburg"));
        assert!(!drawn.contains(&"Oddville"));
        assert_eq!(engine.unknown_keys().count(), 1);
    }
}
