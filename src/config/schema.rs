//! Serde shape of the styles configuration document.
//!
//! These types mirror the JSON exactly and are deliberately loose: nearly
//! every field is optional so that a partly broken document still parses.
//! [`crate::config::category`] turns them into the validated form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesDocument {
    pub settlements: SettlementsSection,
    pub poi: PoiSection,
    pub provinces: BTreeMap<String, LabelCategoryDoc>,
    pub water: BTreeMap<String, LabelCategoryDoc>,
}

impl StylesDocument {
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SettlementsSection {
    pub base_config: BaseConfigDoc,
    pub size_categories: BTreeMap<String, PointCategoryDoc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoiSection {
    pub base_config: BaseConfigDoc,
    pub default: Option<PointCategoryDoc>,
}

/// Paint shared by every entry of a point category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaseConfigDoc {
    pub color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f64>,
    pub text_font: Option<String>,
    pub text_fill_color: Option<String>,
    pub text_stroke_color: Option<String>,
    pub text_stroke_width: Option<f64>,
    pub text_offset_y: Option<f64>,
}

/// One settlement size rank, or the POI default entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PointCategoryDoc {
    pub color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f64>,
    pub z_index: Option<i32>,
    pub min_zoom_level_label: Option<f64>,
    pub max_zoom_level_label: Option<f64>,
    pub min_zoom_level_dot: Option<f64>,
    pub max_zoom_level_dot: Option<f64>,
    pub min_font_zoom: Option<f64>,
    pub max_font_zoom: Option<f64>,
    pub min_font_size: Option<f64>,
    pub max_font_size: Option<f64>,
    pub min_dot_radius_zoom: Option<f64>,
    pub max_dot_radius_zoom: Option<f64>,
    pub min_dot_radius: Option<f64>,
    pub max_dot_radius: Option<f64>,
}

/// A province or water body type. Label only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LabelCategoryDoc {
    #[serde(alias = "minZoomLevelLabel")]
    pub min_zoom_level: Option<f64>,
    #[serde(alias = "maxZoomLevelLabel")]
    pub max_zoom_level: Option<f64>,
    pub min_font_zoom: Option<f64>,
    pub max_font_zoom: Option<f64>,
    pub min_font_size: Option<f64>,
    pub max_font_size: Option<f64>,
    /// Fixed size used when no font interpolation range is given.
    pub font_size: Option<f64>,
    pub text_font: Option<String>,
    pub text_fill_color: Option<String>,
    pub text_stroke_color: Option<String>,
    pub text_stroke_width: Option<f64>,
    pub text_offset_y: Option<f64>,
    pub z_index: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_parses() {
        let doc = StylesDocument::from_json("{}").unwrap();
        assert!(doc.settlements.size_categories.is_empty());
        assert!(doc.poi.default.is_none());
        assert!(doc.provinces.is_empty());
    }

    #[test]
    fn test_camel_case_fields() {
        let doc = StylesDocument::from_json(
            r##"{
                "settlements": {
                    "baseConfig": { "textFont": "serif", "textOffsetY": -12 },
                    "sizeCategories": {
                        "3": {
                            "color": "#333",
                            "minZoomLevelDot": 0.01, "maxZoomLevelDot": 0.0005,
                            "zIndex": 3
                        }
                    }
                }
            }"##,
        )
        .unwrap();
        assert_eq!(doc.settlements.base_config.text_offset_y, Some(-12.0));
        let rank3 = &doc.settlements.size_categories["3"];
        assert_eq!(rank3.min_zoom_level_dot, Some(0.01));
        assert_eq!(rank3.z_index, Some(3));
    }

    #[test]
    fn test_label_entries_accept_both_key_generations() {
        let doc = StylesDocument::from_json(
            r#"{
                "provinces": { "province": { "minZoomLevel": 0.02, "maxZoomLevel": 0.004 } },
                "water": { "sea": { "minZoomLevelLabel": 0.03, "maxZoomLevelLabel": 0.001 } }
            }"#,
        )
        .unwrap();
        assert_eq!(doc.provinces["province"].min_zoom_level, Some(0.02));
        assert_eq!(doc.water["sea"].min_zoom_level, Some(0.03));
        assert_eq!(doc.water["sea"].max_zoom_level, Some(0.001));
    }

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let err = StylesDocument::from_json("{ \"poi\": 5 ").unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)));
    }
}
