//! Typed map features.
//!
//! GeoJSON property bags are read exactly once, when a [`MapFeature`] is
//! built. The style resolvers only ever see these typed attributes.

use geo_types::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::constants::{MAX_SIZE_RANK, MIN_SIZE_RANK};
use crate::data::geojson::{GeoJsonFeature, MapExtent};

/// Feature classes with their own style resolver and cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Settlement,
    PointOfInterest,
    Province,
    Water,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Settlement,
        Category::PointOfInterest,
        Category::Province,
        Category::Water,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Settlement => "settlement",
            Category::PointOfInterest => "poi",
            Category::Province => "province",
            Category::Water => "water",
        };
        f.pad(name)
    }
}

/// Discrete settlement size, 1 (village) to 6 (major city).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SizeRank(u8);

impl SizeRank {
    pub fn new(rank: u8) -> Option<Self> {
        (MIN_SIZE_RANK..=MAX_SIZE_RANK)
            .contains(&rank)
            .then_some(SizeRank(rank))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Village",
            2 => "Small Town",
            3 => "Town",
            4 => "Large Town",
            5 => "City",
            _ => "Major City",
        }
    }
}

impl TryFrom<u8> for SizeRank {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SizeRank::new(value).ok_or_else(|| format!("size rank {} outside 1..=6", value))
    }
}

impl From<SizeRank> for u8 {
    fn from(rank: SizeRank) -> Self {
        rank.0
    }
}

impl fmt::Display for SizeRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category-specific attributes.
///
/// A settlement keeps its raw size value: a rank the configuration does not
/// know must still reach the resolver so it can be reported and skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FeatureKind {
    Settlement {
        size: i64,
        population: Option<u64>,
        province: Option<String>,
        source_tag: Option<String>,
    },
    PointOfInterest {
        poi_type: Option<String>,
    },
    Province {
        province_type: String,
    },
    Water {
        waterbody_type: String,
    },
}

impl FeatureKind {
    pub fn category(&self) -> Category {
        match self {
            FeatureKind::Settlement { .. } => Category::Settlement,
            FeatureKind::PointOfInterest { .. } => Category::PointOfInterest,
            FeatureKind::Province { .. } => Category::Province,
            FeatureKind::Water { .. } => Category::Water,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FeatureId(pub u32);

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFeature {
    pub id: FeatureId,
    pub name: String,
    #[serde(skip)]
    pub position: Point<f64>,
    pub kind: FeatureKind,
    highlighted: bool,
}

impl MapFeature {
    pub fn new(
        id: FeatureId,
        name: impl Into<String>,
        position: Point<f64>,
        kind: FeatureKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            kind,
            highlighted: false,
        }
    }

    pub fn settlement(id: u32, name: &str, size: i64) -> Self {
        Self::new(
            FeatureId(id),
            name,
            Point::new(0.0, 0.0),
            FeatureKind::Settlement {
                size,
                population: None,
                province: None,
                source_tag: None,
            },
        )
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    pub fn at(mut self, position: Point<f64>) -> Self {
        self.position = position;
        self
    }

    /// Settlement size rank, when the feature is a settlement with a valid size.
    pub fn size_rank(&self) -> Option<SizeRank> {
        match &self.kind {
            FeatureKind::Settlement { size, .. } => {
                u8::try_from(*size).ok().and_then(SizeRank::new)
            }
            _ => None,
        }
    }

    /// Build a typed feature from a GeoJSON feature of the given category.
    ///
    /// Returns `None` when the feature has no usable point position, lies
    /// outside `extent`, or lacks a name.
    pub fn from_geojson(
        id: FeatureId,
        category: Category,
        feature: &GeoJsonFeature,
        extent: Option<&MapExtent>,
    ) -> Option<Self> {
        let position = feature.position()?;
        if extent.map_or(false, |e| !e.contains(&position)) {
            return None;
        }
        let name = feature.str_property("name")?.to_string();

        let kind = match category {
            Category::Settlement => FeatureKind::Settlement {
                size: feature
                    .f64_property("size_category")
                    .map_or(0, |v| v.round() as i64),
                population: feature
                    .f64_property("population")
                    .filter(|p| *p >= 0.0)
                    .map(|p| p as u64),
                province: feature.str_property("province").map(str::to_string),
                source_tag: source_tag(&feature.string_list_property("tags")),
            },
            Category::PointOfInterest => FeatureKind::PointOfInterest {
                poi_type: feature.str_property("type").map(str::to_string),
            },
            Category::Province => FeatureKind::Province {
                province_type: feature.str_property("province_type")?.to_string(),
            },
            Category::Water => FeatureKind::Water {
                waterbody_type: feature.str_property("waterbody_type")?.to_string(),
            },
        };

        Some(Self::new(id, name, position, kind))
    }
}

/// The first `source:` tag, without its prefix.
fn source_tag(tags: &[String]) -> Option<String> {
    tags.iter()
        .find_map(|tag| tag.strip_prefix("source:"))
        .map(str::to_string)
}

/// Owned feature list with stable ids.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    features: Vec<MapFeature>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert GeoJSON features, assigning ids after the ones already held.
    /// Returns how many were accepted.
    pub fn extend_from_geojson(
        &mut self,
        category: Category,
        features: &[GeoJsonFeature],
        extent: Option<&MapExtent>,
    ) -> usize {
        let before = self.features.len();
        for feature in features {
            let id = FeatureId(self.features.len() as u32);
            if let Some(map_feature) = MapFeature::from_geojson(id, category, feature, extent) {
                self.features.push(map_feature);
            }
        }
        self.features.len() - before
    }

    pub fn push(&mut self, mut feature: MapFeature) -> FeatureId {
        let id = FeatureId(self.features.len() as u32);
        feature.id = id;
        self.features.push(feature);
        id
    }

    pub fn get(&self, id: FeatureId) -> Option<&MapFeature> {
        self.features.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: FeatureId) -> Option<&mut MapFeature> {
        self.features.get_mut(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapFeature> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&MapFeature> {
        self.features.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geojson::GeoJson;

    fn parse(json: &str) -> Vec<GeoJsonFeature> {
        GeoJson::from_str(json).unwrap().into_features()
    }

    #[test]
    fn test_size_rank_bounds() {
        assert!(SizeRank::new(0).is_none());
        assert!(SizeRank::new(7).is_none());
        assert_eq!(SizeRank::new(3).unwrap().label(), "Town");
        assert_eq!(SizeRank::new(6).unwrap().label(), "Major City");
    }

    #[test]
    fn test_settlement_attributes_are_typed_once() {
        let features = parse(
            r#"{"type": "FeatureCollection", "features": [{
                "type": "Feature",
                "properties": {"name": "Ubersreik", "size_category": "4", "population": 4000,
                               "province": "Reikland", "tags": ["river", "source:4eEiS"]},
                "geometry": {"type": "Point", "coordinates": [6.1, 47.9]}
            }]}"#,
        );
        let feature =
            MapFeature::from_geojson(FeatureId(0), Category::Settlement, &features[0], None)
                .unwrap();

        assert_eq!(feature.size_rank(), SizeRank::new(4));
        assert!(!feature.is_highlighted());
        match feature.kind {
            FeatureKind::Settlement {
                population,
                province,
                source_tag,
                ..
            } => {
                assert_eq!(population, Some(4000));
                assert_eq!(province.as_deref(), Some("Reikland"));
                assert_eq!(source_tag.as_deref(), Some("4eEiS"));
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_unknown_size_is_kept_raw() {
        let feature = MapFeature::settlement(0, "Oddville", 7);
        assert_eq!(feature.size_rank(), None);
        assert!(matches!(feature.kind, FeatureKind::Settlement { size: 7, .. }));
    }

    #[test]
    fn test_feature_set_drops_unusable_features() {
        let features = parse(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"name": "Sea of Claws", "waterbody_type": "sea"},
                 "geometry": {"type": "Point", "coordinates": [5.0, 56.0]}},
                {"type": "Feature", "properties": {"name": "No type"},
                 "geometry": {"type": "Point", "coordinates": [5.0, 56.0]}},
                {"type": "Feature", "properties": {"name": "Far away", "waterbody_type": "sea"},
                 "geometry": {"type": "Point", "coordinates": [50.0, 56.0]}}
            ]}"#,
        );
        let extent = MapExtent::new(-4.79, 40.30, 13.73, 58.82);

        let mut set = FeatureSet::new();
        let accepted = set.extend_from_geojson(Category::Water, &features, Some(&extent));
        assert_eq!(accepted, 1);
        assert_eq!(set.find_by_name("Sea of Claws").unwrap().category(), Category::Water);
    }

    #[test]
    fn test_ids_index_the_set() {
        let mut set = FeatureSet::new();
        let a = set.push(MapFeature::settlement(99, "A", 1));
        let b = set.push(MapFeature::settlement(99, "B", 2));
        assert_eq!(set.get(a).unwrap().name, "A");
        assert_eq!(set.get(b).unwrap().name, "B");
        assert_eq!(b, FeatureId(1));
    }

    #[test]
    fn test_at_moves_without_retyping() {
        let town = MapFeature::settlement(2, "Grunburg", 3).at(Point::new(7.4, 49.9));
        assert_eq!(town.position, Point::new(7.4, 49.9));
        assert_eq!(town.id, FeatureId(2));
        assert_eq!(town.size_rank(), SizeRank::new(3));
    }
}
