use geo_types::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Vec<f64>,
    },
    LineString {
        coordinates: Vec<Vec<f64>>,
    },
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPoint {
        coordinates: Vec<Vec<f64>>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

impl GeoJsonGeometry {
    /// The position of a point geometry, if it is a well-formed `[lon, lat]` pair.
    ///
    /// Labels and markers are anchored at points only; every other geometry
    /// type yields `None`.
    pub fn point(&self) -> Option<Point<f64>> {
        match self {
            GeoJsonGeometry::Point { coordinates } => valid_position(coordinates),
            _ => None,
        }
    }
}

fn valid_position(coordinates: &[f64]) -> Option<Point<f64>> {
    match coordinates {
        [x, y] if x.is_finite() && y.is_finite() => Some(Point::new(*x, *y)),
        _ => None,
    }
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<HashMap<String, serde_json::Value>>,
}

impl GeoJsonFeature {
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.as_ref()?.get(key)
    }

    pub fn str_property(&self, key: &str) -> Option<&str> {
        self.property(key)?.as_str()
    }

    /// Numeric property, accepting numbers and numeric strings.
    pub fn f64_property(&self, key: &str) -> Option<f64> {
        match self.property(key)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn string_list_property(&self, key: &str) -> Vec<String> {
        match self.property(key) {
            Some(serde_json::Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn position(&self) -> Option<Point<f64>> {
        self.geometry.as_ref()?.point()
    }
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
}

impl GeoJson {
    pub fn from_str(geojson_str: &str) -> crate::Result<Self> {
        serde_json::from_str(geojson_str)
            .map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)))
    }

    pub fn into_features(self) -> Vec<GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features,
        }
    }
}

/// Rectangle outside of which point features are discarded at load time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapExtent(pub Rect<f64>);

impl MapExtent {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self(Rect::new((min_x, min_y), (max_x, max_y)))
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: &Point<f64>) -> bool {
        let min = self.0.min();
        let max = self.0.max();
        point.x() >= min.x && point.x() <= max.x && point.y() >= min.y && point.y() <= max.y
    }
}
