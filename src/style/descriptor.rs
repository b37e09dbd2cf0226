//! Style descriptors handed to the rendering layer.
//!
//! A [`FeatureStyle`] is the complete answer for one feature at one
//! resolution: an optional marker, an optional label and a draw priority.
//! Marker styles are shared through [`Arc`] so that cache hits are cheap and
//! so identity can tell a cached style from a freshly computed one.

use serde::Serialize;
use std::sync::Arc;

use crate::declutter::priority::DrawPriority;
use crate::style::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Circle marker drawn at the feature position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill: Color,
    pub stroke: StrokeStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontSpec {
    pub size_px: u32,
    pub family: String,
    pub bold: bool,
}

impl FontSpec {
    /// CSS shorthand, e.g. `bold 14px serif`.
    pub fn css(&self) -> String {
        if self.bold {
            format!("bold {}px {}", self.size_px, self.family)
        } else {
            format!("{}px {}", self.size_px, self.family)
        }
    }
}

/// Everything about a label except its text.
///
/// Label-only categories cache this per (sub-category, resolution) and stamp
/// the feature name onto it per feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelTemplate {
    pub font: FontSpec,
    pub fill: Color,
    pub stroke: StrokeStyle,
    pub offset_y: f64,
}

impl LabelTemplate {
    pub fn with_text(&self, text: &str) -> LabelStyle {
        LabelStyle {
            text: text.to_string(),
            font: self.font.clone(),
            fill: self.fill,
            stroke: self.stroke,
            offset_y: self.offset_y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelStyle {
    pub text: String,
    pub font: FontSpec,
    pub fill: Color,
    pub stroke: StrokeStyle,
    pub offset_y: f64,
}

impl LabelStyle {
    pub fn font_size_px(&self) -> u32 {
        self.font.size_px
    }
}

/// Resolved style for one feature. Both parts absent means "draw nothing".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStyle {
    pub marker: Option<Arc<MarkerStyle>>,
    pub label: Option<LabelStyle>,
    pub draw_priority: DrawPriority,
}

impl FeatureStyle {
    pub fn invisible() -> Self {
        Self {
            marker: None,
            label: None,
            draw_priority: DrawPriority::LOWEST,
        }
    }

    pub fn is_invisible(&self) -> bool {
        self.marker.is_none() && self.label.is_none()
    }

    pub fn marker_visible(&self) -> bool {
        self.marker.is_some()
    }

    pub fn label_visible(&self) -> bool {
        self.label.is_some()
    }

    pub fn marker_radius(&self) -> Option<f64> {
        self.marker.as_ref().map(|m| m.radius)
    }

    pub fn font_size_px(&self) -> Option<u32> {
        self.label.as_ref().map(LabelStyle::font_size_px)
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label.as_ref().map(|l| l.text.as_str())
    }
}

impl Default for FeatureStyle {
    fn default() -> Self {
        Self::invisible()
    }
}
