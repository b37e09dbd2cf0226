//! Drawing resolved styles with egui.

use egui::{Align2, Color32, FontFamily, FontId, Painter, Pos2, Stroke, Vec2};

use crate::declutter::collision::TextMeasurer;
use crate::style::color::Color;
use crate::style::descriptor::{FeatureStyle, FontSpec, LabelStyle, MarkerStyle};

impl From<Color> for Color32 {
    fn from(color: Color) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

/// egui has no serif face by default; anything but monospace is proportional.
pub fn font_id(font: &FontSpec) -> FontId {
    let family = if font.family.eq_ignore_ascii_case("monospace") {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    };
    FontId::new(font.size_px as f32, family)
}

/// Draw a feature's marker and label anchored at `anchor`.
pub fn paint_feature(painter: &Painter, anchor: Pos2, style: &FeatureStyle) {
    if let Some(marker) = &style.marker {
        paint_marker(painter, anchor, marker);
    }
    if let Some(label) = &style.label {
        paint_label(painter, anchor, label);
    }
}

pub fn paint_marker(painter: &Painter, center: Pos2, marker: &MarkerStyle) {
    painter.circle(
        center,
        marker.radius as f32,
        Color32::from(marker.fill),
        Stroke::new(marker.stroke.width as f32, Color32::from(marker.stroke.color)),
    );
}

/// Text with a halo: the stroke colour is painted around the glyphs, then
/// the fill on top.
pub fn paint_label(painter: &Painter, anchor: Pos2, label: &LabelStyle) {
    let pos = anchor + Vec2::new(0.0, label.offset_y as f32);
    let font = font_id(&label.font);
    let halo = (label.stroke.width as f32 / 2.0).max(0.0);

    if halo > 0.0 {
        let stroke_color = Color32::from(label.stroke.color);
        let offsets = [
            (-1.0, 0.0),
            (1.0, 0.0),
            (0.0, -1.0),
            (0.0, 1.0),
            (-0.7, -0.7),
            (0.7, -0.7),
            (-0.7, 0.7),
            (0.7, 0.7),
        ];
        for (dx, dy) in offsets {
            painter.text(
                pos + Vec2::new(dx, dy) * halo,
                Align2::CENTER_CENTER,
                &label.text,
                font.clone(),
                stroke_color,
            );
        }
    }

    let fill = Color32::from(label.fill);
    if label.font.bold {
        painter.text(
            pos + Vec2::new(0.5, 0.0),
            Align2::CENTER_CENTER,
            &label.text,
            font.clone(),
            fill,
        );
    }
    painter.text(pos, Align2::CENTER_CENTER, &label.text, font, fill);
}

/// Measures text with the fonts of a live egui context.
pub struct EguiMeasurer<'a> {
    painter: &'a Painter,
}

impl<'a> EguiMeasurer<'a> {
    pub fn new(painter: &'a Painter) -> Self {
        Self { painter }
    }
}

impl TextMeasurer for EguiMeasurer<'_> {
    fn measure(&self, text: &str, font: &FontSpec) -> (f64, f64) {
        let galley = self
            .painter
            .layout_no_wrap(text.to_owned(), font_id(font), Color32::WHITE);
        let size = galley.size();
        (size.x as f64, size.y as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion_keeps_alpha() {
        let color: Color32 = Color::rgba(139, 0, 0, 255).into();
        assert_eq!(color, Color32::from_rgb(139, 0, 0));
        let clear: Color32 = Color::TRANSPARENT.into();
        assert_eq!(clear.a(), 0);
    }

    #[test]
    fn test_font_mapping() {
        let font = FontSpec {
            size_px: 14,
            family: "serif".into(),
            bold: true,
        };
        assert_eq!(font_id(&font), FontId::proportional(14.0));
    }
}
