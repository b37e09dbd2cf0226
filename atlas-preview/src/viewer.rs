use atlas_style::prelude::*;
use atlas_style::render::painter::paint_feature;

use crate::scene::{compose, View};

pub struct PreviewApp {
    engine: StyleEngine,
    features: FeatureSet,
    selection: HighlightSelection,
    view: View,
    search: String,
    show_stats: bool,
}

impl PreviewApp {
    pub fn new(
        engine: StyleEngine,
        features: FeatureSet,
        selection: HighlightSelection,
        view: View,
    ) -> Self {
        Self {
            engine,
            features,
            selection,
            view,
            search: String::new(),
            show_stats: false,
        }
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Highlight:");
            let response = ui.text_edit_singleline(&mut self.search);
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                if self.search.trim().is_empty() {
                    self.selection.clear(&mut self.features);
                } else {
                    let name = self.search.trim();
                    if self.selection.select_by_name(&mut self.features, name).is_none() {
                        log::warn!("No feature named {}", name);
                    }
                }
            }
            if ui.button("Clear").clicked() {
                self.search.clear();
                self.selection.clear(&mut self.features);
            }
            ui.checkbox(&mut self.show_stats, "Cache stats");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("Resolution: {:.5}", self.view.resolution));
            });
        });
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| self.top_bar(ui));

        if self.show_stats {
            egui::SidePanel::left("stats_panel").resizable(true).show(ctx, |ui| {
                ui.heading("Style caches");
                ui.separator();
                for category in Category::ALL {
                    let stats = self.engine.cache_stats(category);
                    ui.label(format!(
                        "{}: {} entries, {} hits, {} misses",
                        category, stats.entries, stats.hits, stats.misses
                    ));
                }
            });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::from_rgb(236, 226, 198)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::drag());
                let origin = response.rect.min;
                self.view.size = [response.rect.width() as f64, response.rect.height() as f64];

                let drag = response.drag_delta();
                self.view.pan(drag.x as f64, drag.y as f64);
                if response.hovered() {
                    self.view.zoom(ui.input(|i| i.zoom_delta()) as f64);
                }

                let measurer = EguiMeasurer::new(&painter);
                let scene = compose(&mut self.engine, &self.features, &self.view, &measurer);
                for placement in &scene.kept {
                    let offset = egui::vec2(placement.anchor[0] as f32, placement.anchor[1] as f32);
                    let anchor = origin + offset;
                    paint_feature(&painter, anchor, &placement.style);
                }
            });
    }
}
