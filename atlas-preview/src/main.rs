//! Headless and windowed preview of the atlas style engine.
//!
//! ```text
//! atlas-preview --config styles-config.json --resolution 0.005 \
//!     --settlements towns.geojson --water water.geojson --highlight Altdorf [--window]
//! ```

mod scene;
mod viewer;

use anyhow::{Context, Result};
use atlas_style::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use scene::{compose, View};
use viewer::PreviewApp;

/// The atlas image extent in map units.
const ATLAS_EXTENT: [f64; 4] = [
    -4.79269114725315,
    40.30062386071874,
    13.73066378234685,
    58.82397879031875,
];

#[derive(Debug, Parser)]
#[command(name = "atlas-preview")]
#[command(about = "Show which atlas features are drawn at a resolution", long_about = None)]
struct Args {
    /// Styles configuration document
    #[arg(long)]
    config: PathBuf,

    /// Map units per screen pixel
    #[arg(long, default_value_t = 0.005)]
    resolution: f64,

    /// Settlement GeoJSON collection (repeatable)
    #[arg(long)]
    settlements: Vec<PathBuf>,

    /// Point-of-interest GeoJSON collection (repeatable)
    #[arg(long)]
    poi: Vec<PathBuf>,

    /// Province label GeoJSON collection (repeatable)
    #[arg(long)]
    provinces: Vec<PathBuf>,

    /// Water label GeoJSON collection (repeatable)
    #[arg(long)]
    water: Vec<PathBuf>,

    /// Name of the feature to highlight
    #[arg(long)]
    highlight: Option<String>,

    /// Viewport size in pixels, e.g. 1200x800
    #[arg(long, value_parser = parse_size, default_value = "1200x800")]
    size: [f64; 2],

    /// Open an interactive window instead of printing
    #[arg(long)]
    window: bool,
}

impl Args {
    /// Every collection paired with its category, settlements first.
    fn collections(&self) -> Vec<(Category, &PathBuf)> {
        [
            (Category::Settlement, &self.settlements),
            (Category::PointOfInterest, &self.poi),
            (Category::Province, &self.provinces),
            (Category::Water, &self.water),
        ]
        .into_iter()
        .flat_map(|(category, paths)| paths.iter().map(move |path| (category, path)))
        .collect()
    }
}

fn parse_size(raw: &str) -> std::result::Result<[f64; 2], String> {
    let (w, h) = raw
        .split_once('x')
        .ok_or_else(|| format!("size must look like 1200x800, got {}", raw))?;
    let dimension = |v: &str| -> std::result::Result<f64, String> {
        match v.trim().parse::<f64>() {
            Ok(d) if d.is_finite() && d > 0.0 => Ok(d),
            _ => Err(format!("invalid dimension {:?} in {}", v, raw)),
        }
    };
    Ok([dimension(w)?, dimension(h)?])
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mut engine = StyleEngine::with_profile(EngineProfile::Balanced);
    let issues = engine
        .load_from(&FileSource::new(&args.config))
        .await
        .with_context(|| format!("loading {}", args.config.display()))?;
    for issue in &issues {
        log::warn!("skipped style entry {}", issue);
    }

    let extent = MapExtent::new(
        ATLAS_EXTENT[0],
        ATLAS_EXTENT[1],
        ATLAS_EXTENT[2],
        ATLAS_EXTENT[3],
    );
    let sources: Vec<FeatureCollectionSource> = args
        .collections()
        .into_iter()
        .map(|(category, path)| FeatureCollectionSource::new(category, FileSource::new(path)))
        .collect();
    let mut features = load_features(&sources, Some(&extent)).await?;

    let mut selection = HighlightSelection::new();
    if let Some(name) = &args.highlight {
        if selection.select_by_name(&mut features, name).is_none() {
            log::warn!("No feature named {}", name);
        }
    }

    let view = View::new(&extent, args.resolution, args.size);

    if args.window {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([view.size[0] as f32, view.size[1] as f32])
                .with_title("Atlas style preview"),
            ..Default::default()
        };
        eframe::run_native(
            "atlas-preview",
            options,
            Box::new(move |_cc| Box::new(PreviewApp::new(engine, features, selection, view))),
        )
        .map_err(|e| anyhow::anyhow!("viewer failed: {}", e))?;
        return Ok(());
    }

    print_scene(&mut engine, &features, &view);
    Ok(())
}

fn print_scene(engine: &mut StyleEngine, features: &FeatureSet, view: &View) {
    let scene = compose(engine, features, view, &ApproxMeasurer::default());

    println!(
        "resolution {:.5}: {} drawn, {} suppressed",
        view.resolution,
        scene.kept.len(),
        scene.suppressed.len()
    );
    for placement in scene.kept.iter().rev() {
        let Some(feature) = features.get(placement.id) else {
            continue;
        };
        let style = &placement.style;
        println!(
            "  {:<24} {:<10} priority {:>10}  marker {:<8} label {}",
            feature.name,
            feature.category(),
            style.draw_priority,
            style
                .marker_radius()
                .map_or("-".to_string(), |r| format!("{:.1}px", r)),
            style
                .font_size_px()
                .map_or("-".to_string(), |s| format!("{}px", s)),
        );
    }
    for id in &scene.suppressed {
        if let Some(feature) = features.get(*id) {
            println!("  (suppressed) {}", feature.name);
        }
    }
    for category in Category::ALL {
        let stats = engine.cache_stats(category);
        log::debug!(
            "{} cache: {} entries, {} hits, {} misses",
            category,
            stats.entries,
            stats.hits,
            stats.misses
        );
    }
}
