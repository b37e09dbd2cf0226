//! egui drawing of resolved styles.

pub mod painter;

pub use painter::{paint_feature, EguiMeasurer};
