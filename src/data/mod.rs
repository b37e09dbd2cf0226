pub mod features;
pub mod geojson;
pub mod loader;
pub mod selection;
