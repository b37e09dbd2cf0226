//! The styles configuration: document schema, validation and sources.

pub mod category;
pub mod loader;
pub mod schema;

pub use category::{CategoryStyle, ConfigIssue, StyleConfig};
pub use loader::{ConfigSource, FileSource, HttpSource, StaticSource};
