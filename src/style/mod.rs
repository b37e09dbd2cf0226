//! Zoom-dependent style resolution.

pub mod cache;
pub mod color;
pub mod descriptor;
pub mod engine;
pub mod interpolation;
pub mod label;
pub mod poi;
pub mod resolver;
pub mod settlement;
pub mod visibility;
