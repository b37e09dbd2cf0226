pub mod collision;
pub mod priority;
