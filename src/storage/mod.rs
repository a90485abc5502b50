pub mod document;
pub mod file;

pub use document::{Document, Geometry};
pub use file::{LoadOutcome, Store};
