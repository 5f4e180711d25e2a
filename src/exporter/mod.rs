// file: src/exporter/mod.rs
// description: search outcome export
// reference: internal module structure

pub mod json;

pub use json::{ExportedSearch, JsonExporter};
