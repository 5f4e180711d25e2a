// file: src/filter/mod.rs
// description: structured filter stages module exports
// reference: internal module structure

pub mod language;
pub mod pipeline;
pub mod specialty;

pub use language::normalize_language;
pub use pipeline::FilterPipeline;
pub use specialty::{SpecialtyQuery, correct_specialty, filter_specialty, normalize_specialty};
