// file: src/ranking/mod.rs
// description: result ranking and assembly
// reference: internal module structure

pub mod ranker;

pub use ranker::{ClinicTiers, ResultRanker};
