// file: src/fuzzy/mod.rs
// description: doctor name matching with fused fuzzy scores
// reference: internal module structure

pub mod fusion;
pub mod matcher;
pub mod scorers;

pub use fusion::{FusedCandidate, FusionTable, Strategy};
pub use matcher::{MatchTier, NameMatch, NameMatcher};
