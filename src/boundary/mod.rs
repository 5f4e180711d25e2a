// file: src/boundary/mod.rs
// description: external collaborators consumed by the engine
// reference: internal module structure

pub mod geocode;
pub mod oracle;

pub use geocode::{Geocoder, TableGeocoder};
pub use oracle::{FixedOracle, IntentOracle, ReplayOracle};
