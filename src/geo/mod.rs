// file: src/geo/mod.rs
// description: location classification, adjacency and postal proximity
// reference: internal module structure

pub mod adjacency;
pub mod patterns;
pub mod postal;
pub mod resolver;

pub use adjacency::neighbors;
pub use postal::{postal_distance, sector};
pub use resolver::{GeoResolver, LocationQuery};
