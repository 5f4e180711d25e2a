// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod boundary;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod exporter;
pub mod filter;
pub mod fuzzy;
pub mod geo;
pub mod models;
pub mod ranking;
pub mod utils;

pub use boundary::{FixedOracle, Geocoder, IntentOracle, ReplayOracle, TableGeocoder};
pub use config::{Config, DatasetConfig, FuzzyConfig, RankingConfig};
pub use dataset::{Column, Dataset, Record, WorkingSet, load_dataset};
pub use engine::SearchEngine;
pub use error::{Result, SearchError};
pub use exporter::JsonExporter;
pub use filter::FilterPipeline;
pub use fuzzy::NameMatcher;
pub use geo::{GeoResolver, LocationQuery, postal_distance};
pub use models::{
    ClinicRecord, Diagnostic, FilterStage, Filters, Intent, ProviderRecord, QueryPlan,
    RankedResult, SearchOutcome,
};
pub use ranking::ResultRanker;
pub use utils::{OperationTimer, Validator};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = Config::default_config();
        let engine = SearchEngine::new(config, Dataset::new(vec![]), Dataset::new(vec![]));
        let outcome = engine.search(&QueryPlan::default());
        assert!(outcome.is_empty());
        assert_eq!(postal_distance(640526, 640652), 126.0);
    }
}
