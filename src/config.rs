// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, SearchError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub datasets: DatasetConfig,
    pub ranking: RankingConfig,
    pub fuzzy: FuzzyConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    pub clinics_path: PathBuf,
    pub providers_path: PathBuf,
}

/// Caps applied by the result ranker and the postal resolver.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankingConfig {
    pub clinic_area_cap: usize,
    pub clinic_address_cap: usize,
    pub clinic_nearby_cap: usize,
    pub clinic_default_limit: usize,
    pub provider_default_limit: usize,
    pub postal_candidate_limit: usize,
}

/// Thresholds for doctor name matching.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FuzzyConfig {
    /// Candidates kept per library scorer before fusion.
    pub strategy_limit: usize,
    /// Raw scores at or below this never enter fusion.
    pub min_raw_score: f64,
    pub max_results: usize,
    /// Exact-tier size at which fuzzy entries are no longer mixed in.
    pub exact_quorum: usize,
    pub fuzzy_extra: usize,
    pub fuzzy_min_score: f64,
    pub substring_fallback_limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            clinic_area_cap: 10,
            clinic_address_cap: 5,
            clinic_nearby_cap: 5,
            clinic_default_limit: 15,
            provider_default_limit: 10,
            postal_candidate_limit: 20,
        }
    }
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            strategy_limit: 20,
            min_raw_score: 25.0,
            max_results: 5,
            exact_quorum: 3,
            fuzzy_extra: 3,
            fuzzy_min_score: 60.0,
            substring_fallback_limit: 10,
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("CARE_SEARCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            datasets: DatasetConfig {
                clinics_path: PathBuf::from("data/clinics.json"),
                providers_path: PathBuf::from("data/doctors.json"),
            },
            ranking: RankingConfig::default(),
            fuzzy: FuzzyConfig::default(),
        }
    }

    fn validate(&self) -> Result<()> {
        let caps = [
            ("ranking.clinic_area_cap", self.ranking.clinic_area_cap),
            ("ranking.clinic_address_cap", self.ranking.clinic_address_cap),
            ("ranking.clinic_nearby_cap", self.ranking.clinic_nearby_cap),
            ("ranking.clinic_default_limit", self.ranking.clinic_default_limit),
            ("ranking.provider_default_limit", self.ranking.provider_default_limit),
            ("ranking.postal_candidate_limit", self.ranking.postal_candidate_limit),
            ("fuzzy.strategy_limit", self.fuzzy.strategy_limit),
            ("fuzzy.max_results", self.fuzzy.max_results),
            ("fuzzy.substring_fallback_limit", self.fuzzy.substring_fallback_limit),
        ];

        for (key, value) in caps {
            if value == 0 {
                return Err(SearchError::Config(format!(
                    "{} must be greater than 0",
                    key
                )));
            }
        }

        if !(0.0..=100.0).contains(&self.fuzzy.min_raw_score) {
            return Err(SearchError::Config(
                "fuzzy.min_raw_score must be within 0..=100".to_string(),
            ));
        }

        Ok(())
    }
}
