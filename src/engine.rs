// file: src/engine.rs
// description: search entry point wiring filters, geography and ranking together
// reference: plan in, bounded ranked records plus diagnostics out; never fails

use crate::boundary::IntentOracle;
use crate::config::Config;
use crate::dataset::{Dataset, load_dataset};
use crate::error::Result;
use crate::filter::FilterPipeline;
use crate::geo::GeoResolver;
use crate::models::{ClinicRecord, Intent, ProviderRecord, QueryPlan, SearchOutcome};
use crate::ranking::ResultRanker;
use crate::utils::OperationTimer;
use tracing::{debug, warn};

/// Holds both datasets for the lifetime of a session. Each request filters
/// its own view; the loaded rows are never modified.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: Config,
    providers: Dataset<ProviderRecord>,
    clinics: Dataset<ClinicRecord>,
    pipeline: FilterPipeline,
    ranker: ResultRanker,
}

impl SearchEngine {
    pub fn new(
        config: Config,
        providers: Dataset<ProviderRecord>,
        clinics: Dataset<ClinicRecord>,
    ) -> Self {
        let pipeline = FilterPipeline::new(GeoResolver::new(
            config.ranking.postal_candidate_limit,
        ));
        let ranker = ResultRanker::new(config.ranking.clone(), config.fuzzy.clone());

        Self {
            config,
            providers,
            clinics,
            pipeline,
            ranker,
        }
    }

    /// Loads both datasets from the configured paths.
    pub fn from_config(config: Config) -> Result<Self> {
        let providers = load_dataset::<ProviderRecord>(&config.datasets.providers_path)?;
        let clinics = load_dataset::<ClinicRecord>(&config.datasets.clinics_path)?;
        Ok(Self::new(config, providers, clinics))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn providers(&self) -> &Dataset<ProviderRecord> {
        &self.providers
    }

    pub fn clinics(&self) -> &Dataset<ClinicRecord> {
        &self.clinics
    }

    /// Runs one plan. Degradations end up in `diagnostics`, never as errors.
    pub fn search(&self, plan: &QueryPlan) -> SearchOutcome {
        let timer = OperationTimer::new(plan.intent.as_str());
        if !plan.reasoning.is_empty() {
            debug!("Plan reasoning: {}", plan.reasoning);
        }

        let mut diagnostics = Vec::new();
        let results = match plan.intent {
            Intent::FindClinic => {
                let working = self
                    .pipeline
                    .apply(&self.clinics, &plan.filters, &mut diagnostics);
                self.ranker.rank_clinics(working, plan.filters.area())
            }
            Intent::FindDoctor => {
                let working = self
                    .pipeline
                    .apply(&self.providers, &plan.filters, &mut diagnostics);
                self.ranker.rank_providers(working, plan.keyword())
            }
        };

        for diagnostic in &diagnostics {
            debug!("Search degraded: {:?}", diagnostic);
        }

        timer.finish_with_count(results.len());

        SearchOutcome {
            plan: plan.clone(),
            results,
            diagnostics,
        }
    }

    /// Asks `oracle` for a plan, then searches. No plan yields an empty
    /// outcome whose plan reasoning explains why.
    pub fn search_query(&self, oracle: &dyn IntentOracle, query: &str) -> SearchOutcome {
        match oracle.extract_plan(query) {
            Some(plan) => self.search(&plan),
            None => {
                warn!("No query plan for '{}'", query);
                SearchOutcome::plan_unavailable(format!(
                    "intent extraction returned no plan for '{}'",
                    query.trim()
                ))
            }
        }
    }
}
