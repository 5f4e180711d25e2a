// file: src/ranking/ranker.rs
// description: tiered clinic ranking, doctor name search and bounded default listings
// reference: final stage between the filtered working set and the output records

use crate::config::{FuzzyConfig, RankingConfig};
use crate::dataset::{Column, Record, Row, WorkingSet, contains_ci};
use crate::fuzzy::NameMatcher;
use crate::models::{ClinicRecord, ProviderRecord, RankedRecord, RankedResult};
use tracing::debug;

fn to_result<R>(row: &Row<'_, R>) -> RankedResult
where
    R: Record + Into<RankedRecord>,
{
    RankedResult::new(row.record.clone()).with_distance(row.distance)
}

/// Clinic rows split by how they match the requested location.
#[derive(Debug)]
pub struct ClinicTiers<'a, R> {
    pub area: Vec<Row<'a, R>>,
    pub address: Vec<Row<'a, R>>,
    pub nearby: Vec<Row<'a, R>>,
}

impl<'a, R: Record> ClinicTiers<'a, R> {
    /// Area substring first, then Address substring, everything else nearby.
    /// Rows keep their working-set order inside each tier.
    pub fn partition(working: &WorkingSet<'a, R>, location: &str) -> Self {
        let mut tiers = Self {
            area: Vec::new(),
            address: Vec::new(),
            nearby: Vec::new(),
        };

        for row in working.rows() {
            if contains_ci(row.field(Column::Area), location) {
                tiers.area.push(*row);
            } else if contains_ci(row.field(Column::Address), location) {
                tiers.address.push(*row);
            } else {
                tiers.nearby.push(*row);
            }
        }

        tiers
    }

    pub fn capped(mut self, config: &RankingConfig) -> Self {
        self.area.truncate(config.clinic_area_cap);
        self.address.truncate(config.clinic_address_cap);
        self.nearby.truncate(config.clinic_nearby_cap);
        self
    }

    pub fn into_rows(self) -> Vec<Row<'a, R>> {
        self.area
            .into_iter()
            .chain(self.address)
            .chain(self.nearby)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ResultRanker {
    config: RankingConfig,
    matcher: NameMatcher,
}

impl ResultRanker {
    pub fn new(config: RankingConfig, fuzzy: FuzzyConfig) -> Self {
        Self {
            config,
            matcher: NameMatcher::new(fuzzy),
        }
    }

    pub fn rank_clinics(
        &self,
        working: WorkingSet<'_, ClinicRecord>,
        location: Option<&str>,
    ) -> Vec<RankedResult> {
        if working.is_empty() {
            return Vec::new();
        }

        match location {
            Some(location) => {
                let tiers = ClinicTiers::partition(&working, location);
                debug!(
                    "Clinic tiers for '{}': area={} address={} nearby={}",
                    location,
                    tiers.area.len(),
                    tiers.address.len(),
                    tiers.nearby.len()
                );
                tiers
                    .capped(&self.config)
                    .into_rows()
                    .iter()
                    .map(to_result)
                    .collect()
            }
            None => Self::leading(working, self.config.clinic_default_limit),
        }
    }

    pub fn rank_providers(
        &self,
        working: WorkingSet<'_, ProviderRecord>,
        keyword: Option<&str>,
    ) -> Vec<RankedResult> {
        if working.is_empty() {
            return Vec::new();
        }

        // Length is counted on the keyword as given, padding included.
        match keyword.filter(|k| k.chars().count() > 1) {
            Some(keyword) => {
                let names = working.names();
                let rows = working.rows();

                self.matcher
                    .find(keyword.trim(), &names)
                    .into_iter()
                    .map(|hit| to_result(&rows[hit.position]).with_score(hit.score))
                    .collect()
            }
            None => Self::leading(working, self.config.provider_default_limit),
        }
    }

    /// First `limit` rows in working-set order.
    fn leading<R>(working: WorkingSet<'_, R>, limit: usize) -> Vec<RankedResult>
    where
        R: Record + Into<RankedRecord>,
    {
        working.truncate(limit).rows().iter().map(to_result).collect()
    }
}
