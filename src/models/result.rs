// file: src/models/result.rs
// description: ranked results and the per-request search outcome
// reference: output boundary is the original row plus optional ranking metadata

use crate::models::plan::QueryPlan;
use crate::models::record::{ClinicRecord, ProviderRecord, RecordKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RankedRecord {
    Provider(ProviderRecord),
    Clinic(ClinicRecord),
}

impl RankedRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            RankedRecord::Provider(_) => RecordKind::Provider,
            RankedRecord::Clinic(_) => RecordKind::Clinic,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RankedRecord::Provider(p) => &p.name,
            RankedRecord::Clinic(c) => &c.name,
        }
    }
}

impl From<ProviderRecord> for RankedRecord {
    fn from(record: ProviderRecord) -> Self {
        RankedRecord::Provider(record)
    }
}

impl From<ClinicRecord> for RankedRecord {
    fn from(record: ClinicRecord) -> Self {
        RankedRecord::Clinic(record)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub record: RankedRecord,

    /// Postal proxy distance; only set by clinic postal-code searches
    #[serde(rename = "_distance", skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Fused name-match score; only set by doctor name searches
    #[serde(rename = "_score", skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl RankedResult {
    pub fn new(record: impl Into<RankedRecord>) -> Self {
        Self {
            record: record.into(),
            distance: None,
            score: None,
        }
    }

    pub fn with_distance(mut self, distance: Option<f64>) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_score(mut self, score: Option<f64>) -> Self {
        self.score = score;
        self
    }

    pub fn name(&self) -> &str {
        self.record.name()
    }

    pub fn as_provider(&self) -> Option<&ProviderRecord> {
        match &self.record {
            RankedRecord::Provider(p) => Some(p),
            RankedRecord::Clinic(_) => None,
        }
    }

    pub fn as_clinic(&self) -> Option<&ClinicRecord> {
        match &self.record {
            RankedRecord::Clinic(c) => Some(c),
            RankedRecord::Provider(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStage {
    Specialty,
    Languages,
    Location,
}

impl FilterStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterStage::Specialty => "specialty",
            FilterStage::Languages => "languages",
            FilterStage::Location => "location",
        }
    }
}

/// A local, non-fatal degradation observed while serving a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    PlanUnavailable { reason: String },
    EmptyFilterResult { stage: FilterStage },
    UnclassifiableLocation { location: String },
    MissingColumns { stage: FilterStage },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub plan: QueryPlan,
    pub results: Vec<RankedResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SearchOutcome {
    pub fn new(plan: QueryPlan) -> Self {
        Self {
            plan,
            results: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn plan_unavailable(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            plan: QueryPlan::unavailable(reason.clone()),
            results: Vec::new(),
            diagnostics: vec![Diagnostic::PlanUnavailable { reason }],
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.results.iter().map(RankedResult::name).collect()
    }
}
