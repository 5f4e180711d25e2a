// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod plan;
pub mod record;
pub mod result;

pub use plan::{Filters, Intent, QueryPlan};
pub use record::{ClinicRecord, ProviderRecord, RecordKind};
pub use result::{Diagnostic, FilterStage, RankedRecord, RankedResult, SearchOutcome};
