// file: src/filter/pipeline.rs
// description: sequential AND composition of specialty, language and location stages
// reference: each stage only narrows the working set; absent columns skip the stage

use crate::dataset::{Column, Dataset, Record, WorkingSet};
use crate::filter::language::normalize_language;
use crate::filter::specialty::{SPECIALTY_COLUMNS, filter_specialty, normalize_specialty};
use crate::geo::GeoResolver;
use crate::models::{Diagnostic, FilterStage, Filters};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FilterPipeline {
    geo: GeoResolver,
}

impl FilterPipeline {
    pub fn new(geo: GeoResolver) -> Self {
        Self { geo }
    }

    /// Filters a fresh view of `source`.
    pub fn apply<'a, R: Record>(
        &self,
        source: &'a Dataset<R>,
        filters: &Filters,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> WorkingSet<'a, R> {
        self.refine(source.working_set(), filters, diagnostics)
    }

    /// Filters an existing working set further.
    pub fn refine<'a, R: Record>(
        &self,
        mut working: WorkingSet<'a, R>,
        filters: &Filters,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> WorkingSet<'a, R> {
        if let Some(specialty) = filters.specialty() {
            working = self.run_stage(FilterStage::Specialty, working, diagnostics, |ws, diags| {
                if !SPECIALTY_COLUMNS.iter().any(|c| ws.has_column(*c)) {
                    diags.push(Diagnostic::MissingColumns {
                        stage: FilterStage::Specialty,
                    });
                    return ws;
                }
                let query = normalize_specialty(specialty);
                debug!("Specialty '{}' resolved to {:?}", specialty, query);
                filter_specialty(&query, ws)
            });
        }

        if let Some(language) = filters.languages() {
            working = self.run_stage(FilterStage::Languages, working, diagnostics, |ws, diags| {
                if !ws.has_column(Column::Languages) {
                    diags.push(Diagnostic::MissingColumns {
                        stage: FilterStage::Languages,
                    });
                    return ws;
                }
                ws.filter_any(&[Column::Languages], &normalize_language(language))
            });
        }

        if let Some(location) = filters.area() {
            working = self.run_stage(FilterStage::Location, working, diagnostics, |ws, diags| {
                self.geo.resolve(location, ws, diags)
            });
        }

        working
    }

    fn run_stage<'a, R: Record>(
        &self,
        stage: FilterStage,
        working: WorkingSet<'a, R>,
        diagnostics: &mut Vec<Diagnostic>,
        filter: impl FnOnce(WorkingSet<'a, R>, &mut Vec<Diagnostic>) -> WorkingSet<'a, R>,
    ) -> WorkingSet<'a, R> {
        let before = working.len();
        let after = filter(working, diagnostics);

        debug!(
            "Filter stage {}: {} -> {} rows",
            stage.as_str(),
            before,
            after.len()
        );

        if before > 0 && after.is_empty() {
            diagnostics.push(Diagnostic::EmptyFilterResult { stage });
        }

        after
    }
}
