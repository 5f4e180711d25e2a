// file: src/geo/resolver.rs
// description: location filter dispatch for postal codes and area names
// reference: clinics rank by postal proxy distance or fall back to adjacent areas

use crate::dataset::{Column, Record, Row, WorkingSet, contains_ci};
use crate::geo::adjacency::neighbors;
use crate::geo::patterns::{extract_postal_code, is_postal_code};
use crate::geo::postal::postal_distance;
use crate::models::{Diagnostic, FilterStage, RecordKind};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationQuery {
    Postal(u32),
    Area(String),
}

impl LocationQuery {
    /// Exactly six ASCII digits is a postal code; anything else an area name.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<u32>() {
            Ok(code) if is_postal_code(trimmed) => LocationQuery::Postal(code),
            _ => LocationQuery::Area(trimmed.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeoResolver {
    postal_candidate_limit: usize,
}

impl GeoResolver {
    pub fn new(postal_candidate_limit: usize) -> Self {
        Self {
            postal_candidate_limit,
        }
    }

    /// Re-filters (and for clinic postal searches, re-orders) `working`.
    pub fn resolve<'a, R: Record>(
        &self,
        location: &str,
        working: WorkingSet<'a, R>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> WorkingSet<'a, R> {
        match (R::KIND, LocationQuery::classify(location)) {
            (RecordKind::Clinic, LocationQuery::Postal(code)) => {
                self.nearest_by_postal(code, working, diagnostics)
            }
            (RecordKind::Clinic, LocationQuery::Area(area)) => {
                self.match_area(&area, working, diagnostics)
            }
            // doctors have no postal lookup; the digits are just text
            (RecordKind::Provider, _) => {
                self.match_single_column(location.trim(), working, diagnostics)
            }
        }
    }

    /// Rows with an extractable postal code, nearest first, capped.
    pub fn nearest_by_postal<'a, R: Record>(
        &self,
        code: u32,
        working: WorkingSet<'a, R>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> WorkingSet<'a, R> {
        if !working.has_column(Column::Address) {
            debug!("Postal search skipped: dataset has no Address column");
            diagnostics.push(Diagnostic::MissingColumns {
                stage: FilterStage::Location,
            });
            return working;
        }

        let source = working.source();
        let mut rows: Vec<Row<'a, R>> = working
            .into_rows()
            .into_iter()
            .filter_map(|row| {
                extract_postal_code(row.field(Column::Address))
                    .map(|postal| row.with_distance(postal_distance(code, postal)))
            })
            .collect();

        rows.sort_by(|a, b| {
            let a = a.distance.unwrap_or(f64::INFINITY);
            let b = b.distance.unwrap_or(f64::INFINITY);
            a.total_cmp(&b)
        });
        rows.truncate(self.postal_candidate_limit);

        debug!("Postal search for {:06}: {} candidates", code, rows.len());
        WorkingSet::from_rows(source, rows)
    }

    /// Direct Area/Address match, then the adjacency table.
    pub fn match_area<'a, R: Record>(
        &self,
        area: &str,
        working: WorkingSet<'a, R>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> WorkingSet<'a, R> {
        if !working.has_column(Column::Area) && !working.has_column(Column::Address) {
            diagnostics.push(Diagnostic::MissingColumns {
                stage: FilterStage::Location,
            });
            return working;
        }

        let adjacent = neighbors(area);
        let any_direct = working
            .rows()
            .iter()
            .any(|row| direct_match(&working, row, area));
        if adjacent.is_empty() && !any_direct {
            debug!("Location '{}' matched nothing and has no neighbours", area);
            diagnostics.push(Diagnostic::UnclassifiableLocation {
                location: area.to_string(),
            });
        }

        let direct = |ws: &WorkingSet<'a, R>| {
            ws.clone().retain(|row| direct_match(ws, row, area))
        };
        let nearby = |ws: &WorkingSet<'a, R>| {
            if !ws.has_column(Column::Area) || adjacent.is_empty() {
                return ws.emptied();
            }
            debug!("No direct match for '{}', trying {:?}", area, adjacent);
            ws.clone().retain(|row| {
                adjacent
                    .iter()
                    .any(|neighbor| contains_ci(row.field(Column::Area), neighbor))
            })
        };

        working.first_non_empty(&[&direct, &nearby])
    }

    /// Single substring match on Area, else Address; no adjacency.
    pub fn match_single_column<'a, R: Record>(
        &self,
        location: &str,
        working: WorkingSet<'a, R>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> WorkingSet<'a, R> {
        let column = [Column::Area, Column::Address]
            .into_iter()
            .find(|c| working.has_column(*c));

        match column {
            Some(column) => working.filter_any(&[column], location),
            None => {
                debug!("Location filter skipped: no Area or Address column");
                diagnostics.push(Diagnostic::MissingColumns {
                    stage: FilterStage::Location,
                });
                working
            }
        }
    }
}

fn direct_match<'a, R: Record>(working: &WorkingSet<'a, R>, row: &Row<'a, R>, area: &str) -> bool {
    working.row_matches_any(row, &[Column::Area, Column::Address], area)
}
