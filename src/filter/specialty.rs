// file: src/filter/specialty.rs
// description: specialty label correction and the paediatric fallback chain
// reference: labels are folded onto the dataset taxonomy before matching

use crate::dataset::{Column, Record, WorkingSet};
use lazy_static::lazy_static;
use std::collections::HashMap;
use tracing::debug;

/// Columns a specialty label is matched against.
pub const SPECIALTY_COLUMNS: [Column; 3] =
    [Column::Specialty, Column::Designation, Column::Services];

const PEDIATRIC_TERMS: [&str; 2] = ["paediatric", "pediatric"];

/// Specialties that see children when no paediatric label exists.
const PEDIATRIC_FALLBACK: [&str; 4] = [
    "Family & Community Medicine",
    "General Medicine",
    "Emergency Medicine",
    "Internal Medicine",
];

lazy_static! {
    /// Keys are lowercase.
    static ref CORRECTIONS: HashMap<&'static str, &'static str> = [
        ("general practitioner", "General Medicine"),
        ("gp", "General Medicine"),
        ("family medicine", "Family & Community Medicine"),
        ("paediatric", "Family & Community Medicine"),
        ("pediatric", "Family & Community Medicine"),
        ("ent", "Otolaryngology"),
        ("orthopaedic", "Orthopaedic Surgery"),
        ("orthopedic", "Orthopaedic Surgery"),
    ]
    .into_iter()
    .collect();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialtyQuery {
    /// Substring-match this label.
    Canonical(String),
    /// Run the fallback specialty set, then retry `term` on the full dataset.
    Pediatric { term: String },
}

/// Applies the correction table; unknown labels come back trimmed.
pub fn correct_specialty(raw: &str) -> String {
    let trimmed = raw.trim();
    CORRECTIONS
        .get(trimmed.to_lowercase().as_str())
        .map(|corrected| corrected.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

fn is_pediatric(label: &str) -> bool {
    let lower = label.trim().to_lowercase();
    PEDIATRIC_TERMS.contains(&lower.as_str())
}

pub fn normalize_specialty(raw: &str) -> SpecialtyQuery {
    let corrected = correct_specialty(raw);

    if is_pediatric(raw) || is_pediatric(&corrected) {
        SpecialtyQuery::Pediatric {
            term: raw.trim().to_string(),
        }
    } else {
        SpecialtyQuery::Canonical(corrected)
    }
}

/// Narrows `working` by specialty. The paediatric retry deliberately
/// widens back to the source dataset.
pub fn filter_specialty<'a, R: Record>(
    query: &SpecialtyQuery,
    working: WorkingSet<'a, R>,
) -> WorkingSet<'a, R> {
    match query {
        SpecialtyQuery::Canonical(label) => working.filter_any(&SPECIALTY_COLUMNS, label),
        SpecialtyQuery::Pediatric { term } => {
            let fallback_set = |ws: &WorkingSet<'a, R>| {
                ws.clone().retain(|row| {
                    PEDIATRIC_FALLBACK
                        .iter()
                        .any(|label| ws.row_matches_any(row, &SPECIALTY_COLUMNS, label))
                })
            };
            let literal_retry = |ws: &WorkingSet<'a, R>| {
                debug!("Paediatric fallback set empty, retrying '{}' on full dataset", term);
                ws.source()
                    .working_set()
                    .filter_any(&SPECIALTY_COLUMNS, term)
            };

            working.first_non_empty(&[&fallback_set, &literal_retry])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::models::ProviderRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_corrections() {
        assert_eq!(correct_specialty("GP"), "General Medicine");
        assert_eq!(correct_specialty("gp"), "General Medicine");
        assert_eq!(correct_specialty("General Practitioner"), "General Medicine");
        assert_eq!(correct_specialty("ENT"), "Otolaryngology");
        assert_eq!(correct_specialty("Orthopedic"), "Orthopaedic Surgery");
        assert_eq!(correct_specialty(" Cardiology "), "Cardiology");
    }

    #[test]
    fn test_normalize_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(
                normalize_specialty("GP"),
                SpecialtyQuery::Canonical("General Medicine".to_string())
            );
        }
    }

    #[test]
    fn test_pediatric_detection() {
        assert_eq!(
            normalize_specialty("Paediatric"),
            SpecialtyQuery::Pediatric {
                term: "Paediatric".to_string()
            }
        );
        assert_eq!(
            normalize_specialty("PEDIATRIC"),
            SpecialtyQuery::Pediatric {
                term: "PEDIATRIC".to_string()
            }
        );
        assert_eq!(
            normalize_specialty("Paediatric Surgery"),
            SpecialtyQuery::Canonical("Paediatric Surgery".to_string())
        );
    }

    fn providers() -> Dataset<ProviderRecord> {
        Dataset::new(vec![
            ProviderRecord::new("Ang Bee Lian", "Cardiology"),
            ProviderRecord::new("Chua Mei Ling", "Family & Community Medicine"),
            ProviderRecord::new("Goh Siew Hong", "Surgery").with_services("General Medicine clinic"),
            ProviderRecord::new("Lim Ah Kow", "Paediatric Medicine"),
        ])
    }

    #[test]
    fn test_canonical_matches_any_specialty_column() {
        let dataset = providers();
        let query = normalize_specialty("GP");
        let result = filter_specialty(&query, dataset.working_set());
        assert_eq!(result.names(), vec!["Goh Siew Hong"]);
    }

    #[test]
    fn test_pediatric_uses_fallback_set() {
        let dataset = providers();
        let query = normalize_specialty("Paediatric");
        let result = filter_specialty(&query, dataset.working_set());
        assert_eq!(result.names(), vec!["Chua Mei Ling", "Goh Siew Hong"]);
    }

    #[test]
    fn test_pediatric_retry_widens_to_source() {
        let dataset = providers();
        let query = normalize_specialty("pediatric");

        // current set holds nothing from the fallback specialties
        let working = dataset
            .working_set()
            .filter_any(&[Column::Specialty], "cardiology");
        let result = filter_specialty(&query, working);

        assert!(result.is_empty());

        let query = normalize_specialty("paediatric");
        let working = dataset
            .working_set()
            .filter_any(&[Column::Specialty], "cardiology");
        let result = filter_specialty(&query, working);
        assert_eq!(result.names(), vec!["Lim Ah Kow"]);
    }

    #[test]
    fn test_unknown_specialty_is_empty() {
        let dataset = providers();
        let query = normalize_specialty("Astrology");
        assert!(filter_specialty(&query, dataset.working_set()).is_empty());
    }
}
