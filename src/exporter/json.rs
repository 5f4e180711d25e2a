// file: src/exporter/json.rs
// description: json export of search outcomes

use crate::error::{Result, SearchError};
use crate::models::{Diagnostic, QueryPlan, RankedResult, SearchOutcome};
use chrono::Utc;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedSearch<'a> {
    pub exported_at: String,
    pub query: &'a str,
    pub plan: &'a QueryPlan,
    pub total_results: usize,
    pub results: &'a [RankedResult],
    pub diagnostics: &'a [Diagnostic],
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `search-<UTC timestamp>.json` and returns its path. An existing
    /// export is never overwritten; a `-N` suffix is added instead.
    pub fn export_outcome(
        &self,
        query: &str,
        outcome: &SearchOutcome,
        pretty: bool,
    ) -> Result<PathBuf> {
        let now = Utc::now();
        let document = ExportedSearch {
            exported_at: now.to_rfc3339(),
            query,
            plan: &outcome.plan,
            total_results: outcome.len(),
            results: &outcome.results,
            diagnostics: &outcome.diagnostics,
        };

        let json = if pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };

        let stem = format!("search-{}", now.format("%Y%m%dT%H%M%S%.3fZ"));
        let (path, mut file) = self.create_unique(&stem)?;

        file.write_all(json.as_bytes())
            .map_err(|source| SearchError::FileOperation {
                path: path.clone(),
                source,
            })?;

        info!(
            "Exported {} results to {}",
            document.total_results,
            path.display()
        );
        Ok(path)
    }

    fn create_unique(&self, stem: &str) -> Result<(PathBuf, File)> {
        let mut attempt = 0usize;
        loop {
            let name = if attempt == 0 {
                format!("{}.json", stem)
            } else {
                format!("{}-{}.json", stem, attempt)
            };
            let path = self.output_dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(source) => return Err(SearchError::FileOperation { path, source }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClinicRecord, FilterStage, Intent};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_exporter_creation() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("exports/today");
        let exporter = JsonExporter::new(&nested).unwrap();
        assert!(exporter.output_dir().is_dir());
    }

    #[test]
    fn test_export_outcome() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();

        let mut outcome = SearchOutcome::new(QueryPlan::new(Intent::FindClinic).with_area("641652"));
        outcome.results.push(
            RankedResult::new(ClinicRecord::new(
                "Jurong Family Clinic",
                "Blk 651 Jurong West St 61, Singapore 641651",
                "Jurong West",
            ))
            .with_distance(Some(1.0)),
        );
        outcome.diagnostics.push(Diagnostic::MissingColumns {
            stage: FilterStage::Specialty,
        });

        let path = exporter
            .export_outcome("clinics near 641652", &outcome, true)
            .unwrap();
        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("search-"));
        assert!(file_name.ends_with(".json"));

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["query"], "clinics near 641652");
        assert_eq!(value["total_results"], 1);
        assert_eq!(value["plan"]["intent"], "find_clinic");
        assert_eq!(value["results"][0]["Name"], "Jurong Family Clinic");
        assert_eq!(value["results"][0]["_distance"], 1.0);
        assert_eq!(value["diagnostics"][0]["kind"], "missing_columns");
        assert_eq!(value["diagnostics"][0]["stage"], "specialty");
    }

    #[test]
    fn test_back_to_back_exports_keep_both_files() {
        let dir = tempdir().unwrap();
        let exporter = JsonExporter::new(dir.path()).unwrap();
        let outcome = SearchOutcome::new(QueryPlan::default());

        let first = exporter.export_outcome("first", &outcome, false).unwrap();
        let second = exporter.export_outcome("second", &outcome, false).unwrap();
        let clash = exporter.create_unique("search-fixed").unwrap().0;
        let retry = exporter.create_unique("search-fixed").unwrap().0;

        assert_ne!(first, second);
        assert!(fs::read_to_string(&first).unwrap().contains("\"first\""));
        assert!(fs::read_to_string(&second).unwrap().contains("\"second\""));
        assert_eq!(retry.file_name().unwrap(), "search-fixed-1.json");
        assert_ne!(clash, retry);
    }
}
