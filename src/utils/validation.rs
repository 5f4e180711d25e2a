// file: src/utils/validation.rs
// description: input validation for cli arguments and dataset paths
// reference: input validation patterns

use crate::error::{Result, SearchError};
use crate::geo::patterns::is_postal_code;
use std::fs;
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_file_path(path: &Path) -> Result<()> {
        let canonical = fs::canonicalize(path).map_err(|e| {
            SearchError::Validation(format!(
                "Cannot canonicalize path {}: {}",
                path.display(),
                e
            ))
        })?;

        if !canonical.is_file() {
            return Err(SearchError::Validation(format!(
                "Path is not a file: {}",
                canonical.display()
            )));
        }

        Ok(())
    }

    pub fn validate_dataset_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") || ext.eq_ignore_ascii_case("csv") => {
                Ok(())
            }
            _ => Err(SearchError::Validation(format!(
                "File is not a json or csv sheet: {}",
                path.display()
            ))),
        }
    }

    /// Existing `.json` or `.csv` file.
    pub fn validate_dataset_path(path: &Path) -> Result<()> {
        Self::validate_dataset_extension(path)?;
        Self::validate_file_path(path)
    }

    pub fn validate_postal_code(code: &str) -> Result<u32> {
        let trimmed = code.trim();
        if !is_postal_code(trimmed) {
            return Err(SearchError::Validation(format!(
                "Not a six digit postal code: {}",
                code
            )));
        }
        trimmed
            .parse()
            .map_err(|e| SearchError::Validation(format!("Invalid postal code {}: {}", code, e)))
    }

    pub fn validate_query(query: &str) -> Result<()> {
        if query.trim().is_empty() {
            return Err(SearchError::Validation("Query is empty".to_string()));
        }
        Ok(())
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            format!("{}...", text.chars().take(max_chars).collect::<String>())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_file_path() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("clinics.json");
        fs::write(&file_path, "[]").unwrap();

        assert!(Validator::validate_file_path(&file_path).is_ok());
        assert!(Validator::validate_file_path(temp.path()).is_err());
        assert!(Validator::validate_file_path(Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_validate_dataset_path() {
        let temp = TempDir::new().unwrap();
        let json = temp.path().join("doctors.JSON");
        let csv = temp.path().join("doctors.csv");
        let xlsx = temp.path().join("doctors.xlsx");
        fs::write(&json, "[]").unwrap();
        fs::write(&csv, "Doctor Name\n").unwrap();
        fs::write(&xlsx, "").unwrap();

        assert!(Validator::validate_dataset_path(&json).is_ok());
        assert!(Validator::validate_dataset_path(&csv).is_ok());
        assert!(Validator::validate_dataset_path(&xlsx).is_err());
    }

    #[test]
    fn test_validate_postal_code() {
        assert_eq!(Validator::validate_postal_code(" 641652 ").unwrap(), 641652);
        assert_eq!(Validator::validate_postal_code("018989").unwrap(), 18989);
        assert!(Validator::validate_postal_code("64165").is_err());
        assert!(Validator::validate_postal_code("Bedok").is_err());
    }

    #[test]
    fn test_validate_query() {
        assert!(Validator::validate_query("find dr. low").is_ok());
        assert!(Validator::validate_query("   ").is_err());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("Family & Community Medicine", 10),
            "Family & C..."
        );
    }
}
