// file: src/filter/language.rs
// description: language filter synonym folding

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref LANGUAGE_SYNONYMS: HashMap<&'static str, &'static str> = [
        ("chinese", "Mandarin"),
        ("mandarin", "Mandarin"),
    ]
    .into_iter()
    .collect();
}

/// Folds common synonyms onto the token the Languages column uses.
pub fn normalize_language(raw: &str) -> String {
    let trimmed = raw.trim();
    LANGUAGE_SYNONYMS
        .get(trimmed.to_lowercase().as_str())
        .map(|canonical| canonical.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chinese_folds_to_mandarin() {
        assert_eq!(normalize_language("Chinese"), "Mandarin");
        assert_eq!(normalize_language("MANDARIN"), "Mandarin");
    }

    #[test]
    fn test_other_languages_pass_through() {
        assert_eq!(normalize_language(" Tamil "), "Tamil");
        assert_eq!(normalize_language("Hokkien"), "Hokkien");
    }
}
