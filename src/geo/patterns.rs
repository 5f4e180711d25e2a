// file: src/geo/patterns.rs
// description: compiled regex patterns for postal code handling
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A bare six digit postal code and nothing else.
    pub static ref POSTAL_CODE: Regex = Regex::new(
        r"^[0-9]{6}$"
    ).expect("POSTAL_CODE regex is valid");

    /// City marker followed by a six digit code inside a free-text address.
    pub static ref POSTAL_IN_ADDRESS: Regex = Regex::new(
        r"(?i)\bSingapore\s+([0-9]{6})\b"
    ).expect("POSTAL_IN_ADDRESS regex is valid");
}

pub fn is_postal_code(value: &str) -> bool {
    POSTAL_CODE.is_match(value)
}

/// First postal code embedded in an address, if any.
pub fn extract_postal_code(address: &str) -> Option<u32> {
    POSTAL_IN_ADDRESS
        .captures(address)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_code_pattern() {
        assert!(is_postal_code("641652"));
        assert!(is_postal_code("018989"));
        assert!(!is_postal_code("64165"));
        assert!(!is_postal_code("6416520"));
        assert!(!is_postal_code("64a652"));
        assert!(!is_postal_code("Bedok"));
    }

    #[test]
    fn test_extract_from_address() {
        assert_eq!(
            extract_postal_code("Blk 526 Jurong West St 52 #01-353 Singapore 640526"),
            Some(640526)
        );
        assert_eq!(
            extract_postal_code("652 Jurong West St 61\nSINGAPORE  641651"),
            Some(641651)
        );
        assert_eq!(extract_postal_code("10 Bedok North Ave 4"), None);
        assert_eq!(extract_postal_code("Singapore 6405261"), None);
    }

    #[test]
    fn test_extract_first_of_many() {
        assert_eq!(
            extract_postal_code("Singapore 520123 (formerly Singapore 520999)"),
            Some(520123)
        );
    }
}
