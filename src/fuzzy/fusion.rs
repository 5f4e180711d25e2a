// file: src/fuzzy/fusion.rs
// description: per-candidate fusion of weighted scores from several strategies
// reference: keeps the best weighted score per candidate name

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    TokenSet,
    Partial,
    TokenSort,
    WordPartial,
}

impl Strategy {
    /// Strong raw scores from the more precise strategies are boosted.
    pub fn weight(&self, raw: f64) -> f64 {
        match self {
            Strategy::WordPartial if raw > 50.0 => raw * 1.3,
            Strategy::Partial if raw > 80.0 => raw * 1.2,
            Strategy::TokenSet if raw > 90.0 => raw * 1.1,
            _ => raw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::TokenSet => "token_set",
            Strategy::Partial => "partial",
            Strategy::TokenSort => "token_sort",
            Strategy::WordPartial => "word_partial",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FusedCandidate {
    pub name: String,
    pub weighted: f64,
    pub raw: f64,
    /// Position in the candidate list the score was computed against.
    pub position: usize,
    pub strategy: Strategy,
}

/// Candidate name -> best (weighted, raw, position), in first-seen order.
#[derive(Debug, Clone)]
pub struct FusionTable {
    min_raw: f64,
    entries: Vec<FusedCandidate>,
    by_name: HashMap<String, usize>,
}

impl FusionTable {
    pub fn new(min_raw: f64) -> Self {
        Self {
            min_raw,
            entries: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Records a raw score. Returns true when the table changed.
    pub fn offer(&mut self, strategy: Strategy, name: &str, position: usize, raw: f64) -> bool {
        if raw <= self.min_raw {
            return false;
        }

        let candidate = FusedCandidate {
            name: name.to_string(),
            weighted: strategy.weight(raw),
            raw,
            position,
            strategy,
        };

        match self.by_name.get(name) {
            Some(&slot) => {
                if candidate.weighted > self.entries[slot].weighted {
                    self.entries[slot] = candidate;
                    true
                } else {
                    false
                }
            }
            None => {
                self.by_name.insert(name.to_string(), self.entries.len());
                self.entries.push(candidate);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FusedCandidate> {
        self.by_name.get(name).map(|&slot| &self.entries[slot])
    }

    /// Best weighted score first; equal scores keep first-seen order.
    pub fn into_ranked(self) -> Vec<FusedCandidate> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.weighted.total_cmp(&a.weighted));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_weights() {
        assert!(approx(Strategy::WordPartial.weight(80.0), 104.0));
        assert_eq!(Strategy::WordPartial.weight(50.0), 50.0);
        assert!(approx(Strategy::Partial.weight(100.0), 120.0));
        assert_eq!(Strategy::Partial.weight(80.0), 80.0);
        assert!(approx(Strategy::TokenSet.weight(100.0), 110.0));
        assert_eq!(Strategy::TokenSet.weight(90.0), 90.0);
        assert_eq!(Strategy::TokenSort.weight(100.0), 100.0);
    }

    #[test]
    fn test_low_scores_rejected() {
        let mut table = FusionTable::new(25.0);
        assert!(!table.offer(Strategy::Partial, "Tan Wei Ming", 0, 25.0));
        assert!(table.is_empty());
    }

    #[test]
    fn test_keeps_highest_weighted() {
        let mut table = FusionTable::new(25.0);
        table.offer(Strategy::TokenSet, "Low Kim Seng", 1, 100.0);
        table.offer(Strategy::Partial, "Low Kim Seng", 1, 100.0);
        assert!(!table.offer(Strategy::TokenSort, "Low Kim Seng", 1, 40.0));

        let best = table.get("Low Kim Seng").unwrap();
        assert_eq!(best.strategy, Strategy::Partial);
        assert!(approx(best.weighted, 120.0));
        assert_eq!(best.raw, 100.0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_equal_weighted_does_not_replace() {
        let mut table = FusionTable::new(25.0);
        table.offer(Strategy::TokenSort, "Ong", 3, 70.0);
        assert!(!table.offer(Strategy::TokenSet, "Ong", 7, 70.0));
        assert_eq!(table.get("Ong").unwrap().position, 3);
    }

    #[test]
    fn test_ranking_is_stable() {
        let mut table = FusionTable::new(25.0);
        table.offer(Strategy::TokenSort, "B", 0, 50.0);
        table.offer(Strategy::TokenSort, "A", 1, 70.0);
        table.offer(Strategy::TokenSort, "C", 2, 50.0);

        let names: Vec<String> = table.into_ranked().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
