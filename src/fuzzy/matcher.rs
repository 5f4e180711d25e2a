// file: src/fuzzy/matcher.rs
// description: fused fuzzy name search with exact and fuzzy tiers
// reference: four scorers, weighted fusion, tiered selection, substring fallback

use crate::config::FuzzyConfig;
use crate::fuzzy::fusion::{FusedCandidate, FusionTable, Strategy};
use crate::fuzzy::scorers::{
    extract_top, partial_ratio, token_set_ratio, token_sort_ratio, word_partial_score,
};
use tracing::debug;

/// Minimum per-word score for the word partial strategy to report a name.
const WORD_PARTIAL_FLOOR: f64 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    /// A name word equals or starts with the keyword.
    Exact,
    Fuzzy,
    /// Plain substring scan used when scoring selected nothing.
    Substring,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NameMatch {
    /// Position in the candidate list.
    pub position: usize,
    pub name: String,
    pub score: Option<f64>,
    pub tier: MatchTier,
}

impl NameMatch {
    fn from_fused(candidate: FusedCandidate, tier: MatchTier) -> Self {
        Self {
            position: candidate.position,
            name: candidate.name,
            score: Some(candidate.weighted),
            tier,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NameMatcher {
    config: FuzzyConfig,
}

impl NameMatcher {
    pub fn new(config: FuzzyConfig) -> Self {
        Self { config }
    }

    /// Runs every strategy over `names` and fuses the results.
    pub fn fuse(&self, keyword: &str, names: &[&str]) -> FusionTable {
        let mut table = FusionTable::new(self.config.min_raw_score);
        let limit = self.config.strategy_limit;

        let library: [(Strategy, fn(&str, &str) -> f64); 3] = [
            (Strategy::TokenSet, token_set_ratio),
            (Strategy::Partial, partial_ratio),
            (Strategy::TokenSort, token_sort_ratio),
        ];

        for (strategy, scorer) in library {
            for (position, raw) in extract_top(keyword, names, scorer, limit) {
                table.offer(strategy, names[position], position, raw);
            }
        }

        let keyword_words: Vec<String> = keyword
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        for (position, name) in names.iter().enumerate() {
            if let Some(raw) = word_partial_score(&keyword_words, name, WORD_PARTIAL_FLOOR) {
                table.offer(Strategy::WordPartial, name, position, raw);
            }
        }

        debug!("Fused {} candidates for '{}'", table.len(), keyword);
        table
    }

    /// Any whitespace word of `name` equals or starts with `keyword`.
    pub fn is_exact(keyword: &str, name: &str) -> bool {
        let keyword = keyword.to_lowercase();
        name.to_lowercase()
            .split_whitespace()
            .any(|part| part.starts_with(keyword.as_str()))
    }

    /// Ranked matches for `keyword` among `names`.
    pub fn find(&self, keyword: &str, names: &[&str]) -> Vec<NameMatch> {
        let ranked = self.fuse(keyword, names).into_ranked();

        let (exact, fuzzy): (Vec<FusedCandidate>, Vec<FusedCandidate>) = ranked
            .into_iter()
            .partition(|c| Self::is_exact(keyword, &c.name));

        debug!(
            "Name search '{}': {} exact, {} fuzzy",
            keyword,
            exact.len(),
            fuzzy.len()
        );

        let selected: Vec<NameMatch> = if exact.len() >= self.config.exact_quorum {
            exact
                .into_iter()
                .map(|c| NameMatch::from_fused(c, MatchTier::Exact))
                .take(self.config.max_results)
                .collect()
        } else {
            let strong_fuzzy = fuzzy
                .into_iter()
                .filter(|c| c.weighted > self.config.fuzzy_min_score)
                .take(self.config.fuzzy_extra)
                .map(|c| NameMatch::from_fused(c, MatchTier::Fuzzy));

            exact
                .into_iter()
                .map(|c| NameMatch::from_fused(c, MatchTier::Exact))
                .chain(strong_fuzzy)
                .take(self.config.max_results)
                .collect()
        };

        if selected.is_empty() {
            self.substring_fallback(keyword, names)
        } else {
            selected
        }
    }

    /// Case-insensitive containment scan in candidate order, no scoring.
    pub fn substring_fallback(&self, keyword: &str, names: &[&str]) -> Vec<NameMatch> {
        let keyword = keyword.to_lowercase();

        names
            .iter()
            .enumerate()
            .filter(|(_, name)| name.to_lowercase().contains(&keyword))
            .take(self.config.substring_fallback_limit)
            .map(|(position, name)| NameMatch {
                position,
                name: name.to_string(),
                score: None,
                tier: MatchTier::Substring,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn matcher() -> NameMatcher {
        NameMatcher::new(FuzzyConfig::default())
    }

    fn names_of(matches: &[NameMatch]) -> Vec<&str> {
        matches.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_is_exact() {
        assert!(NameMatcher::is_exact("low", "Low Huey Moon"));
        assert!(NameMatcher::is_exact("LO", "Tan Lok Ming"));
        assert!(!NameMatcher::is_exact("ow", "Low Huey Moon"));
        assert!(!NameMatcher::is_exact("jam avin", "Javin Lam"));
    }

    #[test]
    fn test_surname_search_prefers_exact_tier() {
        let names = ["Low Huey Moon", "Low Kim Seng", "Tan Wei Ming"];
        let matches = matcher().find("low", &names);

        assert_eq!(names_of(&matches), vec!["Low Huey Moon", "Low Kim Seng"]);
        assert!(matches.iter().all(|m| m.tier == MatchTier::Exact));
        assert_eq!(matches[0].position, 0);
        assert_eq!(matches[1].position, 1);
    }

    #[test]
    fn test_exact_quorum_excludes_fuzzy() {
        let names = [
            "Lim Ah Kow",
            "Lim Bee Hoon",
            "Lim Chee Keong",
            "Lin Mei Xin",
            "Lim Swee Lan",
        ];
        let matches = matcher().find("lim", &names);

        assert_eq!(matches.len(), 4);
        assert!(matches.iter().all(|m| m.tier == MatchTier::Exact));
        assert!(!names_of(&matches).contains(&"Lin Mei Xin"));
    }

    #[test]
    fn test_fuzzy_tier_fills_in() {
        let names = ["Javin Lam", "Tan Wei Ming"];
        let matches = matcher().find("jam avin", &names);

        assert_eq!(names_of(&matches), vec!["Javin Lam"]);
        assert_eq!(matches[0].tier, MatchTier::Fuzzy);
        assert!(matches[0].score.unwrap() > 60.0);
    }

    #[test]
    fn test_fuzzy_tier_keeps_at_most_three() {
        let names = [
            "Javin Lam",
            "Javin Lim",
            "Javin Lum",
            "Javin Lem",
            "Javin Lom",
            "Ong Bee",
        ];
        let matches = matcher().find("jam avin", &names);

        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].name, "Javin Lam");
        assert!(matches.iter().all(|m| m.tier == MatchTier::Fuzzy));
        assert!(matches.iter().all(|m| m.score.unwrap() > 60.0));
    }

    #[test]
    fn test_weak_fuzzy_dropped_beside_exact() {
        let names = ["Low Huey Moon", "Tan Wei Ming"];

        let fused = matcher().fuse("low", &names);
        let weak = fused.get("Tan Wei Ming").unwrap();
        assert!(weak.weighted <= 60.0);

        let matches = matcher().find("low", &names);
        assert_eq!(names_of(&matches), vec!["Low Huey Moon"]);
        assert_eq!(matches[0].tier, MatchTier::Exact);
    }

    #[test]
    fn test_results_capped_at_five() {
        let names: Vec<String> = (0..12).map(|i| format!("Tan Person{}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let matches = matcher().find("tan", &refs);
        assert_eq!(matches.len(), 5);
    }

    #[test]
    fn test_substring_fallback() {
        let names = ["Dr. O'Neil Ramasamy", "Tan Wei Ming"];
        let fallback = matcher().substring_fallback("o'neil", &names);
        assert_eq!(names_of(&fallback), vec!["Dr. O'Neil Ramasamy"]);
        assert_eq!(fallback[0].score, None);
        assert_eq!(fallback[0].tier, MatchTier::Substring);
    }

    #[test]
    fn test_no_match_is_empty() {
        let names = ["Tan Wei Ming"];
        assert!(matcher().find("zzzz", &names).is_empty());
    }

    proptest! {
        #[test]
        fn prop_output_bounded(
            keyword in "[a-z]{2,6}",
            names in prop::collection::vec("[a-z]{2,6}( [a-z]{2,6}){0,2}", 0..30),
        ) {
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let matches = matcher().find(&keyword, &refs);
            prop_assert!(matches.len() <= 5);

            let exact = matches.iter().filter(|m| m.tier == MatchTier::Exact).count();
            if exact >= 3 {
                prop_assert!(matches.iter().all(|m| m.tier == MatchTier::Exact));
            }
        }
    }
}
