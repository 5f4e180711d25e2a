// file: src/fuzzy/scorers.rs
// description: string similarity scorers on a 0-100 scale
// reference: indel-normalized ratio and its partial / token variants

use rapidfuzz::distance::indel;

/// Lowercases, turns non-alphanumerics into spaces and trims.
pub fn default_process(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    100.0 * indel::normalized_similarity(a.iter().copied(), b.iter().copied())
}

/// Normalized indel similarity: `2 * LCS / (|a| + |b|) * 100`.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    100.0 * indel::normalized_similarity(a.chars(), b.chars())
}

/// Best `ratio` of the shorter string against every same-length window of
/// the longer one, including windows clipped at either edge.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return if long.is_empty() { 100.0 } else { 0.0 };
    }

    let m = short.len();
    let n = long.len();
    let mut best: f64 = 0.0;

    let windows = (1..m)
        .map(|len| &long[..len])
        .chain((0..=n - m).map(|start| &long[start..start + m]))
        .chain((1..m).map(|len| &long[n - len..]));

    for window in windows {
        best = best.max(ratio_chars(&short, window));
        if best >= 100.0 {
            break;
        }
    }

    best
}

fn sorted_tokens(s: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens
}

/// `ratio` after sorting whitespace tokens.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a).join(" "), &sorted_tokens(b).join(" "))
}

/// Set-based token similarity. A shared token set with nothing left over
/// on one side scores 100.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let mut tokens_a = sorted_tokens(a);
    let mut tokens_b = sorted_tokens(b);
    tokens_a.dedup();
    tokens_b.dedup();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a
        .iter()
        .copied()
        .filter(|t| tokens_b.contains(t))
        .collect();
    let diff_ab: Vec<&str> = tokens_a
        .iter()
        .copied()
        .filter(|t| !intersection.contains(t))
        .collect();
    let diff_ba: Vec<&str> = tokens_b
        .iter()
        .copied()
        .filter(|t| !intersection.contains(t))
        .collect();

    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 100.0;
    }

    let diff_ab = diff_ab.join(" ");
    let diff_ba = diff_ba.join(" ");
    let mut best = ratio(&diff_ab, &diff_ba);

    if !intersection.is_empty() {
        let sect = intersection.join(" ");
        let sect_ab = format!("{} {}", sect, diff_ab);
        let sect_ba = format!("{} {}", sect, diff_ba);
        best = best.max(ratio(&sect, &sect_ab)).max(ratio(&sect, &sect_ba));
    }

    best
}

/// Per-word partial score used for multi-word names.
///
/// Every keyword word is scored by its best candidate word: 80 when one
/// contains the other, else `ratio`. Keyword words shorter than three
/// characters score 0. Returns the mean when every word scores above
/// `floor`.
pub fn word_partial_score(keyword_words: &[String], candidate: &str, floor: f64) -> Option<f64> {
    if keyword_words.is_empty() {
        return None;
    }

    let lowered = candidate.to_lowercase();
    let name_words: Vec<&str> = lowered.split_whitespace().collect();

    let scores: Vec<f64> = keyword_words
        .iter()
        .map(|kw| {
            if kw.chars().count() < 3 {
                return 0.0;
            }
            name_words.iter().fold(0.0_f64, |best, nw| {
                let score = if nw.contains(kw.as_str()) || kw.contains(*nw) {
                    80.0
                } else {
                    ratio(kw, nw)
                };
                best.max(score)
            })
        })
        .collect();

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    if min > floor {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    } else {
        None
    }
}

/// Scores every candidate, best first (ties keep candidate order), and
/// keeps the top `limit` as `(position, score)`.
pub fn extract_top(
    query: &str,
    candidates: &[&str],
    scorer: fn(&str, &str) -> f64,
    limit: usize,
) -> Vec<(usize, f64)> {
    let query = default_process(query);
    let mut scored: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(position, candidate)| (position, scorer(&query, &default_process(candidate))))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
}
