use crate::path::strip_extension;

pub const DEFAULT_MAX_DISTANCE: usize = 3;
pub const DEFAULT_LIMIT: usize = 5;
/// Stricter cut-off used for single "did you mean" assertions.
pub const BEST_MATCH_MAX_DISTANCE: usize = 2;

/// Knobs for [`find_similar_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimilarOptions {
    pub max_distance: usize,
    pub limit: usize,
    /// Lower-case both sides and strip the key's extension before scoring.
    pub normalize: bool,
}

impl Default for SimilarOptions {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
            limit: DEFAULT_LIMIT,
            normalize: true,
        }
    }
}

impl SimilarOptions {
    #[must_use]
    pub const fn best_match() -> Self {
        Self {
            max_distance: BEST_MATCH_MAX_DISTANCE,
            limit: 1,
            normalize: true,
        }
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub const fn with_max_distance(mut self, max_distance: usize) -> Self {
        self.max_distance = max_distance;
        self
    }
}

/// A candidate that survived scoring. Lower score is closer; `0` means one
/// string contains the other.
#[derive(Debug, PartialEq, Eq)]
pub struct Scored<'a, T> {
    pub item: &'a T,
    pub score: usize,
}

/// Levenshtein distance (insert, delete, substitute all cost 1).
///
/// Uses the full `(|b|+1) x (|a|+1)` table; inputs here are file and area
/// names, so the quadratic footprint is irrelevant.
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut table = vec![vec![0usize; a.len() + 1]; b.len() + 1];

    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            let cost = usize::from(a[j - 1] != b[i - 1]);
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    table[b.len()][a.len()]
}

/// Rank `candidates` by closeness to `query`, keyed by `key`.
///
/// Containment in either direction short-circuits to score 0; everything
/// else is scored by edit distance and dropped above `max_distance`. The
/// sort is stable, so ties keep input order.
pub fn find_similar_by<'a, T, F, K>(
    query: &str,
    candidates: &'a [T],
    options: SimilarOptions,
    key: F,
) -> Vec<Scored<'a, T>>
where
    F: Fn(&T) -> K,
    K: AsRef<str>,
{
    let query = if options.normalize {
        query.trim().to_lowercase()
    } else {
        query.to_string()
    };
    if query.is_empty() || options.limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<Scored<'a, T>> = candidates
        .iter()
        .filter_map(|item| {
            let raw = key(item);
            let candidate_key = if options.normalize {
                strip_extension(raw.as_ref().trim()).to_lowercase()
            } else {
                raw.as_ref().to_string()
            };
            if candidate_key.is_empty() {
                return None;
            }

            let score = if candidate_key.contains(&query) || query.contains(&candidate_key) {
                0
            } else {
                distance(&query, &candidate_key)
            };
            (score <= options.max_distance).then_some(Scored { item, score })
        })
        .collect();

    scored.sort_by_key(|entry| entry.score);
    scored.truncate(options.limit);
    scored
}

/// [`find_similar_by`] over plain strings.
pub fn find_similar<'a, S: AsRef<str>>(
    query: &str,
    candidates: &'a [S],
    options: SimilarOptions,
) -> Vec<&'a str> {
    find_similar_by(query, candidates, options, |c| c.as_ref().to_string())
        .into_iter()
        .map(|entry| entry.item.as_ref())
        .collect()
}

/// High-confidence single suggestion (distance at most 2).
///
/// Meant for a "did you mean" line only; general suggestion lists go through
/// [`find_similar_by`] with the default options.
pub fn find_best_match_by<'a, T, F, K>(query: &str, candidates: &'a [T], key: F) -> Option<&'a T>
where
    F: Fn(&T) -> K,
    K: AsRef<str>,
{
    find_similar_by(query, candidates, SimilarOptions::best_match(), key)
        .into_iter()
        .next()
        .map(|entry| entry.item)
}

pub fn find_best_match<'a, S: AsRef<str>>(query: &str, candidates: &'a [S]) -> Option<&'a str> {
    find_best_match_by(query, candidates, |c| c.as_ref().to_string()).map(|c| c.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn distance_counts_single_edits() {
        assert_eq!(distance("auth", "auth"), 0);
        assert_eq!(distance("auth", "auths"), 1);
        assert_eq!(distance("auth", "auht"), 2);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("kitten", "sitting"), 3);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(distance("dashboard", "dashbaord"), distance("dashbaord", "dashboard"));
    }

    #[test]
    fn distance_handles_multibyte_chars() {
        assert_eq!(distance("configuración", "configuracion"), 1);
    }

    #[test]
    fn best_match_accepts_close_typos_only() {
        let areas = ["auth", "dashboard"];
        assert_eq!(find_best_match("auht", &areas), Some("auth"));
        assert_eq!(find_best_match("xyz", &areas), None);
    }

    #[test]
    fn similar_prefers_containment_then_distance() {
        let candidates = ["settings", "billing", "billing-portal", "bill"];
        let found = find_similar("billing", &candidates, SimilarOptions::default());
        // containment in either direction scores 0 and keeps input order
        assert_eq!(found, vec!["billing", "billing-portal", "bill"]);
    }

    #[test]
    fn similar_strips_extensions_from_keys() {
        let files = ["Button.tsx", "Buttons.vue", "Modal.tsx"];
        let found = find_similar("buton", &files, SimilarOptions::default());
        assert_eq!(found, vec!["Button.tsx", "Buttons.vue"]);
    }

    #[test]
    fn similar_respects_limit_and_max_distance() {
        let candidates = ["abcd", "abce", "abcf", "zzzz"];
        let options = SimilarOptions::default().with_limit(2).with_max_distance(1);
        assert_eq!(find_similar("abcx", &candidates, options), vec!["abcd", "abce"]);
    }

    #[test]
    fn similar_by_uses_key_extractor() {
        let areas = vec![("auth".to_string(), 12usize), ("admin".to_string(), 3)];
        let found = find_similar_by("autj", &areas, SimilarOptions::default(), |(id, _)| id.clone());
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].item.0, "auth");
        assert_eq!(found[0].score, 1);
    }

    #[test]
    fn empty_query_yields_nothing() {
        assert!(find_similar("  ", &["auth"], SimilarOptions::default()).is_empty());
        assert_eq!(find_best_match("", &["auth"]), None);
    }
}
