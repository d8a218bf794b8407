use crate::path::{bare_name, dir_part, normalize_path};

/// Priority rank of a candidate against a query. Lower wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// Normalized paths are identical.
    ExactPath = 1,
    /// Same bare name, query directory contained in the candidate directory.
    NameInQueryDir = 2,
    /// Same bare name, candidate directory contained in the query path.
    NameInCandidateDir = 3,
    /// Same bare name, no directory relationship.
    NameOnly = 4,
    /// Query is a substring of the candidate path.
    PathContainsQuery = 5,
    /// Query's bare name is a substring of the candidate path.
    PathContainsName = 6,
}

impl MatchTier {
    pub const fn rank(self) -> u8 {
        self as u8
    }
}

/// A candidate path paired with the tier it matched at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCandidate<'a> {
    pub path: &'a str,
    pub tier: MatchTier,
}

struct NormalizedQuery {
    full: String,
    dir: String,
    name: String,
}

impl NormalizedQuery {
    fn new(raw: &str) -> Self {
        let full = normalize_path(raw);
        let dir = dir_part(&full).to_string();
        let name = bare_name(&full).to_string();
        Self { full, dir, name }
    }
}

/// Score every candidate against `query`, preserving input order.
///
/// Tiers 1-5 are assigned first. Tier 6 is only attempted when no candidate
/// reached tiers 1-5 at all.
// TODO: tier 6 only adds hits when the query carries a directory or an
// extension, otherwise tier 5 already covers them; confirm whether it should
// fold into tier 5 before dropping the only-if-empty guard.
pub fn rank_targets<'a, S: AsRef<str>>(query: &str, candidates: &'a [S]) -> Vec<MatchCandidate<'a>> {
    let query = NormalizedQuery::new(query);
    if query.full.is_empty() {
        return Vec::new();
    }

    let normalized: Vec<(&'a str, String)> = candidates
        .iter()
        .map(|c| (c.as_ref(), normalize_path(c.as_ref())))
        .collect();

    let ranked: Vec<MatchCandidate<'a>> = normalized
        .iter()
        .filter_map(|(original, candidate)| {
            primary_tier(&query, candidate).map(|tier| MatchCandidate {
                path: *original,
                tier,
            })
        })
        .collect();
    if !ranked.is_empty() {
        return ranked;
    }

    if query.name.is_empty() {
        return Vec::new();
    }
    log::debug!("No tier 1-5 target for '{}', trying bare-name fallback", query.full);
    normalized
        .iter()
        .filter(|(_, candidate)| candidate.contains(&query.name))
        .map(|(original, _)| MatchCandidate {
            path: *original,
            tier: MatchTier::PathContainsName,
        })
        .collect()
}

fn primary_tier(query: &NormalizedQuery, candidate: &str) -> Option<MatchTier> {
    if candidate == query.full {
        return Some(MatchTier::ExactPath);
    }

    if bare_name(candidate) == query.name {
        let candidate_dir = dir_part(candidate);
        if candidate_dir.contains(&query.dir) {
            return Some(MatchTier::NameInQueryDir);
        }
        if query.full.contains(candidate_dir) {
            return Some(MatchTier::NameInCandidateDir);
        }
        return Some(MatchTier::NameOnly);
    }

    candidate
        .contains(&query.full)
        .then_some(MatchTier::PathContainsQuery)
}

/// Resolve a loose file reference to a single candidate.
///
/// Comparison is case-insensitive; the returned path keeps its original
/// casing. Within a tier the earliest candidate wins.
pub fn find_target<'a, S: AsRef<str>>(query: &str, candidates: &'a [S]) -> Option<&'a str> {
    rank_targets(query, candidates)
        .into_iter()
        .min_by_key(|candidate| candidate.tier)
        .map(|candidate| candidate.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn exact_path_wins_regardless_of_order() {
        let files = ["src/a/Button.tsx", "src/components/Button.tsx"];
        assert_eq!(
            find_target("SRC\\components\\button.tsx", &files),
            Some("src/components/Button.tsx")
        );
    }

    #[test]
    fn directory_containment_beats_name_only() {
        let files = [
            "src/pages/LandingPages/index.ts",
            "src/index.ts",
            "src/services/quota/index.ts",
        ];
        let ranked = rank_targets("quota/index.ts", &files);
        assert_eq!(
            ranked.iter().map(|c| c.tier).collect::<Vec<_>>(),
            vec![MatchTier::NameOnly, MatchTier::NameOnly, MatchTier::NameInQueryDir]
        );
        assert_eq!(find_target("quota/index.ts", &files), Some("src/services/quota/index.ts"));
    }

    #[test]
    fn candidate_dir_inside_query_path() {
        // query dir "app/src/lib" is not inside "src/lib", but "src/lib" is inside the query
        let files = ["src/lib/format.ts"];
        let ranked = rank_targets("app/src/lib/format.ts", &files);
        assert_eq!(ranked[0].tier, MatchTier::NameInCandidateDir);
    }

    #[test]
    fn substring_tier_when_no_name_matches() {
        let files = ["src/features/billing/Invoice.tsx", "src/features/auth/Login.tsx"];
        assert_eq!(find_target("auth/log", &files), Some("src/features/auth/Login.tsx"));
        assert_eq!(rank_targets("auth/log", &files)[0].tier, MatchTier::PathContainsQuery);
    }

    #[test]
    fn bare_name_fallback_only_when_nothing_else_matched() {
        let files = ["src/hooks/useSession.ts", "src/api/session-client.ts"];
        let ranked = rank_targets("lib/session.js", &files);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|c| c.tier == MatchTier::PathContainsName));
        assert_eq!(find_target("lib/session.js", &files), Some("src/hooks/useSession.ts"));
    }

    #[test]
    fn empty_inputs_resolve_to_none() {
        let none: [&str; 0] = [];
        assert_eq!(find_target("anything", &none), None);
        assert_eq!(find_target("   ", &["src/index.ts"]), None);
        assert_eq!(find_target("missing", &["src/index.ts"]), None);
    }
}
