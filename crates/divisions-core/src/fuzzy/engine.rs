// crates/divisions-core/src/fuzzy/engine.rs
use super::similarity::{jaro_winkler, levenshtein_similarity};
use super::{
    FieldMatch, FuzzyMatchResult, FuzzyOptions, LevelResults, MatchKind, RegionRef, Score,
    SimilarName, SortBy, Suggestion, UniversalOptions, UniversalResults,
};
use crate::model::Level;
use crate::registry::Registry;
use crate::text::{compare_names, normalize, words};
use crate::traits::{FuzzySearch, HierarchyLookup};
use std::cmp::Ordering;
use std::collections::HashSet;

const WORD_WEIGHT: f64 = 0.8;
const PREFIX_SCORE: f64 = 0.9;
const LEVENSHTEIN_WEIGHT: f64 = 0.6;
const JARO_WINKLER_WEIGHT: f64 = 0.4;

/// Threshold and size used by [`FuzzySearch::suggest_corrections`].
const SUGGEST_THRESHOLD: f64 = 0.4;
const SUGGEST_MAX: usize = 10;

/// Score `query` against `target`. `None` when either side folds to empty.
///
/// ```rust
/// use divisions_core::fuzzy::{fuzzy_match, FuzzyOptions, MatchKind};
///
/// let opts = FuzzyOptions::default();
/// let s = fuzzy_match("ha noi", "Thành phố Hà Nội", &opts).unwrap();
/// assert_eq!(s.kind, MatchKind::Word);
/// assert!((s.score - 0.4).abs() < 1e-9);
/// ```
pub fn fuzzy_match(query: &str, target: &str, opts: &FuzzyOptions) -> Option<Score> {
    score_normalized(&normalize(query), &normalize(target), opts)
}

/// [`fuzzy_match`] on inputs that are already normalized.
pub(crate) fn score_normalized(q: &str, t: &str, opts: &FuzzyOptions) -> Option<Score> {
    if q.is_empty() || t.is_empty() {
        return None;
    }

    if q == t {
        return Some(Score {
            score: 1.0 + opts.exact_bonus,
            kind: MatchKind::Exact,
        });
    }

    if t.starts_with(q) {
        return Some(Score {
            score: PREFIX_SCORE + opts.prefix_bonus,
            kind: MatchKind::Prefix,
        });
    }

    let q_words: Vec<&str> = words(q).collect();
    let t_words: Vec<&str> = words(t).collect();
    let matched = q_words
        .iter()
        .filter(|qw| {
            t_words
                .iter()
                .any(|tw| tw.starts_with(*qw) || qw.starts_with(*tw))
        })
        .count();
    if matched > 0 {
        let total = q_words.len().max(t_words.len()) as f64;
        return Some(Score {
            score: matched as f64 / total * WORD_WEIGHT + opts.word_bonus,
            kind: MatchKind::Word,
        });
    }

    Some(Score {
        score: LEVENSHTEIN_WEIGHT * levenshtein_similarity(q, t)
            + JARO_WINKLER_WEIGHT * jaro_winkler(q, t),
        kind: MatchKind::Fuzzy,
    })
}

fn by_score_desc(a: &FuzzyMatchResult<'_>, b: &FuzzyMatchResult<'_>) -> Ordering {
    b.score.total_cmp(&a.score)
}

impl Registry {
    /// Score one level. When `allowed` is given, only those ids are scored,
    /// so a subtree filter never loses hits to `max_results`.
    fn rank_level<'a>(
        &'a self,
        level: Level,
        q: &str,
        opts: &FuzzyOptions,
        allowed: Option<&HashSet<&str>>,
    ) -> Vec<FuzzyMatchResult<'a>> {
        let Some((records, index)) = self.level_data(level) else {
            return Vec::new();
        };

        let mut out: Vec<FuzzyMatchResult<'a>> = records
            .iter()
            .zip(&index.names)
            .filter(|(item, _)| allowed.map_or(true, |ids| ids.contains(item.id.as_str())))
            .filter_map(|(item, name)| {
                let s = score_normalized(q, name, opts)?;
                (s.score >= opts.threshold).then(|| FuzzyMatchResult {
                    item,
                    level,
                    score: s.score,
                    matches: vec![FieldMatch {
                        field: "name",
                        value: item.name.clone(),
                        score: s.score,
                        kind: s.kind,
                    }],
                })
            })
            .collect();

        // stable: equal scores keep source order
        out.sort_by(by_score_desc);
        out.truncate(opts.max_results);
        out
    }

    /// Ids at `level` that survive a `within` filter.
    fn allowed_ids<'a>(&'a self, level: Level, within: &RegionRef) -> HashSet<&'a str> {
        match level.cmp(&within.level) {
            Ordering::Less => HashSet::new(),
            Ordering::Equal => self
                .get_by_id(level, &within.id)
                .map(|r| r.id.as_str())
                .into_iter()
                .collect(),
            Ordering::Greater => self
                .get_descendants(within.level, &within.id, level)
                .into_iter()
                .map(|r| r.id.as_str())
                .collect(),
        }
    }
}

impl FuzzySearch for Registry {
    fn fuzzy_search(&self, level: Level, query: &str, opts: &FuzzyOptions) -> Vec<FuzzyMatchResult<'_>> {
        self.rank_level(level, &normalize(query), opts, None)
    }

    fn universal_fuzzy_search(&self, query: &str, opts: &UniversalOptions) -> UniversalResults<'_> {
        let q = normalize(query);
        let filters = &opts.filters;

        let levels: Vec<LevelResults<'_>> = self
            .levels()
            .into_iter()
            .map(|level| {
                let name = self.schema().name_of(level).to_owned();
                if filters.level.is_some_and(|only| only != level) {
                    return LevelResults {
                        level,
                        name,
                        results: Vec::new(),
                    };
                }

                let allowed = filters
                    .within
                    .as_ref()
                    .map(|within| self.allowed_ids(level, within));
                let results = self.rank_level(level, &q, &opts.fuzzy, allowed.as_ref());
                LevelResults {
                    level,
                    name,
                    results,
                }
            })
            .collect();

        let mut combined: Vec<FuzzyMatchResult<'_>> = levels
            .iter()
            .flat_map(|l| l.results.iter().cloned())
            .collect();
        match opts.sort_by {
            SortBy::Score => combined.sort_by(by_score_desc),
            SortBy::Name => combined.sort_by(|a, b| compare_names(&a.item.name, &b.item.name)),
            SortBy::Relevance => {
                combined.sort_by(|a, b| by_score_desc(a, b).then_with(|| a.level.cmp(&b.level)))
            }
        }
        combined.truncate(opts.fuzzy.max_results);

        log::debug!(
            "universal search '{q}': {} combined hits over {} levels",
            combined.len(),
            levels.len()
        );
        UniversalResults { levels, combined }
    }

    fn find_similar_names(&self, name: &str, level: Level, threshold: f64) -> Vec<SimilarName<'_>> {
        let q = normalize(name);
        if q.is_empty() {
            return Vec::new();
        }
        let Some((records, index)) = self.level_data(level) else {
            return Vec::new();
        };

        let mut out: Vec<SimilarName<'_>> = records
            .iter()
            .zip(&index.names)
            .filter(|(_, n)| **n != q)
            .filter_map(|(item, n)| {
                let similarity = jaro_winkler(&q, n);
                (similarity >= threshold).then_some(SimilarName { item, similarity })
            })
            .collect();
        out.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        out
    }

    fn suggest_corrections(&self, query: &str, level: Option<Level>) -> Vec<Suggestion<'_>> {
        let mut opts = UniversalOptions::default();
        opts.fuzzy = opts
            .fuzzy
            .with_threshold(SUGGEST_THRESHOLD)
            .with_max_results(SUGGEST_MAX);
        opts.filters.level = level;

        self.universal_fuzzy_search(query, &opts)
            .combined
            .into_iter()
            .map(|hit| Suggestion {
                suggestion: hit.item.name.clone(),
                level: hit.level,
                level_name: self.schema().name_of(hit.level).to_owned(),
                confidence: hit.score,
                item: hit.item,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> FuzzyOptions {
        FuzzyOptions::default()
    }

    #[test]
    fn exact_beats_everything() {
        let s = fuzzy_match("Hà Nội", "ha noi", &opts()).unwrap();
        assert_eq!(s.kind, MatchKind::Exact);
        assert_eq!(s.score, 1.0);
    }

    #[test]
    fn bonuses_are_added() {
        let o = FuzzyOptions {
            exact_bonus: 0.5,
            prefix_bonus: 0.05,
            ..opts()
        };
        assert_eq!(fuzzy_match("a b", "a b", &o).unwrap().score, 1.5);
        assert!((fuzzy_match("quan", "quan 1", &o).unwrap().score - 0.95).abs() < 1e-9);
    }

    #[test]
    fn prefix_match() {
        let s = fuzzy_match("Quận", "Quận Ba Đình", &opts()).unwrap();
        assert_eq!(s.kind, MatchKind::Prefix);
        assert!((s.score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn word_match_counts_prefixes_both_ways() {
        // "ba" prefixes "ba"; "dinhs" is prefixed by "dinh"
        let s = fuzzy_match("ba dinhs", "quan ba dinh", &opts()).unwrap();
        assert_eq!(s.kind, MatchKind::Word);
        assert!((s.score - 2.0 / 3.0 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn word_rule_precedes_edit_distance() {
        let s = fuzzy_match("hoan kiem", "hoam kiem", &opts()).unwrap();
        assert_eq!(s.kind, MatchKind::Word);

        let s = fuzzy_match("nhatrang", "nha trang", &opts()).unwrap();
        assert_eq!(s.kind, MatchKind::Word);

        let s = fuzzy_match("hanoi", "hue", &opts()).unwrap();
        assert_eq!(s.kind, MatchKind::Fuzzy);
        assert!(s.score > 0.0 && s.score < 1.0);
    }

    #[test]
    fn empty_sides_do_not_score() {
        assert!(fuzzy_match("", "Hà Nội", &opts()).is_none());
        assert!(fuzzy_match("ha", "  ", &opts()).is_none());
    }
}
