// crates/divisions-core/src/fuzzy/mod.rs
//! # Fuzzy Matching
//!
//! Scores a query against candidate names and ranks records by that score.
//!
//! Scoring takes the first rule that applies, in this order:
//!
//! | Rule   | Condition                                   | Score |
//! |--------|---------------------------------------------|-------|
//! | Exact  | normalized query == normalized target       | `1.0 + exact_bonus` |
//! | Prefix | target starts with query                    | `0.9 + prefix_bonus` |
//! | Word   | some query word prefixes a target word, or vice versa | `matched / max(words) × 0.8 + word_bonus` |
//! | Fuzzy  | otherwise                                   | `0.6 × levenshtein_sim + 0.4 × jaro_winkler` |

pub mod engine;
pub mod similarity;

use crate::model::{Level, Region};
use serde::{Deserialize, Serialize};

pub use engine::fuzzy_match;

/// Which scoring rule produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Prefix,
    Word,
    Fuzzy,
}

/// Tuning for a fuzzy search. Every field has a default, so a partial
/// config section deserializes fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyOptions {
    /// Minimum score kept in results.
    pub threshold: f64,
    pub max_results: usize,
    pub exact_bonus: f64,
    pub prefix_bonus: f64,
    pub word_bonus: f64,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            max_results: 50,
            exact_bonus: 0.0,
            prefix_bonus: 0.0,
            word_bonus: 0.0,
        }
    }
}

impl FuzzyOptions {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.max(0.0);
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Outcome of scoring one query against one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub score: f64,
    pub kind: MatchKind,
}

/// Which field matched, and how.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub field: &'static str,
    pub value: String,
    pub score: f64,
    pub kind: MatchKind,
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMatchResult<'a> {
    pub item: &'a Region,
    pub level: Level,
    pub score: f64,
    pub matches: Vec<FieldMatch>,
}

/// Ordering of the combined list of a universal search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Descending score.
    #[default]
    Score,
    /// Ascending by name, accent-insensitive.
    Name,
    /// Descending score; at equal score coarser levels come first.
    Relevance,
}

/// A specific record, used to scope a search to its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRef {
    pub level: Level,
    pub id: String,
}

/// Narrowing applied after the per-level searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Only this level is searched; every other level comes back empty.
    pub level: Option<Level>,
    /// Only the referenced record and its descendants are kept; levels
    /// coarser than the reference come back empty.
    pub within: Option<RegionRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniversalOptions {
    pub fuzzy: FuzzyOptions,
    pub filters: SearchFilters,
    pub sort_by: SortBy,
}

/// Ranked hits of one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelResults<'a> {
    pub level: Level,
    pub name: String,
    pub results: Vec<FuzzyMatchResult<'a>>,
}

/// Per-level lists plus one combined list ordered by [`SortBy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UniversalResults<'a> {
    pub levels: Vec<LevelResults<'a>>,
    pub combined: Vec<FuzzyMatchResult<'a>>,
}

impl<'a> UniversalResults<'a> {
    /// The result list of one level; empty if the level was filtered out.
    pub fn for_level(&self, level: Level) -> &[FuzzyMatchResult<'a>] {
        self.levels
            .iter()
            .find(|l| l.level == level)
            .map(|l| l.results.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarName<'a> {
    pub item: &'a Region,
    pub similarity: f64,
}

/// A "did you mean" candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion<'a> {
    pub suggestion: String,
    pub level: Level,
    pub level_name: String,
    pub confidence: f64,
    pub item: &'a Region,
}
