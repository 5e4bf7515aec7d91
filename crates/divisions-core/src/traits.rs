// crates/divisions-core/src/traits.rs
use crate::fuzzy::{
    FuzzyMatchResult, FuzzyOptions, SimilarName, Suggestion, UniversalOptions, UniversalResults,
};
use crate::model::{Level, Region};
use crate::text::normalize;

/// Folded-name comparisons for anything with a display name.
///
/// ```rust
/// use divisions_core::{NameMatch, Region};
///
/// let r = Region::new("48", "Thành phố Đà Nẵng");
/// assert!(r.is_named("thanh pho da nang"));
/// assert!(r.name_contains("Da Nang"));
/// assert!(!r.is_named("  "));
/// ```
pub trait NameMatch {
    fn display_name(&self) -> &str;

    /// The display name run through [`normalize`].
    fn folded_name(&self) -> String {
        normalize(self.display_name())
    }

    /// Equal after folding. A blank `name` never matches.
    fn is_named(&self, name: &str) -> bool {
        let q = normalize(name);
        !q.is_empty() && self.folded_name() == q
    }

    fn name_contains(&self, part: &str) -> bool {
        let q = normalize(part);
        !q.is_empty() && self.folded_name().contains(&q)
    }
}

/// O(1) navigation of the hierarchy.
///
/// The first call touching a level pays for building its indexes; every
/// later call is a hash lookup. Unknown or malformed ids are never an error:
/// single lookups return `None`, list lookups return an empty `Vec`.
pub trait HierarchyLookup {
    /// All records of a level, in source order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use divisions_core::{HierarchyLookup, Level, Registry};
    ///
    /// let registry = Registry::embedded();
    /// let provinces = registry.get_all(Level::ROOT);
    /// assert!(!provinces.is_empty());
    /// ```
    fn get_all(&self, level: Level) -> &[Region];

    /// Record with the given id at `level`.
    fn get_by_id(&self, level: Level, id: &str) -> Option<&Region>;

    /// Records one level below `level` whose parent is `parent_id`.
    ///
    /// Empty (never absent) when the parent is unknown or has no children:
    ///
    /// ```rust
    /// use divisions_core::{HierarchyLookup, Level, Registry};
    ///
    /// let registry = Registry::embedded();
    /// assert!(registry.get_children(Level::ROOT, "999").is_empty());
    /// ```
    fn get_children(&self, level: Level, parent_id: &str) -> Vec<&Region>;

    fn is_valid_id(&self, level: Level, id: &str) -> bool {
        self.get_by_id(level, id).is_some()
    }

    /// The parent record of `region`, which lives at `level`.
    fn get_parent(&self, level: Level, region: &Region) -> Option<&Region> {
        let parent_level = level.parent()?;
        self.get_by_id(parent_level, region.parent_id.as_deref()?)
    }

    /// The chain of ancestors of a record, root first, excluding the record itself.
    /// Stops early if a parent reference is dangling.
    fn ancestors(&self, level: Level, id: &str) -> Vec<(Level, &Region)> {
        let mut chain = Vec::new();
        let mut current = match self.get_by_id(level, id) {
            Some(r) => (level, r),
            None => return chain,
        };
        while let Some(parent) = self.get_parent(current.0, current.1) {
            // parent() is Some whenever get_parent returned a record
            let parent_level = current.0.parent().unwrap_or(Level::ROOT);
            chain.push((parent_level, parent));
            current = (parent_level, parent);
        }
        chain.reverse();
        chain
    }

    /// Every record at `target` that sits below `(level, id)`.
    /// Empty when `target` is not deeper than `level`.
    fn get_descendants(&self, level: Level, id: &str, target: Level) -> Vec<&Region> {
        if target <= level || self.get_by_id(level, id).is_none() {
            return Vec::new();
        }
        let mut frontier = vec![id];
        let mut depth = level;
        while depth < target {
            let mut next = Vec::new();
            for parent_id in frontier {
                next.extend(self.get_children(depth, parent_id));
            }
            depth = match depth.child() {
                Some(d) => d,
                None => return Vec::new(),
            };
            if depth == target {
                return next;
            }
            frontier = next.into_iter().map(|r| r.id.as_str()).collect();
        }
        Vec::new()
    }
}

/// Name search over the token index.
pub trait NameSearch {
    /// Records whose indexed tokens contain the normalized query, or are
    /// contained in it. Deduplicated and in source order, but not ranked:
    /// callers sort as they see fit. A blank query matches nothing.
    fn search_by_name(&self, level: Level, query: &str) -> Vec<&Region>;

    /// Records whose normalized name equals the normalized `name`.
    fn find_by_name(&self, level: Level, name: &str) -> Vec<&Region>;
}

/// Ranked, typo-tolerant search. See [`crate::fuzzy`] for the scoring rules.
pub trait FuzzySearch {
    /// Records of one level scored against `query`, best first. Only scores
    /// at or above `opts.threshold` are kept, at most `opts.max_results`.
    ///
    /// ```rust
    /// use divisions_core::{FuzzyOptions, FuzzySearch, Level, Registry};
    ///
    /// let registry = Registry::embedded();
    /// let hits = registry.fuzzy_search(Level::ROOT, "thanh pho ha noi", &FuzzyOptions::default());
    /// assert_eq!(hits[0].item.id, "01");
    /// assert_eq!(hits[0].score, 1.0);
    /// ```
    fn fuzzy_search(&self, level: Level, query: &str, opts: &FuzzyOptions) -> Vec<FuzzyMatchResult<'_>>;

    /// [`FuzzySearch::fuzzy_search`] over every level, narrowed by
    /// `opts.filters` and merged into one list ordered by `opts.sort_by`.
    fn universal_fuzzy_search(&self, query: &str, opts: &UniversalOptions) -> UniversalResults<'_>;

    /// Records at `level` whose Jaro-Winkler similarity to `name` is at
    /// least `threshold`, most similar first. A record named exactly `name`
    /// is not reported as similar to itself. A blank name has no similar names.
    fn find_similar_names(&self, name: &str, level: Level, threshold: f64) -> Vec<SimilarName<'_>>;

    /// "Did you mean" candidates for a query, across all levels or one.
    fn suggest_corrections(&self, query: &str, level: Option<Level>) -> Vec<Suggestion<'_>>;
}
