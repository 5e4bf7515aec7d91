// crates/divisions-core/src/lib.rs

pub mod common;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod loader; // The public loader
pub mod lookup;
pub mod memo;
pub mod model;
pub mod registry;
pub mod search;
pub mod text;
pub mod traits;
pub mod validate;
// Raw JSON shape, only used by the loader
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::common::DbStats;
pub use crate::error::{DivisionError, Result};
pub use crate::fuzzy::{
    fuzzy_match, FieldMatch, FuzzyMatchResult, FuzzyOptions, LevelResults, MatchKind, RegionRef,
    Score, SearchFilters, SimilarName, SortBy, Suggestion, UniversalOptions, UniversalResults,
};
pub use crate::loader::DatasetSource;
pub use crate::memo::{memoize, MemoCache, Memoized};
pub use crate::model::{Dataset, Level, LevelSpec, Region, Schema};
pub use crate::registry::{LoadState, Registry};
// Export the traits (crucial for users: the methods live on them)
pub use crate::traits::{FuzzySearch, HierarchyLookup, NameMatch, NameSearch};
pub use crate::validate::{Issue, ValidationReport};

/// Everything a typical caller needs in one import.
///
/// ```rust
/// use divisions_core::prelude::*;
///
/// let registry = Registry::global();
/// let hanoi = registry.get_by_id(Level::ROOT, "01").unwrap();
/// assert!(hanoi.is_named("thanh pho ha noi"));
/// ```
pub mod prelude {
    pub use crate::{
        DivisionError, FuzzyOptions, FuzzySearch, HierarchyLookup, Level, NameMatch, NameSearch,
        Region, Registry, Result, UniversalOptions,
    };
}
