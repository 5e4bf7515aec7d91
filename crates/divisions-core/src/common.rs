// crates/divisions-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for a dataset.
///
/// Returned by [`Dataset::stats`](crate::Dataset::stats) and
/// [`Registry::stats`](crate::Registry::stats): one `(level name, record count)`
/// pair per level, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub levels: Vec<(String, usize)>,
}

impl DbStats {
    pub fn total(&self) -> usize {
        self.levels.iter().map(|(_, n)| n).sum()
    }
}
