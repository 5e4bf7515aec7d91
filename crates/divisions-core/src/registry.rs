// crates/divisions-core/src/registry.rs
//! # Registry
//!
//! Owns the dataset and its per-level indexes. Nothing is read or built until
//! first use; after that every structure is immutable and shared by
//! reference, so all read operations take `&self` and run in parallel.
//!
//! Each level goes through `Unloaded → Loading → Loaded` exactly once.
//! `OnceCell::get_or_init` makes the transition single-flight: concurrent
//! first callers block on one build, and nobody ever sees a partial map.

use crate::common::DbStats;
use crate::error::Result;
use crate::index::LevelIndex;
use crate::loader::DatasetSource;
use crate::memo::MemoCache;
use crate::model::{Dataset, Level, Region, Schema};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

// Single in-process registry over the embedded dataset.
static GLOBAL: OnceCell<Registry> = OnceCell::new();

/// Observable lifecycle of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
}

const UNLOADED: u8 = 0;
const LOADING: u8 = 1;
const LOADED: u8 = 2;

impl LoadState {
    fn from_u8(v: u8) -> Self {
        match v {
            LOADING => LoadState::Loading,
            LOADED => LoadState::Loaded,
            _ => LoadState::Unloaded,
        }
    }
}

#[derive(Default)]
struct LevelSlot {
    index: OnceCell<LevelIndex>,
    state: AtomicU8,
}

struct Loaded {
    dataset: Dataset,
    slots: Vec<LevelSlot>,
}

impl Loaded {
    fn new(dataset: Dataset) -> Self {
        let slots = (0..dataset.schema().len())
            .map(|_| LevelSlot::default())
            .collect();
        Self { dataset, slots }
    }
}

/// Cache key for memoized, name-sorted position lists.
#[derive(serde::Serialize)]
pub(crate) struct SortedKey<'a> {
    pub level: usize,
    pub query: Option<&'a str>,
}

/// Process-wide holder of the dataset and its indexes.
///
/// Use [`Registry::global`] for the shared instance over the bundled data,
/// or construct your own with [`Registry::new`] / [`Registry::from_dataset`]
/// (tests do this to start from a fresh, unloaded state).
pub struct Registry {
    source: Option<DatasetSource>,
    loaded: OnceCell<Loaded>,
    builds: AtomicUsize,
    pub(crate) sorted: MemoCache<Vec<usize>>,
}

impl Registry {
    /// A registry that will load `source` on first access.
    pub fn new(source: DatasetSource) -> Self {
        Self {
            source: Some(source),
            loaded: OnceCell::new(),
            builds: AtomicUsize::new(0),
            sorted: MemoCache::new(),
        }
    }

    /// A registry over the dataset bundled with the crate.
    pub fn embedded() -> Self {
        Self::new(DatasetSource::Embedded)
    }

    /// A registry over an already materialized dataset. Indexes are still
    /// built lazily, per level.
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            source: None,
            loaded: OnceCell::with_value(Loaded::new(dataset)),
            builds: AtomicUsize::new(0),
            sorted: MemoCache::new(),
        }
    }

    /// The shared registry over the embedded dataset.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::embedded)
    }

    /// Load the dataset now, surfacing any I/O or parse error.
    ///
    /// The infallible accessors cannot report errors; if they run first and
    /// the source is broken they log it and settle on an empty dataset.
    pub fn try_load(&self) -> Result<&Dataset> {
        let loaded = self.loaded.get_or_try_init(|| match &self.source {
            Some(source) => source.load().map(Loaded::new),
            None => Ok(Loaded::new(Dataset::empty())),
        })?;
        Ok(&loaded.dataset)
    }

    fn loaded(&self) -> &Loaded {
        self.loaded.get_or_init(|| {
            let result = match &self.source {
                Some(source) => source.load(),
                None => Ok(Dataset::empty()),
            };
            match result {
                Ok(dataset) => Loaded::new(dataset),
                Err(e) => {
                    log::error!("failed to load dataset, continuing with no data: {e}");
                    Loaded::new(Dataset::empty())
                }
            }
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.loaded().dataset
    }

    pub fn schema(&self) -> &Schema {
        self.dataset().schema()
    }

    /// Resolve a level by name (`"province"`, `"ward"`, ...).
    pub fn level(&self, name: &str) -> Option<Level> {
        self.schema().level(name)
    }

    pub fn levels(&self) -> Vec<Level> {
        self.schema().levels().collect()
    }

    /// Records and index of a level, building the index on first access.
    /// `None` for levels outside the schema.
    pub(crate) fn level_data(&self, level: Level) -> Option<(&[Region], &LevelIndex)> {
        let loaded = self.loaded();
        let slot = loaded.slots.get(level.depth())?;
        let records = loaded.dataset.records(level);

        let index = slot.index.get_or_init(|| {
            slot.state.store(LOADING, Ordering::Release);
            self.builds.fetch_add(1, Ordering::Relaxed);
            log::debug!(
                "building index for '{}'",
                loaded.dataset.schema().name_of(level)
            );
            LevelIndex::build(records)
        });
        slot.state.store(LOADED, Ordering::Release);

        Some((records, index))
    }

    /// Where a level currently is in its lifecycle. Never triggers a load.
    pub fn load_state(&self, level: Level) -> LoadState {
        self.loaded
            .get()
            .and_then(|l| l.slots.get(level.depth()))
            .map(|slot| LoadState::from_u8(slot.state.load(Ordering::Acquire)))
            .unwrap_or(LoadState::Unloaded)
    }

    /// Number of level indexes built so far. Never exceeds the level count.
    pub fn index_builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// Force every level to load. Useful at startup to move the one-time
    /// cost off the first request.
    pub fn warm_up(&self) {
        for level in self.levels() {
            self.level_data(level);
        }
    }

    pub fn stats(&self) -> DbStats {
        self.dataset().stats()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("source", &self.source)
            .field("loaded", &self.loaded.get().is_some())
            .field("index_builds", &self.index_builds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_loads_until_first_access() {
        let r = Registry::embedded();
        assert_eq!(r.load_state(Level::ROOT), LoadState::Unloaded);
        assert_eq!(r.index_builds(), 0);

        r.level_data(Level::ROOT);
        assert_eq!(r.load_state(Level::ROOT), LoadState::Loaded);
        assert_eq!(r.load_state(Level::at(1)), LoadState::Unloaded);
        assert_eq!(r.index_builds(), 1);
    }

    #[test]
    fn each_level_is_indexed_once() {
        let r = Registry::embedded();
        for _ in 0..3 {
            r.warm_up();
        }
        assert_eq!(r.index_builds(), 3);
    }

    #[test]
    fn unknown_level_has_no_data() {
        let r = Registry::embedded();
        assert!(r.level_data(Level::at(9)).is_none());
        assert_eq!(r.load_state(Level::at(9)), LoadState::Unloaded);
    }

    #[test]
    fn broken_source_degrades_to_empty() {
        let r = Registry::new(DatasetSource::Path("/nope/divisions.json".into()));
        assert!(r.try_load().is_err());
        assert!(r.levels().is_empty());
        assert_eq!(r.stats().total(), 0);
    }
}
