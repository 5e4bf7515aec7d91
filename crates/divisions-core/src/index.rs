// crates/divisions-core/src/index.rs
//! # Index Builder
//!
//! Derives the per-level lookup structures from a flat record list. Every map
//! stores positions into the level's record slice rather than copies, so an
//! index is only valid next to the slice it was built from.

use crate::model::Region;
use crate::text::{normalize, words};
use std::collections::HashMap;
use std::time::Instant;

/// `id -> position`
pub type IdIndex = HashMap<String, usize>;

/// `parent id -> positions of its children`, in source order.
pub type ParentIndex = HashMap<String, Vec<usize>>;

/// Minimum length (in characters) of a prefix or word key.
pub const MIN_TOKEN_LEN: usize = 2;

/// Token → records map used by name search.
///
/// Keys are the full normalized name, each word longer than one character,
/// and every prefix of the normalized name from two characters up to its full
/// length. This costs O(name_length²) bytes per record, which is fine for a
/// few thousand short names and buys O(1) prefix lookup.
#[derive(Debug, Default, Clone)]
pub struct SearchIndex {
    keys: HashMap<String, Vec<usize>>,
}

impl SearchIndex {
    /// Positions stored under an exact token; empty if the token is unknown.
    pub fn get(&self, token: &str) -> &[usize] {
        self.keys.get(token).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.keys.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn insert(&mut self, key: &str, pos: usize) {
        let bucket = self.keys.entry(key.to_owned()).or_default();
        // records are indexed one after another, so a repeat is always the tail
        if bucket.last() != Some(&pos) {
            bucket.push(pos);
        }
    }
}

/// Build the `id -> position` map. On duplicate ids the last record wins;
/// each collision is logged and also reported by validation.
pub fn build_id_index(records: &[Region]) -> IdIndex {
    let mut map = HashMap::with_capacity(records.len());
    for (pos, r) in records.iter().enumerate() {
        if let Some(prev) = map.insert(r.id.clone(), pos) {
            log::warn!(
                "duplicate id '{}': record #{pos} ('{}') replaces #{prev} ('{}')",
                r.id,
                r.name,
                records[prev].name
            );
        }
    }
    map
}

/// Build the `parent id -> children` map. Records without a parent are skipped.
pub fn build_parent_index(records: &[Region]) -> ParentIndex {
    let mut map: ParentIndex = HashMap::new();
    for (pos, r) in records.iter().enumerate() {
        if let Some(parent) = &r.parent_id {
            map.entry(parent.clone()).or_default().push(pos);
        }
    }
    map
}

/// Build the token index over normalized names.
pub fn build_search_index(records: &[Region]) -> SearchIndex {
    let mut index = SearchIndex::default();
    for (pos, r) in records.iter().enumerate() {
        index_name(&mut index, &normalize(&r.name), pos);
    }
    index
}

fn index_name(index: &mut SearchIndex, name: &str, pos: usize) {
    if name.is_empty() {
        return;
    }
    index.insert(name, pos);

    for w in words(name) {
        if w.chars().count() >= MIN_TOKEN_LEN {
            index.insert(w, pos);
        }
    }

    // char boundaries, so multi-byte leftovers from transliteration never split
    for (count, (start, ch)) in name.char_indices().enumerate() {
        if count + 1 >= MIN_TOKEN_LEN {
            index.insert(&name[..start + ch.len_utf8()], pos);
        }
    }
}

/// All lookup structures of one level, built together and never mutated.
#[derive(Debug, Default, Clone)]
pub struct LevelIndex {
    /// Normalized names, parallel to the record slice.
    pub names: Vec<String>,
    pub by_id: IdIndex,
    pub by_parent: ParentIndex,
    pub search: SearchIndex,
}

impl LevelIndex {
    pub fn build(records: &[Region]) -> Self {
        let started = Instant::now();
        let index = Self {
            names: records.iter().map(|r| normalize(&r.name)).collect(),
            by_id: build_id_index(records),
            by_parent: build_parent_index(records),
            search: build_search_index(records),
        };
        log::debug!(
            "indexed {} records: {} ids, {} parents, {} search keys in {:.2?}",
            records.len(),
            index.by_id.len(),
            index.by_parent.len(),
            index.search.len(),
            started.elapsed()
        );
        index
    }
}
