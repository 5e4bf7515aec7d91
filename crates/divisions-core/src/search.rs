// crates/divisions-core/src/search.rs
use crate::model::{Level, Region};
use crate::registry::{Registry, SortedKey};
use crate::text::{compare_names, normalize};
use crate::traits::{NameMatch, NameSearch};

impl NameSearch for Registry {
    fn search_by_name(&self, level: Level, query: &str) -> Vec<&Region> {
        let Some((records, _)) = self.level_data(level) else {
            return Vec::new();
        };
        self.search_positions(level, &normalize(query))
            .into_iter()
            .filter_map(|p| records.get(p))
            .collect()
    }

    fn find_by_name(&self, level: Level, name: &str) -> Vec<&Region> {
        let q = normalize(name);
        let Some((records, index)) = self.level_data(level) else {
            return Vec::new();
        };
        // the full folded name is always one of a record's keys
        index
            .search
            .get(&q)
            .iter()
            .filter_map(|&p| records.get(p))
            .filter(|r| r.is_named(&q))
            .collect()
    }
}

impl Registry {
    /// Positions matching an already normalized query, ascending.
    ///
    /// A record matches when one of its index keys contains the query or is
    /// contained in it. The reverse direction lets a long query such as
    /// "quan ba dinh ha noi" still find "quan ba dinh". This is deliberately
    /// permissive; ranking is up to the caller.
    pub(crate) fn search_positions(&self, level: Level, q: &str) -> Vec<usize> {
        let Some((records, index)) = self.level_data(level) else {
            return Vec::new();
        };
        // every string contains "", so a blank query would match everything
        if q.is_empty() {
            return Vec::new();
        }

        let mut hit = vec![false; records.len()];
        for (key, positions) in index.search.iter() {
            if key.contains(q) || q.contains(key) {
                for &p in positions {
                    hit[p] = true;
                }
            }
        }
        hit.iter()
            .enumerate()
            .filter_map(|(p, &h)| h.then_some(p))
            .collect()
    }

    /// All records of a level sorted by name. Memoized per level.
    pub fn get_all_sorted(&self, level: Level) -> Vec<&Region> {
        let Some((records, _)) = self.level_data(level) else {
            return Vec::new();
        };
        let key = SortedKey {
            level: level.depth(),
            query: None,
        };
        let positions = self.sorted.get_or_insert_with(&key, || {
            let mut all: Vec<usize> = (0..records.len()).collect();
            all.sort_by(|&a, &b| compare_names(&records[a].name, &records[b].name));
            all
        });
        positions.into_iter().filter_map(|p| records.get(p)).collect()
    }

    /// [`NameSearch::search_by_name`] followed by a sort by name. Memoized
    /// per `(level, normalized query)`.
    pub fn search_sorted(&self, level: Level, query: &str) -> Vec<&Region> {
        let Some((records, _)) = self.level_data(level) else {
            return Vec::new();
        };
        let q = normalize(query);
        let key = SortedKey {
            level: level.depth(),
            query: Some(&q),
        };
        let positions = self.sorted.get_or_insert_with(&key, || {
            let mut found = self.search_positions(level, &q);
            found.sort_by(|&a, &b| compare_names(&records[a].name, &records[b].name));
            found
        });
        positions.into_iter().filter_map(|p| records.get(p)).collect()
    }
}
