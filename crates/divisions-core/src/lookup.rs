// crates/divisions-core/src/lookup.rs
use crate::model::{Level, Region};
use crate::registry::Registry;
use crate::traits::HierarchyLookup;

impl HierarchyLookup for Registry {
    fn get_all(&self, level: Level) -> &[Region] {
        self.level_data(level)
            .map(|(records, _)| records)
            .unwrap_or(&[])
    }

    fn get_by_id(&self, level: Level, id: &str) -> Option<&Region> {
        let (records, index) = self.level_data(level)?;
        let pos = *index.by_id.get(id.trim())?;
        records.get(pos)
    }

    fn get_children(&self, level: Level, parent_id: &str) -> Vec<&Region> {
        let Some((records, index)) = level.child().and_then(|l| self.level_data(l)) else {
            return Vec::new();
        };
        index
            .by_parent
            .get(parent_id.trim())
            .map(|positions| positions.iter().filter_map(|&p| records.get(p)).collect())
            .unwrap_or_default()
    }
}
