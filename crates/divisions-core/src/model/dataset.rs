// crates/divisions-core/src/model/dataset.rs
use super::{Level, LevelSpec, Region, Schema};
use crate::common::DbStats;
use crate::error::{DivisionError, Result};
use crate::raw::{value_to_id, DatasetRaw};
use serde::{Deserialize, Serialize};

/// The raw hierarchy as flat, ordered collections: one `Vec<Region>` per level.
///
/// Record order is the source order and is preserved by every index built
/// on top of it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Dataset {
    schema: Schema,
    levels: Vec<Vec<Region>>,
}

impl Dataset {
    /// Assemble a dataset from already-typed records. `levels` must line up
    /// with the schema.
    pub fn new(schema: Schema, levels: Vec<Vec<Region>>) -> Result<Self> {
        if schema.len() != levels.len() {
            return Err(DivisionError::InvalidData(format!(
                "schema declares {} levels but {} record lists were given",
                schema.len(),
                levels.len()
            )));
        }
        Ok(Self { schema, levels })
    }

    /// **Standard Converter:** Raw JSON -> typed flat collections.
    ///
    /// The parent id of each record is read from the field its level names in
    /// `parent_field`. Records without a usable id are rejected; a missing
    /// parent reference is kept as `None` and reported later by validation.
    pub fn from_raw(raw: DatasetRaw) -> Result<Self> {
        let specs = raw
            .levels
            .iter()
            .map(|l| LevelSpec {
                name: l.name.clone(),
                parent_field: l.parent_field.clone(),
            })
            .collect();
        let schema = Schema::new(specs)?;

        let mut levels = Vec::with_capacity(raw.levels.len());
        for level_raw in raw.levels {
            let mut records = Vec::with_capacity(level_raw.records.len());
            for rec in level_raw.records {
                let id = value_to_id(&rec.id).ok_or_else(|| {
                    DivisionError::InvalidData(format!(
                        "record '{}' in level '{}' has a non-scalar id",
                        rec.name, level_raw.name
                    ))
                })?;
                let parent_id = level_raw
                    .parent_field
                    .as_ref()
                    .and_then(|field| rec.fields.get(field))
                    .and_then(value_to_id);

                records.push(Region {
                    id,
                    name: rec.name,
                    parent_id,
                });
            }
            levels.push(records);
        }

        Ok(Self { schema, levels })
    }

    /// A dataset with no levels; what a registry falls back to when its
    /// source cannot be read.
    pub(crate) fn empty() -> Self {
        Self {
            schema: Schema::empty(),
            levels: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Records of one level in source order; empty for out-of-range levels.
    pub fn records(&self, level: Level) -> &[Region] {
        self.levels
            .get(level.depth())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn stats(&self) -> DbStats {
        DbStats {
            levels: self
                .schema
                .levels()
                .map(|l| (self.schema.name_of(l).to_owned(), self.records(l).len()))
                .collect(),
        }
    }
}
