// crates/divisions-core/src/model/schema.rs
use crate::error::{DivisionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed handle to one tier of the hierarchy, counted from the root.
///
/// `Level::ROOT` is the coarsest tier (provinces in the bundled dataset).
/// A `Level` past the end of a schema is not an error anywhere in the
/// crate: it simply has no records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Level(usize);

impl Level {
    pub const ROOT: Level = Level(0);

    pub const fn at(depth: usize) -> Self {
        Level(depth)
    }

    pub const fn depth(self) -> usize {
        self.0
    }

    /// The next finer level, `None` past the last representable depth.
    pub fn child(self) -> Option<Level> {
        self.0.checked_add(1).map(Level)
    }

    /// The next coarser level, `None` at the root.
    pub fn parent(self) -> Option<Level> {
        self.0.checked_sub(1).map(Level)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {}", self.0)
    }
}

/// Describes one tier: its display name and which raw field points at the parent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub name: String,
    pub parent_field: Option<String>,
}

/// Ordered list of levels, root first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    levels: Vec<LevelSpec>,
}

impl Schema {
    /// Validates the shape of the hierarchy: at least two levels, only the
    /// root without a parent field.
    pub fn new(levels: Vec<LevelSpec>) -> Result<Self> {
        if levels.len() < 2 {
            return Err(DivisionError::InvalidData(format!(
                "a hierarchy needs at least 2 levels, got {}",
                levels.len()
            )));
        }
        for (depth, spec) in levels.iter().enumerate() {
            match (depth, &spec.parent_field) {
                (0, Some(field)) => {
                    return Err(DivisionError::InvalidData(format!(
                        "root level '{}' must not declare a parent field (found '{field}')",
                        spec.name
                    )))
                }
                (d, None) if d > 0 => {
                    return Err(DivisionError::InvalidData(format!(
                        "level '{}' is missing its parent field",
                        spec.name
                    )))
                }
                _ => {}
            }
        }
        Ok(Self { levels })
    }

    pub(crate) fn empty() -> Self {
        Self { levels: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        (0..self.levels.len()).map(Level::at)
    }

    pub fn spec(&self, level: Level) -> Option<&LevelSpec> {
        self.levels.get(level.depth())
    }

    /// Display name of a level, `""` when out of range.
    pub fn name_of(&self, level: Level) -> &str {
        self.spec(level).map(|s| s.name.as_str()).unwrap_or("")
    }

    /// Resolve a level by name, case-insensitive.
    pub fn level(&self, name: &str) -> Option<Level> {
        let name = name.trim();
        self.levels
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
            .map(Level::at)
    }

    /// Like [`Schema::level`] but returns an error naming the unknown level.
    pub fn require_level(&self, name: &str) -> Result<Level> {
        self.level(name)
            .ok_or_else(|| DivisionError::UnknownLevel(name.to_owned()))
    }
}
