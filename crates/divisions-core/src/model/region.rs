// crates/divisions-core/src/model/region.rs
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};

/// A single record at some level of the hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    /// Id of the parent record one level up. `None` only at the root level.
    pub parent_id: Option<String>,
}

impl Region {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
        }
    }

    /// Builder-style helper used mostly by tests and in-memory datasets.
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }
}

impl NameMatch for Region {
    fn display_name(&self) -> &str {
        &self.name
    }
}
