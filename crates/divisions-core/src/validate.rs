// crates/divisions-core/src/validate.rs
//! Consistency checks over a loaded dataset.
//!
//! The core never repairs data. These checks only report what a loader
//! would otherwise silently accept: repeated ids, parent references that
//! point nowhere, and records that cannot be searched by name.

use crate::model::{Dataset, Level};
use crate::registry::Registry;
use crate::traits::NameMatch;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// The id appears more than once at the same level.
    DuplicateId { level: Level, id: String },
    /// The parent id does not exist one level up.
    DanglingParent {
        level: Level,
        id: String,
        parent_id: String,
    },
    /// A non-root record carries no parent reference.
    MissingParent { level: Level, id: String },
    /// The name folds to an empty string.
    EmptyName { level: Level, id: String },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::DuplicateId { level, id } => write!(f, "{level}: duplicate id '{id}'"),
            Issue::DanglingParent {
                level,
                id,
                parent_id,
            } => write!(f, "{level}: '{id}' points at unknown parent '{parent_id}'"),
            Issue::MissingParent { level, id } => write!(f, "{level}: '{id}' has no parent"),
            Issue::EmptyName { level, id } => write!(f, "{level}: '{id}' has an empty name"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Run every check over `dataset`, level by level, in source order.
pub fn validate(dataset: &Dataset) -> ValidationReport {
    let mut issues = Vec::new();
    let mut parent_ids: Option<HashSet<&str>> = None;

    for level in dataset.schema().levels() {
        let records = dataset.records(level);
        let mut seen = HashSet::with_capacity(records.len());

        for r in records {
            if !seen.insert(r.id.as_str()) {
                issues.push(Issue::DuplicateId {
                    level,
                    id: r.id.clone(),
                });
            }
            if r.folded_name().is_empty() {
                issues.push(Issue::EmptyName {
                    level,
                    id: r.id.clone(),
                });
            }

            let Some(parents) = &parent_ids else {
                continue;
            };
            match &r.parent_id {
                None => issues.push(Issue::MissingParent {
                    level,
                    id: r.id.clone(),
                }),
                Some(p) if !parents.contains(p.as_str()) => issues.push(Issue::DanglingParent {
                    level,
                    id: r.id.clone(),
                    parent_id: p.clone(),
                }),
                Some(_) => {}
            }
        }

        parent_ids = Some(seen);
    }

    if !issues.is_empty() {
        log::warn!("validation found {} issue(s)", issues.len());
    }
    ValidationReport { issues }
}

impl Registry {
    /// Validate the registry's dataset. Does not build any index.
    pub fn validate(&self) -> ValidationReport {
        validate(self.dataset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LevelSpec, Region, Schema};

    fn schema() -> Schema {
        Schema::new(vec![
            LevelSpec {
                name: "province".into(),
                parent_field: None,
            },
            LevelSpec {
                name: "district".into(),
                parent_field: Some("province_code".into()),
            },
        ])
        .unwrap()
    }

    #[test]
    fn bundled_data_is_consistent() {
        let report = Registry::embedded().validate();
        assert!(report.is_ok(), "{:?}", report.issues);
    }

    #[test]
    fn reports_every_kind_of_issue() {
        let ds = Dataset::new(
            schema(),
            vec![
                vec![Region::new("01", "Hà Nội"), Region::new("01", "Hà Nội 2")],
                vec![
                    Region::new("001", "Ba Đình").with_parent("01"),
                    Region::new("002", "Hoàn Kiếm").with_parent("99"),
                    Region::new("003", "Tây Hồ"),
                    Region::new("004", "  ").with_parent("01"),
                ],
            ],
        )
        .unwrap();

        let district = Level::at(1);
        assert_eq!(
            validate(&ds).issues,
            vec![
                Issue::DuplicateId {
                    level: Level::ROOT,
                    id: "01".into()
                },
                Issue::DanglingParent {
                    level: district,
                    id: "002".into(),
                    parent_id: "99".into()
                },
                Issue::MissingParent {
                    level: district,
                    id: "003".into()
                },
                Issue::EmptyName {
                    level: district,
                    id: "004".into()
                },
            ]
        );
    }
}
