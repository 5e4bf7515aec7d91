use divisions_core::prelude::*;
use divisions_core::text::{compare_names, normalize};
use divisions_core::{fuzzy_match, Dataset, DatasetSource, LoadState, MatchKind};
use std::cmp::Ordering;

const PROVINCE: Level = Level::ROOT;
const DISTRICT: Level = Level::at(1);
const WARD: Level = Level::at(2);

fn ids<'a>(regions: impl IntoIterator<Item = &'a Region>) -> Vec<&'a str> {
    regions.into_iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn levels_resolve_by_name() {
    let r = Registry::embedded();
    assert_eq!(r.level("province"), Some(PROVINCE));
    assert_eq!(r.level("District"), Some(DISTRICT));
    assert_eq!(r.level("ward"), Some(WARD));
    assert_eq!(r.level("commune"), None);
    assert!(r.schema().require_level("commune").is_err());
}

#[test]
fn every_record_is_reachable_by_id() {
    let r = Registry::embedded();
    for level in r.levels() {
        for rec in r.get_all(level) {
            assert_eq!(r.get_by_id(level, &rec.id), Some(rec));
        }
    }
}

#[test]
fn ids_are_trimmed_and_unknown_ids_are_absent() {
    let r = Registry::embedded();
    assert_eq!(r.get_by_id(PROVINCE, " 01 ").map(|p| p.id.as_str()), Some("01"));
    assert!(r.get_by_id(PROVINCE, "999").is_none());
    assert!(r.get_by_id(PROVINCE, "").is_none());
    assert!(r.get_by_id(Level::at(7), "01").is_none());
    assert!(r.is_valid_id(WARD, "00006"));
    assert!(!r.is_valid_id(WARD, "01"));
}

#[test]
fn unknown_parent_has_no_children() {
    let r = Registry::embedded();
    assert!(r.get_children(PROVINCE, "999").is_empty());
    assert!(r.get_children(WARD, "00001").is_empty());
}

#[test]
fn deepest_representable_level_has_no_children() {
    let r = Registry::embedded();
    let last = Level::at(usize::MAX);
    assert_eq!(last.child(), None);
    assert!(r.get_children(last, "x").is_empty());
    assert!(r.get_descendants(last, "x", last).is_empty());
    assert!(r.get_all(last).is_empty());
}

#[test]
fn children_come_back_in_source_order() {
    let r = Registry::embedded();
    assert_eq!(
        ids(r.get_children(PROVINCE, "01")),
        ["001", "002", "003", "004", "005", "006", "016"]
    );
    assert_eq!(
        ids(r.get_children(DISTRICT, "001")),
        ["00001", "00004", "00006", "00007", "00008"]
    );
}

#[test]
fn children_point_back_at_their_parent() {
    let r = Registry::embedded();
    for level in [PROVINCE, DISTRICT] {
        let child_level = level.child().unwrap();
        for parent in r.get_all(level) {
            for child in r.get_children(level, &parent.id) {
                assert_eq!(child.parent_id.as_deref(), Some(parent.id.as_str()));
                assert_eq!(r.get_parent(child_level, child), Some(parent));
            }
        }
    }
}

#[test]
fn every_record_is_found_by_its_own_name_and_parent() {
    let r = Registry::embedded();
    let opts = FuzzyOptions::default();
    for level in r.levels() {
        for rec in r.get_all(level) {
            let found = r.search_by_name(level, &normalize(&rec.name));
            assert!(found.contains(&rec), "{} not found by its name", rec.id);

            let s = fuzzy_match(&rec.name, &rec.name, &opts).unwrap();
            assert_eq!(s.kind, MatchKind::Exact);
            assert!(s.score >= 1.0);

            if let Some(parent_level) = level.parent() {
                let parent_id = rec.parent_id.as_deref().unwrap();
                let siblings = r.get_children(parent_level, parent_id);
                assert!(siblings.contains(&rec), "{} missing under {parent_id}", rec.id);
            }
        }
    }
}

#[test]
fn ancestors_are_listed_root_first() {
    let r = Registry::embedded();
    let chain: Vec<_> = r
        .ancestors(WARD, "00006")
        .into_iter()
        .map(|(level, rec)| (level, rec.id.as_str()))
        .collect();
    assert_eq!(chain, [(PROVINCE, "01"), (DISTRICT, "001")]);
    assert!(r.ancestors(PROVINCE, "01").is_empty());
}

#[test]
fn descendants_skip_levels() {
    let r = Registry::embedded();
    let wards = r.get_descendants(PROVINCE, "01", WARD);
    assert_eq!(wards.len(), 13);
    for w in wards {
        assert_eq!(r.ancestors(WARD, &w.id)[0].1.id, "01");
    }
    assert!(r.get_descendants(WARD, "00006", PROVINCE).is_empty());
    assert!(r.get_descendants(PROVINCE, "999", WARD).is_empty());
}

#[test]
fn search_ignores_tone_marks() {
    let r = Registry::embedded();
    let hits = ids(r.search_by_name(PROVINCE, "Ha Noi"));
    assert!(hits.contains(&"01"));

    assert_eq!(ids(r.search_by_name(PROVINCE, "VINH PHUC")), ["26"]);

    // "phuc" alone is a word key of Phúc Xá, and it sits inside the query
    let wards = ids(r.search_by_name(WARD, "vĩnh phúc"));
    assert!(wards.contains(&"00006"));
    assert!(wards.contains(&"00001"));
}

#[test]
fn search_matches_queries_longer_than_the_name() {
    let r = Registry::embedded();
    let hits = ids(r.search_by_name(DISTRICT, "quan ba dinh ha noi"));
    assert!(hits.contains(&"001"));
}

#[test]
fn blank_queries_match_nothing() {
    let r = Registry::embedded();
    assert!(r.search_by_name(PROVINCE, "").is_empty());
    assert!(r.search_by_name(PROVINCE, "   ").is_empty());
    assert!(r.find_by_name(PROVINCE, "").is_empty());
}

#[test]
fn find_by_name_is_exact_after_folding() {
    let r = Registry::embedded();
    assert_eq!(ids(r.find_by_name(PROVINCE, "thanh pho ha noi")), ["01"]);
    assert_eq!(ids(r.find_by_name(WARD, "PHƯỜNG VĨNH PHÚC")), ["00006"]);
    assert!(r.find_by_name(PROVINCE, "vinh phuc").is_empty());
}

#[test]
fn sorted_views_are_ordered_and_stable() {
    let r = Registry::embedded();
    let all = r.get_all_sorted(PROVINCE);
    assert_eq!(all.len(), r.get_all(PROVINCE).len());
    assert_eq!(all[0].id, "92");
    for pair in all.windows(2) {
        assert_ne!(compare_names(&pair[0].name, &pair[1].name), Ordering::Greater);
    }
    assert_eq!(r.get_all_sorted(PROVINCE), all);

    let found = r.search_sorted(DISTRICT, "thanh pho");
    assert!(!found.is_empty());
    for pair in found.windows(2) {
        assert!(normalize(&pair[0].name) <= normalize(&pair[1].name));
    }
    assert_eq!(r.search_sorted(DISTRICT, "Thành phố"), found);
}

#[test]
fn lookups_only_index_the_levels_they_touch() {
    let r = Registry::embedded();
    r.get_by_id(WARD, "00006");
    assert_eq!(r.load_state(WARD), LoadState::Loaded);
    assert_eq!(r.load_state(PROVINCE), LoadState::Unloaded);

    // children of a district live in the ward index
    r.get_children(DISTRICT, "001");
    assert_eq!(r.load_state(DISTRICT), LoadState::Unloaded);
    assert_eq!(r.index_builds(), 1);
}

#[test]
fn global_registry_is_shared() {
    let a = Registry::global();
    let b = Registry::global();
    assert!(std::ptr::eq(a, b));
    assert_eq!(a.stats().total(), 15 + 28 + 30);
}

#[test]
fn snapshot_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("divisions-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("divisions.bin");

    let ds = Dataset::embedded().unwrap();
    ds.save_as(&path).unwrap();

    let r = Registry::new(DatasetSource::Path(path.clone()));
    assert_eq!(r.try_load().unwrap().stats(), ds.stats());
    assert_eq!(ids(r.get_children(PROVINCE, "01")).len(), 7);

    assert!(ds.save_as(dir.join("divisions.json")).is_err());
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn json_file_source_loads_lazily() {
    let dir = std::env::temp_dir().join(format!("divisions-json-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("divisions.json");
    std::fs::write(&path, divisions_core::loader::EMBEDDED_JSON).unwrap();

    let r = Registry::new(DatasetSource::Path(path));
    assert_eq!(r.index_builds(), 0);
    assert_eq!(
        r.get_by_id(WARD, "00006").map(|w| w.name.as_str()),
        Some("Phường Vĩnh Phúc")
    );
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn in_memory_dataset_with_duplicate_ids() {
    use divisions_core::{Issue, LevelSpec, Schema};

    let schema = Schema::new(vec![
        LevelSpec {
            name: "region".into(),
            parent_field: None,
        },
        LevelSpec {
            name: "town".into(),
            parent_field: Some("region_id".into()),
        },
    ])
    .unwrap();
    let ds = Dataset::new(
        schema,
        vec![
            vec![Region::new("1", "North"), Region::new("1", "Nord")],
            vec![Region::new("10", "Harbor").with_parent("1")],
        ],
    )
    .unwrap();

    let r = Registry::from_dataset(ds);
    // last write wins
    assert_eq!(r.get_by_id(PROVINCE, "1").map(|x| x.name.as_str()), Some("Nord"));
    assert_eq!(r.get_all(PROVINCE).len(), 2);
    assert_eq!(ids(r.get_children(PROVINCE, "1")), ["10"]);
    assert_eq!(
        r.validate().issues,
        [Issue::DuplicateId {
            level: PROVINCE,
            id: "1".into()
        }]
    );
}
