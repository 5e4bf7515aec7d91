//! Basic usage example for divisions-rs
//!
//! This example demonstrates how to:
//! - Load the bundled hierarchy lazily
//! - Look up records and walk parents and children
//! - Search by name, with and without tone marks
//! - Rank fuzzy matches and ask for corrections

use divisions_core::prelude::*;
use divisions_core::{RegionRef, SortBy};

fn main() -> Result<()> {
    println!("=== Divisions-RS Basic Usage Example ===\n");

    // Load the dataset now so errors surface here instead of as empty results
    println!("Loading dataset...");
    let db = Registry::global();
    db.try_load()?;
    println!("✓ Dataset loaded ({} records)\n", db.stats().total());

    let province = db.schema().require_level("province")?;
    let district = db.schema().require_level("district")?;
    let ward = db.schema().require_level("ward")?;

    // Example 1: List provinces
    println!("--- Example 1: List provinces ---");
    let provinces = db.get_all_sorted(province);
    for (i, p) in provinces.iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, p.name(), p.id());
    }
    println!("... and {} more\n", provinces.len().saturating_sub(5));

    // Example 2: Lookup by id, then go down one level
    println!("--- Example 2: Districts of a province ---");
    if let Some(hanoi) = db.get_by_id(province, "01") {
        let districts = db.get_children(province, hanoi.id());
        println!("Districts in {}: {}", hanoi.name(), districts.len());
        for d in districts {
            println!("- {} ({})", d.name(), d.id());
        }
    }
    println!();

    // Example 3: Walk up from a ward
    println!("--- Example 3: Ancestors of a ward ---");
    if let Some(w) = db.get_by_id(ward, "00006") {
        let path: Vec<&str> = db
            .ancestors(ward, w.id())
            .into_iter()
            .map(|(_, r)| r.name())
            .chain(std::iter::once(w.name()))
            .collect();
        println!("{}", path.join(" › "));
    }
    println!();

    // Example 4: Accent-insensitive name search
    println!("--- Example 4: Search without tone marks ---");
    for r in db.search_sorted(district, "thanh pho") {
        println!("- {}", r.name());
    }
    println!();

    // Example 5: Fuzzy search restricted to one province
    println!("--- Example 5: Fuzzy search within Hà Nội ---");
    let mut opts = UniversalOptions {
        sort_by: SortBy::Relevance,
        ..Default::default()
    };
    opts.filters.within = Some(RegionRef {
        level: province,
        id: "01".into(),
    });
    for hit in db.universal_fuzzy_search("phuc xa", &opts).combined.iter().take(5) {
        println!("{:.3}  {}", hit.score, hit.item.name());
    }
    println!();

    // Example 6: Did you mean?
    println!("--- Example 6: Suggestions for a typo ---");
    for s in db.suggest_corrections("Da Nang", Some(province)).iter().take(3) {
        println!("{} ({}, {:.0}%)", s.suggestion, s.level_name, s.confidence * 100.0);
    }

    // Example 7: Integrity check
    println!("\n--- Example 7: Validation ---");
    let report = db.validate();
    println!("Issues found: {}", report.len());

    println!("\n=== Example completed successfully ===");
    Ok(())
}
