//! divisions: command-line interface for divisions-core
//!
//! Inspect and query an administrative hierarchy from your terminal:
//! record counts, id lookups, children, name search, fuzzy search with
//! filters, "did you mean" suggestions and data validation.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ divisions stats
//!
//! - Lookup a ward and its ancestors
//!   $ divisions get ward 00006
//!
//! - Fuzzy search wards of Hà Nội, best first
//!   $ divisions fuzzy "phuc xa" --within province:01 --level ward
//!
//! - Same, as JSON
//!   $ divisions --json fuzzy "phuc xa"
//!
//! Data source
//! -----------
//!
//! By default the dataset bundled with `divisions-core` is used. Point
//! `--input` (or `[data] input` in `divisions.toml`) at a `.json`/`.json.gz`
//! source or at a `.bin`/`.bin.gz` snapshot written by `divisions snapshot`.
mod args;
mod config;

use crate::args::{CliArgs, Commands};
use crate::config::DConfig;
use anyhow::{anyhow, Context};
use clap::Parser;
use divisions_core::prelude::*;
use divisions_core::{Dataset, DatasetSource, RegionRef};
use serde::Serialize;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let config = DConfig::load(args.config.as_deref())?;
    config.init_logger();

    // --input beats the config file; neither means the bundled data
    let source = match args.input.clone().or_else(|| config.data.input.clone()) {
        Some(path) => DatasetSource::Path(path),
        None => DatasetSource::Embedded,
    };
    log::debug!("using dataset {source}");

    let registry = Registry::new(source);
    registry.try_load().context("failed to load dataset")?;

    run(&registry, &config, args)
}

fn run(db: &Registry, config: &DConfig, args: CliArgs) -> anyhow::Result<()> {
    let json = args.json;

    match args.command {
        Commands::Stats => {
            let stats = db.stats();
            if json {
                return print_json(&stats);
            }
            println!("Database statistics:");
            for (name, count) in &stats.levels {
                println!("  {name}: {count}");
            }
            println!("  Total: {}", stats.total());
        }

        Commands::Levels => {
            let names: Vec<&str> = db.levels().into_iter().map(|l| db.schema().name_of(l)).collect();
            if json {
                return print_json(&names);
            }
            for (depth, name) in names.iter().enumerate() {
                println!("{depth}. {name}");
            }
        }

        Commands::List { level, sorted } => {
            let level = resolve_level(db, &level)?;
            let records: Vec<&Region> = if sorted {
                db.get_all_sorted(level)
            } else {
                db.get_all(level).iter().collect()
            };
            if json {
                return print_json(&records);
            }
            for r in records {
                print_region(r);
            }
        }

        Commands::Get { level, id } => {
            let level = resolve_level(db, &level)?;
            let region = db
                .get_by_id(level, &id)
                .ok_or_else(|| anyhow!("no {} with id {id}", db.schema().name_of(level)))?;
            let ancestors: Vec<&Region> = db.ancestors(level, &id).into_iter().map(|(_, r)| r).collect();
            if json {
                #[derive(Serialize)]
                struct Out<'a> {
                    region: &'a Region,
                    ancestors: Vec<&'a Region>,
                    children: usize,
                }
                return print_json(&Out {
                    region,
                    ancestors,
                    children: db.get_children(level, &id).len(),
                });
            }
            println!("{}: {}", db.schema().name_of(level), region.name);
            println!("Id: {}", region.id);
            for (l, a) in db.ancestors(level, &id) {
                println!("{}: {} ({})", db.schema().name_of(l), a.name, a.id);
            }
            println!("Children: {}", db.get_children(level, &id).len());
        }

        Commands::Children { level, id } => {
            let level = resolve_level(db, &level)?;
            let children = db.get_children(level, &id);
            if json {
                return print_json(&children);
            }
            if children.is_empty() {
                println!("No children found for: {id}");
            }
            for r in children {
                print_region(r);
            }
        }

        Commands::Search { level, query } => {
            let level = resolve_level(db, &level)?;
            let matches = db.search_sorted(level, &query);
            if json {
                return print_json(&matches);
            }
            if matches.is_empty() {
                println!("No records found matching: {query}");
            }
            for r in matches {
                print_region(r);
            }
        }

        Commands::Fuzzy {
            query,
            level,
            within,
            sort,
            threshold,
            max,
        } => {
            let mut opts = UniversalOptions {
                fuzzy: config.fuzzy.clone(),
                sort_by: sort.into(),
                ..Default::default()
            };
            if let Some(t) = threshold {
                opts.fuzzy = opts.fuzzy.with_threshold(t);
            }
            if let Some(m) = max {
                opts.fuzzy = opts.fuzzy.with_max_results(m);
            }
            opts.filters.level = level.as_deref().map(|l| resolve_level(db, l)).transpose()?;
            opts.filters.within = within.as_deref().map(|w| parse_within(db, w)).transpose()?;

            let results = db.universal_fuzzy_search(&query, &opts);
            if json {
                return print_json(&results);
            }
            if results.combined.is_empty() {
                println!("No matches for: {query}");
            }
            for hit in &results.combined {
                println!(
                    "{:.3}  {:<8} {} ({})",
                    hit.score,
                    db.schema().name_of(hit.level),
                    hit.item.name,
                    hit.item.id
                );
            }
        }

        Commands::Similar {
            level,
            name,
            threshold,
        } => {
            let level = resolve_level(db, &level)?;
            let similar = db.find_similar_names(&name, level, threshold);
            if json {
                return print_json(&similar);
            }
            for s in similar {
                println!("{:.3}  {} ({})", s.similarity, s.item.name, s.item.id);
            }
        }

        Commands::Suggest { query, level } => {
            let level = level.as_deref().map(|l| resolve_level(db, l)).transpose()?;
            let suggestions = db.suggest_corrections(&query, level);
            if json {
                return print_json(&suggestions);
            }
            if suggestions.is_empty() {
                println!("No suggestions for: {query}");
            }
            for s in suggestions {
                println!("Did you mean {} ({}, {:.0}%)?", s.suggestion, s.level_name, s.confidence * 100.0);
            }
        }

        Commands::Validate => {
            let report = db.validate();
            if json {
                print_json(&report)?;
            } else if report.is_ok() {
                println!("No issues found.");
            } else {
                for issue in &report.issues {
                    println!("- {issue}");
                }
            }
            if !report.is_ok() {
                anyhow::bail!("{} validation issue(s)", report.len());
            }
        }

        Commands::Snapshot { output } => {
            let output = output.unwrap_or_else(|| {
                let source = args
                    .input
                    .clone()
                    .or_else(|| config.data.input.clone())
                    .unwrap_or_else(|| PathBuf::from("divisions.json"));
                Dataset::cache_path_for(&source)
            });
            db.dataset()
                .save_as(&output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("Wrote {}", output.display());
        }
    }

    Ok(())
}

fn resolve_level(db: &Registry, name: &str) -> anyhow::Result<Level> {
    let names: Vec<&str> = db.levels().into_iter().map(|l| db.schema().name_of(l)).collect();
    db.schema()
        .require_level(name)
        .with_context(|| format!("expected one of: {}", names.join(", ")))
}

/// `province:01` -> `RegionRef { level: 0, id: "01" }`
fn parse_within(db: &Registry, spec: &str) -> anyhow::Result<RegionRef> {
    let (level, id) = spec
        .split_once(':')
        .ok_or_else(|| anyhow!("--within expects LEVEL:ID, got {spec:?}"))?;
    Ok(RegionRef {
        level: resolve_level(db, level)?,
        id: id.trim().to_owned(),
    })
}

fn print_region(r: &Region) {
    match r.parent_id() {
        Some(p) => println!("{} ({}) <- {p}", r.name, r.id),
        None => println!("{} ({})", r.name, r.id),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
