//! divisions-cli
//! =============
//!
//! Command-line interface for the `divisions-core` administrative hierarchy.
//!
//! This crate primarily provides a binary (`divisions`). The small library
//! target only exists so docs.rs renders this overview.
//!
//! Basic usage
//! -----------
//!
//! ```text
//! divisions --help
//! divisions stats
//! divisions children province 01
//! divisions fuzzy "ha noi" --sort relevance
//! divisions suggest "hanoi" --level province
//! ```
//!
//! Configuration
//! -------------
//!
//! An optional `divisions.toml` (or `--config <file>`) may set:
//!
//! ```toml
//! [data]
//! input = "data/divisions.json.gz"
//!
//! [fuzzy]
//! threshold = 0.4
//! max_results = 20
//!
//! [log]
//! default = "info"
//! divisions_core = "debug"
//! ```
//!
//! Every key can be overridden with `DIVISIONS_<SECTION>__<KEY>`, e.g.
//! `DIVISIONS_FUZZY__THRESHOLD=0.5`. `RUST_LOG` overrides the `[log]` table.
//!
//! For programmatic access use the `divisions-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
