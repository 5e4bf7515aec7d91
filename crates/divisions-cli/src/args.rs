use clap::{Parser, Subcommand, ValueEnum};
use divisions_core::SortBy;
use std::path::PathBuf;

/// CLI arguments for divisions
#[derive(Debug, Parser)]
#[command(
    name = "divisions",
    version,
    about = "CLI for querying and inspecting an administrative hierarchy"
)]
pub struct CliArgs {
    /// Dataset to load: .json, .json.gz, .bin or .bin.gz (default: bundled data)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// TOML config file (default: divisions.toml in the working directory, if present)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show record counts per level
    Stats,

    /// List the levels of the hierarchy, root first
    Levels,

    /// List every record of a level
    List {
        /// Level name (e.g. province)
        level: String,
        /// Sort by name instead of source order
        #[arg(long)]
        sorted: bool,
    },

    /// Lookup a record by id, with its ancestors
    Get { level: String, id: String },

    /// List the direct children of a record
    Children { level: String, id: String },

    /// Token/prefix search by name (accent-insensitive)
    Search { level: String, query: String },

    /// Ranked fuzzy search across all levels
    Fuzzy {
        query: String,
        /// Only search this level
        #[arg(short, long)]
        level: Option<String>,
        /// Only keep results below a record, as LEVEL:ID (e.g. province:01)
        #[arg(short, long)]
        within: Option<String>,
        #[arg(short, long, value_enum, default_value_t = SortArg::Score)]
        sort: SortArg,
        /// Minimum score (overrides the config file)
        #[arg(short, long)]
        threshold: Option<f64>,
        /// Maximum number of results (overrides the config file)
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Names at a level that look like the given one
    Similar {
        level: String,
        name: String,
        #[arg(short, long, default_value_t = 0.8)]
        threshold: f64,
    },

    /// "Did you mean" suggestions for a query
    Suggest {
        query: String,
        #[arg(short, long)]
        level: Option<String>,
    },

    /// Check ids and parent references
    Validate,

    /// Write a binary snapshot of the loaded dataset (.bin or .bin.gz).
    /// Defaults to the input path with the snapshot suffix appended.
    Snapshot { output: Option<PathBuf> },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Score,
    Name,
    Relevance,
}

impl From<SortArg> for SortBy {
    fn from(value: SortArg) -> SortBy {
        match value {
            SortArg::Score => SortBy::Score,
            SortArg::Name => SortBy::Name,
            SortArg::Relevance => SortBy::Relevance,
        }
    }
}
