// crates/divisions-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (I/O, decompression) and delegates to the
//! payload parsers: source JSON through [`DatasetRaw`], binary snapshots
//! through bincode.

pub mod common_io;

use crate::error::{DivisionError, Result};
use crate::model::{Dataset, CACHE_SUFFIX};
use crate::raw::DatasetRaw;
use bincode::Options;
use common_io::SourceFormat;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The sample hierarchy compiled into the crate (Vietnam: province → district → ward).
pub const EMBEDDED_JSON: &str = include_str!("../../data/divisions.json");

/// Upper bound for binary snapshots, to refuse garbage input early.
const SNAPSHOT_LIMIT: u64 = 256 * 1024 * 1024;

/// Where a [`Registry`](crate::Registry) gets its data from on first access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// The dataset bundled with the crate.
    Embedded,
    /// A `.json`, `.json.gz`, `.bin` or `.bin.gz` file.
    Path(PathBuf),
}

impl DatasetSource {
    pub fn load(&self) -> Result<Dataset> {
        let started = Instant::now();
        let dataset = match self {
            DatasetSource::Embedded => Dataset::embedded()?,
            DatasetSource::Path(path) => Dataset::load_from_path(path)?,
        };
        log::info!(
            "loaded dataset from {self}: {} records in {} levels ({:.2?})",
            dataset.stats().total(),
            dataset.schema().len(),
            started.elapsed()
        );
        Ok(dataset)
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetSource::Embedded => f.write_str("<embedded>"),
            DatasetSource::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

fn snapshot_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(SNAPSHOT_LIMIT)
        .allow_trailing_bytes()
}

impl Dataset {
    /// Parse the dataset compiled into the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: DatasetRaw = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        let raw: DatasetRaw = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    /// Reconstructs a dataset from a bincode snapshot produced by [`Dataset::to_bytes`].
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(snapshot_options().deserialize(data)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(snapshot_options().serialize(self)?)
    }

    /// **Standard Loader:** format and compression follow the file name
    /// (see [`common_io::detect`]).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (format, compression) = common_io::detect(path);
        let mut reader = common_io::open_stream(path, compression)?;

        match format {
            SourceFormat::Json => Self::from_json_reader(reader),
            SourceFormat::Binary => {
                let mut data = Vec::new();
                reader.read_to_end(&mut data)?;
                Self::from_bytes(&data)
            }
        }
    }

    /// Write a binary snapshot. Gzipped when the path ends in `.gz`.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let (format, compression) = common_io::detect(path);
        if format == SourceFormat::Json {
            return Err(DivisionError::InvalidData(format!(
                "snapshots are binary; refusing to write {}",
                path.display()
            )));
        }
        let mut writer = common_io::create_stream(path, compression)?;
        snapshot_options().serialize_into(&mut writer, self)?;
        writer.finish()
    }

    /// Default snapshot path next to a source file: `x.json` -> `x.json.bin.gz`
    /// (or `.bin` without the `compact` feature).
    pub fn cache_path_for(source: &Path) -> PathBuf {
        let filename = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "divisions".to_owned());
        source.with_file_name(format!("{filename}{CACHE_SUFFIX}"))
    }
}
