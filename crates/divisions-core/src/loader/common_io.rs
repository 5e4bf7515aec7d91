// crates/divisions-core/src/loader/common_io.rs
use crate::error::{DivisionError, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Gzip,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Binary,
}

/// Infer `(format, compression)` from a file name:
/// `x.json`, `x.json.gz`, `x.bin`, `x.bin.gz`. Anything not ending in
/// `.json` (after an optional `.gz`) is treated as a binary snapshot.
pub fn detect(path: &Path) -> (SourceFormat, CompressionMode) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let (stem, compression) = match name.strip_suffix(".gz") {
        Some(stem) => (stem.to_owned(), CompressionMode::Gzip),
        None => (name, CompressionMode::None),
    };
    let format = if stem.ends_with(".json") {
        SourceFormat::Json
    } else {
        SourceFormat::Binary
    };
    (format, compression)
}

/// Opens a file, buffers it, and wraps it in a Gzip decoder when asked to.
/// Returns a generic reader so the caller doesn't care about the compression.
pub fn open_stream(path: &Path, compression: CompressionMode) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        DivisionError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    match compression {
        CompressionMode::None => Ok(Box::new(reader)),
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                Ok(Box::new(GzDecoder::new(reader)))
            }
            #[cfg(not(feature = "compact"))]
            {
                Err(DivisionError::InvalidData(
                    "Gzip input but 'compact' disabled".into(),
                ))
            }
        }
    }
}

/// Buffered file writer, gzipping when the target asked for it.
/// Must be closed with [`StreamWriter::finish`] or the gzip trailer is lost.
pub enum StreamWriter {
    Plain(BufWriter<File>),
    #[cfg(feature = "compact")]
    Gzip(GzEncoder<BufWriter<File>>),
}

impl StreamWriter {
    /// Write the gzip trailer (if any) and flush everything to the file.
    pub fn finish(self) -> Result<()> {
        let mut inner = match self {
            StreamWriter::Plain(w) => w,
            #[cfg(feature = "compact")]
            StreamWriter::Gzip(enc) => enc.finish()?,
        };
        inner.flush()?;
        Ok(())
    }
}

impl Write for StreamWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            StreamWriter::Plain(w) => w.write(buf),
            #[cfg(feature = "compact")]
            StreamWriter::Gzip(enc) => enc.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            StreamWriter::Plain(w) => w.flush(),
            #[cfg(feature = "compact")]
            StreamWriter::Gzip(enc) => enc.flush(),
        }
    }
}

/// Creates a file and returns a (possibly gzipping) writer over it.
pub fn create_stream(path: &Path, compression: CompressionMode) -> Result<StreamWriter> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    match compression {
        CompressionMode::None => Ok(StreamWriter::Plain(writer)),
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                Ok(StreamWriter::Gzip(GzEncoder::new(writer, Compression::default())))
            }
            #[cfg(not(feature = "compact"))]
            {
                Err(DivisionError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ))
            }
        }
    }
}
