// crates/divisions-core/src/model/mod.rs
pub mod dataset;
pub mod region;
pub mod schema;

pub use dataset::Dataset;
pub use region::Region;
pub use schema::{Level, LevelSpec, Schema};

#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = ".bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = ".bin.gz";
