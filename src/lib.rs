//! Umbrella crate for the workspace; hosts the demos.
//!
//! Everything lives in [`divisions_core`], re-exported here.
pub use divisions_core::*;
