//! Input readers for bundleburst.
//!
//! Turns build artifacts into the flat records the tree builder consumes:
//!
//! - **Stats JSON**: a single build or an array of builds, with modules
//!   listed per chunk
//! - **Rows**: plain `path,size` text, one module per line
//!
//! # Example
//!
//! ```rust,no_run
//! use bundleburst_core::PathTreeBuilder;
//! use bundleburst_ingest::{read_stats, select_build};
//!
//! let builds = read_stats("stats.json").unwrap();
//! let build = select_build(&builds, builds.len()).unwrap();
//! let tree = PathTreeBuilder::new().build(build.records());
//!
//! println!("{} modules, {} bytes", tree.total_modules(), tree.total_size());
//! ```

mod error;
mod rows;
mod stats;

pub use error::{IngestError, Result};
pub use rows::parse_rows;
pub use stats::{Asset, BuildStats, Chunk, Module, parse_stats, read_stats, select_build};

// Re-export core types for convenience
pub use bundleburst_core::{RawRecord, RawSize};
