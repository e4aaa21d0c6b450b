//! Core types for bundleburst.
//!
//! This crate provides the data model shared by the layout and hover crates:
//! raw `(path, size)` records, the nested module tree and the builder that
//! turns the former into the latter.
//!
//! ```rust
//! use bundleburst_core::PathTreeBuilder;
//!
//! let tree = PathTreeBuilder::new().build([("src/index.js", 1200u64), ("src/util.js", 300u64)]);
//! assert_eq!(tree.total_size(), 1500.0);
//! ```

mod builder;
mod config;
mod error;
mod node;
mod record;
mod tree;

pub use builder::PathTreeBuilder;
pub use config::{BuildConfig, BuildConfigBuilder, BuildConfigBuilderError};
pub use error::{SkippedRecord, WarningKind};
pub use node::{NodeId, NodeKind, TreeNode};
pub use record::{RawRecord, RawSize};
pub use tree::{ModuleTree, TreeStats};
