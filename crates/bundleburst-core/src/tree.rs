//! Module tree container and statistics.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::config::BuildConfig;
use crate::error::SkippedRecord;
use crate::node::TreeNode;

/// Summary statistics for a built tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total size in bytes of all accepted modules.
    pub total_size: f64,
    /// Total number of module leaves.
    pub total_modules: u64,
    /// Total number of directories, excluding the synthetic root.
    pub total_dirs: u64,
    /// Maximum depth reached (root children are depth 1).
    pub max_depth: u32,
    /// Largest module (path, size).
    pub largest_module: Option<(CompactString, f64)>,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with a module entry.
    pub fn record_module(&mut self, path: &str, size: f64, depth: u32) {
        self.total_modules += 1;
        self.total_size += size;
        self.max_depth = self.max_depth.max(depth);

        if self.largest_module.as_ref().is_none_or(|(_, s)| size > *s) {
            self.largest_module = Some((path.into(), size));
        }
    }

    /// Record a newly created directory.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// A tree built from one snapshot of build records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleTree {
    /// Synthetic root node.
    pub root: TreeNode,

    /// Configuration the tree was built with.
    pub config: BuildConfig,

    /// Summary statistics.
    pub stats: TreeStats,

    /// Records that were dropped while building.
    pub warnings: Vec<SkippedRecord>,
}

impl ModuleTree {
    /// Create a new module tree.
    pub fn new(
        root: TreeNode,
        config: BuildConfig,
        stats: TreeStats,
        warnings: Vec<SkippedRecord>,
    ) -> Self {
        Self {
            root,
            config,
            stats,
            warnings,
        }
    }

    /// Get the total size of the tree.
    pub fn total_size(&self) -> f64 {
        self.stats.total_size
    }

    /// Get the total number of modules.
    pub fn total_modules(&self) -> u64 {
        self.stats.total_modules
    }

    /// True when no record made it into the tree.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Check if any record was skipped.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
