//! Flat records to nested tree.

use tracing::{debug, trace};

use crate::config::BuildConfig;
use crate::error::SkippedRecord;
use crate::node::{NodeId, TreeNode};
use crate::record::{RawRecord, RawSize};
use crate::tree::{ModuleTree, TreeStats};

/// Builds a [`ModuleTree`] from slash-delimited `(path, size)` records.
///
/// Directories are shared between records that walk through them; terminal
/// segments always become a new leaf, so two records with the same path end up
/// as two sibling modules. Children keep the order in which records were seen.
#[derive(Debug, Clone, Default)]
pub struct PathTreeBuilder {
    config: BuildConfig,
}

impl PathTreeBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a custom configuration.
    pub fn with_config(config: BuildConfig) -> Self {
        Self { config }
    }

    /// Configuration used by this builder.
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build a tree from records.
    pub fn build<I, R>(&self, records: I) -> ModuleTree
    where
        I: IntoIterator<Item = R>,
        R: Into<RawRecord>,
    {
        let mut next_id = 1u64;
        let mut root = TreeNode::new_directory(NodeId::ROOT, self.config.root_name.clone());
        let mut stats = TreeStats::new();
        let mut warnings = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let record = record.into();
            let Some(size) = self.accept(index, &record, &mut warnings) else {
                continue;
            };

            let path = self.config.normalize_path(&record.path);
            let mut segments: Vec<&str> = path.split('/').collect();
            // split always yields at least one segment
            let leaf_name = segments.pop().unwrap_or_default();

            let mut current = &mut root;
            for (depth, segment) in segments.iter().enumerate() {
                let position = match current.child_dir_position(segment) {
                    Some(position) => position,
                    None => {
                        current
                            .children
                            .push(TreeNode::new_directory(NodeId::new(next_id), *segment));
                        next_id += 1;
                        stats.record_dir(depth as u32 + 1);
                        current.children.len() - 1
                    }
                };
                current = &mut current.children[position];
            }

            current
                .children
                .push(TreeNode::new_module(NodeId::new(next_id), leaf_name, size));
            next_id += 1;
            stats.record_module(path, size, segments.len() as u32 + 1);
        }

        trace!(
            modules = stats.total_modules,
            dirs = stats.total_dirs,
            skipped = warnings.len(),
            "built module tree"
        );

        ModuleTree::new(root, self.config.clone(), stats, warnings)
    }

    /// Validate a record's size, recording a warning when it is dropped.
    fn accept(
        &self,
        index: usize,
        record: &RawRecord,
        warnings: &mut Vec<SkippedRecord>,
    ) -> Option<f64> {
        let warning = match record.size.as_number() {
            None => {
                let raw = match &record.size {
                    RawSize::Text(text) => text.clone(),
                    RawSize::Number(n) => n.to_string(),
                    RawSize::Missing => "null".to_string(),
                };
                SkippedRecord::invalid_size(index, record.path.clone(), &raw)
            }
            Some(size) if self.config.skip_non_finite_sizes && !size.is_finite() => {
                SkippedRecord::non_finite_size(index, record.path.clone(), size)
            }
            Some(size) if self.config.skip_negative_sizes && size < 0.0 => {
                SkippedRecord::negative_size(index, record.path.clone(), size)
            }
            Some(size) => return Some(size),
        };

        debug!(index, path = %record.path, "{}", warning.message);
        warnings.push(warning);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarningKind;

    fn names(node: &TreeNode) -> Vec<&str> {
        node.children.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_builds_nested_directories() {
        let tree = PathTreeBuilder::new().build([("a/b/c", 100u64), ("a/b/d", 200u64)]);

        assert_eq!(tree.root.name, "root");
        assert_eq!(names(&tree.root), vec!["a"]);
        let a = &tree.root.children[0];
        assert!(a.is_dir());
        let b = &a.children[0];
        assert_eq!(names(b), vec!["c", "d"]);
        assert_eq!(b.children[0].size(), Some(100.0));
        assert_eq!(b.children[1].size(), Some(200.0));
        assert_eq!(tree.stats.total_dirs, 2);
        assert_eq!(tree.stats.max_depth, 3);
    }

    #[test]
    fn test_ids_follow_creation_order() {
        let tree = PathTreeBuilder::new().build([("a/x", 1u64), ("b", 2u64)]);
        let a = &tree.root.children[0];
        assert_eq!(tree.root.id, NodeId::ROOT);
        assert_eq!(a.id, NodeId::new(1));
        assert_eq!(a.children[0].id, NodeId::new(2));
        assert_eq!(tree.root.children[1].id, NodeId::new(3));
    }

    #[test]
    fn test_duplicate_leaves_are_kept() {
        let tree = PathTreeBuilder::new().build([("lib/a.js", 1u64), ("lib/a.js", 2u64)]);
        let lib = &tree.root.children[0];
        assert_eq!(names(lib), vec!["a.js", "a.js"]);
        assert_eq!(tree.total_modules(), 2);
    }

    #[test]
    fn test_leaf_does_not_capture_directory_walk() {
        let tree = PathTreeBuilder::new().build([("a", 1u64), ("a/b", 2u64)]);
        assert_eq!(names(&tree.root), vec!["a", "a"]);
        assert!(tree.root.children[0].is_module());
        assert!(tree.root.children[1].is_dir());
    }

    #[test]
    fn test_skips_header_row() {
        let tree = PathTreeBuilder::new().build([
            RawRecord::new("name", "size"),
            RawRecord::new("src/a.js", "10"),
        ]);
        assert_eq!(tree.total_modules(), 1);
        assert_eq!(tree.warnings.len(), 1);
        assert_eq!(tree.warnings[0].kind, WarningKind::InvalidSize);
        assert_eq!(tree.warnings[0].index, 0);
    }

    #[test]
    fn test_negative_sizes_follow_config() {
        let records = [("a.js", -5i64), ("b.js", 5i64)];

        let strict = PathTreeBuilder::new().build(records);
        assert_eq!(strict.total_modules(), 1);
        assert_eq!(strict.warnings[0].kind, WarningKind::NegativeSize);

        let loose = PathTreeBuilder::with_config(BuildConfig::permissive()).build(records);
        assert_eq!(loose.total_modules(), 2);
        assert_eq!(loose.total_size(), 0.0);
    }

    #[test]
    fn test_infinite_sizes_skipped() {
        let tree = PathTreeBuilder::new().build([("a.js", f64::INFINITY)]);
        assert!(tree.is_empty());
        assert_eq!(tree.warnings[0].kind, WarningKind::NonFiniteSize);
    }

    #[test]
    fn test_relative_prefix_kept_by_default() {
        let tree = PathTreeBuilder::new().build([("./a/b", 1u64), ("./a/c", 2u64)]);
        assert_eq!(names(&tree.root), vec!["."]);
        let dot = &tree.root.children[0];
        assert!(dot.is_dir());
        assert_eq!(names(dot), vec!["a"]);
        assert_eq!(names(&dot.children[0]), vec!["b", "c"]);
    }

    #[test]
    fn test_strips_relative_prefix_when_configured() {
        let config = BuildConfig::builder()
            .strip_prefix(Some(compact_str::CompactString::const_new("./")))
            .build()
            .unwrap();
        let tree = PathTreeBuilder::with_config(config).build([("./client/App.jsx", 6375u64)]);
        assert_eq!(names(&tree.root), vec!["client"]);
    }
}
