//! Module and directory node types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Unique identifier for a node within a tree.
///
/// Ids are handed out in creation order, so the synthetic root is always
/// `NodeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Identifier of the synthetic root.
    pub const ROOT: NodeId = NodeId(0);

    /// Create a new NodeId from a u64.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Type of tree node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Path segment that groups other segments.
    Directory,
    /// Terminal segment with its own byte size.
    Module {
        /// Size in bytes as reported by the build.
        size: f64,
    },
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a module leaf.
    pub fn is_module(&self) -> bool {
        matches!(self, NodeKind::Module { .. })
    }
}

/// A single path segment in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique identifier for this node.
    pub id: NodeId,

    /// Path component (not the full path).
    pub name: CompactString,

    /// Directory or module.
    pub kind: NodeKind,

    /// Children in encounter order. Empty for modules.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new module leaf.
    pub fn new_module(id: NodeId, name: impl Into<CompactString>, size: f64) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Module { size },
            children: Vec::new(),
        }
    }

    /// Create a new, empty directory node.
    pub fn new_directory(id: NodeId, name: impl Into<CompactString>) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Directory,
            children: Vec::new(),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a module leaf.
    pub fn is_module(&self) -> bool {
        self.kind.is_module()
    }

    /// Own size for modules, `None` for directories.
    pub fn size(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Module { size } => Some(size),
            NodeKind::Directory => None,
        }
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Sum of all module sizes in this subtree.
    pub fn aggregate_size(&self) -> f64 {
        match self.kind {
            NodeKind::Module { size } => size,
            NodeKind::Directory => self.children.iter().map(TreeNode::aggregate_size).sum(),
        }
    }

    /// Position of the first direct child directory with this name.
    ///
    /// Modules never match, even when their name is equal.
    pub fn child_dir_position(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.is_dir() && child.name == name)
    }

    /// Depth-first search for a node by id.
    pub fn find(&self, id: NodeId) -> Option<&TreeNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Total number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Longest distance from this node down to a leaf.
    pub fn height(&self) -> u32 {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }
}
