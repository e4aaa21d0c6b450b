//! Partition layout: angular and radial extents for every tree node.
//!
//! The layout runs in three passes over a [`TreeNode`]:
//!
//! 1. aggregate module sizes bottom-up into a `value` per node,
//! 2. order each node's children by descending value (stable for ties),
//! 3. divide every node's angle among its children in that order, and give
//!    each depth an equal-width radial band.
//!
//! The input tree is left untouched; the result is a flat, pre-ordered map of
//! [`Segment`]s linked by parent and child ids.

use std::cmp::Ordering;

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::trace;

use bundleburst_core::{ModuleTree, NodeId, TreeNode};

use crate::config::LayoutConfig;

/// A laid-out node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Id of the tree node this segment was computed from.
    pub id: NodeId,
    /// Parent segment, `None` for the root.
    pub parent: Option<NodeId>,
    /// Child segments by descending value.
    pub children: Vec<NodeId>,
    /// Path component.
    pub name: CompactString,
    /// Distance from the root (root is 0).
    pub depth: u32,
    /// Own size for modules, sum of children for directories.
    pub value: f64,
    /// Own size, modules only.
    pub size: Option<f64>,
    /// Start angle in radians.
    pub x0: f64,
    /// End angle in radians.
    pub x1: f64,
    /// Inner radial bound.
    pub y0: f64,
    /// Outer radial bound.
    pub y1: f64,
}

impl Segment {
    /// Angle spanned by this segment.
    pub fn angular_width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Whether the segment is wide enough to draw.
    pub fn is_visible(&self, min_angular_width: f64) -> bool {
        self.angular_width() > min_angular_width
    }

    /// True for the synthetic root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// True when the node is a directory.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Node with its aggregated value and value-ordered children.
struct Aggregated<'a> {
    node: &'a TreeNode,
    value: f64,
    children: Vec<Aggregated<'a>>,
}

impl<'a> Aggregated<'a> {
    fn new(node: &'a TreeNode) -> Self {
        let mut children: Vec<Aggregated<'a>> = node.children.iter().map(Aggregated::new).collect();
        let value = match node.size() {
            Some(size) => size,
            None => children.iter().map(|c| c.value).sum(),
        };
        // sort_by is stable, so equal values keep builder order
        children.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
        Self {
            node,
            value,
            children,
        }
    }
}

/// Sunburst layout of a whole tree.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionLayout {
    segments: IndexMap<NodeId, Segment>,
    total_value: f64,
    height: u32,
    config: LayoutConfig,
}

impl PartitionLayout {
    /// Lay out a tree with the default configuration.
    pub fn compute(root: &TreeNode) -> Self {
        Self::compute_with(root, LayoutConfig::default())
    }

    /// Lay out a built module tree with the default configuration.
    pub fn from_tree(tree: &ModuleTree) -> Self {
        Self::compute(&tree.root)
    }

    /// Lay out a tree with a custom configuration.
    pub fn compute_with(root: &TreeNode, config: LayoutConfig) -> Self {
        let aggregated = Aggregated::new(root);
        let height = root.height();
        let mut layout = Self {
            segments: IndexMap::with_capacity(root.node_count()),
            total_value: aggregated.value,
            height,
            config,
        };

        let band = config.radial_extent / f64::from(height + 1);
        layout.place(&aggregated, None, 0, 0.0, config.angular_extent, band);

        trace!(
            segments = layout.segments.len(),
            total = layout.total_value,
            height,
            "computed partition layout"
        );
        layout
    }

    /// Insert a segment and, recursively, its children in pre-order.
    fn place(
        &mut self,
        agg: &Aggregated<'_>,
        parent: Option<NodeId>,
        depth: u32,
        x0: f64,
        x1: f64,
        band: f64,
    ) {
        let id = agg.node.id;
        self.segments.insert(
            id,
            Segment {
                id,
                parent,
                children: agg.children.iter().map(|c| c.node.id).collect(),
                name: agg.node.name.clone(),
                depth,
                value: agg.value,
                size: agg.node.size(),
                x0,
                x1,
                y0: band * f64::from(depth),
                y1: band * f64::from(depth + 1),
            },
        );

        // A zero-valued parent hands every child a zero-width slice at x0.
        let scale = if agg.value != 0.0 {
            (x1 - x0) / agg.value
        } else {
            0.0
        };
        let mut cursor = x0;
        for child in &agg.children {
            let start = cursor;
            cursor += child.value * scale;
            self.place(child, Some(id), depth + 1, start, cursor, band);
        }
    }

    /// Aggregate value of the root, i.e. the bundle size.
    pub fn total_value(&self) -> f64 {
        self.total_value
    }

    /// Height of the laid-out tree.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Configuration used for this layout.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of segments, visible or not.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a layout holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The synthetic root segment.
    pub fn root(&self) -> &Segment {
        &self.segments[0]
    }

    /// Look up a segment by node id.
    pub fn get(&self, id: NodeId) -> Option<&Segment> {
        self.segments.get(&id)
    }

    /// All segments in pre-order (parents before children, children by
    /// descending value).
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.values()
    }

    /// Direct children of a segment, by descending value.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Segment> {
        self.get(id)
            .into_iter()
            .flat_map(|segment| segment.children.iter())
            .filter_map(|child| self.segments.get(child))
    }

    /// The segment and its ancestors, from the segment up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<&Segment> {
        let mut chain = Vec::new();
        let mut current = self.get(id);
        while let Some(segment) = current {
            chain.push(segment);
            current = segment.parent.and_then(|parent| self.get(parent));
        }
        chain
    }

    /// Segments wide enough to draw, root included.
    pub fn visible(&self) -> impl Iterator<Item = &Segment> {
        let min = self.config.min_angular_width;
        self.iter().filter(move |segment| segment.is_visible(min))
    }

    /// Visible segments minus the synthetic root, which is never painted.
    pub fn drawn(&self) -> impl Iterator<Item = &Segment> {
        self.visible().filter(|segment| !segment.is_root())
    }
}
