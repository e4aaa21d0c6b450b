//! Breadcrumb trail placement and diffing.
//!
//! A trail is the hovered node's ancestor chain drawn as a row of chevrons,
//! followed by the percentage label. Chevrons are keyed by name and position,
//! so moving between siblings only swaps the chevrons that actually changed.

use compact_str::CompactString;
use serde::Serialize;

use bundleburst_core::NodeId;

use crate::config::BreadcrumbStyle;

/// Display projection of one node in an ancestor chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BreadcrumbEntry {
    /// Node name shown in the chevron.
    pub name: CompactString,
    /// Position in the chain, 0 for the node just below the root.
    pub depth_index: usize,
}

impl BreadcrumbEntry {
    /// Create a new entry.
    pub fn new(name: impl Into<CompactString>, depth_index: usize) -> Self {
        Self {
            name: name.into(),
            depth_index,
        }
    }

    /// Two entries occupy the same slot when both name and position match.
    pub fn same_slot(&self, other: &BreadcrumbEntry) -> bool {
        self.depth_index == other.depth_index && self.name == other.name
    }
}

/// A chevron with its position in the trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBreadcrumb {
    /// Name and slot the chevron is keyed by.
    pub entry: BreadcrumbEntry,
    /// Node the chevron stands for.
    pub node: NodeId,
    /// Horizontal offset from the start of the trail.
    pub offset: f64,
    /// Horizontal space taken, tip included.
    pub width: f64,
    /// Outline relative to `offset`.
    pub points: Vec<(f64, f64)>,
}

/// Percentage text at the end of the trail.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EndLabel {
    /// Formatted percentage, e.g. `12.3%`.
    pub text: String,
    /// Anchor x, past the last chevron plus the label gap.
    pub x: f64,
    /// Anchor y, the vertical middle of the chevrons.
    pub y: f64,
}

/// The currently displayed breadcrumb trail.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trail {
    /// Chevrons in root-to-leaf order.
    pub crumbs: Vec<PlacedBreadcrumb>,
    /// Percentage label placed after the chevrons.
    pub end_label: EndLabel,
    /// Hidden trails keep their chevrons so the next hover can diff against them.
    pub visible: bool,
}

impl Trail {
    /// Lay out a visible trail for a chain of `(node, name)` pairs in
    /// root-to-leaf order.
    pub fn place<'a, I>(chain: I, percentage_label: &str, style: &BreadcrumbStyle) -> Self
    where
        I: IntoIterator<Item = (NodeId, &'a str)>,
    {
        let mut offset = 0.0;
        let crumbs: Vec<PlacedBreadcrumb> = chain
            .into_iter()
            .enumerate()
            .map(|(index, (node, name))| {
                let width = style.width(name);
                let crumb = PlacedBreadcrumb {
                    entry: BreadcrumbEntry::new(name, index),
                    node,
                    offset,
                    width,
                    points: style.points(name, index),
                };
                offset += width;
                crumb
            })
            .collect();

        Self {
            crumbs,
            end_label: EndLabel {
                text: percentage_label.to_string(),
                x: offset + style.label_gap,
                y: style.height / 2.0,
            },
            visible: true,
        }
    }

    /// Entries in display order.
    pub fn entries(&self) -> impl Iterator<Item = &BreadcrumbEntry> {
        self.crumbs.iter().map(|crumb| &crumb.entry)
    }

    /// Total width of all chevrons.
    pub fn width(&self) -> f64 {
        self.crumbs.iter().map(|crumb| crumb.width).sum()
    }

    /// Number of chevrons.
    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    /// True when the trail has no chevrons.
    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// Path-like rendering of the trail, for logs and the CLI.
    pub fn label(&self) -> String {
        itertools::join(self.entries().map(|entry| entry.name.as_str()), " > ")
    }
}

/// What changed between two trails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrailDiff {
    /// Entries shown before and gone now.
    pub removed: Vec<BreadcrumbEntry>,
    /// Entries that need a fresh chevron.
    pub added: Vec<BreadcrumbEntry>,
    /// Entries present in both. Their chevron is reused, though it may move.
    pub retained: Vec<BreadcrumbEntry>,
    /// Retained entries whose offset changed because an earlier chevron
    /// changed width.
    pub moved: Vec<BreadcrumbEntry>,
}

impl TrailDiff {
    /// Diff the previously displayed trail against a new one.
    pub fn between(old: &Trail, new: &Trail) -> Self {
        let mut diff = TrailDiff::default();

        for entry in old.entries() {
            if !new.entries().any(|e| e.same_slot(entry)) {
                diff.removed.push(entry.clone());
            }
        }
        for crumb in &new.crumbs {
            let entry = &crumb.entry;
            match old.crumbs.iter().find(|c| c.entry.same_slot(entry)) {
                Some(previous) => {
                    if previous.offset != crumb.offset {
                        diff.moved.push(entry.clone());
                    }
                    diff.retained.push(entry.clone());
                }
                None => diff.added.push(entry.clone()),
            }
        }
        diff
    }

    /// True when the trail did not change at all.
    pub fn is_unchanged(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty() && self.moved.is_empty()
    }
}
