//! Hover selection state.
//!
//! The controller owns the only mutable state of the visualization: the
//! currently displayed breadcrumb trail and highlight set. Each hover builds a
//! complete new [`DisplayState`] and swaps it in; each hover-out clears it and
//! disarms hover handling until the painter reports that its fade finished.

use std::time::Duration;

use compact_str::CompactString;
use indexmap::IndexSet;
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, trace};

use bundleburst_core::NodeId;
use bundleburst_layout::{PartitionLayout, Segment};

use crate::breadcrumb::{Trail, TrailDiff};
use crate::config::InteractionConfig;
use crate::format::{percentage_label, size_label};

/// Ids from just below the root down to the hovered node.
pub type AncestorChain = Vec<NodeId>;

/// Receives the hovered path, or `None` when nothing is hovered.
pub trait PathListener {
    /// Called with the hovered path, or `None` once the hover ends.
    fn path_changed(&mut self, path: Option<&str>);
}

impl<F> PathListener for F
where
    F: FnMut(Option<&str>),
{
    fn path_changed(&mut self, path: Option<&str>) {
        self(path)
    }
}

/// Listener that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl PathListener for NoopListener {
    fn path_changed(&mut self, _path: Option<&str>) {}
}

/// Everything a painter needs to draw the hover overlay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisplayState {
    /// Hovered node, if any.
    pub hovered: Option<NodeId>,
    /// Hovered node's own name.
    pub name: CompactString,
    /// Share of the bundle, e.g. `"12.5%"` or `"< 0.1%"`.
    pub percentage_label: String,
    /// Size with unit, e.g. `"1.50 MiB"`.
    pub size_label: String,
    /// `./a/b/c`, with a trailing slash for directories.
    pub path_string: Option<String>,
    /// Chain from just below the root to the hovered node.
    pub ancestors: AncestorChain,
    /// Breadcrumb trail; kept (hidden) after hover-out for the next diff.
    pub breadcrumbs: Trail,
    /// Segments drawn at full opacity. Empty means nothing is dimmed.
    pub highlighted: IndexSet<NodeId>,
    /// Whether the centre explanation is shown.
    pub explanation_visible: bool,
}

impl DisplayState {
    /// Whether a painter should dim this segment.
    pub fn is_dimmed(&self, id: NodeId) -> bool {
        !self.highlighted.is_empty() && !self.highlighted.contains(&id)
    }

    /// Centre caption for the percentage.
    pub fn percentage_caption(&self) -> String {
        format!("{} of your bundle", self.percentage_label)
    }

    /// Centre caption for the size.
    pub fn size_caption(&self) -> String {
        format!("Size: {}", self.size_label)
    }
}

/// Ticket for a fade back to full opacity.
///
/// The painter runs the fade and hands the ticket back through
/// [`HoverController::complete_fade`] when it is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FadeOut {
    /// Only the ticket with the latest generation re-arms the controller.
    pub generation: u64,
    /// How long the painter should take to restore full opacity.
    pub duration: Duration,
}

/// Ancestor chain of a segment, root excluded, root-to-node order.
pub fn ancestor_chain<'a>(layout: &'a PartitionLayout, id: NodeId) -> Vec<&'a Segment> {
    let mut chain = layout.ancestors(id);
    chain.reverse();
    chain.retain(|segment| !segment.is_root());
    chain
}

/// `./`-prefixed path for a chain, with a trailing `/` when the last node is a
/// directory.
pub fn path_string(chain: &[&Segment]) -> String {
    let joined = chain.iter().map(|segment| segment.name.as_str()).join("/");
    let trailing = match chain.last() {
        Some(last) if last.has_children() => "/",
        _ => "",
    };
    format!("./{joined}{trailing}")
}

/// Turns hover events into display state.
#[derive(Debug)]
pub struct HoverController<L = NoopListener> {
    config: InteractionConfig,
    state: DisplayState,
    last_diff: TrailDiff,
    armed: bool,
    fade_generation: u64,
    listener: L,
}

impl HoverController<NoopListener> {
    /// Create a controller with no path listener.
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            state: DisplayState::default(),
            last_diff: TrailDiff::default(),
            armed: true,
            fade_generation: 0,
            listener: NoopListener,
        }
    }
}

impl Default for HoverController<NoopListener> {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl<L: PathListener> HoverController<L> {
    /// Replace the path listener.
    pub fn with_listener<M: PathListener>(self, listener: M) -> HoverController<M> {
        HoverController {
            config: self.config,
            state: self.state,
            last_diff: self.last_diff,
            armed: self.armed,
            fade_generation: self.fade_generation,
            listener,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Current display state.
    pub fn display_state(&self) -> &DisplayState {
        &self.state
    }

    /// Breadcrumb changes made by the last hover.
    pub fn last_diff(&self) -> &TrailDiff {
        &self.last_diff
    }

    /// Whether hover events are currently handled.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Handle the pointer entering a segment.
    ///
    /// Returns `None`, leaving the state untouched, while a fade-out is
    /// running, for unknown ids and for the root.
    pub fn on_hover(&mut self, layout: &PartitionLayout, id: NodeId) -> Option<&DisplayState> {
        if !self.armed {
            trace!(?id, "hover ignored during fade-out");
            return None;
        }
        let Some(segment) = layout.get(id) else {
            debug!(?id, "hover on unknown segment");
            return None;
        };
        if segment.is_root() {
            trace!("hover on root ignored");
            return None;
        }

        let chain = ancestor_chain(layout, id);
        let percentage = percentage_label(segment.value, layout.total_value());
        let path = path_string(&chain);

        let trail = Trail::place(
            chain.iter().map(|s| (s.id, s.name.as_str())),
            &percentage,
            &self.config.breadcrumb,
        );
        self.last_diff = TrailDiff::between(&self.state.breadcrumbs, &trail);

        let ancestors: AncestorChain = chain.iter().map(|s| s.id).collect();
        self.state = DisplayState {
            hovered: Some(id),
            name: segment.name.clone(),
            size_label: size_label(segment.value),
            percentage_label: percentage,
            path_string: Some(path),
            highlighted: ancestors.iter().copied().collect(),
            ancestors,
            breadcrumbs: trail,
            explanation_visible: true,
        };

        self.listener.path_changed(self.state.path_string.as_deref());
        Some(&self.state)
    }

    /// Handle the pointer leaving the chart.
    ///
    /// Hover handling stays off until the returned ticket is completed. A
    /// later hover-out supersedes earlier tickets.
    pub fn on_hover_end(&mut self) -> FadeOut {
        self.state.hovered = None;
        self.state.highlighted.clear();
        self.state.breadcrumbs.visible = false;
        self.state.explanation_visible = false;
        self.state.path_string = None;
        self.last_diff = TrailDiff::default();

        self.armed = false;
        self.fade_generation += 1;
        self.listener.path_changed(None);

        FadeOut {
            generation: self.fade_generation,
            duration: self.config.fade_duration,
        }
    }

    /// Report that a fade-out finished. Re-arms hover handling if the ticket
    /// is the latest one; returns whether it did.
    pub fn complete_fade(&mut self, fade: FadeOut) -> bool {
        if fade.generation != self.fade_generation {
            trace!(
                stale = fade.generation,
                current = self.fade_generation,
                "stale fade completion"
            );
            return false;
        }
        self.armed = true;
        true
    }
}
