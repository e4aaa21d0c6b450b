//! Hover interaction for bundleburst.
//!
//! Given a [`PartitionLayout`](bundleburst_layout::PartitionLayout) and the id
//! of the segment under the pointer, the [`HoverController`] derives:
//!
//! - the ancestor chain and the `./a/b/` style path of the hovered node
//! - a percentage-of-bundle label and a size label
//! - the set of segments to keep at full opacity
//! - the breadcrumb trail, diffed against the one already on screen
//!
//! ```rust
//! use bundleburst_core::PathTreeBuilder;
//! use bundleburst_hover::{HoverController, InteractionConfig};
//! use bundleburst_layout::PartitionLayout;
//!
//! let tree = PathTreeBuilder::new().build([("a/b/c", 100u64), ("a/b/d", 200u64)]);
//! let layout = PartitionLayout::from_tree(&tree);
//! let c = layout.iter().find(|s| s.name == "c").unwrap().id;
//!
//! let mut seen = Vec::new();
//! let mut controller = HoverController::new(InteractionConfig::default())
//!     .with_listener(|path: Option<&str>| seen.push(path.map(str::to_string)));
//!
//! let state = controller.on_hover(&layout, c).unwrap();
//! assert_eq!(state.path_string.as_deref(), Some("./a/b/c"));
//!
//! let fade = controller.on_hover_end();
//! assert!(!controller.is_armed());
//! assert!(controller.complete_fade(fade));
//! drop(controller);
//! assert_eq!(seen, vec![Some("./a/b/c".to_string()), None]);
//! ```

mod breadcrumb;
mod config;
mod controller;
mod format;

pub use breadcrumb::{BreadcrumbEntry, EndLabel, PlacedBreadcrumb, Trail, TrailDiff};
pub use config::{
    BreadcrumbStyle, InteractionConfig, InteractionConfigBuilder, InteractionConfigBuilderError,
};
pub use controller::{
    AncestorChain, DisplayState, FadeOut, HoverController, NoopListener, PathListener,
    ancestor_chain, path_string,
};
pub use format::{
    BELOW_FLOOR_LABEL, SizeUnit, percentage_label, size_label, to_fixed, to_precision,
};
