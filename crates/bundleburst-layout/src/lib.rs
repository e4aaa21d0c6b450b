//! Sunburst layout for bundleburst.
//!
//! This crate turns a [`TreeNode`](bundleburst_core::TreeNode) into
//! something a painter can draw:
//!
//! - **Partition layout** - angular span proportional to size, one radial
//!   band per depth
//! - **Arc geometry** - equal-area sectors in pixel space, hit testing
//! - **Palette** - deterministic colour per visible segment
//!
//! ```rust
//! use bundleburst_core::PathTreeBuilder;
//! use bundleburst_layout::{ArcGeometry, PartitionLayout};
//!
//! let tree = PathTreeBuilder::new().build([("src/a.js", 300u64), ("src/b.js", 100u64)]);
//! let layout = PartitionLayout::from_tree(&tree);
//! let geometry = ArcGeometry::for_layout(&layout, 240.0);
//!
//! for segment in layout.drawn() {
//!     let sector = geometry.sector(segment);
//!     println!("{} {:.2}..{:.2}", segment.name, sector.start_angle, sector.end_angle);
//! }
//! assert_eq!(layout.total_value(), 400.0);
//! ```

mod arc;
mod config;
mod palette;
mod partition;

pub use arc::{ArcGeometry, Sector, to_polar};
pub use config::{DEFAULT_MIN_ANGULAR_WIDTH, LayoutConfig, LayoutConfigBuilder, LayoutConfigBuilderError};
pub use palette::{DEFAULT_COLORS, Palette, SegmentColor};
pub use partition::{PartitionLayout, Segment};

// Re-export core types
pub use bundleburst_core::{ModuleTree, NodeId, TreeNode};
