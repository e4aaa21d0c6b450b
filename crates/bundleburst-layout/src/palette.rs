//! Segment colours.

use serde::Serialize;

use bundleburst_core::NodeId;

use crate::partition::PartitionLayout;

/// Default sunburst colours.
pub const DEFAULT_COLORS: [&str; 6] = [
    "#53c79f", "#64b0cc", "#7a6fca", "#ca6f96", "#e58c72", "#e5c072",
];

/// Colour assigned to one visible segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentColor<'a> {
    /// Segment being painted.
    pub id: NodeId,
    /// CSS colour borrowed from the palette.
    pub color: &'a str,
}

/// Cycles through a fixed list of colours by position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Create a palette from a list of CSS colours. An empty list falls back to
    /// the defaults.
    pub fn new<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// Colour for the `index`-th visible segment.
    ///
    /// The cycle starts at the second colour: index 0 (the undrawn root) takes
    /// it, so the first painted ring segment gets the third.
    pub fn color_for(&self, index: usize) -> &str {
        &self.colors[(index + 1) % self.colors.len()]
    }

    /// Colours for every visible segment of a layout, root included, in
    /// layout order.
    pub fn assign<'a>(&'a self, layout: &'a PartitionLayout) -> impl Iterator<Item = SegmentColor<'a>> + 'a {
        layout
            .visible()
            .enumerate()
            .map(|(index, segment)| SegmentColor {
                id: segment.id,
                color: self.color_for(index),
            })
    }

    /// Number of colours in the cycle.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true; see [`Palette::new`].
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bundleburst_core::PathTreeBuilder;

    #[test]
    fn test_cycle_starts_at_second_color() {
        let palette = Palette::default();
        assert_eq!(palette.color_for(0), "#64b0cc");
        assert_eq!(palette.color_for(4), "#e5c072");
        assert_eq!(palette.color_for(5), "#53c79f");
        assert_eq!(palette.color_for(6), "#64b0cc");
    }

    #[test]
    fn test_assign_skips_invisible() {
        let tree = PathTreeBuilder::new().build([("a", 10u64), ("b", 10u64), ("tiny", 0u64)]);
        let layout = PartitionLayout::from_tree(&tree);
        let palette = Palette::default();

        let colors: Vec<_> = palette.assign(&layout).collect();
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0].id, NodeId::ROOT);
        assert_eq!(colors[1].color, "#7a6fca");
        assert_eq!(colors[2].color, "#ca6f96");
    }

    #[test]
    fn test_custom_palette() {
        let palette = Palette::new(["red", "blue"]);
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.color_for(0), "blue");
        assert_eq!(palette.color_for(1), "red");

        assert_eq!(Palette::new(Vec::<String>::new()), Palette::default());
    }
}
