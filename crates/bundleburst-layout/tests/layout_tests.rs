use std::f64::consts::TAU;

use bundleburst_core::{PathTreeBuilder, RawRecord};
use bundleburst_layout::{ArcGeometry, LayoutConfig, PartitionLayout};

const TOLERANCE: f64 = 1e-9;

fn bundle_records() -> Vec<RawRecord> {
    vec![
        RawRecord::new("client/App.jsx", 6375u64),
        RawRecord::new("client/index.js", 120u64),
        RawRecord::new("client/components/Sunburst.jsx", 9120u64),
        RawRecord::new("client/components/Nav.jsx", 1800u64),
        RawRecord::new("client/containers/Content.jsx", 2200u64),
        RawRecord::new("node_modules/react/index.js", 190u64),
        RawRecord::new("node_modules/react/cjs/react.development.js", 58000u64),
        RawRecord::new("node_modules/react-dom/cjs/react-dom.development.js", 880000u64),
        RawRecord::new("node_modules/d3/dist/d3.js", 505000u64),
        RawRecord::new("node_modules/lodash/lodash.js", 540000u64),
        RawRecord::new("node_modules/tiny/index.js", 3u64),
        RawRecord::new("webpack/runtime", 0u64),
    ]
}

fn layouts() -> Vec<PartitionLayout> {
    let builder = PathTreeBuilder::new();
    vec![
        PartitionLayout::from_tree(&builder.build(bundle_records())),
        PartitionLayout::from_tree(&builder.build([("only.js", 1u64)])),
        PartitionLayout::from_tree(&builder.build([("a/b/c/d/e", 7u64), ("a/x", 7u64)])),
        PartitionLayout::from_tree(&builder.build(Vec::<RawRecord>::new())),
    ]
}

#[test]
fn test_aggregation_invariant() {
    for layout in layouts() {
        for segment in layout.iter() {
            if segment.has_children() {
                let sum: f64 = layout.children(segment.id).map(|c| c.value).sum();
                assert!((segment.value - sum).abs() < TOLERANCE, "{}", segment.name);
            } else if let Some(size) = segment.size {
                assert_eq!(segment.value, size);
            }
        }
    }
}

#[test]
fn test_angular_tiling_invariant() {
    for layout in layouts() {
        for segment in layout.iter().filter(|s| s.has_children()) {
            let children: Vec<_> = layout.children(segment.id).collect();
            let mut cursor = segment.x0;
            for child in &children {
                assert!((child.x0 - cursor).abs() < TOLERANCE);
                assert!(child.x1 >= child.x0);
                cursor = child.x1;
            }
            if segment.value > 0.0 {
                assert!((cursor - segment.x1).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn test_children_descend_by_value() {
    for layout in layouts() {
        for segment in layout.iter() {
            let values: Vec<f64> = layout.children(segment.id).map(|c| c.value).collect();
            assert!(values.windows(2).all(|w| w[0] >= w[1]));
        }
    }
}

#[test]
fn test_full_circle_invariant() {
    for layout in layouts() {
        let root = layout.root();
        assert_eq!(root.x0, 0.0);
        assert!((root.x1 - TAU).abs() < TOLERANCE);
        assert!(root.is_root());
        assert_eq!(root.name, "root");
    }
}

#[test]
fn test_radial_extent_increases_with_depth() {
    for layout in layouts() {
        for segment in layout.iter() {
            assert!(segment.y1 > segment.y0);
            if let Some(parent) = segment.parent.and_then(|p| layout.get(p)) {
                assert!((segment.y0 - parent.y1).abs() < TOLERANCE);
            }
        }
    }
}

#[test]
fn test_visibility_threshold() {
    let tree = PathTreeBuilder::new().build(bundle_records());
    let layout = PartitionLayout::from_tree(&tree);

    let tiny = layout.iter().find(|s| s.name == "tiny").unwrap();
    assert!(!tiny.is_visible(layout.config().min_angular_width));
    assert!(layout.visible().all(|s| s.angular_width() > 0.005));
    assert!(layout.drawn().all(|s| s.depth > 0));
    assert!(layout.visible().any(|s| s.is_root()));

    // invisible segments stay in the layout
    assert_eq!(layout.len(), tree.root.node_count());
}

#[test]
fn test_custom_min_width() {
    let tree = PathTreeBuilder::new().build([("a", 999u64), ("b", 1u64)]);
    let config = LayoutConfig::builder().min_angular_width(0.01).build().unwrap();
    let layout = PartitionLayout::compute_with(&tree.root, config);

    // b gets 2π/1000 ≈ 0.00628 rad
    let names: Vec<_> = layout.drawn().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["a"]);
}

#[test]
fn test_total_value_matches_stats() {
    let tree = PathTreeBuilder::new().build(bundle_records());
    let layout = PartitionLayout::from_tree(&tree);
    assert_eq!(layout.total_value(), tree.total_size());
}

#[test]
fn test_geometry_covers_radius() {
    let tree = PathTreeBuilder::new().build(bundle_records());
    let layout = PartitionLayout::from_tree(&tree);
    let geometry = ArcGeometry::for_layout(&layout, 300.0);

    let outermost = layout
        .iter()
        .map(|s| geometry.sector(s).outer_radius)
        .fold(0.0, f64::max);
    assert!((outermost - 300.0).abs() < 1e-6);
}

#[test]
fn test_layout_serializes() {
    let tree = PathTreeBuilder::new().build([("a/b.js", 4u64)]);
    let layout = PartitionLayout::from_tree(&tree);
    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["total_value"], 4.0);
}
