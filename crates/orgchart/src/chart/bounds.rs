//! Bounding box of a finished layout

use crate::core::{Bounds, LayoutNode};

/// Bounds of all nodes, grown by `margin` on every side
///
/// An empty node list has zero-sized bounds at the origin.
pub fn compute_bounds(nodes: &[LayoutNode], margin: f64) -> Bounds {
    if nodes.is_empty() {
        return Bounds::default();
    }

    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for node in nodes {
        min_x = min_x.min(node.x);
        min_y = min_y.min(node.y);
        max_x = max_x.max(node.right());
        max_y = max_y.max(node.bottom());
    }

    let (min_x, min_y) = (min_x - margin, min_y - margin);
    let (max_x, max_y) = (max_x + margin, max_y + margin);
    Bounds {
        min_x,
        min_y,
        max_x,
        max_y,
        width: max_x - min_x,
        height: max_y - min_y,
    }
}
