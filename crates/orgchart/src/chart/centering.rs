//! Parent centering
//!
//! Moves each parent of a band so it sits centered over the horizontal span
//! of its direct children. Children must already be in their final position,
//! which is why the layout visits bands from the deepest level upward.

use tracing::trace;

use super::hierarchy::{Band, Hierarchy};
use crate::core::LayoutNode;

/// Center every parent in `band` over its children; returns how many moved
pub fn center_band(hierarchy: &Hierarchy, band: &Band, nodes: &mut [LayoutNode]) -> usize {
    let mut moved = 0;
    for &slot in &band.slots {
        let Some(x) = centered_x(hierarchy.children(slot), nodes, nodes[slot].width) else {
            continue;
        };
        if x != nodes[slot].x {
            trace!(node_id = %nodes[slot].id, from = nodes[slot].x, to = x, "Centered parent");
            nodes[slot].x = x;
            moved += 1;
        }
    }
    moved
}

/// Left edge that centers a box of `width` over `children`, `None` for a leaf
///
/// Uses the full span (leftmost edge to rightmost edge), not the mean of the
/// children's centers.
pub fn centered_x(children: &[usize], nodes: &[LayoutNode], width: f64) -> Option<f64> {
    match children {
        [] => None,
        [only] => Some(nodes[*only].center_x() - width / 2.0),
        _ => {
            let left = children
                .iter()
                .map(|&c| nodes[c].x)
                .fold(f64::INFINITY, f64::min);
            let right = children
                .iter()
                .map(|&c| nodes[c].right())
                .fold(f64::NEG_INFINITY, f64::max);
            Some((left + right) / 2.0 - width / 2.0)
        }
    }
}
