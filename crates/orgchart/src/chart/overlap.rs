//! Overlap resolution
//!
//! Centering can pull boxes of one band on top of each other. The resolver
//! sweeps the band left to right and only ever pushes boxes right, so the
//! left-to-right order it finds is the order it leaves.
//!
//! A band is split into blocks: each orphan is a block of one, and the direct
//! children of one parent form a cluster that moves as a unit once its own
//! members are spread apart.

use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, trace};

use super::hierarchy::{Band, Hierarchy};
use crate::core::LayoutNode;

#[derive(Debug)]
enum Block {
    Orphan(usize),
    Cluster(Vec<usize>),
}

impl Block {
    fn members(&self) -> &[usize] {
        match self {
            Block::Orphan(slot) => std::slice::from_ref(slot),
            Block::Cluster(members) => members,
        }
    }
}

/// Counters reported by [`resolve_band`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OverlapStats {
    /// Orphans and whole clusters pushed right
    pub shifted_blocks: usize,
    /// Cluster members pushed apart from a sibling
    pub spread_members: usize,
}

/// Compare two slots by current X, falling back to their initial rank
fn by_position(nodes: &[LayoutNode], sequence: &[usize], a: usize, b: usize) -> Ordering {
    nodes[a]
        .x
        .total_cmp(&nodes[b].x)
        .then(sequence[a].cmp(&sequence[b]))
}

/// Remove horizontal overlaps in one band
///
/// `sequence` is the initial left-to-right rank of each slot, used to break ties
/// between boxes at the same X. Every box ends at least `min_spacing` away
/// from its right-hand neighbour and no box starts left of `margin`.
pub fn resolve_band(
    hierarchy: &Hierarchy,
    band: &Band,
    nodes: &mut [LayoutNode],
    sequence: &[usize],
    margin: f64,
    min_spacing: f64,
) -> OverlapStats {
    let mut stats = OverlapStats::default();

    let mut blocks: Vec<Block> = Vec::new();
    let mut cluster_of: HashMap<usize, usize> = HashMap::new();
    for &slot in &band.slots {
        match hierarchy.parent(slot) {
            None => blocks.push(Block::Orphan(slot)),
            Some(parent) => {
                let index = *cluster_of.entry(parent).or_insert_with(|| {
                    blocks.push(Block::Cluster(Vec::new()));
                    blocks.len() - 1
                });
                if let Block::Cluster(members) = &mut blocks[index] {
                    members.push(slot);
                }
            }
        }
    }

    // Internal spread first so each cluster is a rigid block for the sweep
    for block in blocks.iter_mut() {
        if let Block::Cluster(members) = block {
            members.sort_by(|&a, &b| by_position(nodes, sequence, a, b));
            for pair in 1..members.len() {
                let (prev, slot) = (members[pair - 1], members[pair]);
                let min_x = nodes[prev].right() + min_spacing;
                if nodes[slot].x < min_x {
                    trace!(node_id = %nodes[slot].id, from = nodes[slot].x, to = min_x, "Spread cluster member");
                    nodes[slot].x = min_x;
                    stats.spread_members += 1;
                }
            }
        }
    }

    blocks.sort_by(|a, b| by_position(nodes, sequence, a.members()[0], b.members()[0]));

    let mut next_free_x = margin;
    for block in &blocks {
        let members = block.members();
        let left = nodes[members[0]].x;
        if left < next_free_x {
            let delta = next_free_x - left;
            for &slot in members {
                nodes[slot].x += delta;
            }
            // The leftmost member lands exactly on the cursor
            nodes[members[0]].x = next_free_x;
            trace!(
                node_id = %nodes[members[0]].id,
                members = members.len(),
                delta,
                "Shifted block right"
            );
            stats.shifted_blocks += 1;
        }
        let right = members
            .iter()
            .map(|&slot| nodes[slot].right())
            .fold(f64::NEG_INFINITY, f64::max);
        next_free_x = right + min_spacing;
    }

    debug!(
        level = band.level,
        blocks = blocks.len(),
        shifted = stats.shifted_blocks,
        spread = stats.spread_members,
        "Resolved band overlaps"
    );
    stats
}
