//! Initial placement
//!
//! Assigns provisional positions band by band. Within a band, orphans come
//! first, then each parent's children as one contiguous block. Blocks are
//! ordered by where their members first appear in the source, children by
//! their own `order`.

use std::collections::HashMap;
use tracing::{debug, trace};

use super::hierarchy::{Band, Hierarchy};
use crate::core::{LayoutNode, SpacingConfig};

/// Nodes indexed by hierarchy slot, with their initial left-to-right rank
#[derive(Debug, Clone)]
pub struct Placement {
    pub nodes: Vec<LayoutNode>,
    /// Rank of each slot within its band after initial placement
    pub sequence: Vec<usize>,
}

impl Placement {
    /// Unplaced nodes for every slot, all at the origin
    fn unplaced(hierarchy: &Hierarchy, config: &SpacingConfig) -> Self {
        let nodes = (0..hierarchy.len())
            .map(|slot| {
                let entity = hierarchy.entity(slot);
                LayoutNode {
                    id: entity.id.clone(),
                    source_index: hierarchy.source_index(slot),
                    level: entity.level,
                    x: 0.0,
                    y: 0.0,
                    width: config.box_width,
                    height: config.box_height,
                    parent_id: hierarchy
                        .parent(slot)
                        .map(|p| hierarchy.entity(p).id.clone()),
                    order: entity.order,
                }
            })
            .collect();
        Self {
            nodes,
            sequence: vec![0; hierarchy.len()],
        }
    }
}

/// Place every band top to bottom starting at the configured margin
pub fn place_initial(hierarchy: &Hierarchy, config: &SpacingConfig) -> Placement {
    let mut placement = Placement::unplaced(hierarchy, config);
    let mut cursor_y = config.margin;

    for band in hierarchy.bands() {
        cursor_y = place_band(hierarchy, band, cursor_y, config, &mut placement);
    }

    placement
}

/// Place one band at `y`, returning the Y where the next band starts
pub fn place_band(
    hierarchy: &Hierarchy,
    band: &Band,
    y: f64,
    config: &SpacingConfig,
    placement: &mut Placement,
) -> f64 {
    if band.slots.is_empty() {
        return y;
    }

    let order_of = |slot: usize| hierarchy.entity(slot).order;

    let mut orphans: Vec<usize> = Vec::new();
    // (parent slot, children in input order); parents appear in first-seen order
    let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
    let mut group_of: HashMap<usize, usize> = HashMap::new();
    for &slot in &band.slots {
        match hierarchy.parent(slot) {
            None => orphans.push(slot),
            Some(parent) => {
                let index = *group_of.entry(parent).or_insert_with(|| {
                    groups.push((parent, Vec::new()));
                    groups.len() - 1
                });
                groups[index].1.push(slot);
            }
        }
    }

    // Stable sorts: equal `order` keeps input order
    orphans.sort_by_key(|&s| order_of(s));
    for (_, members) in groups.iter_mut() {
        members.sort_by_key(|&s| order_of(s));
    }
    groups.sort_by_key(|(_, members)| members.first().map(|&s| order_of(s)));

    let sibling_gap = config.sibling_gap();
    let group_gap = config.group_gap();
    let mut rank = 0;
    let mut last_right: Option<f64> = None;
    let mut band_height: f64 = 0.0;

    let put = |slot: usize, x: f64, placement: &mut Placement, rank: &mut usize| {
        let node = &mut placement.nodes[slot];
        node.x = x;
        node.y = y;
        placement.sequence[slot] = *rank;
        *rank += 1;
        trace!(node_id = %node.id, x, y, "Initial position");
        node.right()
    };

    for &slot in &orphans {
        let x = last_right.map_or(config.margin, |r| r + sibling_gap);
        last_right = Some(put(slot, x, placement, &mut rank));
        band_height = band_height.max(placement.nodes[slot].height);
    }

    for (_, members) in &groups {
        let mut x = last_right.map_or(config.margin, |r| r + group_gap);
        for &slot in members {
            let right = put(slot, x, placement, &mut rank);
            band_height = band_height.max(placement.nodes[slot].height);
            x = right + sibling_gap;
            last_right = Some(right);
        }
    }

    debug!(
        level = band.level,
        orphans = orphans.len(),
        clusters = groups.len(),
        y,
        "Placed band"
    );

    y + band_height + config.vertical_spacing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::bands::group_by_level;
    use crate::core::Entity;

    fn find<'p>(placement: &'p Placement, id: &str) -> &'p LayoutNode {
        placement.nodes.iter().find(|n| n.id == id).unwrap()
    }

    #[test]
    fn test_orphans_then_clusters() {
        let config = SpacingConfig::default();
        let entities = vec![
            Entity::root("r", 0),
            Entity::child("a", 2, "r", 2),
            Entity::child("loose", 2, "nobody", 5),
            Entity::child("b", 2, "r", 1),
        ];
        let groups = group_by_level(&entities);
        let h = Hierarchy::build(&groups);
        let placement = place_initial(&h, &config);

        let loose = find(&placement, "loose");
        let b = find(&placement, "b");
        let a = find(&placement, "a");

        assert_eq!(loose.x, config.margin);
        assert_eq!(b.x, loose.right() + config.group_gap());
        assert_eq!(a.x, b.right() + config.sibling_gap());
        assert!(loose.x < b.x && b.x < a.x);
    }

    #[test]
    fn test_clusters_ordered_by_first_child_order() {
        let config = SpacingConfig::default();
        let entities = vec![
            Entity::root("p1", 0),
            Entity::root("p2", 1),
            Entity::child("late", 2, "p1", 7),
            Entity::child("early", 2, "p2", 3),
            Entity::child("later", 2, "p1", 8),
        ];
        let groups = group_by_level(&entities);
        let h = Hierarchy::build(&groups);
        let placement = place_initial(&h, &config);

        let early = find(&placement, "early");
        let late = find(&placement, "late");
        let later = find(&placement, "later");
        assert!(early.x < late.x);
        assert!(late.x < later.x);
        assert_eq!(late.x, early.right() + config.group_gap());
    }

    #[test]
    fn test_bands_stack_vertically() {
        let config = SpacingConfig::default();
        let entities = vec![
            Entity::root("r", 0),
            Entity::child("m", 2, "r", 1),
            Entity::child("l", 3, "m", 2),
        ];
        let groups = group_by_level(&entities);
        let h = Hierarchy::build(&groups);
        let placement = place_initial(&h, &config);

        assert_eq!(find(&placement, "r").y, config.margin);
        assert_eq!(find(&placement, "m").y, config.margin + config.band_pitch());
        assert_eq!(
            find(&placement, "l").y,
            config.margin + 2.0 * config.band_pitch()
        );
    }

    #[test]
    fn test_sequence_ranks_within_band() {
        let config = SpacingConfig::default();
        let entities = vec![
            Entity::root("r2", 1),
            Entity::root("r1", 0),
        ];
        let groups = group_by_level(&entities);
        let h = Hierarchy::build(&groups);
        let placement = place_initial(&h, &config);

        assert_eq!(placement.sequence, vec![1, 0]);
        assert!(find(&placement, "r1").x < find(&placement, "r2").x);
        assert_eq!(find(&placement, "r2").parent_id, None);
    }

    #[test]
    fn test_empty_band_keeps_cursor() {
        let config = SpacingConfig::default();
        let groups = group_by_level(&[]);
        let h = Hierarchy::build(&groups);
        let mut placement = place_initial(&h, &config);
        let band = Band {
            level: 4,
            slots: Vec::new(),
        };
        assert_eq!(place_band(&h, &band, 42.0, &config, &mut placement), 42.0);
    }
}
