//! Property tests over randomly shaped forests

use std::collections::BTreeMap;

use orgchart::chart::bands::group_by_level;
use orgchart::chart::centering::center_band;
use orgchart::chart::hierarchy::Hierarchy;
use orgchart::chart::overlap::resolve_band;
use orgchart::chart::positioning::place_initial;
use orgchart::prelude::*;
use proptest::prelude::*;

const EPS: f64 = 1e-6;

/// Valid forests: every node either starts a new tree or reports to an earlier node
fn forest() -> impl Strategy<Value = Vec<Entity>> {
    prop::collection::vec(
        (any::<bool>(), any::<prop::sample::Index>(), 0i64..50),
        1..40,
    )
    .prop_map(|specs| {
        let mut entities: Vec<Entity> = Vec::with_capacity(specs.len());
        for (i, (is_root, parent, order)) in specs.into_iter().enumerate() {
            let id = format!("n{}", i);
            if i == 0 || is_root {
                entities.push(Entity {
                    id,
                    level: 1,
                    parent_id: None,
                    order,
                });
            } else {
                let parent = &entities[parent.index(i)];
                let level = parent.level + 1;
                let parent_id = parent.id.clone();
                entities.push(Entity::child(id, level, parent_id, order));
            }
        }
        entities
    })
}

fn by_level(nodes: &[LayoutNode]) -> BTreeMap<i64, Vec<&LayoutNode>> {
    let mut bands: BTreeMap<i64, Vec<&LayoutNode>> = BTreeMap::new();
    for node in nodes {
        bands.entry(node.level).or_default().push(node);
    }
    bands
}

/// Blocks (orphans and clusters) of a band, ordered by their leftmost member
///
/// Members at the same X are ordered by initial rank, as the resolver does.
fn block_order(nodes: &[LayoutNode], sequence: &[usize], slots: &[usize]) -> Vec<String> {
    let mut lefts: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for &slot in slots {
        let node = &nodes[slot];
        let key = match &node.parent_id {
            Some(parent) => format!("cluster:{}", parent),
            None => format!("orphan:{}", node.id),
        };
        let candidate = (node.x, sequence[slot]);
        lefts
            .entry(key)
            .and_modify(|left| {
                if candidate.0.total_cmp(&left.0).then(candidate.1.cmp(&left.1)).is_lt() {
                    *left = candidate;
                }
            })
            .or_insert(candidate);
    }
    let mut blocks: Vec<(String, (f64, usize))> = lefts.into_iter().collect();
    blocks.sort_by(|(_, (ax, aseq)), (_, (bx, bseq))| ax.total_cmp(bx).then(aseq.cmp(bseq)));
    blocks.into_iter().map(|(key, _)| key).collect()
}

/// Slots of a band sorted left to right, ties by initial rank
fn left_to_right(nodes: &[LayoutNode], sequence: &[usize], slots: &[usize]) -> Vec<usize> {
    let mut sorted = slots.to_vec();
    sorted.sort_by(|&a, &b| nodes[a].x.total_cmp(&nodes[b].x).then(sequence[a].cmp(&sequence[b])));
    sorted
}

proptest! {
    #[test]
    fn no_overlap_within_bands(entities in forest()) {
        let config = SpacingConfig::default();
        let result = OrgChartLayoutAlgorithm::new().compute_entities(&entities).unwrap();
        prop_assert_eq!(result.nodes.len(), entities.len());

        for band in by_level(&result.nodes).values() {
            let mut sorted = band.clone();
            sorted.sort_by(|a, b| a.x.total_cmp(&b.x));
            for pair in sorted.windows(2) {
                prop_assert!(
                    pair[0].right() + config.min_spacing() <= pair[1].x + EPS,
                    "{} and {} overlap", pair[0].id, pair[1].id
                );
            }
            for node in band {
                prop_assert!(node.x >= config.margin - EPS);
            }
        }
    }

    #[test]
    fn y_and_height_depend_only_on_level(entities in forest()) {
        let result = OrgChartLayoutAlgorithm::new().compute_entities(&entities).unwrap();
        let mut previous_y = f64::NEG_INFINITY;
        for band in by_level(&result.nodes).values() {
            let (y, height) = (band[0].y, band[0].height);
            for node in band {
                prop_assert_eq!(node.y, y);
                prop_assert_eq!(node.height, height);
            }
            prop_assert!(y > previous_y);
            previous_y = y;
        }
    }

    #[test]
    fn layout_is_idempotent(entities in forest()) {
        let algorithm = OrgChartLayoutAlgorithm::new();
        let first = serde_json::to_string(&algorithm.compute_entities(&entities).unwrap()).unwrap();
        let second = serde_json::to_string(&algorithm.compute_entities(&entities).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn connectors_join_parent_bottom_to_child_top(entities in forest()) {
        let result = OrgChartLayoutAlgorithm::new().compute_entities(&entities).unwrap();
        let edge_count = entities.iter().filter(|e| e.parent_id.is_some()).count();
        prop_assert_eq!(result.connections.len(), edge_count);
        prop_assert!(result.warnings.is_empty());

        for conn in &result.connections {
            let parent = result.node(&conn.from_id).unwrap();
            let child = result.node(&conn.to_id).unwrap();

            prop_assert_eq!(conn.start(), parent.bottom_center());
            prop_assert_eq!(conn.end().y, child.y);
            prop_assert!(conn.end().x >= child.x && conn.end().x <= child.right());

            for segment in conn.segments() {
                prop_assert!(segment.is_vertical() || segment.is_horizontal());
            }

            if let ConnectionKind::Branch { branch_down, bridge, descend } = conn.kind {
                prop_assert_eq!(branch_down.end.y, bridge.start.y);
                prop_assert!(bridge.start.x <= branch_down.end.x && branch_down.end.x <= bridge.end.x);
                prop_assert_eq!(descend.start.y, bridge.start.y);
                prop_assert!(bridge.start.x <= descend.start.x && descend.start.x <= bridge.end.x);
            }
        }
    }

    #[test]
    fn centering_then_resolution_keeps_block_order(entities in forest()) {
        let config = SpacingConfig::default();
        let groups = group_by_level(&entities);
        let hierarchy = Hierarchy::build(&groups);
        let mut placement = place_initial(&hierarchy, &config);

        for band in hierarchy.bands().iter().rev() {
            center_band(&hierarchy, band, &mut placement.nodes);

            for &slot in &band.slots {
                let children = hierarchy.children(slot);
                if children.is_empty() {
                    continue;
                }
                let left = children.iter().map(|&c| placement.nodes[c].x).fold(f64::INFINITY, f64::min);
                let right = children.iter().map(|&c| placement.nodes[c].right()).fold(f64::NEG_INFINITY, f64::max);
                prop_assert!((placement.nodes[slot].center_x() - (left + right) / 2.0).abs() < EPS);
            }

            let before_x: Vec<f64> = band.slots.iter().map(|&s| placement.nodes[s].x).collect();
            let before = block_order(&placement.nodes, &placement.sequence, &band.slots);
            resolve_band(
                &hierarchy,
                band,
                &mut placement.nodes,
                &placement.sequence,
                config.margin,
                config.min_spacing(),
            );
            let after = block_order(&placement.nodes, &placement.sequence, &band.slots);
            prop_assert_eq!(before, after);

            for (&slot, x) in band.slots.iter().zip(before_x) {
                prop_assert!(placement.nodes[slot].x >= x - EPS, "node moved left");
            }
        }
    }

    #[test]
    fn deepest_band_keeps_initial_order(entities in forest()) {
        let config = SpacingConfig::default();
        let groups = group_by_level(&entities);
        let hierarchy = Hierarchy::build(&groups);
        let mut placement = place_initial(&hierarchy, &config);

        // Nothing in the deepest band has children, so centering leaves it alone
        let deepest = &hierarchy.bands()[hierarchy.bands().len() - 1];
        let mut initial = deepest.slots.clone();
        initial.sort_by_key(|&slot| placement.sequence[slot]);

        center_band(&hierarchy, deepest, &mut placement.nodes);
        resolve_band(
            &hierarchy,
            deepest,
            &mut placement.nodes,
            &placement.sequence,
            config.margin,
            config.min_spacing(),
        );

        let settled = left_to_right(&placement.nodes, &placement.sequence, &deepest.slots);
        prop_assert_eq!(settled, initial);
    }
}
