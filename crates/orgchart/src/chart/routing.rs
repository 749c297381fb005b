//! Connection routing
//!
//! Produces orthogonal connectors from final node positions. A parent with a
//! single child gets a direct or elbow connector; a parent with several
//! children gets one shared vertical drop to a horizontal bridge, and one
//! vertical descent per child.

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::core::{
    Connection, ConnectionKind, ConnectorConfig, LayoutNode, LayoutWarning, Point, Segment,
};

/// Connectors plus the edges that could not be routed
#[derive(Debug, Default)]
pub struct RoutedConnections {
    pub connections: Vec<Connection>,
    pub warnings: Vec<LayoutWarning>,
}

/// Route every parent/child edge found through `parent_id`
///
/// Parents are visited in node order and their children left to right, so the
/// output is deterministic for a given node list.
pub fn route_connections(nodes: &[LayoutNode], config: &ConnectorConfig) -> RoutedConnections {
    let mut routed = RoutedConnections::default();

    let by_id: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect();

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (index, node) in nodes.iter().enumerate() {
        let Some(parent_id) = node.parent_id.as_deref() else {
            continue;
        };
        match by_id.get(parent_id) {
            Some(&parent) if parent != index => children_of[parent].push(index),
            _ => {
                warn!(from_id = parent_id, to_id = %node.id, "Dropping connection with unresolved endpoint");
                routed.warnings.push(LayoutWarning::DroppedConnection {
                    from_id: parent_id.to_string(),
                    to_id: node.id.clone(),
                });
            }
        }
    }

    for (parent_index, children) in children_of.iter_mut().enumerate() {
        if children.is_empty() {
            continue;
        }
        children.sort_by(|&a, &b| nodes[a].x.total_cmp(&nodes[b].x));
        let parent = &nodes[parent_index];
        let kids: Vec<&LayoutNode> = children.iter().map(|&c| &nodes[c]).collect();
        route_parent(parent, &kids, config, &mut routed.connections);
    }

    debug!(
        connection_count = routed.connections.len(),
        dropped = routed.warnings.len(),
        "Routed connections"
    );
    routed
}

/// Route one parent to its children, which must be sorted left to right
fn route_parent(
    parent: &LayoutNode,
    children: &[&LayoutNode],
    config: &ConnectorConfig,
    out: &mut Vec<Connection>,
) {
    let start = parent.bottom_center();

    if let [child] = children {
        out.push(Connection {
            from_id: parent.id.clone(),
            to_id: child.id.clone(),
            kind: single_child(start, child, config),
        });
        return;
    }

    // All children share one band, so one top edge
    let children_top = children
        .iter()
        .map(|c| c.y)
        .fold(f64::INFINITY, f64::min);
    let bridge_y = start.y + (children_top - start.y) * config.bridge_bias;

    // Widen the bridge to the parent column if the parent was pushed past it
    let first = children[0].center_x();
    let last = children[children.len() - 1].center_x();
    let bridge_left = first.min(start.x);
    let bridge_right = last.max(start.x);

    let branch_down = Segment::new(start, Point::new(start.x, bridge_y));
    let bridge = Segment::new(
        Point::new(bridge_left, bridge_y),
        Point::new(bridge_right, bridge_y),
    );

    for child in children {
        let column = child.center_x();
        out.push(Connection {
            from_id: parent.id.clone(),
            to_id: child.id.clone(),
            kind: ConnectionKind::Branch {
                branch_down,
                bridge,
                descend: Segment::new(Point::new(column, bridge_y), child.top_center()),
            },
        });
    }
}

fn single_child(start: Point, child: &LayoutNode, config: &ConnectorConfig) -> ConnectionKind {
    let end = child.top_center();

    if (start.x - end.x).abs() < config.align_tolerance
        && start.x >= child.x
        && start.x <= child.right()
    {
        // Stay in the parent's column; it still lands on the child's top edge
        return ConnectionKind::Direct {
            segment: Segment::new(start, Point::new(start.x, end.y)),
        };
    }

    let mid_y = start.y + (end.y - start.y) / 2.0;
    ConnectionKind::Elbow {
        down: Segment::new(start, Point::new(start.x, mid_y)),
        across: Segment::new(Point::new(start.x, mid_y), Point::new(end.x, mid_y)),
        descend: Segment::new(Point::new(end.x, mid_y), end),
    }
}
