//! Core type definitions for org chart layout
//!
//! Input records ([`Entity`]), the geometry produced by the layout engine
//! ([`LayoutNode`], [`Connection`], [`Bounds`]) and the diagnostics that
//! accompany it ([`LayoutWarning`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the source table: an entity, its hierarchy level and its parent
///
/// Entities are read-only to the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Unique, stable identifier
    pub id: String,
    /// Hierarchy depth; roots are level 1
    pub level: i64,
    /// Parent identifier, `None` for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Position in the source file, the only tie-breaker for sibling placement
    #[serde(default)]
    pub order: i64,
}

impl Entity {
    /// Create a root entity (level 1, no parent)
    pub fn root(id: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            level: 1,
            parent_id: None,
            order,
        }
    }

    /// Create an entity reporting to `parent_id`
    pub fn child(
        id: impl Into<String>,
        level: i64,
        parent_id: impl Into<String>,
        order: i64,
    ) -> Self {
        Self {
            id: id.into(),
            level,
            parent_id: Some(parent_id.into()),
            order,
        }
    }
}

/// A parent/child relationship implied by an entity's `parent_id`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReportingLine {
    pub parent_id: String,
    pub child_id: String,
}

/// A positioned box in layout space
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub id: String,
    /// Index of the source entity in the input list
    pub source_index: usize,
    pub level: i64,
    /// Top-left corner
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Resolved parent; `None` for roots and orphans
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub order: i64,
}

impl LayoutNode {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Midpoint of the bottom edge, where connectors leave a parent
    pub fn bottom_center(&self) -> Point {
        Point::new(self.center_x(), self.bottom())
    }

    /// Midpoint of the top edge, where connectors enter a child
    pub fn top_center(&self) -> Point {
        Point::new(self.center_x(), self.y)
    }

    /// Horizontal overlap test, touching edges do not overlap
    pub fn overlaps_horizontally(&self, other: &LayoutNode) -> bool {
        self.x < other.right() && other.x < self.right()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A straight connector piece
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).abs() + (self.end.y - self.start.y).abs()
    }
}

/// Connector geometry for one parent/child edge
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ConnectionKind {
    /// Single child in the parent's column
    Direct { segment: Segment },
    /// Single child offset from the parent: down, across, down
    Elbow {
        down: Segment,
        across: Segment,
        descend: Segment,
    },
    /// One of several children; `branch_down` and `bridge` are shared by all siblings
    #[serde(rename_all = "camelCase")]
    Branch {
        branch_down: Segment,
        bridge: Segment,
        descend: Segment,
    },
}

impl ConnectionKind {
    /// Segments in drawing order, from the parent towards the child
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            ConnectionKind::Direct { segment } => vec![*segment],
            ConnectionKind::Elbow {
                down,
                across,
                descend,
            } => vec![*down, *across, *descend],
            ConnectionKind::Branch {
                branch_down,
                bridge,
                descend,
            } => vec![*branch_down, *bridge, *descend],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConnectionKind::Direct { .. } => "direct",
            ConnectionKind::Elbow { .. } => "elbow",
            ConnectionKind::Branch { .. } => "branch",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub from_id: String,
    pub to_id: String,
    #[serde(flatten)]
    pub kind: ConnectionKind,
}

impl Connection {
    /// Point on the parent's bottom edge
    pub fn start(&self) -> Point {
        match &self.kind {
            ConnectionKind::Direct { segment } => segment.start,
            ConnectionKind::Elbow { down, .. } => down.start,
            ConnectionKind::Branch { branch_down, .. } => branch_down.start,
        }
    }

    /// Point on the child's top edge
    pub fn end(&self) -> Point {
        match &self.kind {
            ConnectionKind::Direct { segment } => segment.end,
            ConnectionKind::Elbow { descend, .. } => descend.end,
            ConnectionKind::Branch { descend, .. } => descend.end,
        }
    }

    pub fn segments(&self) -> Vec<Segment> {
        self.kind.segments()
    }
}

/// Bounding rectangle of all nodes, margin included
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

/// A recoverable data-quality problem found while laying out
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutWarning {
    /// Level is non-numeric or not positive; the entity is excluded
    InvalidLevel { id: String, level: String },
    /// A second entity with an existing id; the later one is excluded
    DuplicateId { id: String },
    /// Parent id does not name any valid entity; placed as an orphan
    #[serde(rename_all = "camelCase")]
    UnresolvedParent { id: String, parent_id: String },
    /// Parent exists but is not exactly one level up; placed as an orphan
    #[serde(rename_all = "camelCase")]
    ParentLevelMismatch {
        id: String,
        parent_id: String,
        level: i64,
        parent_level: i64,
    },
    /// Connector endpoints could not be resolved; edge is not drawn
    #[serde(rename_all = "camelCase")]
    DroppedConnection { from_id: String, to_id: String },
}

impl LayoutWarning {
    /// Id of the entity the warning is about
    pub fn entity_id(&self) -> &str {
        match self {
            LayoutWarning::InvalidLevel { id, .. }
            | LayoutWarning::DuplicateId { id }
            | LayoutWarning::UnresolvedParent { id, .. }
            | LayoutWarning::ParentLevelMismatch { id, .. } => id,
            LayoutWarning::DroppedConnection { to_id, .. } => to_id,
        }
    }

    /// True when the entity was left out of the layout entirely
    pub fn is_exclusion(&self) -> bool {
        matches!(
            self,
            LayoutWarning::InvalidLevel { .. } | LayoutWarning::DuplicateId { .. }
        )
    }
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::InvalidLevel { id, level } => {
                write!(f, "entity '{}' has invalid level '{}', excluded", id, level)
            }
            LayoutWarning::DuplicateId { id } => {
                write!(f, "duplicate entity id '{}', later record excluded", id)
            }
            LayoutWarning::UnresolvedParent { id, parent_id } => write!(
                f,
                "entity '{}' references unknown parent '{}', placed as orphan",
                id, parent_id
            ),
            LayoutWarning::ParentLevelMismatch {
                id,
                parent_id,
                level,
                parent_level,
            } => write!(
                f,
                "entity '{}' (level {}) has parent '{}' at level {}, placed as orphan",
                id, level, parent_id, parent_level
            ),
            LayoutWarning::DroppedConnection { from_id, to_id } => write!(
                f,
                "connection '{}' -> '{}' has unresolved endpoints, dropped",
                from_id, to_id
            ),
        }
    }
}

/// Complete output of one layout request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgChartLayout {
    pub nodes: Vec<LayoutNode>,
    pub connections: Vec<Connection>,
    pub bounds: Bounds,
    pub warnings: Vec<LayoutWarning>,
}

impl OrgChartLayout {
    pub fn node(&self, id: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Connections whose parent is `id`, left to right
    pub fn connections_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Connection> {
        self.connections.iter().filter(move |c| c.from_id == id)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
