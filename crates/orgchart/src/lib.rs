//! Orgchart - lay out organization charts from hierarchical records
//!
//! Each input record names an entity, its hierarchy level and its parent. The
//! layout engine turns those records into box positions, one horizontal band
//! per level, with every parent centered over its children, and orthogonal
//! connectors between them.
//!
//! # Quick Start
//!
//! ```rust
//! use orgchart::{layout, Entity};
//!
//! let chart = layout(&[
//!     Entity::root("ceo", 0),
//!     Entity::child("cto", 2, "ceo", 1),
//!     Entity::child("cfo", 2, "ceo", 2),
//! ])
//! .unwrap();
//!
//! let ceo = chart.node("ceo").unwrap();
//! let cto = chart.node("cto").unwrap();
//! let cfo = chart.node("cfo").unwrap();
//! assert_eq!(ceo.center_x(), (cto.x + cfo.right()) / 2.0);
//! assert_eq!(chart.connections.len(), 2);
//! ```
//!
//! # Advanced Usage
//!
//! ```rust
//! use orgchart::prelude::*;
//!
//! let database = OrgDatabase::from_json(r#"[
//!     {"id": "ceo", "level": 1},
//!     {"id": "ops", "level": "2", "parentId": "ceo"},
//!     {"id": "lost", "level": 2, "parentId": "nobody"}
//! ]"#).unwrap();
//!
//! let spacing = SpacingConfig { box_width: 120.0, ..SpacingConfig::default() };
//! let result = OrgChartLayoutAlgorithm::with_config(spacing)
//!     .layout(&database)
//!     .unwrap();
//!
//! assert_eq!(result.nodes.len(), 3);
//! assert_eq!(result.warnings.len(), 1);
//! ```

pub mod chart;
pub mod core;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chart::{LayoutCache, OrgChartLayoutAlgorithm, OrgDatabase};
    pub use crate::core::{
        Bounds, Connection, ConnectionKind, ConnectorConfig, Database, Entity, LayoutAlgorithm,
        LayoutNode, LayoutWarning, OrgChartError, OrgChartLayout, Point, Segment, SpacingConfig,
    };
}

/// Lay out entities with the default spacing
///
/// # Returns
/// * `Ok(OrgChartLayout)` - nodes, connections, bounds and any warnings
/// * `Err` - if no entity is valid ([`OrgChartError::EmptyInput`])
///
/// # Example
/// ```rust
/// use orgchart::{layout, Entity};
///
/// let chart = layout(&[Entity::root("a", 0), Entity::root("b", 1)]).unwrap();
/// assert!(chart.node("a").unwrap().x < chart.node("b").unwrap().x);
/// assert!(chart.connections.is_empty());
/// ```
pub fn layout(entities: &[Entity]) -> anyhow::Result<OrgChartLayout> {
    Ok(chart::OrgChartLayoutAlgorithm::new().compute_entities(entities)?)
}

/// Lay out a JSON array of entity records with the default spacing
///
/// # Example
/// ```rust
/// use orgchart::layout_json;
///
/// let chart = layout_json(r#"[{"id": "a", "level": 1}]"#).unwrap();
/// assert_eq!(chart.nodes.len(), 1);
/// ```
pub fn layout_json(input: &str) -> anyhow::Result<OrgChartLayout> {
    let database = chart::OrgDatabase::from_json(input)?;
    Ok(chart::OrgChartLayoutAlgorithm::new().compute(&database)?)
}
