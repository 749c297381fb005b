//! Core layout trait for chart positioning

use anyhow::Result;

use super::Database;

/// Core trait for layout algorithms
///
/// A layout algorithm reads a database and produces positioned geometry.
///
/// # Example
/// ```
/// use orgchart::core::{Entity, LayoutAlgorithm};
/// use orgchart::chart::{OrgChartLayoutAlgorithm, OrgDatabase};
///
/// let db = OrgDatabase::from_entities(vec![Entity::root("ceo", 0)]);
/// let layout = OrgChartLayoutAlgorithm::new();
/// let positioned = layout.layout(&db).unwrap();
/// assert_eq!(positioned.nodes.len(), 1);
/// ```
pub trait LayoutAlgorithm<D: Database>: Send + Sync {
    /// The output type of this layout algorithm
    type Output;

    /// Arrange elements in the database using this layout algorithm
    fn layout(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this layout algorithm
    fn name(&self) -> &'static str;

    /// Get the version of this layout algorithm
    fn version(&self) -> &'static str;

    /// Get the layout direction (LR, TB, etc.)
    fn direction(&self) -> &'static str;
}
