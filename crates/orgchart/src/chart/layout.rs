//! Org chart layout implementation
//!
//! Runs the layout pipeline: level grouping, adjacency index, initial
//! placement, then a bottom-up pass that centers each band's parents and
//! resolves the overlaps that centering introduced, one band at a time.
//! Connectors and bounds are computed from the final positions.
//!
//! The bottom-up pass is a plain loop over bands sorted by descending level,
//! so a band is always settled before the band above reads it.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::bands::group_by_level;
use super::bounds::compute_bounds;
use super::centering::center_band;
use super::hierarchy::Hierarchy;
use super::overlap::resolve_band;
use super::positioning::place_initial;
use super::routing::route_connections;
use super::OrgDatabase;
use crate::core::{
    ConnectorConfig, Database, Entity, LayoutAlgorithm, LayoutNode, OrgChartError,
    OrgChartLayout, SpacingConfig,
};

/// Org chart layout algorithm
#[derive(Debug, Clone, Default)]
pub struct OrgChartLayoutAlgorithm {
    spacing: SpacingConfig,
    connectors: ConnectorConfig,
}

impl OrgChartLayoutAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(spacing: SpacingConfig) -> Self {
        Self {
            spacing,
            connectors: ConnectorConfig::default(),
        }
    }

    pub fn with_connectors(mut self, connectors: ConnectorConfig) -> Self {
        self.connectors = connectors;
        self
    }

    pub fn spacing(&self) -> &SpacingConfig {
        &self.spacing
    }

    pub fn connectors(&self) -> &ConnectorConfig {
        &self.connectors
    }

    /// Lay out a slice of entities directly
    pub fn compute_entities(&self, entities: &[Entity]) -> Result<OrgChartLayout, OrgChartError> {
        self.compute(&OrgDatabase::from_entities(entities.iter().cloned()))
    }

    /// Lay out every entity in `database`
    ///
    /// Fails only when the configuration is invalid or no entity survives
    /// validation; everything else is reported through the result's warnings.
    pub fn compute(&self, database: &OrgDatabase) -> Result<OrgChartLayout, OrgChartError> {
        let layout_span = span!(
            Level::INFO,
            "layout_orgchart",
            entity_count = database.node_count(),
            edge_count = database.edge_count()
        );
        let _enter = layout_span.enter();

        trace!("Starting org chart layout");

        self.spacing.validate()?;
        self.connectors.validate()?;

        let mut warnings = database.warnings().to_vec();

        let groups = group_by_level(database.entities());
        warnings.extend(groups.warnings.iter().cloned());
        if groups.is_empty() {
            debug!(rejected = warnings.len(), "No valid entities");
            return Err(OrgChartError::empty_input(warnings));
        }

        let hierarchy = Hierarchy::build(&groups);
        warnings.extend(hierarchy.warnings().iter().cloned());

        let placement_span = span!(Level::DEBUG, "initial_placement", bands = hierarchy.bands().len());
        let placement_enter = placement_span.enter();
        let mut placement = place_initial(&hierarchy, &self.spacing);
        drop(placement_enter);

        let settle_span = span!(Level::DEBUG, "center_and_resolve");
        let settle_enter = settle_span.enter();
        for band in hierarchy.bands().iter().rev() {
            let centered = center_band(&hierarchy, band, &mut placement.nodes);
            let stats = resolve_band(
                &hierarchy,
                band,
                &mut placement.nodes,
                &placement.sequence,
                self.spacing.margin,
                self.spacing.min_spacing(),
            );
            debug!(
                level = band.level,
                centered,
                shifted = stats.shifted_blocks,
                "Settled band"
            );
        }
        drop(settle_enter);

        let nodes = ordered_nodes(&hierarchy, placement.nodes, &placement.sequence);

        let routed = route_connections(&nodes, &self.connectors);
        warnings.extend(routed.warnings);

        let bounds = compute_bounds(&nodes, self.spacing.margin);

        info!(
            node_count = nodes.len(),
            connection_count = routed.connections.len(),
            warning_count = warnings.len(),
            width = bounds.width,
            height = bounds.height,
            "Org chart layout completed"
        );

        Ok(OrgChartLayout {
            nodes,
            connections: routed.connections,
            bounds,
            warnings,
        })
    }
}

/// Nodes band by band, left to right within a band
fn ordered_nodes(hierarchy: &Hierarchy, nodes: Vec<LayoutNode>, sequence: &[usize]) -> Vec<LayoutNode> {
    let mut keyed: Vec<(usize, usize, LayoutNode)> = nodes
        .into_iter()
        .enumerate()
        .map(|(slot, node)| (hierarchy.band_index(slot), sequence[slot], node))
        .collect();
    keyed.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.2.x.total_cmp(&b.2.x))
            .then(a.1.cmp(&b.1))
    });
    keyed.into_iter().map(|(_, _, node)| node).collect()
}

impl LayoutAlgorithm<OrgDatabase> for OrgChartLayoutAlgorithm {
    type Output = OrgChartLayout;

    fn layout(&self, database: &OrgDatabase) -> Result<Self::Output> {
        Ok(self.compute(database)?)
    }

    fn name(&self) -> &'static str {
        "banded-tree"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn direction(&self) -> &'static str {
        "top-down"
    }
}
