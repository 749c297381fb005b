//! Memoization of the last computed layout
//!
//! The layout engine itself holds no state. [`LayoutCache`] wraps it and keeps
//! the most recent result, keyed by a hash of every input that affects the
//! output: each entity's id, level, parent and order, and every config value.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::debug;

use super::{OrgChartLayoutAlgorithm, OrgDatabase};
use crate::core::{ConnectorConfig, Entity, OrgChartError, OrgChartLayout, SpacingConfig};

/// Single-entry cache in front of [`OrgChartLayoutAlgorithm`]
#[derive(Debug, Default)]
pub struct LayoutCache {
    algorithm: OrgChartLayoutAlgorithm,
    last: Option<(u64, Arc<OrgChartLayout>)>,
    hits: usize,
    misses: usize,
}

impl LayoutCache {
    pub fn new(algorithm: OrgChartLayoutAlgorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Return the cached layout for `entities`, computing it if the input changed
    ///
    /// Errors are not cached.
    pub fn layout(&mut self, entities: &[Entity]) -> Result<Arc<OrgChartLayout>, OrgChartError> {
        let key = input_key(
            entities,
            self.algorithm.spacing(),
            self.algorithm.connectors(),
        );

        if let Some((cached_key, layout)) = &self.last {
            if *cached_key == key {
                self.hits += 1;
                debug!(key, "Layout cache hit");
                return Ok(Arc::clone(layout));
            }
        }

        self.misses += 1;
        debug!(key, "Layout cache miss");
        let database = OrgDatabase::from_entities(entities.iter().cloned());
        let layout = Arc::new(self.algorithm.compute(&database)?);
        self.last = Some((key, Arc::clone(&layout)));
        Ok(layout)
    }

    /// Replace the spacing; the next request recomputes
    pub fn set_spacing(&mut self, spacing: SpacingConfig) {
        if *self.algorithm.spacing() != spacing {
            self.algorithm = OrgChartLayoutAlgorithm::with_config(spacing)
                .with_connectors(*self.algorithm.connectors());
            self.invalidate();
        }
    }

    /// Replace the connector tuning; the next request recomputes
    pub fn set_connectors(&mut self, connectors: ConnectorConfig) {
        if *self.algorithm.connectors() != connectors {
            self.algorithm = self.algorithm.clone().with_connectors(connectors);
            self.invalidate();
        }
    }

    /// Drop the cached layout
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// Hash of everything a layout depends on
fn input_key(entities: &[Entity], spacing: &SpacingConfig, connectors: &ConnectorConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    entities.len().hash(&mut hasher);
    for entity in entities {
        entity.hash(&mut hasher);
    }
    for value in [
        spacing.box_width,
        spacing.box_height,
        spacing.horizontal_spacing,
        spacing.vertical_spacing,
        spacing.margin,
        connectors.bridge_bias,
        connectors.align_tolerance,
    ] {
        value.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}
