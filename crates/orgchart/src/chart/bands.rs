//! Level grouping
//!
//! Partitions entities into bands, one per hierarchy level, ordered by
//! ascending level.

use std::collections::BTreeMap;
use tracing::warn;

use crate::core::{Entity, LayoutWarning};

/// Entities partitioned by level
#[derive(Debug, Default)]
pub struct LevelGroups<'a> {
    /// Ascending level order; entities keep their input order within a band.
    /// Each entry pairs the entity with its index in the input list.
    pub bands: BTreeMap<i64, Vec<(usize, &'a Entity)>>,
    /// Entities rejected for a non-positive level
    pub warnings: Vec<LayoutWarning>,
}

impl LevelGroups<'_> {
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn entity_count(&self) -> usize {
        self.bands.values().map(Vec::len).sum()
    }

    pub fn levels(&self) -> impl DoubleEndedIterator<Item = i64> + '_ {
        self.bands.keys().copied()
    }
}

/// Group entities by level, excluding those whose level is not positive
pub fn group_by_level(entities: &[Entity]) -> LevelGroups<'_> {
    let mut groups = LevelGroups::default();

    for (index, entity) in entities.iter().enumerate() {
        if entity.level < 1 {
            warn!(entity_id = %entity.id, level = entity.level, "Non-positive level, excluding entity");
            groups.warnings.push(LayoutWarning::InvalidLevel {
                id: entity.id.clone(),
                level: entity.level.to_string(),
            });
            continue;
        }
        groups
            .bands
            .entry(entity.level)
            .or_default()
            .push((index, entity));
    }

    groups
}
