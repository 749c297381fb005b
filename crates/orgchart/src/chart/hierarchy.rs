//! Parent/child adjacency index
//!
//! Built once per layout in O(n). Every entity gets a slot; slots are numbered
//! band by band (ascending level) and in input order within a band. A parent
//! link is kept only when the parent exists and sits exactly one level up, so
//! every resolved edge joins two adjacent bands and the index is a forest.

use std::collections::HashMap;
use tracing::warn;

use super::bands::LevelGroups;
use crate::core::{Entity, LayoutWarning};

/// One horizontal row of the chart
#[derive(Debug, Clone)]
pub struct Band {
    pub level: i64,
    /// Slots in this band, in input order
    pub slots: Vec<usize>,
}

/// Adjacency index over the entities of one layout
#[derive(Debug)]
pub struct Hierarchy<'a> {
    entities: Vec<&'a Entity>,
    source_indices: Vec<usize>,
    band_of: Vec<usize>,
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    bands: Vec<Band>,
    warnings: Vec<LayoutWarning>,
}

impl<'a> Hierarchy<'a> {
    pub fn build(groups: &LevelGroups<'a>) -> Self {
        let total = groups.entity_count();
        let mut entities = Vec::with_capacity(total);
        let mut source_indices = Vec::with_capacity(total);
        let mut band_of = Vec::with_capacity(total);
        let mut bands = Vec::with_capacity(groups.bands.len());

        for (band_index, (&level, members)) in groups.bands.iter().enumerate() {
            let mut slots = Vec::with_capacity(members.len());
            for &(source_index, entity) in members {
                slots.push(entities.len());
                entities.push(entity);
                source_indices.push(source_index);
                band_of.push(band_index);
            }
            bands.push(Band { level, slots });
        }

        let mut by_id: HashMap<&str, usize> = HashMap::with_capacity(total);
        for (slot, entity) in entities.iter().enumerate() {
            by_id.entry(entity.id.as_str()).or_insert(slot);
        }

        let mut parent = vec![None; total];
        let mut children = vec![Vec::new(); total];
        let mut warnings = Vec::new();

        for (slot, entity) in entities.iter().enumerate() {
            let Some(parent_id) = entity.parent_id.as_deref() else {
                continue;
            };
            match by_id.get(parent_id) {
                None => {
                    warn!(entity_id = %entity.id, parent_id, "Unresolved parent, placing as orphan");
                    warnings.push(LayoutWarning::UnresolvedParent {
                        id: entity.id.clone(),
                        parent_id: parent_id.to_string(),
                    });
                }
                Some(&p) if entities[p].level != entity.level - 1 => {
                    warn!(
                        entity_id = %entity.id,
                        parent_id,
                        level = entity.level,
                        parent_level = entities[p].level,
                        "Parent is not one level up, placing as orphan"
                    );
                    warnings.push(LayoutWarning::ParentLevelMismatch {
                        id: entity.id.clone(),
                        parent_id: parent_id.to_string(),
                        level: entity.level,
                        parent_level: entities[p].level,
                    });
                }
                Some(&p) => {
                    parent[slot] = Some(p);
                    children[p].push(slot);
                }
            }
        }

        Self {
            entities,
            source_indices,
            band_of,
            parent,
            children,
            bands,
            warnings,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity(&self, slot: usize) -> &'a Entity {
        self.entities[slot]
    }

    /// Index of the slot's entity in the original input list
    pub fn source_index(&self, slot: usize) -> usize {
        self.source_indices[slot]
    }

    pub fn parent(&self, slot: usize) -> Option<usize> {
        self.parent[slot]
    }

    /// Direct children, in input order
    pub fn children(&self, slot: usize) -> &[usize] {
        &self.children[slot]
    }

    pub fn is_orphan(&self, slot: usize) -> bool {
        self.parent[slot].is_none()
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Position of the slot's band, 0 for the topmost band
    pub fn band_index(&self, slot: usize) -> usize {
        self.band_of[slot]
    }

    /// Diagnostics for parents that could not be resolved
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }
}
