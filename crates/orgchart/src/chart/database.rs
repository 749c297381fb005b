//! Org chart database implementation
//!
//! Stores entities in input order and derives reporting lines from their
//! parent references.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, span, warn, Level};

use crate::core::{Database, Entity, LayoutWarning, OrgChartError, ReportingLine};

/// Entity store backing one org chart
#[derive(Debug, Clone, Default)]
pub struct OrgDatabase {
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
    warnings: Vec<LayoutWarning>,
}

/// A record as it arrives from the loader, before its level is checked
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityRecord {
    id: String,
    #[serde(default)]
    level: serde_json::Value,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    order: Option<i64>,
}

impl OrgDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a database from already typed entities, keeping input order
    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut db = Self::new();
        for entity in entities {
            db.add_entity(entity);
        }
        db
    }

    /// Parse a JSON array of entity records
    ///
    /// Levels may be integers or numeric strings. Records with any other
    /// level are excluded with a warning instead of failing the whole load.
    pub fn from_json(input: &str) -> Result<Self, OrgChartError> {
        let load_span = span!(Level::DEBUG, "load_entities", input_len = input.len());
        let _enter = load_span.enter();

        let records: Vec<EntityRecord> = serde_json::from_str(input)?;
        let mut db = Self::new();

        for (position, record) in records.into_iter().enumerate() {
            let Some(level) = parse_level(&record.level) else {
                let level = match &record.level {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                warn!(entity_id = %record.id, %level, "Non-numeric level, excluding entity");
                db.warnings.push(LayoutWarning::InvalidLevel {
                    id: record.id,
                    level,
                });
                continue;
            };

            let parent_id = record
                .parent_id
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty());

            db.add_entity(Entity {
                id: record.id,
                level,
                parent_id,
                order: record.order.unwrap_or(position as i64),
            });
        }

        debug!(
            entity_count = db.entities.len(),
            warning_count = db.warnings.len(),
            "Loaded entities"
        );
        Ok(db)
    }

    /// Add an entity; a duplicate id is recorded as a warning and skipped
    pub fn add_entity(&mut self, entity: Entity) -> bool {
        if self.index.contains_key(&entity.id) {
            warn!(entity_id = %entity.id, "Duplicate entity id, excluding later record");
            self.warnings
                .push(LayoutWarning::DuplicateId { id: entity.id });
            return false;
        }
        self.index.insert(entity.id.clone(), self.entities.len());
        self.entities.push(entity);
        true
    }

    /// Entities in input order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Diagnostics collected while loading
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Direct reports of `id`, in input order
    pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Entity> {
        self.entities
            .iter()
            .filter(move |e| e.parent_id.as_deref() == Some(id))
    }
}

/// `i64::MAX + 1` as a float; integral floats at or past it do not fit
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Accept integers and integer strings such as `"2"`
///
/// Integral floats are accepted only inside the `i64` range, so that
/// `1e300` is rejected instead of saturating.
fn parse_level(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= -I64_LIMIT && *f < I64_LIMIT)
                .map(|f| f as i64)
        }),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl Database for OrgDatabase {
    type Node = Entity;
    type Edge = ReportingLine;

    fn add_node(&mut self, node: Entity) -> Result<()> {
        let id = node.id.clone();
        if self.add_entity(node) {
            Ok(())
        } else {
            Err(anyhow!("Entity '{}' already exists", id))
        }
    }

    fn get_node(&self, id: &str) -> Option<&Entity> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    fn nodes(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    fn edges(&self) -> impl Iterator<Item = ReportingLine> {
        self.entities.iter().filter_map(|e| {
            e.parent_id.as_ref().map(|parent| ReportingLine {
                parent_id: parent.clone(),
                child_id: e.id.clone(),
            })
        })
    }

    fn clear(&mut self) {
        self.entities.clear();
        self.index.clear();
        self.warnings.clear();
    }

    fn node_count(&self) -> usize {
        self.entities.len()
    }

    fn edge_count(&self) -> usize {
        self.entities.iter().filter(|e| e.parent_id.is_some()).count()
    }
}
