//! Degree centrality and composite risk scoring
//!
//! The snapshot is a pure function of the store: it is rebuilt from scratch
//! on every graph change and never patched in place.

use super::build_view;
use crate::graph::{Entity, EntityId, EntityKind, GraphStore};
use indexmap::IndexMap;
use riskgraph_algorithms::{degree_centrality, NodeId as AlgoNodeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weight configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightsError {
    #[error("Weight {name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("Severity and centrality weights must sum to 1.0, got {0}")]
    NotNormalized(f64),

    #[error("Default risk {name} must lie in [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
}

/// Blend weights and base-risk defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    /// Weight of the intrinsic (severity-based) risk
    pub severity_weight: f64,
    /// Weight of the normalized degree centrality
    pub centrality_weight: f64,
    /// Base risk for an Event without severity
    pub default_event_severity: f64,
    /// Base risk for every non-Event entity
    pub default_base_risk: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            severity_weight: 0.5,
            centrality_weight: 0.5,
            default_event_severity: 0.5,
            default_base_risk: 0.3,
        }
    }
}

impl RiskWeights {
    /// Check that every risk score stays within [0, 1]
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, value) in [
            ("severity_weight", self.severity_weight),
            ("centrality_weight", self.centrality_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(WeightsError::Negative { name, value });
            }
        }
        let sum = self.severity_weight + self.centrality_weight;
        if (sum - 1.0).abs() > 1e-9 {
            return Err(WeightsError::NotNormalized(sum));
        }
        for (name, value) in [
            ("default_event_severity", self.default_event_severity),
            ("default_base_risk", self.default_base_risk),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(WeightsError::OutOfRange { name, value });
            }
        }
        Ok(())
    }

    /// Intrinsic risk of an entity
    pub fn base_risk(&self, entity: &Entity) -> f64 {
        match entity.kind() {
            EntityKind::Event => match entity.attributes.severity {
                Some(severity) if severity.is_finite() => severity.clamp(0.0, 1.0),
                _ => self.default_event_severity,
            },
            _ => self.default_base_risk,
        }
    }

    /// Blend intrinsic risk and structural connectivity
    ///
    /// Centrality above 1.0 (parallel edges, self-loops) is capped.
    pub fn risk_score(&self, base_risk: f64, degree_centrality: f64) -> f64 {
        self.severity_weight * base_risk + self.centrality_weight * degree_centrality.min(1.0)
    }
}

/// Metrics for a single entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntityMetrics {
    pub degree: usize,
    pub degree_centrality: f64,
    pub risk_score: f64,
}

/// Metrics for every entity, in entity insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricSnapshot {
    entries: IndexMap<EntityId, EntityMetrics>,
}

impl MetricSnapshot {
    pub fn get(&self, id: &EntityId) -> Option<&EntityMetrics> {
        self.entries.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityId, &EntityMetrics)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The `n` riskiest entities, highest first; ties keep insertion order
    pub fn ranked_by_risk(&self, n: usize) -> Vec<(&EntityId, &EntityMetrics)> {
        let mut ranked: Vec<_> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.1.risk_score.total_cmp(&a.1.risk_score));
        ranked.truncate(n);
        ranked
    }
}

/// Recompute the full metric snapshot from the current graph
pub fn compute_snapshot(store: &GraphStore, weights: &RiskWeights) -> MetricSnapshot {
    if store.entity_count() == 0 {
        return MetricSnapshot::default();
    }

    let view = build_view(store);
    let degrees = degree_centrality(&view);

    let entries = store
        .list_entities()
        .enumerate()
        .map(|(idx, entity)| {
            let node = idx as AlgoNodeId;
            let centrality = degrees.centrality.get(&node).copied().unwrap_or(0.0);
            let metrics = EntityMetrics {
                degree: degrees.degree.get(&node).copied().unwrap_or(0),
                degree_centrality: centrality,
                risk_score: weights.risk_score(weights.base_risk(entity), centrality),
            };
            (entity.id.clone(), metrics)
        })
        .collect();

    MetricSnapshot { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EntityAttributes, RelationKind};

    fn event(ext: &str) -> EntityId {
        EntityId::new(EntityKind::Event, ext)
    }

    fn location(ext: &str) -> EntityId {
        EntityId::new(EntityKind::Location, ext)
    }

    #[test]
    fn test_single_event_scenario() {
        let mut store = GraphStore::new();
        store.upsert_entity(event("event"), EntityAttributes::new().with_severity(0.9));
        store.upsert_entity(location("X"), EntityAttributes::new().with_name("X"));
        store.add_relationship(event("event"), location("X"), RelationKind::OCCURS_IN);

        let snapshot = compute_snapshot(&store, &RiskWeights::default());
        let m = snapshot.get(&event("event")).unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(m.degree, 1);
        assert!((m.degree_centrality - 1.0).abs() < 1e-12);
        assert!((m.risk_score - 0.95).abs() < 1e-12);

        let loc = snapshot.get(&location("X")).unwrap();
        assert!((loc.risk_score - (0.5 * 0.3 + 0.5 * 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_base_risk_defaults() {
        let weights = RiskWeights::default();
        let no_severity = Entity::new(event("e"), EntityAttributes::new());
        let paper = Entity::new(EntityId::new(EntityKind::Paper, "p"), EntityAttributes::new());
        let out_of_range = Entity::new(event("e"), EntityAttributes::new().with_severity(1.7));
        let nan = Entity::new(event("e"), EntityAttributes::new().with_severity(f64::NAN));

        assert_eq!(weights.base_risk(&no_severity), 0.5);
        assert_eq!(weights.base_risk(&paper), 0.3);
        assert_eq!(weights.base_risk(&out_of_range), 1.0);
        assert_eq!(weights.base_risk(&nan), 0.5);
    }

    #[test]
    fn test_empty_graph_yields_empty_snapshot() {
        let snapshot = compute_snapshot(&GraphStore::new(), &RiskWeights::default());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_isolated_single_entity() {
        let mut store = GraphStore::new();
        store.upsert_entity(event("alone"), EntityAttributes::new().with_severity(0.2));
        let snapshot = compute_snapshot(&store, &RiskWeights::default());
        let m = snapshot.get(&event("alone")).unwrap();
        assert_eq!(m.degree, 0);
        assert_eq!(m.degree_centrality, 0.0);
        assert!((m.risk_score - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_duplicates_cap_risk_at_one() {
        let mut store = GraphStore::new();
        store.upsert_entity(event("e"), EntityAttributes::new().with_severity(1.0));
        store.upsert_entity(location("X"), EntityAttributes::new());
        for _ in 0..3 {
            store.add_relationship(event("e"), location("X"), RelationKind::OCCURS_IN);
        }

        let snapshot = compute_snapshot(&store, &RiskWeights::default());
        let m = snapshot.get(&event("e")).unwrap();
        assert_eq!(m.degree, 3);
        assert!((m.degree_centrality - 3.0).abs() < 1e-12);
        assert!(m.risk_score <= 1.0);
    }

    #[test]
    fn test_snapshot_independent_of_insertion_order() {
        let mut a = GraphStore::new();
        a.upsert_entity(event("1"), EntityAttributes::new().with_severity(0.7));
        a.upsert_entity(location("X"), EntityAttributes::new());
        a.upsert_entity(event("2"), EntityAttributes::new());
        a.add_relationship(event("1"), location("X"), RelationKind::OCCURS_IN);
        a.add_relationship(event("2"), location("X"), RelationKind::OCCURS_IN);

        let mut b = GraphStore::new();
        b.upsert_entity(event("2"), EntityAttributes::new());
        b.upsert_entity(location("X"), EntityAttributes::new());
        b.upsert_entity(event("1"), EntityAttributes::new().with_severity(0.7));
        b.add_relationship(event("2"), location("X"), RelationKind::OCCURS_IN);
        b.add_relationship(event("1"), location("X"), RelationKind::OCCURS_IN);

        let weights = RiskWeights::default();
        let sa = compute_snapshot(&a, &weights);
        let sb = compute_snapshot(&b, &weights);
        for (id, metrics) in sa.iter() {
            assert_eq!(sb.get(id), Some(metrics));
        }
    }

    #[test]
    fn test_ranked_by_risk() {
        let mut store = GraphStore::new();
        store.upsert_entity(event("low"), EntityAttributes::new().with_severity(0.1));
        store.upsert_entity(event("high"), EntityAttributes::new().with_severity(0.9));
        let snapshot = compute_snapshot(&store, &RiskWeights::default());

        let ranked = snapshot.ranked_by_risk(1);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].0, &event("high"));
    }

    #[test]
    fn test_weight_validation() {
        assert!(RiskWeights::default().validate().is_ok());

        let skewed = RiskWeights {
            severity_weight: 0.7,
            centrality_weight: 0.7,
            ..Default::default()
        };
        assert!(matches!(skewed.validate(), Err(WeightsError::NotNormalized(_))));

        let negative = RiskWeights {
            severity_weight: -0.5,
            centrality_weight: 1.5,
            ..Default::default()
        };
        assert!(matches!(negative.validate(), Err(WeightsError::Negative { .. })));

        let bad_default = RiskWeights {
            default_base_risk: 1.2,
            ..Default::default()
        };
        assert!(matches!(bad_default.validate(), Err(WeightsError::OutOfRange { .. })));
    }
}
