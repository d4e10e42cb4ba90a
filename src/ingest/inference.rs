//! Relationship inference between papers and events
//!
//! The default rule is lexical: a paper and an event are linked when both
//! canonical texts mention a marker from the same topic group. Matching is
//! a case-insensitive substring test, so it is coarse but deterministic and
//! symmetric in its inputs.

use crate::graph::RelationKind;

/// Decides whether a paper talks about an event
pub trait RelationInference: Send + Sync {
    fn infer(&self, paper_text: &str, event_text: &str) -> Option<RelationKind>;
}

/// A named set of interchangeable lexical markers
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerGroup {
    pub name: String,
    pub markers: Vec<String>,
}

impl MarkerGroup {
    pub fn new(name: &str, markers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            markers: markers.iter().map(|m| m.to_lowercase()).collect(),
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.markers.iter().any(|m| lowered.contains(m.as_str()))
    }
}

/// Marker co-occurrence rule producing `MENTIONS_EVENT`
#[derive(Debug, Clone)]
pub struct MarkerCooccurrence {
    groups: Vec<MarkerGroup>,
}

impl Default for MarkerCooccurrence {
    fn default() -> Self {
        Self::new(vec![
            MarkerGroup::new("heat", &["heat", "heatwave", "high temperature"]),
            MarkerGroup::new("flood", &["flood", "inundation", "storm surge"]),
            MarkerGroup::new("drought", &["drought", "water scarcity"]),
            MarkerGroup::new("wildfire", &["wildfire", "bushfire", "forest fire"]),
            MarkerGroup::new("storm", &["storm", "hurricane", "cyclone", "typhoon"]),
            MarkerGroup::new("grid", &["grid", "blackout", "power outage"]),
            MarkerGroup::new("cyber", &["cyber", "ransomware"]),
            MarkerGroup::new("trade", &["sanction", "tariff", "export control"]),
        ])
    }
}

impl MarkerCooccurrence {
    pub fn new(groups: Vec<MarkerGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[MarkerGroup] {
        &self.groups
    }
}

impl RelationInference for MarkerCooccurrence {
    fn infer(&self, paper_text: &str, event_text: &str) -> Option<RelationKind> {
        let paper = paper_text.to_lowercase();
        let event = event_text.to_lowercase();
        self.groups
            .iter()
            .any(|g| g.matches(&paper) && g.matches(&event))
            .then(RelationKind::mentions_event)
    }
}
