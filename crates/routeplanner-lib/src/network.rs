use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;

use crate::error::{Error, Result};
use crate::graph::{EdgeWeights, Graph, NodeIndex};

/// Numeric identifier for a location.
pub type LocationId = i64;

/// Minimum similarity score for a location to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// A named place in the road network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub id: LocationId,
    pub code: String,
    pub can_park: bool,
}

/// How locations are named on input and in rendered routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelMode {
    #[default]
    Id,
    Code,
    Name,
}

impl LabelMode {
    pub fn label(self, location: &Location) -> String {
        match self {
            LabelMode::Id => location.id.to_string(),
            LabelMode::Code => location.code.clone(),
            LabelMode::Name => location.name.clone(),
        }
    }
}

/// Travel times for a road segment between two locations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteTimes {
    /// `None` when the segment cannot be driven.
    pub driving: Option<f64>,
    pub walking: f64,
}

/// In-memory road network: a routing graph keyed by location code plus the
/// location attributes for every node.
#[derive(Debug, Clone, Default)]
pub struct RouteNetwork {
    graph: Graph<String>,
    locations: HashMap<String, Location>,
    codes_by_id: HashMap<LocationId, String>,
}

impl RouteNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location. Returns `false` when its code or id is taken.
    pub fn add_location(&mut self, mut location: Location) -> bool {
        location.code = normalize_code(&location.code);
        if self.codes_by_id.contains_key(&location.id)
            || !self.graph.add_node(location.code.clone())
        {
            return false;
        }
        self.codes_by_id.insert(location.id, location.code.clone());
        self.locations.insert(location.code.clone(), location);
        true
    }

    /// Connect two locations in both directions with the same travel times.
    pub fn add_route(&mut self, origin_code: &str, dest_code: &str, times: RouteTimes) -> bool {
        let weights = EdgeWeights::new(times.walking, times.driving);
        self.graph.add_bidirectional_edge(
            &normalize_code(origin_code),
            &normalize_code(dest_code),
            weights,
        )
    }

    /// Remove a location and every route touching it.
    pub fn remove_location(&mut self, code: &str) -> Option<Location> {
        let code = normalize_code(code);
        let location = self.locations.remove(&code)?;
        self.codes_by_id.remove(&location.id);
        self.graph.remove_node(&code);
        Some(location)
    }

    pub fn graph(&self) -> &Graph<String> {
        &self.graph
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Lookup a location by code, ignoring ASCII case.
    pub fn location_by_code(&self, code: &str) -> Option<&Location> {
        self.locations.get(&normalize_code(code))
    }

    pub fn location_by_id(&self, id: LocationId) -> Option<&Location> {
        self.codes_by_id
            .get(&id)
            .and_then(|code| self.locations.get(code))
    }

    /// Lookup a location by its display name, ignoring case.
    pub fn location_by_name(&self, name: &str) -> Option<&Location> {
        let wanted = name.to_lowercase();
        self.locations
            .values()
            .find(|location| location.name.to_lowercase() == wanted)
    }

    /// Location stored at a graph node.
    pub fn location_at(&self, node: NodeIndex) -> Option<&Location> {
        self.graph
            .key(node)
            .and_then(|code| self.locations.get(code))
    }

    /// Graph node for a location id.
    pub fn node_of(&self, id: LocationId) -> Option<NodeIndex> {
        self.codes_by_id
            .get(&id)
            .and_then(|code| self.graph.find(code))
    }

    /// Like [`RouteNetwork::node_of`], but reports unknown ids as an error.
    pub fn require_node(&self, id: LocationId) -> Result<NodeIndex> {
        self.node_of(id).ok_or(Error::UnknownLocationId { id })
    }

    /// Location id stored at a graph node.
    pub fn id_at(&self, node: NodeIndex) -> Option<LocationId> {
        self.location_at(node).map(|location| location.id)
    }

    /// All locations ordered by id.
    pub fn locations(&self) -> Vec<&Location> {
        let mut all: Vec<&Location> = self.locations.values().collect();
        all.sort_by_key(|location| location.id);
        all
    }

    /// Number of routes leaving a location.
    pub fn outgoing_routes(&self, code: &str) -> usize {
        self.graph
            .find(&normalize_code(code))
            .map(|node| self.graph.neighbours(node).len())
            .unwrap_or(0)
    }

    /// Resolve a code to an id, suggesting close codes when it is unknown.
    pub fn resolve_code(&self, code: &str) -> Result<LocationId> {
        self.location_by_code(code)
            .map(|location| location.id)
            .ok_or_else(|| Error::UnknownLocation {
                query: code.to_string(),
                suggestions: self.fuzzy_matches(code, 3),
            })
    }

    /// Resolve a display name to an id, suggesting close names when it is
    /// unknown.
    pub fn resolve_name(&self, name: &str) -> Result<LocationId> {
        self.location_by_name(name)
            .map(|location| location.id)
            .ok_or_else(|| Error::UnknownLocation {
                query: name.to_string(),
                suggestions: self.fuzzy_matches(name, 3),
            })
    }

    /// Resolve a user-supplied label according to `mode`.
    pub fn resolve_label(&self, label: &str, mode: LabelMode) -> Result<LocationId> {
        match mode {
            LabelMode::Id => {
                let id = label.trim().parse::<LocationId>().map_err(|_| {
                    Error::invalid_request(format!("'{label}' is not a location id"))
                })?;
                self.location_by_id(id)
                    .map(|location| location.id)
                    .ok_or(Error::UnknownLocationId { id })
            }
            LabelMode::Code => self.resolve_code(label),
            LabelMode::Name => self.resolve_name(label),
        }
    }

    /// Names and codes most similar to `query`, best first.
    pub fn fuzzy_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let query = query.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .locations
            .values()
            .flat_map(|location| [location.name.as_str(), location.code.as_str()])
            .map(|candidate| {
                (
                    normalized_levenshtein(&query, &candidate.to_lowercase()),
                    candidate,
                )
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        let mut matches: Vec<String> = Vec::new();
        for (_, candidate) in scored {
            if !matches.iter().any(|m| m == candidate) {
                matches.push(candidate.to_string());
            }
            if matches.len() == limit {
                break;
            }
        }
        matches
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(name: &str, id: LocationId, code: &str, can_park: bool) -> Location {
        Location {
            name: name.to_string(),
            id,
            code: code.to_string(),
            can_park,
        }
    }

    fn network() -> RouteNetwork {
        let mut network = RouteNetwork::new();
        assert!(network.add_location(location("Arcos", 1, "ARC", true)));
        assert!(network.add_location(location("Braga", 2, "BRG", false)));
        assert!(network.add_location(location("Coimbra", 3, "CMB", true)));
        let times = RouteTimes {
            driving: Some(4.0),
            walking: 20.0,
        };
        assert!(network.add_route("ARC", "BRG", times));
        assert!(network.add_route("brg", "cmb", times));
        network
    }

    #[test]
    fn duplicate_code_or_id_is_rejected() {
        let mut network = network();
        assert!(!network.add_location(location("Other", 9, "arc", false)));
        assert!(!network.add_location(location("Other", 1, "OTH", false)));
        assert_eq!(network.len(), 3);
    }

    #[test]
    fn lookups_ignore_case() {
        let network = network();
        assert_eq!(network.location_by_code("brg").map(|l| l.id), Some(2));
        assert_eq!(network.location_by_name("coimbra").map(|l| l.id), Some(3));
        assert_eq!(network.location_by_id(1).map(|l| l.code.as_str()), Some("ARC"));
    }

    #[test]
    fn node_and_id_round_trip() {
        let network = network();
        let node = network.node_of(3).unwrap();
        assert_eq!(network.id_at(node), Some(3));
        assert!(matches!(
            network.require_node(42),
            Err(Error::UnknownLocationId { id: 42 })
        ));
    }

    #[test]
    fn route_to_unknown_code_is_rejected() {
        let mut network = network();
        let times = RouteTimes {
            driving: None,
            walking: 1.0,
        };
        assert!(!network.add_route("ARC", "ZZZ", times));
        assert_eq!(network.outgoing_routes("ARC"), 1);
        assert_eq!(network.outgoing_routes("BRG"), 2);
    }

    #[test]
    fn remove_location_drops_its_routes() {
        let mut network = network();
        let removed = network.remove_location("BRG").unwrap();
        assert_eq!(removed.id, 2);
        assert!(network.location_by_id(2).is_none());
        assert_eq!(network.outgoing_routes("ARC"), 0);
        assert_eq!(network.outgoing_routes("CMB"), 0);
        assert_eq!(network.graph().edge_count(), 0);
    }

    #[test]
    fn unknown_name_offers_suggestions() {
        let network = network();
        let err = network.resolve_name("Coimbr").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Did you mean"), "{message}");
        assert!(message.contains("'Coimbra'"), "{message}");
    }

    #[test]
    fn labels_resolve_in_every_mode() {
        let network = network();
        assert_eq!(network.resolve_label("2", LabelMode::Id).unwrap(), 2);
        assert_eq!(network.resolve_label("cmb", LabelMode::Code).unwrap(), 3);
        assert_eq!(network.resolve_label("Arcos", LabelMode::Name).unwrap(), 1);
        assert!(matches!(
            network.resolve_label("two", LabelMode::Id),
            Err(Error::InvalidRequest { .. })
        ));
        assert!(matches!(
            network.resolve_label("9", LabelMode::Id),
            Err(Error::UnknownLocationId { id: 9 })
        ));

        let braga = network.location_by_id(2).unwrap();
        assert_eq!(LabelMode::Code.label(braga), "BRG");
        assert_eq!(LabelMode::Name.label(braga), "Braga");
    }

    #[test]
    fn locations_are_sorted_by_id() {
        let network = network();
        let ids: Vec<_> = network.locations().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
