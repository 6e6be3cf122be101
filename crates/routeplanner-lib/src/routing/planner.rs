//! The three query algorithms, composed from shortest-path runs and masks.
//!
//! [`RoutePlanner`] works in graph node indices. Request validation turns
//! location ids into indices up front, so a query either fails before any
//! search runs or runs to completion.

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{NodeIndex, TravelMode};
use crate::mask::MaskSet;
use crate::network::{LocationId, RouteNetwork};
use crate::path::{PathResult, ShortestPathEngine};

use super::{
    ParkingOutcome, ParkingRoute, QueryReport, RouteMode, RouteOutcome, RoutePath, RouteRequest,
};

/// Blocked locations and directed road segments, already resolved to nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restrictions {
    pub nodes: Vec<NodeIndex>,
    pub edges: Vec<(NodeIndex, NodeIndex)>,
}

impl Restrictions {
    fn apply(&self, mask: &mut MaskSet) {
        for &node in &self.nodes {
            mask.block_node(node);
        }
        for &(origin, target) in &self.edges {
            mask.block_edge(origin, target);
        }
    }
}

/// Best parking choice for a driving-walking query, in node indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingChoice {
    pub parking: NodeIndex,
    pub driving: PathResult,
    /// Ordered from the parking node to the destination.
    pub walking: PathResult,
}

impl ParkingChoice {
    pub fn total_time(&self) -> f64 {
        self.driving.weight + self.walking.weight
    }
}

/// Query service over a shared, read-only network.
///
/// The planner owns one engine and one mask and reuses both across queries.
/// The mask is always empty between queries.
#[derive(Debug)]
pub struct RoutePlanner<'a> {
    network: &'a RouteNetwork,
    engine: ShortestPathEngine,
    mask: MaskSet,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(network: &'a RouteNetwork) -> Self {
        Self {
            network,
            engine: ShortestPathEngine::new(),
            mask: MaskSet::new(),
        }
    }

    /// Validate `request` and dispatch it to the matching query shape.
    pub fn run(&mut self, request: &RouteRequest) -> Result<QueryReport> {
        let source = self.network.require_node(request.source)?;
        let destination = self.network.require_node(request.destination)?;
        let restrictions = self.resolve_restrictions(request)?;

        let outcome = match request.mode {
            RouteMode::Driving => {
                if request.max_walk_time.is_some() {
                    return Err(Error::invalid_request(
                        "max walk time only applies to driving-walking requests",
                    ));
                }
                let waypoint = request
                    .include_node
                    .map(|id| self.network.require_node(id))
                    .transpose()?;
                if request.is_restricted() {
                    let route = self.restricted(source, destination, &restrictions, waypoint);
                    RouteOutcome::Restricted {
                        route: self.to_route_path(&route),
                    }
                } else {
                    let (best, alternative) = self.unrestricted(source, destination);
                    RouteOutcome::Unrestricted {
                        best: self.to_route_path(&best),
                        alternative: alternative.map(|path| self.to_route_path(&path)),
                    }
                }
            }
            RouteMode::DrivingWalking => {
                if request.include_node.is_some() {
                    return Err(Error::invalid_request(
                        "driving-walking requests cannot include a waypoint",
                    ));
                }
                let budget = request.max_walk_time.ok_or_else(|| {
                    Error::invalid_request("driving-walking requests need a max walk time")
                })?;
                if budget.is_nan() || budget < 0.0 {
                    return Err(Error::invalid_request(format!(
                        "max walk time must be a non-negative number, got {budget}"
                    )));
                }
                let parking = match self.driving_walking(source, destination, &restrictions, budget)
                {
                    Some(choice) => ParkingOutcome::Found(self.to_parking_route(&choice)),
                    None => ParkingOutcome::Infeasible {
                        max_walk_time: budget,
                    },
                };
                RouteOutcome::DrivingWalking { parking }
            }
        };

        info!(
            mode = %request.mode,
            source = request.source,
            destination = request.destination,
            "route query answered"
        );
        Ok(QueryReport {
            mode: request.mode,
            source: request.source,
            destination: request.destination,
            outcome,
        })
    }

    /// Best driving route plus an alternative avoiding its intermediate stops.
    ///
    /// The alternative is `None` when the best route is empty, and an empty
    /// path when the best route has no intermediate stops to avoid.
    pub fn unrestricted(
        &mut self,
        source: NodeIndex,
        destination: NodeIndex,
    ) -> (PathResult, Option<PathResult>) {
        let graph = self.network.graph();
        let mask = self.mask.scoped();
        self.engine.run(graph, source, TravelMode::Driving, &mask);
        let best = self.engine.path_to(destination);
        if best.is_empty() {
            return (best, None);
        }
        if best.intermediates().is_empty() {
            debug!("best route has no intermediate stops; no alternative");
            return (best, Some(PathResult::empty()));
        }

        let mut mask = mask;
        for &node in best.intermediates() {
            mask.block_node(node);
        }
        self.engine.run(graph, source, TravelMode::Driving, &mask);
        let alternative = self.engine.path_to(destination);
        (best, Some(alternative))
    }

    /// Driving route honouring `restrictions`, optionally forced through a
    /// waypoint. Both waypoint legs run under the same restrictions; if either
    /// leg is unreachable the whole route is empty.
    pub fn restricted(
        &mut self,
        source: NodeIndex,
        destination: NodeIndex,
        restrictions: &Restrictions,
        waypoint: Option<NodeIndex>,
    ) -> PathResult {
        let graph = self.network.graph();
        let mut mask = self.mask.scoped();
        restrictions.apply(&mut mask);

        let Some(waypoint) = waypoint else {
            self.engine.run(graph, source, TravelMode::Driving, &mask);
            return self.engine.path_to(destination);
        };

        self.engine.run(graph, source, TravelMode::Driving, &mask);
        let first = self.engine.path_to(waypoint);
        if first.is_empty() {
            debug!(waypoint, "waypoint unreachable from source");
            return PathResult::empty();
        }
        self.engine.run(graph, waypoint, TravelMode::Driving, &mask);
        let second = self.engine.path_to(destination);
        first.join(second)
    }

    /// Pick the parking node minimising driving plus walking time.
    ///
    /// Candidates are parkable, unblocked nodes whose walking distance to the
    /// destination is strictly below `max_walk_time` and which can be reached
    /// by car. Equal totals favour the candidate with more walking. Returns
    /// `None` when nothing qualifies.
    pub fn driving_walking(
        &mut self,
        source: NodeIndex,
        destination: NodeIndex,
        restrictions: &Restrictions,
        max_walk_time: f64,
    ) -> Option<ParkingChoice> {
        let network = self.network;
        let graph = network.graph();
        let mut mask = self.mask.scoped();
        restrictions.apply(&mut mask);

        self.engine.run(graph, destination, TravelMode::Walking, &mask);
        let candidates: Vec<(NodeIndex, PathResult)> = graph
            .nodes()
            .filter(|&node| !mask.is_node_blocked(node))
            .filter(|&node| network.location_at(node).is_some_and(|l| l.can_park))
            .filter(|&node| self.engine.distance(node) < max_walk_time)
            .map(|node| (node, self.engine.path_to(node)))
            .collect();
        debug!(
            candidates = candidates.len(),
            max_walk_time, "parking candidates within walking budget"
        );
        if candidates.is_empty() {
            return None;
        }

        self.engine.run(graph, source, TravelMode::Driving, &mask);
        let mut best: Option<ParkingChoice> = None;
        for (parking, walk) in candidates {
            let driving = self.engine.path_to(parking);
            if driving.is_empty() {
                continue;
            }
            let candidate = ParkingChoice {
                parking,
                driving,
                walking: walk.reversed(),
            };
            let better = match &best {
                None => true,
                Some(current) => {
                    let (total, best_total) = (candidate.total_time(), current.total_time());
                    total < best_total
                        || (total == best_total && candidate.walking.weight > current.walking.weight)
                }
            };
            if better {
                best = Some(candidate);
            }
        }
        best
    }

    fn resolve_restrictions(&self, request: &RouteRequest) -> Result<Restrictions> {
        let graph = self.network.graph();
        let mut restrictions = Restrictions::default();
        for &id in &request.avoid_nodes {
            restrictions.nodes.push(self.network.require_node(id)?);
        }
        for &(from, to) in &request.avoid_segments {
            let origin = self.network.require_node(from)?;
            let target = self.network.require_node(to)?;
            let edge = graph
                .edge(origin, target)
                .ok_or(Error::UnknownSegment { from, to })?;
            restrictions.edges.push((origin, target));
            // a road is avoided in both directions
            if graph.reverse(edge).is_some() {
                restrictions.edges.push((target, origin));
            }
        }
        Ok(restrictions)
    }

    fn to_route_path(&self, path: &PathResult) -> RoutePath {
        if path.is_empty() {
            return RoutePath::none();
        }
        RoutePath {
            steps: path
                .nodes
                .iter()
                .filter_map(|&node| self.network.id_at(node))
                .collect(),
            weight: path.weight,
        }
    }

    fn to_parking_route(&self, choice: &ParkingChoice) -> ParkingRoute {
        ParkingRoute {
            parking: self.location_id(choice.parking),
            driving: self.to_route_path(&choice.driving),
            walking: self.to_route_path(&choice.walking),
            total_time: choice.total_time(),
        }
    }

    fn location_id(&self, node: NodeIndex) -> LocationId {
        // every graph node of a network has a location
        self.network.id_at(node).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{Location, RouteTimes};

    fn location(id: LocationId, code: &str, can_park: bool) -> Location {
        Location {
            name: format!("Place {code}"),
            id,
            code: code.to_string(),
            can_park,
        }
    }

    fn route(network: &mut RouteNetwork, a: &str, b: &str, driving: Option<f64>, walking: f64) {
        assert!(network.add_route(a, b, RouteTimes { driving, walking }));
    }

    /// A(1) - B(2, park) - C(3): driving A-B 5, B-C undrivable, walking B-C 3.
    fn parking_network() -> RouteNetwork {
        let mut network = RouteNetwork::new();
        network.add_location(location(1, "A", false));
        network.add_location(location(2, "B", true));
        network.add_location(location(3, "C", false));
        route(&mut network, "A", "B", Some(5.0), 20.0);
        route(&mut network, "B", "C", None, 3.0);
        network
    }

    #[test]
    fn parks_where_driving_ends() {
        let network = parking_network();
        let report = run(&network, &RouteRequest::driving_walking(1, 3, 10.0));
        let RouteOutcome::DrivingWalking {
            parking: ParkingOutcome::Found(found),
        } = &report.outcome
        else {
            panic!("expected a parking route, got {:?}", report.outcome);
        };
        assert_eq!(found.parking, 2);
        assert_eq!(found.driving.steps, vec![1, 2]);
        assert_eq!(found.driving.weight, 5.0);
        assert_eq!(found.walking.steps, vec![2, 3]);
        assert_eq!(found.walking.weight, 3.0);
        assert_eq!(found.total_time, 8.0);
    }

    #[test]
    fn tight_budget_is_infeasible() {
        let network = parking_network();
        // the budget is exclusive
        let report = run(&network, &RouteRequest::driving_walking(1, 3, 3.0));
        assert_eq!(
            report.outcome,
            RouteOutcome::DrivingWalking {
                parking: ParkingOutcome::Infeasible { max_walk_time: 3.0 }
            }
        );
    }

    #[test]
    fn mask_is_empty_after_every_query() {
        let network = parking_network();
        let mut planner = RoutePlanner::new(&network);
        planner
            .run(&RouteRequest::driving(1, 3).avoiding_nodes([2]))
            .unwrap();
        assert!(planner.mask.is_empty());
        planner
            .run(&RouteRequest::driving_walking(1, 3, 10.0).avoiding_segments([(1, 2)]))
            .unwrap();
        assert!(planner.mask.is_empty());
        assert!(planner.run(&RouteRequest::driving(1, 3).through(99)).is_err());
        assert!(planner.mask.is_empty());
    }

    #[test]
    fn segment_must_exist() {
        let network = parking_network();
        let err = run_err(&network, &RouteRequest::driving(1, 3).avoiding_segments([(1, 3)]));
        assert!(matches!(err, Error::UnknownSegment { from: 1, to: 3 }));
    }

    #[test]
    fn avoided_segment_blocks_both_directions() {
        let network = parking_network();
        let planner = RoutePlanner::new(&network);
        let restrictions = planner
            .resolve_restrictions(&RouteRequest::driving(1, 3).avoiding_segments([(2, 1)]))
            .unwrap();
        let a = network.node_of(1).unwrap();
        let b = network.node_of(2).unwrap();
        assert_eq!(restrictions.edges, vec![(b, a), (a, b)]);
    }

    #[test]
    fn driving_walking_needs_a_budget() {
        let network = parking_network();
        let mut request = RouteRequest::driving_walking(1, 3, 1.0);
        request.max_walk_time = None;
        assert!(matches!(
            run_err(&network, &request),
            Error::InvalidRequest { .. }
        ));
        assert!(matches!(
            run_err(&network, &RouteRequest::driving_walking(1, 3, -1.0)),
            Error::InvalidRequest { .. }
        ));
        assert!(matches!(
            run_err(&network, &RouteRequest::driving_walking(1, 3, 9.0).through(2)),
            Error::InvalidRequest { .. }
        ));
    }

    #[test]
    fn unknown_endpoint_is_not_found() {
        let network = parking_network();
        assert!(matches!(
            run_err(&network, &RouteRequest::driving(1, 42)),
            Error::UnknownLocationId { id: 42 }
        ));
    }

    fn run(network: &RouteNetwork, request: &RouteRequest) -> QueryReport {
        RoutePlanner::new(network).run(request).unwrap()
    }

    fn run_err(network: &RouteNetwork, request: &RouteRequest) -> Error {
        RoutePlanner::new(network).run(request).unwrap_err()
    }
}
