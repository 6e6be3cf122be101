//! Route queries over a [`RouteNetwork`].
//!
//! This module provides:
//! - [`RouteMode`] - Supported query modes (driving, driving-walking)
//! - [`RouteRequest`] - High-level route query
//! - [`QueryReport`] - Structured result of a query
//! - [`RoutePlanner`] - Query service owning a reusable engine and mask
//! - [`run_query`] - Main entry point for answering a request
//!
//! # Query shapes
//!
//! A driving request without restrictions yields the best route plus an
//! alternative that avoids the best route's intermediate stops. A driving
//! request with avoided locations, avoided segments or a mandatory waypoint
//! yields a single restricted route. A driving-walking request picks the
//! parking location that minimises driving plus walking time within a
//! walking budget.
//!
//! # Example
//!
//! ```ignore
//! use routeplanner_lib::{load_network, run_query, DatasetPaths, RouteRequest};
//!
//! let network = load_network(&DatasetPaths::in_dir("data"))?;
//! let report = run_query(&network, &RouteRequest::driving(1, 7))?;
//! println!("{report:?}");
//! ```

mod planner;

pub use planner::{ParkingChoice, Restrictions, RoutePlanner};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::network::{LocationId, RouteNetwork};

/// Supported query modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RouteMode {
    /// Drive the whole way.
    #[default]
    Driving,
    /// Drive to a parking location, then walk to the destination.
    DrivingWalking,
}

impl fmt::Display for RouteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteMode::Driving => "driving",
            RouteMode::DrivingWalking => "driving-walking",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "driving" => Ok(RouteMode::Driving),
            "driving-walking" => Ok(RouteMode::DrivingWalking),
            other => Err(Error::invalid_request(format!("unknown mode '{other}'"))),
        }
    }
}

/// A route query expressed in location ids.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub mode: RouteMode,
    pub source: LocationId,
    pub destination: LocationId,
    pub avoid_nodes: Vec<LocationId>,
    /// Road segments to avoid, given as `(from, to)` pairs.
    pub avoid_segments: Vec<(LocationId, LocationId)>,
    /// Mandatory waypoint.
    pub include_node: Option<LocationId>,
    /// Walking budget in minutes for driving-walking queries.
    pub max_walk_time: Option<f64>,
}

impl RouteRequest {
    /// Convenience constructor for a plain driving request.
    pub fn driving(source: LocationId, destination: LocationId) -> Self {
        Self {
            mode: RouteMode::Driving,
            source,
            destination,
            avoid_nodes: Vec::new(),
            avoid_segments: Vec::new(),
            include_node: None,
            max_walk_time: None,
        }
    }

    /// Convenience constructor for a driving-walking request.
    pub fn driving_walking(source: LocationId, destination: LocationId, max_walk_time: f64) -> Self {
        Self {
            mode: RouteMode::DrivingWalking,
            max_walk_time: Some(max_walk_time),
            ..Self::driving(source, destination)
        }
    }

    pub fn avoiding_nodes(mut self, nodes: impl IntoIterator<Item = LocationId>) -> Self {
        self.avoid_nodes.extend(nodes);
        self
    }

    pub fn avoiding_segments(
        mut self,
        segments: impl IntoIterator<Item = (LocationId, LocationId)>,
    ) -> Self {
        self.avoid_segments.extend(segments);
        self
    }

    pub fn through(mut self, waypoint: LocationId) -> Self {
        self.include_node = Some(waypoint);
        self
    }

    /// Whether a driving request carries any restriction.
    pub fn is_restricted(&self) -> bool {
        !self.avoid_nodes.is_empty()
            || !self.avoid_segments.is_empty()
            || self.include_node.is_some()
    }
}

/// A path expressed in location ids. An empty `steps` list means no route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePath {
    pub steps: Vec<LocationId>,
    pub weight: f64,
}

impl RoutePath {
    pub fn none() -> Self {
        Self {
            steps: Vec::new(),
            weight: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// The chosen parking location together with both legs of the trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkingRoute {
    pub parking: LocationId,
    pub driving: RoutePath,
    /// Walking leg, ordered from the parking location to the destination.
    pub walking: RoutePath,
    pub total_time: f64,
}

/// Result of a driving-walking query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParkingOutcome {
    Found(ParkingRoute),
    /// No parking location lies within the walking budget.
    Infeasible { max_walk_time: f64 },
}

/// Result of a query, by query shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteOutcome {
    Unrestricted {
        best: RoutePath,
        /// `None` when the best route was empty and no alternative was
        /// searched for.
        alternative: Option<RoutePath>,
    },
    Restricted {
        route: RoutePath,
    },
    DrivingWalking {
        parking: ParkingOutcome,
    },
}

/// Structured answer to a [`RouteRequest`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryReport {
    pub mode: RouteMode,
    pub source: LocationId,
    pub destination: LocationId,
    pub outcome: RouteOutcome,
}

/// Answer a route request against `network`.
///
/// Unknown locations and segments are reported as errors before any search
/// runs. An unreachable destination is not an error: it yields empty paths.
pub fn run_query(network: &RouteNetwork, request: &RouteRequest) -> Result<QueryReport> {
    RoutePlanner::new(network).run(request)
}
