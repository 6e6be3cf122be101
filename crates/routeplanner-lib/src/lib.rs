//! Route planner library entry points.
//!
//! This crate loads a road network from CSV tables, keeps it in an
//! arena-backed graph and answers driving and driving-walking route queries
//! with a reusable Dijkstra engine. Higher-level consumers (the CLI) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.

pub mod dataset;
pub mod error;
pub mod frontier;
pub mod graph;
pub mod mask;
pub mod network;
pub mod output;
pub mod path;
pub mod request;
pub mod routing;

pub use dataset::{
    default_data_dir, load_network, load_network_from_readers, resolve_data_dir, DatasetPaths,
};
pub use error::{Error, Result};
pub use frontier::PriorityFrontier;
pub use graph::{Edge, EdgeWeights, Graph, NodeIndex, TravelMode};
pub use mask::{MaskSet, ScopedMask};
pub use network::{LabelMode, Location, LocationId, RouteNetwork, RouteTimes};
pub use output::{ReportRenderMode, ReportRenderer};
pub use path::{shortest_path, PathResult, ShortestPathEngine};
pub use request::{parse_request, read_request_file};
pub use routing::{
    run_query, ParkingOutcome, ParkingRoute, QueryReport, RouteMode, RouteOutcome, RoutePath,
    RoutePlanner, RouteRequest,
};
