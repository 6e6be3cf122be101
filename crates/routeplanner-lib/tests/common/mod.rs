//! Common test utilities and fixture helpers.
//!
//! This module provides shared test infrastructure for integration tests:
//! paths to the checked-in CSV fixtures and small hand-built networks.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use routeplanner_lib::{load_network, DatasetPaths, Location, LocationId, RouteNetwork, RouteTimes};

/// Path to fixtures directory used by tests (CSV tables, request files).
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to one of the checked-in request files.
#[allow(dead_code)]
pub fn request_path(name: &str) -> PathBuf {
    fixtures_dir().join("requests").join(name)
}

/// The nine-location fixture network.
#[allow(dead_code)]
pub fn fixture_network() -> RouteNetwork {
    load_network(&DatasetPaths::in_dir(fixtures_dir())).expect("fixture network loads")
}

/// Build a network from `(id, code, can_park)` triples and
/// `(from, to, driving, walking)` routes.
#[allow(dead_code)]
pub fn network(
    locations: &[(LocationId, &str, bool)],
    routes: &[(&str, &str, Option<f64>, f64)],
) -> RouteNetwork {
    let mut network = RouteNetwork::new();
    for &(id, code, can_park) in locations {
        assert!(network.add_location(Location {
            name: format!("Place {code}"),
            id,
            code: code.to_string(),
            can_park,
        }));
    }
    for &(from, to, driving, walking) in routes {
        assert!(network.add_route(from, to, RouteTimes { driving, walking }));
    }
    network
}

/// Random connected network with `size` locations coded `N0`, `N1`, ...
/// Ids are `index + 1`. Every third location can park. Some segments are
/// undrivable.
#[allow(dead_code)]
pub fn random_network(seed: u64, size: usize, extra_routes: usize) -> RouteNetwork {
    let mut rng = StdRng::seed_from_u64(seed);
    let codes: Vec<String> = (0..size).map(|i| format!("N{i}")).collect();
    let mut network = RouteNetwork::new();
    for (i, code) in codes.iter().enumerate() {
        network.add_location(Location {
            name: format!("Node {i}"),
            id: i as LocationId + 1,
            code: code.clone(),
            can_park: i % 3 == 0,
        });
    }
    let add = |network: &mut RouteNetwork, a: usize, b: usize, rng: &mut StdRng| {
        let driving = if rng.gen_ratio(1, 5) {
            None
        } else {
            Some(f64::from(rng.gen_range(1..=9u32)))
        };
        let walking = f64::from(rng.gen_range(1..=20u32));
        network.add_route(&codes[a], &codes[b], RouteTimes { driving, walking });
    };
    for i in 1..size {
        let j = rng.gen_range(0..i);
        add(&mut network, i, j, &mut rng);
    }
    for _ in 0..extra_routes {
        let a = rng.gen_range(0..size);
        let b = rng.gen_range(0..size);
        if a != b {
            add(&mut network, a, b, &mut rng);
        }
    }
    network
}
