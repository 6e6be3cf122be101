use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use routeplanner_lib::{
    run_query, Location, LocationId, RouteNetwork, RoutePlanner, RouteRequest, RouteTimes,
};
use std::hint::black_box;

const SIDE: i64 = 40;

fn id(row: i64, col: i64) -> LocationId {
    row * SIDE + col + 1
}

fn code(row: i64, col: i64) -> String {
    format!("R{row}C{col}")
}

/// Square street grid. Every fifth location can park, every seventh
/// street is pedestrian-only.
fn grid_network() -> RouteNetwork {
    let mut network = RouteNetwork::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            network.add_location(Location {
                name: format!("Block {row}-{col}"),
                id: id(row, col),
                code: code(row, col),
                can_park: id(row, col) % 5 == 0,
            });
        }
    }
    let mut street = 0;
    for row in 0..SIDE {
        for col in 0..SIDE {
            for (r, c) in [(row + 1, col), (row, col + 1)] {
                if r >= SIDE || c >= SIDE {
                    continue;
                }
                street += 1;
                let driving = (street % 7 != 0).then_some(f64::from((street % 4 + 1) as u8));
                let walking = f64::from((street % 9 + 6) as u8);
                network.add_route(&code(row, col), &code(r, c), RouteTimes { driving, walking });
            }
        }
    }
    network
}

static NETWORK: Lazy<RouteNetwork> = Lazy::new(grid_network);
static UNRESTRICTED_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::driving(id(0, 0), id(SIDE - 1, SIDE - 1)));
static RESTRICTED_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::driving(id(0, 0), id(SIDE - 1, SIDE - 1))
        .avoiding_nodes((1..SIDE - 1).map(|i| id(i, i)))
        .through(id(0, SIDE - 1))
});
static DRIVING_WALKING_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::driving_walking(id(0, 0), id(SIDE / 2, SIDE - 1), 30.0));

fn benchmark_pathfinding(c: &mut Criterion) {
    let network = &*NETWORK;

    c.bench_function("unrestricted_grid_corner_to_corner", |b| {
        let request = &*UNRESTRICTED_REQUEST;
        b.iter(|| {
            let report = run_query(network, request).expect("query runs");
            black_box(report)
        });
    });

    c.bench_function("restricted_grid_with_waypoint", |b| {
        let request = &*RESTRICTED_REQUEST;
        b.iter(|| {
            let report = run_query(network, request).expect("query runs");
            black_box(report)
        });
    });

    c.bench_function("driving_walking_grid", |b| {
        let request = &*DRIVING_WALKING_REQUEST;
        b.iter(|| {
            let report = run_query(network, request).expect("query runs");
            black_box(report)
        });
    });

    c.bench_function("reused_planner_unrestricted", |b| {
        let request = &*UNRESTRICTED_REQUEST;
        let mut planner = RoutePlanner::new(network);
        b.iter(|| {
            let report = planner.run(request).expect("query runs");
            black_box(report)
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
