mod common;

use std::fs;

use routeplanner_lib::dataset::{DISTANCES_FILENAME, LOCATIONS_FILENAME};
use routeplanner_lib::{load_network, DatasetPaths, Error};
use tempfile::tempdir;

use common::{fixture_network, fixtures_dir};

#[test]
fn fixture_dataset_loads() {
    let network = fixture_network();
    assert_eq!(network.len(), 9);

    let vila_real = network.location_by_name("vila real").expect("name lookup");
    assert_eq!(vila_real.id, 9);
    assert_eq!(vila_real.code, "VRL");
    assert!(vila_real.can_park);

    let ids: Vec<_> = network.locations().iter().map(|l| l.id).collect();
    assert_eq!(ids, (1..=9).collect::<Vec<_>>());
}

#[test]
fn undrivable_segments_have_no_driving_weight() {
    let network = fixture_network();
    let cmb = network.node_of(3).unwrap();
    let far = network.node_of(6).unwrap();
    let edge = network.graph().edge(cmb, far).expect("CMB-FAR road");
    assert_eq!(edge.weights.driving, None);
    assert_eq!(edge.weights.walking, 12.0);
    assert!(edge.bidirectional);
}

#[test]
fn missing_distances_file_is_reported() {
    let dir = tempdir().expect("temp dir");
    fs::copy(
        fixtures_dir().join(LOCATIONS_FILENAME),
        dir.path().join(LOCATIONS_FILENAME),
    )
    .expect("copy fixture");

    let err = load_network(&DatasetPaths::in_dir(dir.path())).unwrap_err();
    match err {
        Error::DatasetNotFound { path } => assert!(path.ends_with(DISTANCES_FILENAME)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn dangling_route_is_rejected_with_row_number() {
    let dir = tempdir().expect("temp dir");
    fs::copy(
        fixtures_dir().join(LOCATIONS_FILENAME),
        dir.path().join(LOCATIONS_FILENAME),
    )
    .expect("copy fixture");
    fs::write(
        dir.path().join(DISTANCES_FILENAME),
        "Location1,Location2,Driving,Walking\nARC,BRG,4,20\nBRG,LIS,3,15\n",
    )
    .expect("write distances");

    let err = load_network(&DatasetPaths::in_dir(dir.path())).unwrap_err();
    assert_eq!(
        err.to_string(),
        "route on row 3 references unknown location code LIS"
    );
}
