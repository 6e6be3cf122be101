use std::env;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::network::{Location, LocationId, RouteNetwork, RouteTimes};

/// Default filename for the locations table.
pub const LOCATIONS_FILENAME: &str = "locations.csv";
/// Default filename for the distances table.
pub const DISTANCES_FILENAME: &str = "distances.csv";
/// Environment variable overriding the default data directory.
pub const DATA_DIR_ENV: &str = "ROUTEPLANNER_DATA_DIR";

/// Driving time marker for segments that cannot be driven.
const UNDRIVABLE: &str = "X";

/// Paths to the two dataset tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub locations: PathBuf,
    pub distances: PathBuf,
}

impl DatasetPaths {
    /// Both tables under their default filenames inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            locations: dir.join(LOCATIONS_FILENAME),
            distances: dir.join(DISTANCES_FILENAME),
        }
    }
}

static PROJECT_DATA_DIR: Lazy<Option<PathBuf>> = Lazy::new(|| {
    ProjectDirs::from("org", "routeplanner", "routeplanner")
        .map(|dirs| dirs.data_dir().to_path_buf())
});

/// Resolve the default data directory using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    PROJECT_DATA_DIR.clone().ok_or(Error::ProjectDirsUnavailable)
}

/// Resolve the data directory.
///
/// Resolution order:
/// 1. Explicit `dir` argument.
/// 2. `ROUTEPLANNER_DATA_DIR` environment variable.
/// 3. Platform-specific project data directory.
pub fn resolve_data_dir(dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = dir {
        return Ok(explicit.to_path_buf());
    }
    if let Some(env_dir) = env::var_os(DATA_DIR_ENV) {
        debug!(env = DATA_DIR_ENV, "using data directory from environment");
        return Ok(PathBuf::from(env_dir));
    }
    default_data_dir()
}

#[derive(Debug, Deserialize)]
struct LocationRow {
    #[serde(rename = "Location")]
    name: String,
    #[serde(rename = "Id")]
    id: LocationId,
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Parking")]
    parking: String,
}

#[derive(Debug, Deserialize)]
struct DistanceRow {
    #[serde(rename = "Location1")]
    origin: String,
    #[serde(rename = "Location2")]
    destination: String,
    #[serde(rename = "Driving")]
    driving: String,
    #[serde(rename = "Walking")]
    walking: f64,
}

/// Load a [`RouteNetwork`] from the two CSV tables on disk.
pub fn load_network(paths: &DatasetPaths) -> Result<RouteNetwork> {
    for path in [&paths.locations, &paths.distances] {
        if !path.exists() {
            return Err(Error::DatasetNotFound { path: path.clone() });
        }
    }
    info!(
        locations = %paths.locations.display(),
        distances = %paths.distances.display(),
        "loading route network"
    );
    let locations = File::open(&paths.locations)?;
    let distances = File::open(&paths.distances)?;
    load_network_from_readers(locations, distances)
}

/// Load a [`RouteNetwork`] from any pair of CSV sources.
///
/// Every distance row becomes one bidirectional route. Rows are numbered as
/// in the file, with the header on row 1.
pub fn load_network_from_readers<L: Read, D: Read>(
    locations: L,
    distances: D,
) -> Result<RouteNetwork> {
    let mut network = RouteNetwork::new();
    read_locations(&mut network, locations)?;
    let routes = read_distances(&mut network, distances)?;
    info!(locations = network.len(), routes, "route network loaded");
    Ok(network)
}

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source)
}

fn read_locations<R: Read>(network: &mut RouteNetwork, source: R) -> Result<()> {
    let mut reader = csv_reader(source);
    for (offset, record) in reader.deserialize::<LocationRow>().enumerate() {
        let row = offset + 2;
        let record = record?;
        let can_park = match record.parking.as_str() {
            "1" => true,
            "0" => false,
            other => {
                return Err(Error::InvalidDataset {
                    row,
                    message: format!("parking flag must be 0 or 1, got '{other}'"),
                })
            }
        };
        if record.code.is_empty() {
            return Err(Error::InvalidDataset {
                row,
                message: "location code is empty".to_string(),
            });
        }
        let location = Location {
            name: record.name,
            id: record.id,
            code: record.code,
            can_park,
        };
        let (code, id) = (location.code.clone(), location.id);
        if !network.add_location(location) {
            warn!(row, %code, id, "duplicate location");
            return Err(Error::DuplicateLocation { code, id });
        }
    }
    debug!(count = network.len(), "locations read");
    Ok(())
}

fn read_distances<R: Read>(network: &mut RouteNetwork, source: R) -> Result<usize> {
    let mut reader = csv_reader(source);
    let mut routes = 0usize;
    for (offset, record) in reader.deserialize::<DistanceRow>().enumerate() {
        let row = offset + 2;
        let record = record?;
        let driving = parse_driving(&record.driving, row)?;
        if record.walking.is_nan() || record.walking < 0.0 {
            return Err(Error::InvalidDataset {
                row,
                message: format!("walking time must be non-negative, got {}", record.walking),
            });
        }
        for code in [&record.origin, &record.destination] {
            if network.location_by_code(code).is_none() {
                return Err(Error::UnknownRouteEndpoint {
                    row,
                    code: code.clone(),
                });
            }
        }
        let times = RouteTimes {
            driving,
            walking: record.walking,
        };
        if network.add_route(&record.origin, &record.destination, times) {
            routes += 1;
        }
    }
    debug!(routes, "distances read");
    Ok(routes)
}

fn parse_driving(value: &str, row: usize) -> Result<Option<f64>> {
    if value.eq_ignore_ascii_case(UNDRIVABLE) {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(time) if time >= 0.0 => Ok(Some(time)),
        _ => Err(Error::InvalidDataset {
            row,
            message: format!("driving time must be a non-negative number or X, got '{value}'"),
        }),
    }
}
