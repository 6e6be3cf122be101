//! Handlers for the CLI subcommands.
//!
//! `main.rs` parses arguments and dispatches to one handler per subcommand.

use std::path::PathBuf;

use anyhow::{Context, Result};
use routeplanner_lib::{load_network, resolve_data_dir, DatasetPaths, RouteNetwork};

pub mod batch;
pub mod locations;
pub mod route;

/// Where to find the dataset tables.
#[derive(Debug, Clone, Default)]
pub struct DataOptions {
    /// Directory holding `locations.csv` and `distances.csv`.
    pub data_dir: Option<PathBuf>,
    /// Explicit locations table, overriding the data directory.
    pub locations: Option<PathBuf>,
    /// Explicit distances table, overriding the data directory.
    pub distances: Option<PathBuf>,
}

impl DataOptions {
    /// Resolve the two table paths. The data directory is only consulted for
    /// tables that were not given explicitly.
    pub fn dataset_paths(&self) -> Result<DatasetPaths> {
        if let (Some(locations), Some(distances)) = (&self.locations, &self.distances) {
            return Ok(DatasetPaths {
                locations: locations.clone(),
                distances: distances.clone(),
            });
        }

        let dir = resolve_data_dir(self.data_dir.as_deref())
            .context("failed to resolve the data directory")?;
        let mut paths = DatasetPaths::in_dir(dir);
        if let Some(locations) = &self.locations {
            paths.locations = locations.clone();
        }
        if let Some(distances) = &self.distances {
            paths.distances = distances.clone();
        }
        Ok(paths)
    }

    /// Load the road network from the resolved tables.
    pub fn load(&self) -> Result<RouteNetwork> {
        let paths = self.dataset_paths()?;
        load_network(&paths).with_context(|| {
            format!(
                "failed to load dataset from {} and {}",
                paths.locations.display(),
                paths.distances.display()
            )
        })
    }
}
