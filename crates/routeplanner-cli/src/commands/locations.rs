//! Locations command handler: inspect the loaded network.

use anyhow::{bail, Result};

use routeplanner_lib::{Error as LibError, LocationId, RouteNetwork};

use crate::commands::DataOptions;
use crate::output::{LocationInfo, OutputFormat};

/// Which location to describe; all `None` lists the whole network.
#[derive(Debug, Clone, Default)]
pub struct LocationQuery {
    pub code: Option<String>,
    pub id: Option<LocationId>,
    pub name: Option<String>,
}

/// Handle the locations subcommand.
pub fn handle_locations_command(
    data: &DataOptions,
    format: OutputFormat,
    query: &LocationQuery,
) -> Result<()> {
    let network = data.load()?;
    print!("{}", render_locations(&network, format, query)?);
    Ok(())
}

fn render_locations(
    network: &RouteNetwork,
    format: OutputFormat,
    query: &LocationQuery,
) -> Result<String> {
    let id = match (&query.code, query.id, &query.name) {
        (None, None, None) => return format.render_locations(&network.locations()),
        (Some(code), None, None) => network.resolve_code(code)?,
        (None, Some(id), None) => id,
        (None, None, Some(name)) => network.resolve_name(&name.replace('_', " "))?,
        _ => bail!("use only one of --code, --id or --name"),
    };
    let location = network
        .location_by_id(id)
        .ok_or(LibError::UnknownLocationId { id })?;
    let info = LocationInfo {
        location,
        outgoing_routes: network.outgoing_routes(&location.code),
    };
    format.render_location(&info)
}
