//! Route command handler for single queries given on the command line.

use anyhow::{Context, Result};
use clap::Args;

use routeplanner_lib::request::{split_label_pairs, split_labels};
use routeplanner_lib::{
    run_query, LabelMode, LocationId, ReportRenderer, RouteMode, RouteNetwork, RouteRequest,
};

use crate::commands::DataOptions;
use crate::output::{ModeArg, OutputFormat};

/// Arguments for the route command.
#[derive(Debug, Clone, Args)]
pub struct RouteCommandArgs {
    /// Starting location.
    #[arg(long = "from")]
    pub from: String,
    /// Destination location.
    #[arg(long = "to")]
    pub to: String,
    /// Query mode.
    #[arg(long, value_enum, default_value_t = ModeArg::Driving)]
    pub mode: ModeArg,
    /// Locations to avoid, comma separated (`1,2`).
    #[arg(long)]
    pub avoid: Option<String>,
    /// Road segments to avoid, comma separated (`1-2,3-4`).
    #[arg(long = "avoid-segments")]
    pub avoid_segments: Option<String>,
    /// Location the route must pass through.
    #[arg(long)]
    pub include: Option<String>,
    /// Walking budget in minutes for driving-walking queries.
    #[arg(long = "max-walk-time")]
    pub max_walk_time: Option<f64>,
}

impl RouteCommandArgs {
    /// Resolve every label against the network and build a library request.
    pub fn to_request(&self, network: &RouteNetwork, labels: LabelMode) -> Result<RouteRequest> {
        let resolve = |label: &str| -> Result<LocationId> {
            network
                .resolve_label(&label.replace('_', " "), labels)
                .map_err(anyhow::Error::from)
        };

        let source = resolve(&self.from)?;
        let destination = resolve(&self.to)?;

        let avoid_nodes = match &self.avoid {
            Some(list) => split_labels(list)?
                .iter()
                .map(|label| resolve(label))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        let avoid_segments = match &self.avoid_segments {
            Some(list) => split_label_pairs(list)?
                .iter()
                .map(|(from, to)| Ok((resolve(from)?, resolve(to)?)))
                .collect::<Result<Vec<_>>>()?,
            None => Vec::new(),
        };
        let include_node = self.include.as_deref().map(resolve).transpose()?;

        Ok(RouteRequest {
            mode: RouteMode::from(self.mode),
            source,
            destination,
            avoid_nodes,
            avoid_segments,
            include_node,
            max_walk_time: self.max_walk_time,
        })
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    data: &DataOptions,
    format: OutputFormat,
    labels: LabelMode,
    args: &RouteCommandArgs,
) -> Result<()> {
    let network = data.load()?;
    let request = args
        .to_request(&network, labels)
        .context("failed to build route request")?;
    let report = run_query(&network, &request)?;

    let renderer = ReportRenderer::new(&network, labels);
    print!("{}", format.render_report(&renderer, &report)?);
    Ok(())
}
