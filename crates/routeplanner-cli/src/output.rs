//! Output formatting for route reports and location listings.
//!
//! Text and summary renderings come from the library's [`ReportRenderer`];
//! JSON is produced here with `serde_json`.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use routeplanner_lib::{
    LabelMode, Location, QueryReport, ReportRenderMode, ReportRenderer, RouteMode,
};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `Key:Value` lines, one per result field.
    #[default]
    Text,
    /// Short human-readable summary.
    Summary,
    /// Pretty-printed JSON.
    Json,
}

/// How locations are given on the command line and shown in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LabelArg {
    #[default]
    Id,
    Code,
    Name,
}

impl From<LabelArg> for LabelMode {
    fn from(value: LabelArg) -> Self {
        match value {
            LabelArg::Id => LabelMode::Id,
            LabelArg::Code => LabelMode::Code,
            LabelArg::Name => LabelMode::Name,
        }
    }
}

/// Query mode selected with `route --mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ModeArg {
    #[default]
    Driving,
    DrivingWalking,
}

impl From<ModeArg> for RouteMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Driving => RouteMode::Driving,
            ModeArg::DrivingWalking => RouteMode::DrivingWalking,
        }
    }
}

/// A location together with the number of routes leaving it.
#[derive(Debug, Serialize)]
pub struct LocationInfo<'a> {
    #[serde(flatten)]
    pub location: &'a Location,
    pub outgoing_routes: usize,
}

impl OutputFormat {
    /// Render a query report. The returned text always ends with a newline.
    pub fn render_report(
        self,
        renderer: &ReportRenderer<'_>,
        report: &QueryReport,
    ) -> Result<String> {
        match self {
            OutputFormat::Text => Ok(renderer.render(report, ReportRenderMode::Protocol)),
            OutputFormat::Summary => Ok(renderer.render(report, ReportRenderMode::Summary)),
            OutputFormat::Json => to_json(report).context("failed to serialize route report"),
        }
    }

    /// Render the full location listing.
    pub fn render_locations(self, locations: &[&Location]) -> Result<String> {
        match self {
            OutputFormat::Json => to_json(locations).context("failed to serialize locations"),
            OutputFormat::Text | OutputFormat::Summary => {
                let mut buffer = format!("Locations: {}\n", locations.len());
                if self == OutputFormat::Text {
                    for location in locations {
                        buffer.push_str(&format!(
                            "{} {} {}{}\n",
                            location.id,
                            location.code,
                            location.name,
                            if location.can_park { " [P]" } else { "" }
                        ));
                    }
                }
                Ok(buffer)
            }
        }
    }

    /// Render details for a single location.
    pub fn render_location(self, info: &LocationInfo<'_>) -> Result<String> {
        match self {
            OutputFormat::Json => to_json(info).context("failed to serialize location"),
            OutputFormat::Text => {
                let location = info.location;
                Ok(format!(
                    "Name:{}\nId:{}\nCode:{}\nParking:{}\nRoutes:{}\n",
                    location.name,
                    location.id,
                    location.code,
                    if location.can_park { "yes" } else { "no" },
                    info.outgoing_routes
                ))
            }
            OutputFormat::Summary => {
                let location = info.location;
                Ok(format!(
                    "{} ({}, id {}): {} routes, {}\n",
                    location.name,
                    location.code,
                    location.id,
                    info.outgoing_routes,
                    if location.can_park {
                        "parking available"
                    } else {
                        "no parking"
                    }
                ))
            }
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
