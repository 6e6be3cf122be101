use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use routeplanner_cli::commands::batch::handle_batch_command;
use routeplanner_cli::commands::locations::{handle_locations_command, LocationQuery};
use routeplanner_cli::commands::route::{handle_route_command, RouteCommandArgs};
use routeplanner_cli::commands::DataOptions;
use routeplanner_cli::output::{LabelArg, OutputFormat};
use routeplanner_lib::{LabelMode, LocationId};

#[derive(Parser, Debug)]
#[command(author, version, about = "Driving and walking route planner")]
struct Cli {
    /// Directory containing locations.csv and distances.csv.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override the locations table.
    #[arg(long)]
    locations: Option<PathBuf>,

    /// Override the distances table.
    #[arg(long)]
    distances: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// How locations are given on input and shown in output.
    #[arg(long, value_enum, default_value_t = LabelArg::Id)]
    label: LabelArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a single route between two locations.
    Route(RouteCommandArgs),
    /// Answer a request file.
    Batch {
        /// Request file in `Key:Value` format.
        #[arg(long)]
        input: PathBuf,
        /// Also write the answer to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show the network size, list locations or describe one location.
    Locations {
        /// Location code.
        #[arg(long, conflicts_with_all = ["id", "name"])]
        code: Option<String>,
        /// Location id.
        #[arg(long, conflicts_with = "name")]
        id: Option<LocationId>,
        /// Location name.
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let data = DataOptions {
        data_dir: cli.data_dir,
        locations: cli.locations,
        distances: cli.distances,
    };
    let labels = LabelMode::from(cli.label);

    match cli.command {
        Command::Route(args) => handle_route_command(&data, cli.format, labels, &args),
        Command::Batch { input, output } => {
            handle_batch_command(&data, cli.format, labels, &input, output.as_deref())
        }
        Command::Locations { code, id, name } => {
            handle_locations_command(&data, cli.format, &LocationQuery { code, id, name })
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
