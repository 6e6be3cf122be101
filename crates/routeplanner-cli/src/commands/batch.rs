//! Batch command handler: answer a request file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use routeplanner_lib::{read_request_file, run_query, LabelMode, ReportRenderer};

use crate::commands::DataOptions;
use crate::output::OutputFormat;

/// Handle the batch subcommand.
///
/// Prints the rendered answer to stdout and, when `output` is given, writes
/// the same text to that file.
pub fn handle_batch_command(
    data: &DataOptions,
    format: OutputFormat,
    labels: LabelMode,
    input: &Path,
    output: Option<&Path>,
) -> Result<()> {
    let network = data.load()?;
    let request = read_request_file(input)
        .with_context(|| format!("failed to read request file {}", input.display()))?;
    let report = run_query(&network, &request)?;

    let renderer = ReportRenderer::new(&network, labels);
    let rendered = format.render_report(&renderer, &report)?;
    print!("{rendered}");

    if let Some(path) = output {
        fs::write(path, &rendered)
            .with_context(|| format!("failed to write answer to {}", path.display()))?;
        info!(path = %path.display(), "answer written");
    }
    Ok(())
}
