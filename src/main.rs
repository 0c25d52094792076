use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use volcano_ingest::cli::Cli;
use volcano_ingest::pipeline::ingest;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let output = ingest(&cli.selector(), cli.criteria()).await;

    let json = match &output {
        Some(out) if cli.pretty => serde_json::to_string_pretty(out),
        Some(out) => serde_json::to_string(out),
        // The empty result.
        None => Ok("[]".to_string()),
    }
    .context("serializing output")?;

    println!("{json}");

    Ok(if output.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
