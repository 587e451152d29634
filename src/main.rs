mod cli;

use clap::Parser;
use cli::Cli;
use log::error;
use std::{error::Error, process::ExitCode};
use vanity_miner::{MiningEngine, MiningOutput};

/// Entry point for the salt miner.
///
/// Parses the command line into a mining request, validates it, mines, and
/// prints the discovered salts with their addresses.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let mode = cli.run.hex_mode();
    let options = cli.run.engine_options();
    let json = cli.run.json;

    let job = cli.into_request()?.into_job(mode)?;
    let output = MiningEngine::new(options).run(&job)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render_text(&output));
    }
    Ok(())
}

/// Renders the results as lowercase hex, one per line, followed by a summary.
fn render_text(output: &MiningOutput) -> String {
    let mut text = String::new();
    for result in &output.results {
        text.push_str(&format!("Found {result}\n"));
    }
    text.push_str(&format!(
        "{} result(s), {} salts evaluated, stopped: {:?}, seed {}, {:.0} salts/s",
        output.results.len(),
        output.total_iterations,
        output.stop_reason,
        output.seed,
        output.rate()
    ));
    text
}
