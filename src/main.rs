//! Command-line entry point: run one comparison and print the payload.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fleet_dispatch::config::Config;
use fleet_dispatch::directions::RoadDistanceGateway;
use fleet_dispatch::events::SseWriter;
use fleet_dispatch::llm::AnthropicClient;
use fleet_dispatch::model::OptimizeRequest;
use fleet_dispatch::pipeline::Pipeline;
use fleet_dispatch::seed;

#[derive(Debug, Parser)]
#[command(
    name = "fleet-dispatch",
    about = "Compare optimizer ride assignments against a round-robin baseline",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// JSON request with `rides` and `vehicles`; the seed scenario when omitted.
    #[arg(long, value_name = "path")]
    input: Option<PathBuf>,

    /// Print server-sent event frames instead of a single JSON payload.
    #[arg(long)]
    stream: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the seed scenario as a request body.
    Seed,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("fleet-dispatch: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(Command::Seed) = cli.command {
        println!("{}", serde_json::to_string_pretty(&seed::request())?);
        return Ok(());
    }

    let request: OptimizeRequest = match &cli.input {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => seed::request(),
    };

    let config = Config::from_env()?;
    let gateway = RoadDistanceGateway::from_config(&config.maps);
    if !gateway.has_provider() {
        tracing::info!("no maps key configured, distances are straight-line estimates");
    }
    let optimizer = AnthropicClient::new(config.llm)?;
    let pipeline = Pipeline::new(&gateway, &optimizer);

    if cli.stream {
        let stdout = io::stdout();
        let mut sink = SseWriter::new(stdout.lock());
        pipeline.stream(&request.rides, &request.vehicles, &mut sink);
        return Ok(());
    }

    let comparison = pipeline.compare(&request.rides, &request.vehicles)?;
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &comparison)?;
    writeln!(stdout)?;
    Ok(())
}
