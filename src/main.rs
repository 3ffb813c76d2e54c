use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, bail};
use calmmap_core::discovery::{NoOverrides, OverrideDirectory, OverrideSource};
use calmmap_core::loading::{DistanceMetric, load_network};
use calmmap_core::{Rank, RouteId};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "calmmap")]
#[command(author, version, about = "Resolve street work requests to centreline segments", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Centreline segments, GeoJSON
    #[arg(long, global = true)]
    segments: Option<PathBuf>,

    /// Ranked requests, tab separated
    #[arg(long, global = true)]
    requests: Option<PathBuf>,

    /// Directory of `<rank>.<stage>` override files
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,

    /// Endpoint proximity threshold
    #[arg(long, global = true)]
    tolerance: Option<f64>,

    #[arg(long, global = true, value_enum)]
    metric: Option<Metric>,

    /// More output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report the start, end and route of each request
    Resolve {
        /// Only the request with this rank
        #[arg(long)]
        rank: Option<Rank>,
        #[arg(long)]
        json: bool,
    },
    /// Write resolved requests as GeoJSON
    Export {
        /// Output file, stdout if absent
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the link graph of a route in DOT format
    Routeviz { route_id: RouteId },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Metric {
    Haversine,
    Euclidean,
}

impl From<Metric> for DistanceMetric {
    fn from(metric: Metric) -> Self {
        match metric {
            Metric::Haversine => DistanceMetric::Haversine,
            Metric::Euclidean => DistanceMetric::Euclidean,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Config file values overridden by flags
fn effective_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(path) = &cli.segments {
        config.segments = Some(path.clone());
    }
    if let Some(path) = &cli.requests {
        config.requests = Some(path.clone());
    }
    if let Some(path) = &cli.overrides {
        config.overrides = Some(path.clone());
    }
    if let Some(tolerance) = cli.tolerance {
        config.network.tolerance = tolerance;
    }
    if let Some(metric) = cli.metric {
        config.network.metric = metric.into();
    }
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = effective_config(&cli)?;

    let Some(segments) = &config.segments else {
        bail!("No segments file, pass --segments or set `segments` in the config");
    };
    let network = load_network(segments, config.requests.as_deref(), config.network)
        .with_context(|| format!("Failed to load network from {}", segments.display()))?;

    let overrides: Box<dyn OverrideSource + Sync> = match &config.overrides {
        Some(dir) => {
            info!("Using overrides from {}", dir.display());
            Box::new(OverrideDirectory::new(dir))
        }
        None => Box::new(NoOverrides),
    };

    let stdout = io::stdout();
    match cli.command {
        Command::Resolve { rank, json } => {
            let mut out = stdout.lock();
            commands::resolve(&network, overrides.as_ref(), rank, json, &mut out)?;
        }
        Command::Export { output: Some(path) } => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            commands::export(&network, overrides.as_ref(), &mut out)?;
            out.flush()?;
            info!("Wrote {}", path.display());
        }
        Command::Export { output: None } => {
            commands::export(&network, overrides.as_ref(), &mut stdout.lock())?;
        }
        Command::Routeviz { route_id } => {
            commands::routeviz(&network, route_id, &mut stdout.lock())?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
