//! mpdns - DNS sensor for a mini probe
//!
//! Binary entry point for the mpdns CLI application.

#![warn(clippy::all, warnings)]
#![warn(clippy::pedantic, clippy::nursery)]

use futures::future::join_all;
use mpdns::cli::Commands;
use mpdns::config::ConfigLoader;
use mpdns::dns::{self, DnsProbe, Envelope, ProbeParams};
use mpdns::error::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set up logging based on verbosity level.
///
/// Logs go to stderr so stdout carries only the JSON output.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `quiet` - Enable error-level only logging
fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

/// Print a value as JSON.
fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

/// Resolve the parameter set for a single run.
///
/// # Arguments
///
/// * `file` - Optional parameter file; must hold exactly one set
/// * the rest - Flag values, used when no file is given
fn single_params(
    file: Option<PathBuf>,
    sensor_id: i64,
    host: Option<String>,
    domain: Option<String>,
    record_type: &str,
    port: u16,
    timeout: u64,
) -> Result<ProbeParams> {
    if let Some(path) = file {
        let mut sets = ConfigLoader::load_from_file(path)?;
        if sets.len() != 1 {
            return Err(Error::config(format!(
                "Expected one parameter set, found {}. Use 'batch' for several.",
                sets.len()
            )));
        }
        return Ok(sets.remove(0));
    }

    let host = host.ok_or_else(|| Error::config("--host is required"))?;
    let domain = domain.ok_or_else(|| Error::config("--domain is required"))?;
    ConfigLoader::from_args(sensor_id, &host, &domain, record_type, port, timeout)
}

/// Run every parameter set concurrently and collect the envelopes in input order.
async fn run_batch(file: PathBuf) -> Result<Vec<Envelope>> {
    let sets = ConfigLoader::load_from_file(file)?;
    tracing::info!("Running {} sensors", sets.len());

    let probe = DnsProbe::new();
    Ok(join_all(sets.iter().map(|params| probe.execute(params))).await)
}

/// Main entry point for the mpdns CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (cli, verbose) = mpdns::cli::parse_verbose();
    setup_logging(verbose, cli.quiet);

    match cli.command {
        Commands::Describe => {
            print_json(&dns::describe(), cli.pretty)?;
        }

        Commands::Run {
            file,
            host,
            domain,
            record_type,
            port,
            timeout,
            sensor_id,
        } => {
            let params =
                single_params(file, sensor_id, host, domain, &record_type, port, timeout)?;
            let mut results: Vec<Envelope> = Vec::with_capacity(1);
            dns::run(&params, &mut results).await;
            for envelope in &results {
                print_json(envelope, cli.pretty)?;
            }
        }

        Commands::Batch { file } => {
            let envelopes = run_batch(file).await?;
            print_json(&envelopes, cli.pretty)?;
        }
    }

    Ok(())
}
