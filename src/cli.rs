//! Command-line interface (CLI) argument parsing module.
//!
//! The binary stands in for the monitoring host: it prints the sensor
//! definition, or runs invocations and prints the envelopes they produce.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI argument parser using clap derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "mpdns",
    version,
    about = "DNS sensor for a mini probe",
    long_about = "Queries one nameserver, measures the response time and prints the result envelope",
    infer_subcommands = true
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (only errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the mpdns CLI.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the sensor definition
    #[command(alias = "d")]
    Describe,

    /// Run one sensor invocation
    #[command(alias = "r")]
    Run {
        /// Parameter file (JSON object); overrides the flags below
        #[arg(short, long, conflicts_with = "domain")]
        file: Option<PathBuf>,

        /// Nameserver to query
        #[arg(long, env = "MPDNS_HOST", required_unless_present = "file")]
        host: Option<String>,

        /// Name or address to resolve
        #[arg(short, long, required_unless_present = "file")]
        domain: Option<String>,

        /// Record type (A, AAAA, NS, SOA, PTR, MX, CNAME)
        #[arg(short = 't', long = "type", default_value = "A")]
        record_type: String,

        /// Nameserver port
        #[arg(short, long, default_value = "53")]
        port: u16,

        /// Timeout in seconds (1-900)
        #[arg(long, default_value = "5")]
        timeout: u64,

        /// Sensor id echoed in the result
        #[arg(long = "sensor-id", default_value = "0")]
        sensor_id: i64,
    },

    /// Run every parameter set in a file concurrently
    #[command(alias = "b")]
    Batch {
        /// Parameter file (JSON object or array)
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Parse CLI arguments and return verbose flag.
///
/// # Returns
///
/// Returns a tuple of `(Cli, verbose)` where `verbose` indicates
/// whether verbose logging was enabled.
#[must_use]
pub fn parse_verbose() -> (Cli, bool) {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    (cli, verbose)
}
