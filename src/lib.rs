//! mpdns - DNS sensor for a mini probe.
//!
//! This crate provides both a library API and a CLI tool for:
//! - Describing the sensor's configuration fields to a monitoring host
//! - Sending one DNS query to a given nameserver under a deadline
//! - Reporting the answer text and a response-time channel as a result envelope
//!
//! # Library Usage
//!
//! ```ignore
//! use mpdns::{DnsProbe, Envelope, ProbeParams, RecordType};
//!
//! let params = ProbeParams::new(1001, "example.com", "192.0.2.53")
//!     .with_record_type(RecordType::Mx);
//! let (mut tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Envelope>();
//! DnsProbe::new().run(&params, &mut tx).await;
//! let envelope = rx.recv().await;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Sensor definition
//! mpdns describe
//!
//! # One query
//! mpdns run --host 192.0.2.53 --domain example.com --type MX
//!
//! # Several sensors at once
//! mpdns batch --file sensors.json
//! ```

pub mod cli;
pub mod config;
pub mod dns;
pub mod error;

// Re-export commonly used types
pub use cli::{Cli, Commands};
pub use config::ConfigLoader;
pub use dns::{
    describe, Answer, Channel, DnsProbe, Envelope, ProbeOutcome, ProbeParams, RecordLookup,
    RecordType, ResultSink, SensorDescriptor, TrustDnsLookup,
};
pub use error::{Error, Result};
