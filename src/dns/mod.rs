//! DNS module.
//!
//! This module provides the DNS sensor:
//! - Sensor definition for the host GUI
//! - One-shot query against a given nameserver
//! - Answer formatting and result envelopes

pub mod descriptor;
pub mod envelope;
pub mod format;
pub mod lookup;
pub mod probe;
pub mod types;

pub use descriptor::{describe, SensorDescriptor, KIND};
pub use envelope::{Channel, Envelope, ResultSink};
pub use lookup::{RecordLookup, TrustDnsLookup};
pub use probe::{DnsProbe, ProbeOutcome};
pub use types::*;

/// Run one sensor invocation over the network and push its envelope.
pub async fn run<S>(params: &ProbeParams, sink: &mut S)
where
    S: ResultSink + ?Sized,
{
    DnsProbe::new().run(params, sink).await;
}
