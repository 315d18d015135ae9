//! The DNS sensor invocation.
//!
//! An invocation validates its parameters, sends one query under the
//! configured deadline, formats the answer and pushes exactly one
//! envelope. Nothing is retried and nothing carries over between
//! invocations; dropping the future aborts an in-flight query.

#![allow(clippy::missing_errors_doc)]

use crate::dns::descriptor::{self, SensorDescriptor, KIND};
use crate::dns::envelope::{Envelope, ResultSink};
use crate::dns::format::format_answers;
use crate::dns::lookup::{RecordLookup, TrustDnsLookup};
use crate::dns::types::ProbeParams;
use crate::error::{Error, Result};
use std::time::{Duration, Instant};
use tokio::time::timeout;

/// Answer text plus how long the query took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// Formatted answer
    pub result: String,
    /// Wall time of the lookup
    pub elapsed: Duration,
}

impl ProbeOutcome {
    /// Elapsed time in whole milliseconds, truncated.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

/// DNS sensor.
///
/// Holds no state besides the lookup backend, so one value can serve any
/// number of concurrent invocations.
///
/// # Example
///
/// ```ignore
/// let probe = DnsProbe::new();
/// let params = ProbeParams::new(1001, "example.com", "192.0.2.53");
/// let mut results = Vec::new();
/// probe.run(&params, &mut results).await;
/// ```
#[derive(Debug, Clone, Default)]
pub struct DnsProbe<L = TrustDnsLookup> {
    lookup: L,
}

impl DnsProbe {
    /// Create a probe that queries over the network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: RecordLookup> DnsProbe<L> {
    /// Create a probe with a custom lookup backend.
    pub fn with_lookup(lookup: L) -> Self {
        Self { lookup }
    }

    /// Sensor kind identifier.
    #[must_use]
    pub fn kind() -> &'static str {
        KIND
    }

    /// Static sensor definition for the host GUI.
    #[must_use]
    pub fn describe() -> SensorDescriptor {
        descriptor::describe()
    }

    /// Perform one query and format the answer.
    ///
    /// The lookup, including resolving a nameserver hostname, is bounded
    /// by `params.timeout`.
    pub async fn query(&self, params: &ProbeParams) -> Result<ProbeOutcome> {
        params.validate()?;

        let start = Instant::now();
        let answers = timeout(params.timeout_duration(), self.lookup.lookup(params))
            .await
            .map_err(|_| Error::Timeout(params.timeout))??;
        let elapsed = start.elapsed();

        Ok(ProbeOutcome {
            result: format_answers(params.domain.trim(), params.record_type, &answers),
            elapsed,
        })
    }

    /// Run one invocation and push its envelope to `sink`.
    ///
    /// Always pushes exactly one envelope and never fails: any error becomes
    /// the fixed failure envelope, with the details logged.
    pub async fn run<S>(&self, params: &ProbeParams, sink: &mut S)
    where
        S: ResultSink + ?Sized,
    {
        sink.push(self.execute(params).await);
    }

    /// Run one invocation and return the envelope instead of pushing it.
    pub async fn execute(&self, params: &ProbeParams) -> Envelope {
        tracing::info!("Running sensor: {}", KIND);

        match self.query(params).await {
            Ok(outcome) => {
                tracing::debug!(sensorid = params.sensor_id, "DNS: {}", outcome.result);
                Envelope::success(params.sensor_id, &outcome.result, outcome.elapsed_ms())
            }
            Err(e) => {
                tracing::error!(
                    sensorid = params.sensor_id,
                    "Sensor '{}' failed for sensor {}. Error: {}",
                    KIND,
                    params.sensor_id,
                    e
                );
                Envelope::failure(params.sensor_id)
            }
        }
    }

    /// Run one invocation from the host's raw parameter mapping.
    ///
    /// A mapping that cannot be parsed still yields one failure envelope,
    /// addressed to whatever sensor id can be recovered (0 if none).
    pub async fn run_value<S>(&self, value: &serde_json::Value, sink: &mut S)
    where
        S: ResultSink + ?Sized,
    {
        match ProbeParams::from_value(value) {
            Ok(params) => self.run(&params, sink).await,
            Err(e) => {
                let sensor_id = sensor_id_hint(value);
                tracing::error!(
                    sensorid = sensor_id,
                    "Sensor '{}' got invalid parameters for sensor {}. Error: {}",
                    KIND,
                    sensor_id,
                    e
                );
                sink.push(Envelope::failure(sensor_id));
            }
        }
    }
}

/// Best-effort sensor id from a mapping that failed to parse.
fn sensor_id_hint(value: &serde_json::Value) -> i64 {
    match value.get("sensorid") {
        Some(serde_json::Value::Number(n)) => n.as_i64().unwrap_or_default(),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}
