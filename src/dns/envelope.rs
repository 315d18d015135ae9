//! Result envelopes and the sink they are pushed to.
//!
//! One invocation produces exactly one [`Envelope`]: either a success with
//! the response-time channel, or the fixed failure shape.

use serde::Serialize;

/// Name of the single metric channel.
pub const RESPONSE_TIME_CHANNEL: &str = "Response Time";

/// Error kind reported for every failure.
pub const FAILURE_ERROR: &str = "Exception";

/// Error code reported for every failure.
pub const FAILURE_CODE: u8 = 1;

/// Message reported for every failure.
pub const FAILURE_MESSAGE: &str = "DNS sensor failed. See log for details";

/// Prefix of every success message.
pub const MESSAGE_PREFIX: &str = "DNS: ";

/// One metric channel in the host's wire format.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Channel {
    /// Channel name shown on the dashboard
    pub name: &'static str,
    /// Whether the host charts the channel (0 or 1)
    #[serde(rename = "ShowChart")]
    pub show_chart: u8,
    /// Whether the host tabulates the channel (0 or 1)
    #[serde(rename = "ShowTable")]
    pub show_table: u8,
    /// Value kind, always `integer`
    pub mode: &'static str,
    /// Unit kind, always `Custom`
    pub kind: &'static str,
    /// Custom unit label
    #[serde(rename = "customunit")]
    pub unit: &'static str,
    /// Measured value
    pub value: u64,
}

impl Channel {
    /// The response-time channel, in whole milliseconds.
    #[must_use]
    pub fn response_time(millis: u64) -> Self {
        Self {
            name: RESPONSE_TIME_CHANNEL,
            show_chart: 0,
            show_table: 0,
            mode: "integer",
            kind: "Custom",
            unit: "ms",
            value: millis,
        }
    }
}

/// Result of one invocation as handed back to the host.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Envelope {
    /// Query answered
    Success {
        /// Host-assigned sensor id
        #[serde(rename = "sensorid")]
        sensor_id: i64,
        /// `"DNS: "` plus the formatted answer
        message: String,
        /// The response-time channel
        channel: Vec<Channel>,
    },
    /// Query failed for any reason
    Failure {
        /// Host-assigned sensor id
        #[serde(rename = "sensorid")]
        sensor_id: i64,
        /// Always `Exception`
        error: &'static str,
        /// Always 1
        code: u8,
        /// Fixed failure text
        message: &'static str,
    },
}

impl Envelope {
    /// Build a success envelope from the formatted result and elapsed time.
    #[must_use]
    pub fn success(sensor_id: i64, result: &str, elapsed_ms: u64) -> Self {
        Self::Success {
            sensor_id,
            message: format!("{MESSAGE_PREFIX}{result}"),
            channel: vec![Channel::response_time(elapsed_ms)],
        }
    }

    /// Build the fixed failure envelope.
    #[must_use]
    pub fn failure(sensor_id: i64) -> Self {
        Self::Failure {
            sensor_id,
            error: FAILURE_ERROR,
            code: FAILURE_CODE,
            message: FAILURE_MESSAGE,
        }
    }

    /// Sensor id this envelope belongs to.
    #[must_use]
    pub fn sensor_id(&self) -> i64 {
        match self {
            Self::Success { sensor_id, .. } | Self::Failure { sensor_id, .. } => *sensor_id,
        }
    }

    /// Check if the envelope reports a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Response time in milliseconds, if this is a success.
    #[must_use]
    pub fn response_time_ms(&self) -> Option<u64> {
        match self {
            Self::Success { channel, .. } => channel
                .iter()
                .find(|c| c.name == RESPONSE_TIME_CHANNEL)
                .map(|c| c.value),
            Self::Failure { .. } => None,
        }
    }
}

/// Append-only destination the host drains.
pub trait ResultSink {
    /// Hand one envelope to the host.
    fn push(&mut self, envelope: Envelope);
}

impl ResultSink for Vec<Envelope> {
    fn push(&mut self, envelope: Envelope) {
        Vec::push(self, envelope);
    }
}

impl ResultSink for tokio::sync::mpsc::UnboundedSender<Envelope> {
    fn push(&mut self, envelope: Envelope) {
        if let Err(e) = self.send(envelope) {
            tracing::warn!(sensorid = e.0.sensor_id(), "Result queue closed, dropping result");
        }
    }
}

impl ResultSink for std::sync::mpsc::Sender<Envelope> {
    fn push(&mut self, envelope: Envelope) {
        if let Err(e) = self.send(envelope) {
            tracing::warn!(sensorid = e.0.sensor_id(), "Result queue closed, dropping result");
        }
    }
}
