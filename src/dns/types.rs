//! DNS types and data structures.
//!
//! This module provides the query parameters handed over by the host,
//! the supported record types, and the typed answers a lookup yields.

use crate::error::{Error, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;
use trust_dns_resolver::proto::rr::RecordType as WireRecordType;

/// Default query timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default nameserver port.
pub const DEFAULT_PORT: u16 = 53;

/// Smallest accepted timeout in seconds.
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Largest accepted timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 900;

/// Record types the sensor can query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum RecordType {
    /// Host address IPv4
    #[default]
    A,
    /// Host address IPv6
    Aaaa,
    /// Authoritative name server
    Ns,
    /// Start of a zone of authority marker
    Soa,
    /// Domain name pointer
    Ptr,
    /// Mail exchange
    Mx,
    /// Canonical name for an alias
    Cname,
}

impl RecordType {
    /// All supported record types, in descriptor order.
    pub const ALL: [Self; 7] = [
        Self::A,
        Self::Aaaa,
        Self::Ns,
        Self::Soa,
        Self::Ptr,
        Self::Mx,
        Self::Cname,
    ];

    /// Mnemonic as used on the wire and in the descriptor.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Ptr => "PTR",
            Self::Mx => "MX",
            Self::Cname => "CNAME",
        }
    }

    /// Human-readable option label shown by the host GUI.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::A => "Host address IPv4 (A)",
            Self::Aaaa => "Host address IPv6 (AAAA)",
            Self::Ns => "Authoritative name server (NS)",
            Self::Soa => "Start of a zone of authority marker (SOA)",
            Self::Ptr => "Domain name pointer (PTR)",
            Self::Mx => "Mail exchange (MX)",
            Self::Cname => "Canonical name for an alias (CNAME)",
        }
    }

    /// The resolver's record type for this query.
    #[must_use]
    pub fn to_wire(self) -> WireRecordType {
        match self {
            Self::A => WireRecordType::A,
            Self::Aaaa => WireRecordType::AAAA,
            Self::Ns => WireRecordType::NS,
            Self::Soa => WireRecordType::SOA,
            Self::Ptr => WireRecordType::PTR,
            Self::Mx => WireRecordType::MX,
            Self::Cname => WireRecordType::CNAME,
        }
    }
}

impl std::str::FromStr for RecordType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::parse(format!(
                    "Unknown record type: {s}. Valid options are: A, AAAA, NS, SOA, PTR, MX, CNAME"
                ))
            })
    }
}

impl TryFrom<String> for RecordType {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one sensor invocation, as handed over by the host.
///
/// The host sends form values as strings, so the integer fields accept
/// either JSON numbers or numeric strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeParams {
    /// Host-assigned sensor identifier, echoed back in the envelope
    #[serde(rename = "sensorid", deserialize_with = "flexible_int")]
    pub sensor_id: i64,
    /// Upper bound on the query, in seconds
    #[serde(default = "default_timeout", deserialize_with = "flexible_int")]
    pub timeout: u64,
    /// Port the nameserver listens on
    #[serde(default = "default_port", deserialize_with = "flexible_int")]
    pub port: u16,
    /// Name or address to resolve
    pub domain: String,
    /// Record type to query
    #[serde(rename = "type", default)]
    pub record_type: RecordType,
    /// Nameserver to ask (IP literal or hostname)
    pub host: String,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

fn flexible_int<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
    T::Error: fmt::Display,
{
    let raw = match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => n,
        IntOrString::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| de::Error::custom(format!("invalid integer {s:?}: {e}")))?,
    };
    T::try_from(raw).map_err(|e| de::Error::custom(format!("integer {raw} out of range: {e}")))
}

impl ProbeParams {
    /// Create parameters with the descriptor defaults for timeout, port and type.
    pub fn new(sensor_id: i64, domain: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            sensor_id,
            timeout: DEFAULT_TIMEOUT_SECS,
            port: DEFAULT_PORT,
            domain: domain.into(),
            record_type: RecordType::default(),
            host: host.into(),
        }
    }

    /// Set the record type.
    #[must_use]
    pub fn with_record_type(mut self, record_type: RecordType) -> Self {
        self.record_type = record_type;
        self
    }

    /// Set the nameserver port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse the host's parameter mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is missing or has the wrong shape.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }

    /// Check the bounds the descriptor declares.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` for a timeout outside 1..=900 s, port 0,
    /// or an empty domain or host.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.timeout) {
            return Err(Error::config(format!(
                "timeout must be between {MIN_TIMEOUT_SECS} and {MAX_TIMEOUT_SECS} seconds, got {}",
                self.timeout
            )));
        }
        if self.port == 0 {
            return Err(Error::config("port must be between 1 and 65535, got 0"));
        }
        if self.domain.trim().is_empty() {
            return Err(Error::config("domain must not be empty"));
        }
        if self.host.trim().is_empty() {
            return Err(Error::config("host must not be empty"));
        }
        Ok(())
    }

    /// The timeout as a `Duration`.
    #[must_use]
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// One record from the answer section, reduced to what gets reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// A or AAAA record
    Address(IpAddr),
    /// MX record
    Mail {
        /// Lower is preferred
        preference: u16,
        /// Mail exchanger host name
        exchange: String,
    },
    /// NS, CNAME or PTR target
    Name(String),
    /// SOA record
    Authority {
        /// Primary nameserver
        mname: String,
        /// Responsible mailbox
        rname: String,
        /// Zone serial
        serial: u32,
    },
}
