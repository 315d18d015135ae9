//! Sensor definition shown in the host's configuration UI.
//!
//! The host renders its form straight from this structure, so the JSON
//! key names are fixed.

use crate::dns::types::{
    RecordType, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Sensor kind identifier.
pub const KIND: &str = "mpdns";

/// Static sensor definition.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SensorDescriptor {
    /// Sensor kind identifier
    pub kind: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Help text
    pub help: &'static str,
    /// Tag the host attaches to created sensors
    pub tag: &'static str,
    /// Form field groups
    pub groups: Vec<FieldGroup>,
}

/// A titled group of form fields.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldGroup {
    /// Group identifier
    pub name: &'static str,
    /// Group title
    pub caption: &'static str,
    /// Fields in display order
    pub fields: Vec<Field>,
}

/// A single form field.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Field {
    /// Widget kind
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Parameter key the value is sent under
    pub name: &'static str,
    /// Field label
    pub caption: &'static str,
    /// The host expects the string `"1"`, not a boolean
    pub required: &'static str,
    /// Preset value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// Smallest accepted integer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<u64>,
    /// Largest accepted integer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<u64>,
    /// Help text
    pub help: &'static str,
    /// Radio choices, value to label, in display order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,
}

/// Form widget kinds.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Bounded integer input
    Integer,
    /// Free text
    Edit,
    /// One of a fixed set of options
    Radio,
}

impl SensorDescriptor {
    /// Look up a field by name across all groups.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.groups
            .iter()
            .flat_map(|g| g.fields.iter())
            .find(|f| f.name == name)
    }
}

/// Build the sensor definition.
#[must_use]
pub fn describe() -> SensorDescriptor {
    let options = RecordType::ALL
        .iter()
        .map(|t| (t.as_str().to_string(), Value::from(t.label())))
        .collect::<Map<_, _>>();

    SensorDescriptor {
        kind: KIND,
        name: "DNS",
        description: "Monitors a DNS server (Domain Name Service), resolves a domain name, and compares it to an IP address",
        help: "The DNS sensor monitors a Domain Name Service (DNS) server. It resolves a domain name and compares it to a given IP address.",
        tag: "mpdnssensor",
        groups: vec![FieldGroup {
            name: "DNS Specific",
            caption: "DNS Specific",
            fields: vec![
                Field {
                    field_type: FieldType::Integer,
                    name: "timeout",
                    caption: "Timeout (in s)",
                    required: "1",
                    default: Some(Value::from(DEFAULT_TIMEOUT_SECS)),
                    minimum: Some(MIN_TIMEOUT_SECS),
                    maximum: Some(MAX_TIMEOUT_SECS),
                    help: "Timeout in seconds. A maximum value of 900 is allowed.",
                    options: None,
                },
                Field {
                    field_type: FieldType::Integer,
                    name: "port",
                    caption: "Port",
                    required: "1",
                    default: Some(Value::from(DEFAULT_PORT)),
                    minimum: Some(1),
                    maximum: Some(u64::from(u16::MAX)),
                    help: "Enter the port on which the DNS service of the parent device is running.",
                    options: None,
                },
                Field {
                    field_type: FieldType::Edit,
                    name: "domain",
                    caption: "Domain",
                    required: "1",
                    default: None,
                    minimum: None,
                    maximum: None,
                    help: "Enter a DNS name or IP address to resolve.",
                    options: None,
                },
                Field {
                    field_type: FieldType::Radio,
                    name: "type",
                    caption: "Query Type",
                    required: "1",
                    default: Some(Value::from(RecordType::default().as_str())),
                    minimum: None,
                    maximum: None,
                    help: "Specify the type of query that the sensor will send to the DNS server.",
                    options: Some(options),
                },
            ],
        }],
    }
}
