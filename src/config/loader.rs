//! Invocation parameter loader.
//!
//! This module loads sensor parameter sets from JSON files or builds
//! them from command-line arguments, the same shape the host hands over.

use crate::dns::types::{ProbeParams, RecordType};
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Parameter loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load parameter sets from a JSON file.
    ///
    /// The file holds either one parameter mapping or an array of them.
    /// Every set is validated before it is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a set is
    /// out of range.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let sets = ConfigLoader::load_from_file("sensors.json")?;
    /// for params in &sets {
    ///     println!("{}: {} {}", params.sensor_id, params.record_type, params.domain);
    /// }
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<ProbeParams>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::load_from_str(&content)
    }

    /// Parse parameter sets from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON, a missing field, or a set that
    /// fails validation.
    pub fn load_from_str(content: &str) -> Result<Vec<ProbeParams>> {
        let value: Value = serde_json::from_str(content)?;
        let sets = match value {
            Value::Array(items) => items
                .iter()
                .map(ProbeParams::from_value)
                .collect::<Result<Vec<_>>>()?,
            Value::Object(_) => vec![ProbeParams::from_value(&value)?],
            _ => {
                return Err(Error::config(
                    "Expected a parameter object or an array of parameter objects",
                ))
            }
        };

        for params in &sets {
            params.validate()?;
        }
        Ok(sets)
    }

    /// Build one parameter set from command-line values.
    ///
    /// # Errors
    ///
    /// Returns an error if the record type is unknown or a value is out of
    /// range.
    pub fn from_args(
        sensor_id: i64,
        host: &str,
        domain: &str,
        record_type: &str,
        port: u16,
        timeout: u64,
    ) -> Result<ProbeParams> {
        let record_type: RecordType = record_type.parse()?;
        let params = ProbeParams::new(sensor_id, domain, host)
            .with_record_type(record_type)
            .with_port(port)
            .with_timeout(timeout);
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_single_object() {
        let sets = ConfigLoader::load_from_str(
            r#"{"sensorid": "1", "domain": "example.com", "host": "192.0.2.53"}"#,
        )
        .unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].sensor_id, 1);
        assert_eq!(sets[0].record_type, RecordType::A);
    }

    #[test]
    fn test_load_array_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"sensorid": 1, "domain": "example.com", "type": "A", "host": "192.0.2.53"}},
                {{"sensorid": 2, "domain": "example.com", "type": "MX", "port": "5353", "host": "192.0.2.53"}}
            ]"#
        )
        .unwrap();

        let sets = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[1].record_type, RecordType::Mx);
        assert_eq!(sets[1].port, 5353);
    }

    #[test]
    fn test_load_rejects_out_of_range() {
        let result = ConfigLoader::load_from_str(
            r#"{"sensorid": 1, "timeout": 0, "domain": "example.com", "host": "192.0.2.53"}"#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_rejects_scalar() {
        assert!(ConfigLoader::load_from_str("42").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = ConfigLoader::load_from_file("/nonexistent/sensors.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_config_from_args() {
        let params =
            ConfigLoader::from_args(3, "192.0.2.53", "example.com", "mx", 53, 10).unwrap();
        assert_eq!(params.sensor_id, 3);
        assert_eq!(params.record_type, RecordType::Mx);
        assert_eq!(params.timeout, 10);
    }

    #[test]
    fn test_config_from_args_invalid() {
        assert!(ConfigLoader::from_args(3, "192.0.2.53", "example.com", "TXT", 53, 5).is_err());
        assert!(ConfigLoader::from_args(3, "192.0.2.53", "example.com", "A", 53, 901).is_err());
    }
}
