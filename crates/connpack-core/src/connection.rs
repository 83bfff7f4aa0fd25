//! Connection records exposed to templates

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

use crate::error::{CoreError, Result};

/// Prefix Airflow uses to discover connections in the environment
pub const DEFAULT_ENV_PREFIX: &str = "AIRFLOW_CONN_";

/// A single connection, ready to be rendered into a values file or Secret
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// Connection id exactly as it appears in the source document
    pub name: String,

    /// Environment variable Airflow reads the connection from
    pub env_name: String,

    /// Base64 of the connection serialized as compact JSON
    pub data: String,
}

impl ConnectionRecord {
    /// Build a record from a connection id and its descriptor
    pub fn new(name: impl Into<String>, value: &YamlValue, env_prefix: &str) -> Result<Self> {
        let name = name.into();
        Ok(Self {
            env_name: env_name(env_prefix, &name),
            data: encode_payload(value)?,
            name,
        })
    }

    /// Decode `data` back into the JSON value it was built from
    pub fn decode_data(&self) -> Result<JsonValue> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| CoreError::InvalidPayload {
                message: format!("base64 decode error: {}", e),
            })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Environment variable name for a connection id
#[must_use]
pub fn env_name(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.to_uppercase())
}

/// Serialize a value to compact JSON and base64 encode it
pub fn encode_payload(value: &YamlValue) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(base64::engine::general_purpose::STANDARD.encode(json.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn yaml(src: &str) -> YamlValue {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn test_env_name_uppercases() {
        assert_eq!(env_name(DEFAULT_ENV_PREFIX, "postgres_default"), "AIRFLOW_CONN_POSTGRES_DEFAULT");
        assert_eq!(env_name(DEFAULT_ENV_PREFIX, "My-Conn.1"), "AIRFLOW_CONN_MY-CONN.1");
        assert_eq!(env_name("X_", "a"), "X_A");
    }

    #[test]
    fn test_postgres_record() {
        let value = yaml("conn_type: postgres\nhost: db\nport: 5432\n");
        let record = ConnectionRecord::new("postgres_default", &value, DEFAULT_ENV_PREFIX).unwrap();

        assert_eq!(record.name, "postgres_default");
        assert_eq!(record.env_name, "AIRFLOW_CONN_POSTGRES_DEFAULT");
        assert_eq!(
            record.data,
            "eyJjb25uX3R5cGUiOiJwb3N0Z3JlcyIsImhvc3QiOiJkYiIsInBvcnQiOjU0MzJ9"
        );
    }

    #[test]
    fn test_payload_is_compact_json_in_source_order() {
        let value = yaml(
            r#"
conn_type: http
host: api.example.com
extra:
  timeout: 30
  verify: true
"#,
        );
        let encoded = encode_payload(&value).unwrap();
        let decoded = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();

        assert_eq!(
            String::from_utf8(decoded).unwrap(),
            r#"{"conn_type":"http","host":"api.example.com","extra":{"timeout":30,"verify":true}}"#
        );
    }

    #[test]
    fn test_decode_data_roundtrip() {
        let value = yaml(
            r#"
conn_type: aws
login: null
port: 443
schema: ""
extra:
  regions: [eu-west-1, us-east-1]
  ratio: 0.5
  nested:
    enabled: false
"#,
        );
        let record = ConnectionRecord::new("aws_default", &value, DEFAULT_ENV_PREFIX).unwrap();

        assert_eq!(
            record.decode_data().unwrap(),
            json!({
                "conn_type": "aws",
                "login": null,
                "port": 443,
                "schema": "",
                "extra": {
                    "regions": ["eu-west-1", "us-east-1"],
                    "ratio": 0.5,
                    "nested": {"enabled": false}
                }
            })
        );
    }

    #[test]
    fn test_scalar_payload() {
        let record =
            ConnectionRecord::new("uri_conn", &yaml("postgres://user:pw@db:5432/app"), DEFAULT_ENV_PREFIX)
                .unwrap();
        assert_eq!(record.decode_data().unwrap(), json!("postgres://user:pw@db:5432/app"));
    }

    #[test]
    fn test_decode_invalid_base64() {
        let record = ConnectionRecord {
            name: "broken".to_string(),
            env_name: "AIRFLOW_CONN_BROKEN".to_string(),
            data: "not base64!".to_string(),
        };
        assert!(matches!(
            record.decode_data(),
            Err(CoreError::InvalidPayload { .. })
        ));
    }
}
