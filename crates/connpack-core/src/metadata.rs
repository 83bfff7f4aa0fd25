//! Metadata derived from an exported connections file
//!
//! The source is the YAML produced by `airflow connections export --file-format yaml`:
//! a top-level mapping of connection id to connection descriptor. Descriptors are
//! kept as opaque values, only their JSON encoding matters downstream.

use serde::{Deserialize, Serialize};
use serde_yaml::Value as YamlValue;
use std::path::Path;

use crate::connection::{ConnectionRecord, DEFAULT_ENV_PREFIX};
use crate::error::{CoreError, Result};

/// Everything the templates get to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Target namespace, passed through untouched
    pub namespace: String,

    /// Connections in source document order
    pub connections: Vec<ConnectionRecord>,
}

impl Metadata {
    /// Create metadata with no connections
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            connections: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConnectionRecord> {
        self.connections.iter()
    }
}

/// Builds [`Metadata`] from a connections document
#[derive(Debug, Clone)]
pub struct MetadataBuilder {
    env_prefix: String,
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Override the environment variable prefix (default `AIRFLOW_CONN_`)
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and convert the connections file at `source`
    pub fn build<P: AsRef<Path>>(&self, namespace: &str, source: P) -> Result<Metadata> {
        let path = source.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                tracing::error!("File not found: {}", path.display());
            } else {
                tracing::error!("Cannot read source file: {}", path.display());
            }
            CoreError::SourceNotFound {
                path: path.to_path_buf(),
                source: e,
            }
        })?;

        self.build_from_str(namespace, &content, path)
    }

    /// Convert an in-memory connections document
    ///
    /// `origin` is only used for error messages.
    pub fn build_from_str(&self, namespace: &str, yaml: &str, origin: &Path) -> Result<Metadata> {
        if yaml.trim().is_empty() {
            return Err(CoreError::NotAMapping {
                path: origin.to_path_buf(),
                found: kind_name(&YamlValue::Null),
            });
        }

        let parse_error = |e| CoreError::SourceParse {
            path: origin.to_path_buf(),
            source: e,
        };

        let mut document: YamlValue = serde_yaml::from_str(yaml).map_err(parse_error)?;
        // `<<: *anchor` keys are folded into their parent mapping
        document.apply_merge().map_err(parse_error)?;

        let mapping = match document {
            YamlValue::Mapping(mapping) => mapping,
            other => {
                return Err(CoreError::NotAMapping {
                    path: origin.to_path_buf(),
                    found: kind_name(&other),
                });
            }
        };

        let mut metadata = Metadata::new(namespace);
        metadata.connections.reserve(mapping.len());

        for (key, value) in &mapping {
            let name = key.as_str().ok_or_else(|| CoreError::InvalidKey {
                path: origin.to_path_buf(),
                key: describe_key(key),
            })?;
            metadata
                .connections
                .push(ConnectionRecord::new(name, value, &self.env_prefix)?);
        }

        tracing::debug!(
            "Loaded {} connection(s) from {}",
            metadata.len(),
            origin.display()
        );

        Ok(metadata)
    }
}

/// Build metadata with default settings
pub fn build_metadata<P: AsRef<Path>>(namespace: &str, source: P) -> Result<Metadata> {
    MetadataBuilder::new().build(namespace, source)
}

fn kind_name(value: &YamlValue) -> &'static str {
    match value {
        YamlValue::Null => "an empty document",
        YamlValue::Bool(_) => "a boolean",
        YamlValue::Number(_) => "a number",
        YamlValue::String(_) => "a string",
        YamlValue::Sequence(_) => "a sequence",
        YamlValue::Mapping(_) => "a mapping",
        YamlValue::Tagged(_) => "a tagged value",
    }
}

fn describe_key(key: &YamlValue) -> String {
    serde_yaml::to_string(key)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| kind_name(key).to_string())
}
