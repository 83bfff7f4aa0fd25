//! Connpack Core - Core types for turning Airflow connections into Kubernetes secrets
//!
//! This crate provides the foundational types used throughout connpack:
//! - `ConnectionRecord`: A single connection with its env var name and encoded payload
//! - `Metadata`: Namespace plus the ordered list of connections
//! - `MetadataBuilder`: Loads an exported connections file into `Metadata`

pub mod connection;
pub mod error;
pub mod metadata;

pub use connection::{ConnectionRecord, DEFAULT_ENV_PREFIX};
pub use error::{CoreError, Result};
pub use metadata::{Metadata, MetadataBuilder, build_metadata};
