//! Connpack Engine - Jinja2 rendering for Airflow connection secrets
//!
//! This crate provides a MiniJinja-based renderer with:
//! - Jinja2 syntax (`{{ }}` interpolation, `{% %}` control tags)
//! - Deployment filters (toyaml, b64encode, nindent, etc.)
//! - An explicit `ProcessingPlan` of template/output pairs
//! - Human-readable error messages with suggestions

pub mod engine;
pub mod error;
pub mod filters;
pub mod plan;
pub mod suggestions;

pub use engine::{Engine, EngineBuilder};
pub use error::{EngineError, Result, TemplateError, TemplateErrorKind};
pub use plan::{
    CONNECTIONS_TEMPLATE, ProcessingEntry, ProcessingPlan, SECRET_OUTPUT, VALUES_OUTPUT,
    VALUES_TEMPLATE,
};
pub use suggestions::{AVAILABLE_FILTERS, CONNECTION_FIELDS, CONTEXT_VARIABLES};
