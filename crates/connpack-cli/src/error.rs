//! CLI error types with exit code handling
//!
//! Library errors are folded into one type that knows which exit code it maps to
//! and what help to print alongside it.

use connpack_core::CoreError;
use connpack_engine::EngineError;
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Connections file missing or unreadable
    #[error("{message}")]
    #[diagnostic(code(connpack::cli::source))]
    Source {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Connections file is not a mapping of connections
    #[error("{message}")]
    #[diagnostic(code(connpack::cli::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// One of the templates does not exist
    #[error("{message}")]
    #[diagnostic(code(connpack::cli::template))]
    TemplateMissing {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Rendering or writing failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Render(EngineError),

    /// IO error outside of rendering
    #[error("IO error: {message}")]
    #[diagnostic(code(connpack::cli::io))]
    Io { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Source { .. } => exit_codes::SOURCE_ERROR,
            CliError::Parse { .. } => exit_codes::PARSE_ERROR,
            CliError::TemplateMissing { .. } => exit_codes::TEMPLATE_ERROR,
            CliError::Render(EngineError::Write { .. }) => exit_codes::IO_ERROR,
            CliError::Render(_) => exit_codes::TEMPLATE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }

    /// Create an IO error with a custom message
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();

        match &err {
            CoreError::SourceNotFound { source, .. } => {
                let help = if source.kind() == std::io::ErrorKind::NotFound {
                    "Check the path given to --source".to_string()
                } else {
                    format!("The file exists but could not be read: {}", source)
                };
                CliError::Source {
                    message,
                    help: Some(help),
                }
            }
            _ if err.is_parse_error() => CliError::Parse {
                message,
                help: Some(
                    "Expected the output of `airflow connections export --file-format yaml`: \
                     a mapping of connection id to connection fields"
                        .to_string(),
                ),
            },
            _ => CliError::Parse {
                message,
                help: None,
            },
        }
    }
}

impl From<EngineError> for CliError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::TemplateNotFound { path } => CliError::TemplateMissing {
                message: format!("Template not found: {}", path.display()),
                help: Some(
                    "Templates are read from the `templates/` directory next to the connpack executable"
                        .to_string(),
                ),
            },
            other => CliError::Render(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
