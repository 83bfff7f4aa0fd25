//! Engine error types with miette diagnostics

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::PathBuf;
use thiserror::Error;

use crate::suggestions::{
    extract_expression, extract_filter, suggest_undefined_variable, suggest_unknown_filter,
};

/// Main engine error type
#[derive(Error, Debug, Diagnostic)]
pub enum EngineError {
    #[error("Template not found: {}", .path.display())]
    #[diagnostic(code(connpack::engine::template_not_found))]
    TemplateNotFound { path: PathBuf },

    #[error("Failed to read template {}: {source}", .path.display())]
    #[diagnostic(code(connpack::engine::template_read))]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(#[from] TemplateError),

    #[error("Failed to write {}: {source}", .path.display())]
    #[diagnostic(code(connpack::engine::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error kind for categorizing template errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TemplateErrorKind {
    UndefinedVariable,
    UnknownFilter,
    UnknownFunction,
    SyntaxError,
    TypeError,
    InvalidOperation,
    Other,
}

impl TemplateErrorKind {
    /// Convert to a code string for diagnostics
    pub fn to_code_string(&self) -> &'static str {
        match self {
            Self::UndefinedVariable => "undefined_variable",
            Self::UnknownFilter => "unknown_filter",
            Self::UnknownFunction => "unknown_function",
            Self::SyntaxError => "syntax",
            Self::TypeError => "type",
            Self::InvalidOperation => "invalid_operation",
            Self::Other => "render",
        }
    }
}

impl From<minijinja::ErrorKind> for TemplateErrorKind {
    fn from(kind: minijinja::ErrorKind) -> Self {
        match kind {
            minijinja::ErrorKind::UndefinedError => Self::UndefinedVariable,
            minijinja::ErrorKind::UnknownFilter => Self::UnknownFilter,
            minijinja::ErrorKind::UnknownFunction => Self::UnknownFunction,
            minijinja::ErrorKind::SyntaxError => Self::SyntaxError,
            minijinja::ErrorKind::InvalidOperation => Self::InvalidOperation,
            minijinja::ErrorKind::NonPrimitive | minijinja::ErrorKind::NonKey => Self::TypeError,
            _ => Self::Other,
        }
    }
}

/// Template error with source information
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(connpack::template::render))]
pub struct TemplateError {
    /// Error message
    pub message: String,

    /// Error kind for categorization
    pub kind: TemplateErrorKind,

    /// Template source code
    #[source_code]
    pub src: NamedSource<String>,

    /// Error location in source
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,

    /// Suggestion for fixing the error
    #[help]
    pub suggestion: Option<String>,
}

impl TemplateError {
    /// Create a template error from a MiniJinja error
    pub fn from_minijinja(err: minijinja::Error, template_name: &str, template_source: &str) -> Self {
        let kind = TemplateErrorKind::from(err.kind());
        let line = err
            .line()
            .and_then(|n| template_source.lines().nth(n.saturating_sub(1)));
        let span = err
            .line()
            .and_then(|n| calculate_span(template_source, n));

        let message = match err.detail() {
            Some(detail) => format!("{}: {}", kind.to_code_string().replace('_', " "), detail),
            None => err.to_string(),
        };

        Self {
            message,
            kind,
            src: NamedSource::new(template_name, template_source.to_string()),
            span,
            suggestion: line.and_then(|l| generate_suggestion(kind, l)),
        }
    }

    pub fn kind(&self) -> TemplateErrorKind {
        self.kind
    }
}

/// Source span covering a whole 1-based line
fn calculate_span(source: &str, line_num: usize) -> Option<SourceSpan> {
    let mut offset = 0;

    for (idx, line) in source.split('\n').enumerate() {
        if idx + 1 == line_num {
            return Some(SourceSpan::new(offset.into(), line.len()));
        }
        offset += line.len() + 1;
    }

    None
}

fn generate_suggestion(kind: TemplateErrorKind, line: &str) -> Option<String> {
    match kind {
        TemplateErrorKind::UndefinedVariable => extract_expression(line)
            .and_then(|expr| suggest_undefined_variable(&expr))
            .or_else(|| {
                Some("Variable is not defined. Check spelling or use the `default` filter.".to_string())
            }),
        TemplateErrorKind::UnknownFilter => {
            extract_filter(line).and_then(|name| suggest_unknown_filter(&name))
        }
        TemplateErrorKind::SyntaxError => Some(
            "Check that every `{{` has a matching `}}` and every `{%` block is closed".to_string(),
        ),
        _ => None,
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
