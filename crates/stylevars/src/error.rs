//! Error types for rendering and generation.
//!
//! [`RenderError`] covers template engine failures and hides the engine's own
//! error type. [`GenerateError`] is what [`Generator`](crate::Generator)
//! returns: either the table failed validation, or rendering failed.

use std::fmt;

use thiserror::Error;

use crate::model::ValidationError;

/// Error type for template rendering operations.
#[derive(Debug)]
pub enum RenderError {
    /// Template syntax error or compilation failure.
    TemplateError(String),

    /// Template not found in the engine.
    TemplateNotFound(String),

    /// Context serialization error.
    SerializationError(String),

    /// I/O error (e.g., reading a template directory).
    IoError(std::io::Error),

    /// Other operational error.
    OperationError(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::TemplateError(msg) => write!(f, "template error: {}", msg),
            RenderError::TemplateNotFound(name) => write!(f, "template not found: {}", name),
            RenderError::SerializationError(msg) => write!(f, "serialization error: {}", msg),
            RenderError::IoError(err) => write!(f, "I/O error: {}", err),
            RenderError::OperationError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::IoError(err)
    }
}

impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::SyntaxError
            | ErrorKind::BadEscape
            | ErrorKind::UndefinedError
            | ErrorKind::UnknownTest
            | ErrorKind::UnknownFunction
            | ErrorKind::UnknownFilter
            | ErrorKind::UnknownMethod => RenderError::TemplateError(err.to_string()),
            ErrorKind::BadSerialization => RenderError::SerializationError(err.to_string()),
            _ => RenderError::OperationError(err.to_string()),
        }
    }
}

/// Error returned by generators.
///
/// No output is produced when either variant is returned.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The variable table is inconsistent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The template engine failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::TemplateNotFound("css".to_string());
        assert!(err.to_string().contains("template not found"));
        assert!(err.to_string().contains("css"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such dir");
        let render_err: RenderError = io_err.into();
        assert!(matches!(render_err, RenderError::IoError(_)));
    }

    #[test]
    fn test_from_minijinja_template_not_found() {
        let mj_err = minijinja::Error::new(
            minijinja::ErrorKind::TemplateNotFound,
            "template 'views_cc' not found",
        );
        let render_err: RenderError = mj_err.into();
        assert!(matches!(render_err, RenderError::TemplateNotFound(_)));
    }

    #[test]
    fn test_generate_error_is_transparent() {
        let err: GenerateError = ValidationError::CyclicReference {
            path: vec!["a".into(), "a".into()],
        }
        .into();
        assert_eq!(err.to_string(), "cyclic reference: a -> a");
    }
}
