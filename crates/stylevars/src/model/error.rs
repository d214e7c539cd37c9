//! Validation errors for variable tables.

use thiserror::Error;

use super::mode::Mode;

/// A configuration error that aborts generation before any output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A color or opacity reference names a variable that doesn't exist.
    /// `from` is empty when the missing name was asked for directly.
    #[error("{}", undefined_message(.from, .to))]
    UndefinedReference { from: String, to: String },

    /// An alias chain revisits a variable. `path` ends with the repeated name.
    #[error("cyclic reference: {}", path.join(" -> "))]
    CyclicReference { path: Vec<String> },

    /// A color definition can't be turned into a concrete value.
    #[error("invalid color '{name}': {reason}")]
    InvalidColorSpec { name: String, reason: String },

    /// A variable has no definition for the fallback mode.
    #[error("'{name}' has no {mode} definition")]
    MissingDefaultMode { name: String, mode: Mode },

    /// Two declared names map to the same generated identifier.
    #[error("'{first}' and '{second}' both generate '{generated}'")]
    NameCollision {
        generated: String,
        first: String,
        second: String,
    },
}

impl ValidationError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidColorSpec {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn undefined(from: &str, to: &str) -> Self {
        ValidationError::UndefinedReference {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// A lookup of `name` itself, with no referencing variable.
    pub(crate) fn unknown(name: &str) -> Self {
        Self::undefined("", name)
    }
}

fn undefined_message(from: &str, to: &str) -> String {
    if from.is_empty() {
        format!("undefined variable '{}'", to)
    } else {
        format!("'{}' references undefined variable '{}'", from, to)
    }
}
