//! Generator configuration.
//!
//! Configuration is a plain value passed to [`Resolver`](crate::Resolver) and
//! [`Generator`](crate::Generator) constructors. It can be built in code or
//! read from YAML:
//!
//! ```rust
//! use stylevars::{GeneratorConfig, Mode, UnspecifiedAlpha};
//!
//! let config = GeneratorConfig::from_yaml(r#"
//! prefix: cros
//! single_mode: dark
//! output_identifier: ui/chromeos/colors.h
//! unspecified_rgb_alpha: inherit
//! "#).unwrap();
//!
//! assert_eq!(config.prefix, "cros");
//! assert_eq!(config.single_mode, Some(Mode::Dark));
//! assert_eq!(config.default_mode, Mode::Light);
//! assert_eq!(config.unspecified_rgb_alpha, UnspecifiedAlpha::Inherit);
//! ```

use serde::{Deserialize, Serialize};

use crate::loader::LoadError;
use crate::model::Mode;

/// How to treat an RGB alias that has neither a literal alpha nor an opacity
/// reference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnspecifiedAlpha {
    /// Reject the definition as an invalid color.
    #[default]
    Reject,
    /// Treat the alias as fully opaque.
    Opaque,
    /// Take the alpha of the referenced variable.
    Inherit,
}

/// Options recognized by resolvers and generators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Namespace prefix for generated names (`cros` gives `--cros-accent` and
    /// `kCrosAccent`). Empty for none.
    pub prefix: String,
    /// Mode used when a variable lacks a definition for the requested one.
    pub default_mode: Mode,
    /// Flatten all output to this mode instead of emitting every mode.
    pub single_mode: Option<Mode>,
    /// Output file identifier; the native backend derives its namespace and
    /// header guard from it.
    pub output_identifier: Option<String>,
    /// Policy for RGB aliases without an alpha source.
    pub unspecified_rgb_alpha: UnspecifiedAlpha,
}

impl GeneratorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, LoadError> {
        serde_yaml::from_str(yaml).map_err(|e| LoadError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Sets the name prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the fallback mode.
    pub fn with_default_mode(mut self, mode: Mode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Flattens output to a single mode.
    pub fn with_single_mode(mut self, mode: Mode) -> Self {
        self.single_mode = Some(mode);
        self
    }

    /// Sets the output file identifier.
    pub fn with_output_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.output_identifier = Some(identifier.into());
        self
    }

    /// Sets the policy for RGB aliases without an alpha source.
    pub fn with_unspecified_rgb_alpha(mut self, policy: UnspecifiedAlpha) -> Self {
        self.unspecified_rgb_alpha = policy;
        self
    }
}
