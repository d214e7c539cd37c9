//! Loading variable tables from YAML definition files.
//!
//! # Format
//!
//! A definition file has two optional top-level sections. JSON works too,
//! since it's a subset of YAML.
//!
//! ```yaml
//! colors:
//!   # A string applies to the default mode.
//!   accent_faded: "rgba($accent.rgb, 0.5)"
//!
//!   # light/dark keys define per-mode values.
//!   accent:
//!     light: "#ff0000"
//!     dark: "rgb(255, 128, 128)"
//!
//!   # Any other mapping is a structured definition.
//!   scrim:
//!     rgb_var: shadow
//!     opacity_var: scrim_opacity
//!
//! opacities:
//!   scrim_opacity: 0.6
//! ```
//!
//! See [`parse_color`] for the string syntax. Definitions keep file order,
//! which is also the order of generated output.
//!
//! Loading checks the shape of each definition only. References and cycles
//! are checked by [`validate`](crate::validate::validate) before generation.

mod syntax;

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::model::{Color, ColorSpec, Mode, ValidationError, VariableTable};

pub use syntax::parse_color;

/// Error type for definition loading failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// YAML parse error, or a top-level structure that isn't a definition file.
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// A color string that doesn't parse.
    InvalidColor {
        /// Variable being defined.
        name: String,
        /// The offending string.
        value: String,
        message: String,
        path: Option<PathBuf>,
    },

    /// A definition with the wrong shape.
    InvalidDefinition {
        name: String,
        message: String,
        path: Option<PathBuf>,
    },

    /// File read error.
    Io { path: PathBuf, message: String },
}

impl LoadError {
    /// Attaches a source path to errors that don't have one yet.
    pub fn with_path(self, source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        match self {
            LoadError::Parse { path: None, message } => LoadError::Parse {
                path: Some(source),
                message,
            },
            LoadError::InvalidColor {
                name,
                value,
                message,
                path: None,
            } => LoadError::InvalidColor {
                name,
                value,
                message,
                path: Some(source),
            },
            LoadError::InvalidDefinition {
                name,
                message,
                path: None,
            } => LoadError::InvalidDefinition {
                name,
                message,
                path: Some(source),
            },
            other => other,
        }
    }

    fn definition(name: &str, message: impl Into<String>) -> Self {
        LoadError::InvalidDefinition {
            name: name.to_string(),
            message: message.into(),
            path: None,
        }
    }
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Parse { path, message } => match path {
                Some(p) => write!(f, "failed to parse definitions {}: {}", p.display(), message),
                None => write!(f, "failed to parse definitions: {}", message),
            },
            LoadError::InvalidColor {
                name,
                value,
                message,
                path,
            } => write!(
                f,
                "invalid color '{}' for '{}'{}: {}",
                value,
                name,
                location(path),
                message
            ),
            LoadError::InvalidDefinition {
                name,
                message,
                path,
            } => write!(
                f,
                "invalid definition for '{}'{}: {}",
                name,
                location(path),
                message
            ),
            LoadError::Io { path, message } => {
                write!(f, "failed to read {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for LoadError {}

/// Parses a definition document into a table.
pub fn parse_definitions(yaml: &str) -> Result<VariableTable, LoadError> {
    let root: Value = serde_yaml::from_str(yaml).map_err(|e| LoadError::Parse {
        path: None,
        message: e.to_string(),
    })?;

    let mut table = VariableTable::new();
    let root = match root {
        Value::Null => return Ok(table),
        Value::Mapping(root) => root,
        _ => {
            return Err(LoadError::Parse {
                path: None,
                message: "expected a mapping at the top level".to_string(),
            })
        }
    };

    for (key, section) in root {
        let key = key_name(&key).map_err(|message| LoadError::Parse {
            path: None,
            message,
        })?;
        match (key.as_str(), section) {
            (_, Value::Null) => {}
            ("colors", Value::Mapping(colors)) => parse_colors(&mut table, colors)?,
            ("opacities", Value::Mapping(opacities)) => parse_opacities(&mut table, opacities)?,
            ("colors" | "opacities", _) => {
                return Err(LoadError::Parse {
                    path: None,
                    message: format!("'{}' must be a mapping", key),
                })
            }
            (other, _) => {
                return Err(LoadError::Parse {
                    path: None,
                    message: format!("unknown section '{}'", other),
                })
            }
        }
    }

    debug!(
        colors = table.len(),
        opacities = table.opacities().count(),
        "parsed definitions"
    );
    Ok(table)
}

fn key_name(key: &Value) -> Result<String, String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        other => Err(format!("expected a string key, found {:?}", other)),
    }
}

fn parse_colors(table: &mut VariableTable, colors: Mapping) -> Result<(), LoadError> {
    for (key, value) in colors {
        let name = key_name(&key).map_err(|message| LoadError::definition("<colors>", message))?;
        match value {
            Value::Mapping(map) if is_mode_mapping(&map) => {
                for (mode_key, mode_value) in map {
                    let mode: Mode = key_name(&mode_key)
                        .and_then(|m| m.parse())
                        .map_err(|message| LoadError::definition(&name, message))?;
                    table.insert_color(&name, mode, parse_definition(&name, mode_value)?);
                }
            }
            value => table.insert_color(&name, Mode::default(), parse_definition(&name, value)?),
        }
    }
    Ok(())
}

/// A non-empty mapping whose keys are all mode names.
fn is_mode_mapping(map: &Mapping) -> bool {
    !map.is_empty()
        && map
            .keys()
            .all(|key| matches!(key.as_str(), Some(k) if k.parse::<Mode>().is_ok()))
}

fn parse_definition(name: &str, value: Value) -> Result<Color, LoadError> {
    match value {
        Value::String(s) => parse_color(&s).map_err(|message| LoadError::InvalidColor {
            name: name.to_string(),
            value: s.clone(),
            message,
            path: None,
        }),
        Value::Mapping(_) => {
            let spec: ColorSpec = serde_yaml::from_value(value)
                .map_err(|e| LoadError::definition(name, e.to_string()))?;
            spec.into_color(name).map_err(|err| match err {
                ValidationError::InvalidColorSpec { reason, .. } => {
                    LoadError::definition(name, reason)
                }
                other => LoadError::definition(name, other.to_string()),
            })
        }
        other => Err(LoadError::definition(
            name,
            format!("expected a color string or mapping, found {:?}", other),
        )),
    }
}

fn parse_opacities(table: &mut VariableTable, opacities: Mapping) -> Result<(), LoadError> {
    for (key, value) in opacities {
        let name =
            key_name(&key).map_err(|message| LoadError::definition("<opacities>", message))?;
        let value = value
            .as_f64()
            .ok_or_else(|| LoadError::definition(&name, "opacity must be a number"))?;
        if !(0.0..=1.0).contains(&value) {
            return Err(LoadError::definition(
                &name,
                format!("opacity {} is outside [0, 1]", value),
            ));
        }
        table.insert_opacity(&name, value);
    }
    Ok(())
}

/// Loads one definition file, recording its path as a source.
pub fn load_file(path: impl AsRef<Path>) -> Result<VariableTable, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let table = parse_definitions(&content).map_err(|e| e.with_path(path))?;
    debug!(path = %path.display(), colors = table.len(), "loaded definition file");
    Ok(table.add_source(path.display().to_string()))
}

/// Loads several files and merges them in order; later definitions replace
/// earlier ones per mode.
pub fn load_files<I, P>(paths: I) -> Result<VariableTable, LoadError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .try_fold(VariableTable::new(), |table, path| {
            Ok(table.merge(load_file(path)?))
        })
}

impl VariableTable {
    /// Parses a definition document. See [`crate::loader`] for the format.
    pub fn from_yaml(yaml: &str) -> Result<Self, LoadError> {
        parse_definitions(yaml)
    }

    /// Loads a definition file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        load_file(path)
    }

    /// Loads and merges several definition files.
    pub fn from_files<I, P>(paths: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        load_files(paths)
    }
}
