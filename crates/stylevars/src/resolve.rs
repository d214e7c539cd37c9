//! Resolution of color variables to concrete values.
//!
//! The [`Resolver`] walks alias chains over an immutable [`VariableTable`]:
//!
//! 1. [`Color::Alias`] resolves the referenced variable under the same mode.
//! 2. [`Color::RgbAlias`] takes the RGB channels of the referenced variable and
//!    resolves alpha on its own: a literal wins, then the named opacity, then
//!    the configured [`UnspecifiedAlpha`] policy.
//! 3. [`Color::Literal`] yields its channels; unspecified alpha is opaque.
//!
//! A variable without a definition for the requested mode falls back to the
//! default mode. The top-level caller can turn that fallback off, in which
//! case the result is [`Resolution::Deferred`]; aliases followed internally
//! always fall back, since a chain must end in concrete channels.
//!
//! Names currently being resolved are kept on an explicit stack, so a chain
//! that revisits a name fails with [`ValidationError::CyclicReference`]
//! carrying the full path.

use tracing::trace;

use crate::config::{GeneratorConfig, UnspecifiedAlpha};
use crate::model::{Alpha, Color, Lookup, Mode, ValidationError, VariableTable};

/// A color with all aliasing removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Effective alpha in `[0, 1]`.
    pub a: f64,
    /// The opacity variable `a` was read from, if any.
    pub opacity_var: Option<String>,
}

impl ResolvedColor {
    /// Returns the RGB channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Converts back to a literal [`Color`], keeping the opacity reference
    /// when alpha came from one.
    pub fn to_color(&self) -> Color {
        let alpha = match &self.opacity_var {
            Some(opacity) => Alpha::Opacity(opacity.clone()),
            None => Alpha::Value(self.a),
        };
        Color::rgba(self.r, self.g, self.b, alpha)
    }
}

/// Outcome of a top-level resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The fully resolved value.
    Value(ResolvedColor),
    /// The variable has no definition for the mode and fallback was disabled;
    /// the caller should emit a reference instead of a value.
    Deferred,
}

impl Resolution {
    /// Returns the resolved value, if there is one.
    pub fn value(&self) -> Option<&ResolvedColor> {
        match self {
            Resolution::Value(color) => Some(color),
            Resolution::Deferred => None,
        }
    }
}

/// Resolves color variables against a table.
///
/// # Example
///
/// ```rust
/// use stylevars::{Color, GeneratorConfig, Mode, Resolution, Resolver, VariableTable};
///
/// let table = VariableTable::new()
///     .add("accent", Color::rgb(255, 0, 0))
///     .add("text", Color::alias("accent"));
/// let config = GeneratorConfig::default();
/// let resolver = Resolver::new(&table, &config);
///
/// let text = resolver.resolve("text", Mode::Dark, true).unwrap();
/// assert_eq!(text.value().map(|c| c.rgb()), Some((255, 0, 0)));
///
/// let deferred = resolver.resolve("text", Mode::Dark, false).unwrap();
/// assert_eq!(deferred, Resolution::Deferred);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    table: &'a VariableTable,
    default_mode: Mode,
    unspecified_rgb_alpha: UnspecifiedAlpha,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver reading `table` with the fallback mode and alpha
    /// policy from `config`.
    pub fn new(table: &'a VariableTable, config: &GeneratorConfig) -> Self {
        Self {
            table,
            default_mode: config.default_mode,
            unspecified_rgb_alpha: config.unspecified_rgb_alpha,
        }
    }

    /// Resolves `name` under `mode`.
    ///
    /// With `resolve_missing` false, a variable lacking a definition for
    /// `mode` yields [`Resolution::Deferred`] instead of falling back.
    pub fn resolve(
        &self,
        name: &str,
        mode: Mode,
        resolve_missing: bool,
    ) -> Result<Resolution, ValidationError> {
        if !resolve_missing && self.table.lookup(name, mode)? == Lookup::NotDefined {
            return Ok(Resolution::Deferred);
        }
        self.resolve_flat(name, mode).map(Resolution::Value)
    }

    /// Resolves `name` under `mode`, always falling back to the default mode.
    pub fn resolve_flat(&self, name: &str, mode: Mode) -> Result<ResolvedColor, ValidationError> {
        let mut stack = Vec::new();
        self.resolve_name(name, mode, &mut stack)
    }

    /// Returns the definition of `name` for `mode`, falling back to the
    /// default mode.
    pub fn definition(&self, name: &str, mode: Mode) -> Result<&'a Color, ValidationError> {
        if let Lookup::Defined(color) = self.table.lookup(name, mode)? {
            return Ok(color);
        }
        if mode != self.default_mode {
            if let Lookup::Defined(color) = self.table.lookup(name, self.default_mode)? {
                return Ok(color);
            }
        }
        Err(ValidationError::MissingDefaultMode {
            name: name.to_string(),
            mode: self.default_mode,
        })
    }

    fn resolve_name(
        &self,
        name: &str,
        mode: Mode,
        stack: &mut Vec<String>,
    ) -> Result<ResolvedColor, ValidationError> {
        if stack.iter().any(|seen| seen == name) {
            let mut path = stack.clone();
            path.push(name.to_string());
            return Err(ValidationError::CyclicReference { path });
        }
        if let Some(from) = stack.last() {
            if !self.table.exists(name) {
                return Err(ValidationError::undefined(from, name));
            }
        }

        trace!(name, %mode, depth = stack.len(), "resolving color");
        let color = self.definition(name, mode)?;
        stack.push(name.to_string());
        let resolved = self.resolve_definition(name, color, mode, stack);
        stack.pop();
        resolved
    }

    fn resolve_definition(
        &self,
        name: &str,
        color: &Color,
        mode: Mode,
        stack: &mut Vec<String>,
    ) -> Result<ResolvedColor, ValidationError> {
        match color {
            Color::Alias(target) => self.resolve_name(target, mode, stack),
            Color::RgbAlias { rgb_var, alpha } => {
                let base = self.resolve_name(rgb_var, mode, stack)?;
                let (a, opacity_var) = match alpha {
                    Alpha::Unspecified => match self.unspecified_rgb_alpha {
                        UnspecifiedAlpha::Reject => {
                            return Err(ValidationError::invalid(
                                name,
                                format!(
                                    "rgb_var '{}' has no alpha or opacity_var; \
                                     set unspecified_rgb_alpha to opaque or inherit to allow it",
                                    rgb_var
                                ),
                            ))
                        }
                        UnspecifiedAlpha::Opaque => (1.0, None),
                        UnspecifiedAlpha::Inherit => (base.a, base.opacity_var.clone()),
                    },
                    alpha => self.resolve_alpha(name, alpha)?,
                };
                Ok(ResolvedColor {
                    r: base.r,
                    g: base.g,
                    b: base.b,
                    a,
                    opacity_var,
                })
            }
            Color::Literal { r, g, b, alpha } => {
                let (a, opacity_var) = self.resolve_alpha(name, alpha)?;
                Ok(ResolvedColor {
                    r: *r,
                    g: *g,
                    b: *b,
                    a,
                    opacity_var,
                })
            }
        }
    }

    fn resolve_alpha(
        &self,
        name: &str,
        alpha: &Alpha,
    ) -> Result<(f64, Option<String>), ValidationError> {
        match alpha {
            Alpha::Value(a) => Ok((*a, None)),
            Alpha::Opacity(opacity) => self
                .table
                .opacity(opacity)
                .map(|a| (a, Some(opacity.clone())))
                .ok_or_else(|| ValidationError::undefined(name, opacity)),
            Alpha::Unspecified => Ok((1.0, None)),
        }
    }
}
