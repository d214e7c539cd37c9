//! Color definitions: literals, aliases, and RGB aliases with separate opacity.

use serde::Deserialize;

use super::error::ValidationError;

/// Where a color's alpha channel comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Alpha {
    /// A literal alpha in `[0, 1]`.
    Value(f64),
    /// A reference to a named opacity variable.
    Opacity(String),
    /// No alpha given and no opacity reference.
    Unspecified,
}

impl Alpha {
    /// Fully opaque literal alpha.
    pub const OPAQUE: Alpha = Alpha::Value(1.0);

    /// Returns true for a literal alpha of exactly 1.
    pub fn is_opaque(&self) -> bool {
        matches!(self, Alpha::Value(a) if *a == 1.0)
    }
}

impl From<f64> for Alpha {
    fn from(value: f64) -> Self {
        Alpha::Value(value)
    }
}

impl From<&str> for Alpha {
    fn from(opacity: &str) -> Self {
        Alpha::Opacity(opacity.to_string())
    }
}

/// A color definition for one variable in one mode.
///
/// Exactly one shape applies, so a color can never be both an alias and an
/// RGB alias.
///
/// # Example
///
/// ```rust
/// use stylevars::{Alpha, Color};
///
/// let accent = Color::rgb(255, 0, 0);
/// let text = Color::alias("accent");
/// let faded = Color::rgb_alias("accent", 0.5);
/// let disabled = Color::rgb_alias("accent", "disabled_opacity");
///
/// assert!(matches!(faded, Color::RgbAlias { alpha: Alpha::Value(_), .. }));
/// assert!(matches!(disabled, Color::RgbAlias { alpha: Alpha::Opacity(_), .. }));
/// # let _ = (accent, text);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// Concrete channels.
    Literal { r: u8, g: u8, b: u8, alpha: Alpha },
    /// The whole value of another color variable (`var`).
    Alias(String),
    /// RGB channels of another color variable (`rgb_var`) with its own alpha.
    RgbAlias { rgb_var: String, alpha: Alpha },
}

impl Color {
    /// An opaque literal.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Literal {
            r,
            g,
            b,
            alpha: Alpha::OPAQUE,
        }
    }

    /// A literal with alpha taken from a value or an opacity variable.
    pub fn rgba(r: u8, g: u8, b: u8, alpha: impl Into<Alpha>) -> Self {
        Color::Literal {
            r,
            g,
            b,
            alpha: alpha.into(),
        }
    }

    /// An alias to another color variable.
    pub fn alias(target: impl Into<String>) -> Self {
        Color::Alias(target.into())
    }

    /// The RGB channels of `rgb_var` combined with `alpha`.
    pub fn rgb_alias(rgb_var: impl Into<String>, alpha: impl Into<Alpha>) -> Self {
        Color::RgbAlias {
            rgb_var: rgb_var.into(),
            alpha: alpha.into(),
        }
    }

    /// Returns the color variable this definition references, if any.
    pub fn color_reference(&self) -> Option<&str> {
        match self {
            Color::Alias(target) => Some(target),
            Color::RgbAlias { rgb_var, .. } => Some(rgb_var),
            Color::Literal { .. } => None,
        }
    }

    /// Returns the alpha source. Plain aliases carry none of their own.
    pub fn alpha(&self) -> Option<&Alpha> {
        match self {
            Color::Literal { alpha, .. } | Color::RgbAlias { alpha, .. } => Some(alpha),
            Color::Alias(_) => None,
        }
    }
}

/// The structured, field-per-attribute form of a color definition.
///
/// This mirrors the raw definition records: any combination of fields can be
/// present, so it has to be checked before it becomes a [`Color`]. An `a` of
/// `-1` is read as "unspecified", which lets `opacity_var` supply the alpha.
///
/// ```yaml
/// scrim:
///   rgb_var: shadow
///   opacity_var: scrim_opacity
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorSpec {
    pub r: Option<u8>,
    pub g: Option<u8>,
    pub b: Option<u8>,
    pub a: Option<f64>,
    pub var: Option<String>,
    pub rgb_var: Option<String>,
    pub opacity_var: Option<String>,
}

impl ColorSpec {
    /// Checks field combinations and converts to a [`Color`].
    ///
    /// `name` is the variable being defined, used in error messages.
    pub fn into_color(self, name: &str) -> Result<Color, ValidationError> {
        let has_channels = self.r.is_some() || self.g.is_some() || self.b.is_some();

        let alpha = match (self.a, self.opacity_var) {
            (Some(a), Some(opacity)) if a == -1.0 => Alpha::Opacity(opacity),
            (Some(_), Some(_)) => {
                return Err(ValidationError::invalid(
                    name,
                    "both a and opacity_var are set",
                ))
            }
            (Some(a), None) if a == -1.0 => Alpha::Unspecified,
            (Some(a), None) if !(0.0..=1.0).contains(&a) => {
                return Err(ValidationError::invalid(
                    name,
                    format!("alpha {} is outside [0, 1]", a),
                ))
            }
            (Some(a), None) => Alpha::Value(a),
            (None, Some(opacity)) => Alpha::Opacity(opacity),
            (None, None) => Alpha::Unspecified,
        };

        match (self.var, self.rgb_var) {
            (Some(_), Some(_)) => Err(ValidationError::invalid(
                name,
                "both var and rgb_var are set",
            )),
            (Some(target), None) => {
                if has_channels || alpha != Alpha::Unspecified {
                    return Err(ValidationError::invalid(
                        name,
                        "var aliases can't carry channels or alpha",
                    ));
                }
                Ok(Color::Alias(target))
            }
            (None, Some(rgb_var)) => {
                if has_channels {
                    return Err(ValidationError::invalid(
                        name,
                        "rgb_var aliases can't carry r, g or b",
                    ));
                }
                Ok(Color::RgbAlias { rgb_var, alpha })
            }
            (None, None) => match (self.r, self.g, self.b) {
                (Some(r), Some(g), Some(b)) => Ok(Color::Literal { r, g, b, alpha }),
                _ => Err(ValidationError::invalid(
                    name,
                    "literal colors need r, g and b",
                )),
            },
        }
    }
}
