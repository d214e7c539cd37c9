//! The color and opacity model.
//!
//! A [`VariableTable`] maps color variable names to per-mode [`Color`]
//! definitions and holds the named opacities those colors may reference.
//! Colors take one of three shapes:
//!
//! - [`Color::Literal`]: concrete channels plus an [`Alpha`] source
//! - [`Color::Alias`]: the whole value of another color variable
//! - [`Color::RgbAlias`]: another variable's RGB channels with a separate alpha
//!
//! Lookups distinguish "not defined for this mode" ([`Lookup::NotDefined`])
//! from "no such variable" (an error). Fallback between modes is the
//! resolver's job, not the table's.

mod color;
mod error;
mod mode;
mod table;

pub use color::{Alpha, Color, ColorSpec};
pub use error::ValidationError;
pub use mode::Mode;
pub use table::{Lookup, ModeValues, VariableTable};
