//! # stylevars - Style Variable Resolution and Code Generation
//!
//! `stylevars` turns a set of named color and opacity variables into generated
//! source: CSS custom properties, or a C++ header of Skia `SkColor` constants
//! for Views.
//!
//! Colors may be defined per mode (light/dark) and may reference each other,
//! either wholesale (`$accent`) or by RGB channels with their own alpha
//! (`rgba($accent.rgb, 0.5)`). Generators keep references where the output
//! language can follow them, or flatten everything for a single mode.
//!
//! ## Core Concepts
//!
//! - [`VariableTable`]: named colors with per-mode definitions, plus opacities
//! - [`Color`]: a literal, an alias, or an RGB alias with separate alpha
//! - [`Resolver`]: follows references and mode fallback to concrete values
//! - [`Generator`]: validates a table and renders it for a [`Backend`]
//! - [`GeneratorConfig`]: prefix, default mode, single-mode flattening
//!
//! ## Quick Start
//!
//! ```rust
//! use stylevars::{Backend, Generator, GeneratorConfig, ModeSelection, Mode, VariableTable};
//!
//! let table = VariableTable::from_yaml(r##"
//! colors:
//!   accent:
//!     light: "#ff0000"
//!     dark: "#ff8080"
//!   accent_faded: "rgba($accent.rgb, 0.5)"
//! "##).unwrap();
//!
//! let css = Generator::new(Backend::Css, &table, GeneratorConfig::default())
//!     .render(ModeSelection::All)
//!     .unwrap();
//! assert!(css.contains("--accent: rgb(255, 0, 0);"));
//! assert!(css.contains("@media (prefers-color-scheme: dark)"));
//!
//! let header = Generator::new(Backend::Views, &table, GeneratorConfig::default())
//!     .render(ModeSelection::Single(Mode::Light))
//!     .unwrap();
//! assert!(header.contains("constexpr SkColor kAccentFaded = SkColorSetARGB(0x80, 0xFF, 0x00, 0x00);"));
//! ```
//!
//! ## Errors
//!
//! Generation is all-or-nothing. [`Generator::render`] validates the table
//! first and returns a [`ValidationError`] for dangling references, cycles,
//! colors without an alpha source, variables missing the default mode, or
//! names that collide once transformed.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` for loading, validation and
//! rendering; `trace` per resolved color). It never installs a subscriber.

pub mod config;
mod error;
pub mod generator;
pub mod loader;
pub mod model;
pub mod resolve;
pub mod template;
pub mod validate;

pub use config::{GeneratorConfig, UnspecifiedAlpha};
pub use error::{GenerateError, RenderError};
pub use generator::{Backend, Generator, ModeSelection};
pub use loader::LoadError;
pub use model::{
    Alpha, Color, ColorSpec, Lookup, Mode, ModeValues, ValidationError, VariableTable,
};
pub use resolve::{Resolution, ResolvedColor, Resolver};
