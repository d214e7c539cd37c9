//! Code generation from a variable table.
//!
//! A [`Generator`] turns a validated [`VariableTable`] into text for one
//! [`Backend`]. Both backends share the same steps:
//!
//! 1. Validate the table (references, cycles, alpha sources, name collisions).
//! 2. Build a JSON context: per-color expressions plus backend globals.
//! 3. Render the backend template through a [`TemplateEngine`].
//!
//! Expressions keep references where the target language can follow them
//! (`var(--x)`, `ResolveColor(ColorName::kX, is_dark_mode)`). With
//! [`ModeSelection::Single`] every color is flattened to a literal for one
//! mode instead.
//!
//! # Example
//!
//! ```rust
//! use stylevars::{Backend, Color, Generator, GeneratorConfig, ModeSelection, VariableTable};
//!
//! let table = VariableTable::new()
//!     .add("accent", Color::rgb(255, 0, 0))
//!     .add("accent_faded", Color::rgb_alias("accent", 0.5));
//!
//! let generator = Generator::new(Backend::Css, &table, GeneratorConfig::default());
//! let css = generator.render(ModeSelection::All).unwrap();
//! assert!(css.contains("--accent-faded: rgba(var(--accent-rgb), 0.5);"));
//! ```

pub mod css;
pub mod views;

use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::{GeneratorConfig, UnspecifiedAlpha};
use crate::error::GenerateError;
use crate::model::{Alpha, Color, Mode, ValidationError, VariableTable};
use crate::resolve::{Resolution, Resolver};
use crate::template::{MiniJinjaEngine, TemplateEngine};
use crate::validate::{check_unique_names, validate};

/// Output language of a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Stylesheet custom properties.
    Css,
    /// C++ `SkColor` constants for Views.
    Views,
}

impl Backend {
    /// Human-readable backend name.
    pub fn name(&self) -> &'static str {
        match self {
            Backend::Css => "CSS",
            Backend::Views => "Views",
        }
    }

    /// Id of the built-in template for this backend.
    pub fn template_id(&self) -> &'static str {
        match self {
            Backend::Css => "css",
            Backend::Views => "views_h",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which modes a render covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSelection {
    /// Flatten every color to its value in one mode.
    Single(Mode),
    /// Emit every declared mode, keeping references.
    All,
}

/// Renders a variable table for one backend.
pub struct Generator<'a> {
    backend: Backend,
    table: &'a VariableTable,
    config: GeneratorConfig,
    engine: Box<dyn TemplateEngine>,
    template_id: String,
}

impl<'a> Generator<'a> {
    /// Creates a generator using the built-in template for `backend`.
    pub fn new(backend: Backend, table: &'a VariableTable, config: GeneratorConfig) -> Self {
        Self {
            backend,
            table,
            config,
            engine: Box::new(MiniJinjaEngine::new()),
            template_id: backend.template_id().to_string(),
        }
    }

    /// Replaces the template engine.
    pub fn with_engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Renders with a different template id from the engine.
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = template_id.into();
        self
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn table(&self) -> &'a VariableTable {
        self.table
    }

    /// Checks the table and the generated names.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(self.table, &self.config)?;
        let prefix = self.config.prefix.as_str();
        match self.backend {
            Backend::Css => check_unique_names(css::declared_names(self.table, prefix)),
            Backend::Views => {
                check_unique_names(
                    self.table
                        .iter()
                        .map(|(name, _)| (name, views::to_const_name(prefix, name))),
                )?;
                check_unique_names(
                    self.table
                        .opacities()
                        .map(|(name, _)| (name, views::to_const_name(prefix, name))),
                )
            }
        }
    }

    /// Validates, then renders the backend template.
    pub fn render(&self, selection: ModeSelection) -> Result<String, GenerateError> {
        debug!(
            backend = %self.backend,
            template = %self.template_id,
            ?selection,
            "rendering variables"
        );
        self.validate()?;

        let mut context = self.globals();
        context.extend(self.parameters(selection)?);
        let output = self
            .engine
            .render_named(&self.template_id, &Value::Object(context))?;

        debug!(backend = %self.backend, bytes = output.len(), "rendered variables");
        Ok(output)
    }

    /// Renders the mode selection named by the config: its `single_mode` if
    /// set, every mode otherwise.
    pub fn render_configured(&self) -> Result<String, GenerateError> {
        let selection = match self.config.single_mode {
            Some(mode) => ModeSelection::Single(mode),
            None => ModeSelection::All,
        };
        self.render(selection)
    }

    /// Per-variable template context: color and opacity entries.
    ///
    /// Expects a validated table.
    pub fn parameters(&self, selection: ModeSelection) -> Result<Map<String, Value>, ValidationError> {
        match self.backend {
            Backend::Css => css::parameters(self, selection),
            Backend::Views => views::parameters(self, selection),
        }
    }

    /// Template globals that don't depend on the mode selection.
    pub fn globals(&self) -> Map<String, Value> {
        match self.backend {
            Backend::Css => css::globals(self),
            Backend::Views => views::globals(self),
        }
    }

    /// Generated identifier for a declared color or opacity name.
    pub fn to_var_name(&self, name: &str) -> String {
        match self.backend {
            Backend::Css => css::to_var_name(&self.config.prefix, name),
            Backend::Views => views::to_const_name(&self.config.prefix, name),
        }
    }

    /// Generated identifiers of all declared colors and opacities.
    pub fn var_names(&self) -> BTreeSet<String> {
        self.table
            .iter()
            .map(|(name, _)| name)
            .chain(self.table.opacities().map(|(name, _)| name))
            .map(|name| self.to_var_name(name))
            .collect()
    }

    /// Formats the alpha of color `name`.
    pub fn effective_opacity(&self, name: &str, alpha: &Alpha) -> Result<String, ValidationError> {
        match self.backend {
            Backend::Css => css::opacity(&self.config.prefix, name, alpha),
            Backend::Views => views::opacity(&self.config.prefix, name, alpha),
        }
    }

    /// Formats the definition `color` of variable `name`.
    pub fn color_expression(&self, name: &str, color: &Color) -> Result<String, ValidationError> {
        if let Color::RgbAlias {
            rgb_var,
            alpha: Alpha::Unspecified,
        } = color
        {
            match self.config.unspecified_rgb_alpha {
                UnspecifiedAlpha::Opaque => {
                    return self.color_expression(name, &Color::rgb_alias(rgb_var.as_str(), Alpha::OPAQUE))
                }
                UnspecifiedAlpha::Inherit => {
                    return self.color_expression(name, &Color::alias(rgb_var.as_str()))
                }
                UnspecifiedAlpha::Reject => {}
            }
        }

        let prefix = self.config.prefix.as_str();
        let expression = match self.backend {
            Backend::Css => css::color_expression(prefix, name, color),
            Backend::Views => views::color_expression(prefix, name, color),
        }?;
        trace!(name, %expression, "color expression");
        Ok(expression)
    }

    /// The definition of `name` in `mode` flattened to a literal.
    pub(crate) fn flattened(&self, name: &str, mode: Mode) -> Result<Color, ValidationError> {
        Resolver::new(self.table, &self.config)
            .resolve_flat(name, mode)
            .map(|resolved| resolved.to_color())
    }

    /// The raw definition of `name` for the default mode.
    pub(crate) fn default_definition(&self, name: &str) -> Result<&'a Color, ValidationError> {
        let mode = self.config.default_mode;
        self.table
            .get(name)
            .and_then(|values| values.get(mode))
            .ok_or_else(|| ValidationError::MissingDefaultMode {
                name: name.to_string(),
                mode,
            })
    }

    /// The raw definition of `name` for `mode`, or `None` when the mode is
    /// left to the runtime fallback.
    pub(crate) fn mode_definition(
        &self,
        name: &str,
        mode: Mode,
    ) -> Result<Option<&'a Color>, ValidationError> {
        let resolver = Resolver::new(self.table, &self.config);
        match resolver.resolve(name, mode, false)? {
            Resolution::Deferred => Ok(None),
            Resolution::Value(_) => resolver.definition(name, mode).map(Some),
        }
    }

    pub(crate) fn in_files(&self) -> Value {
        Value::from(self.table.in_files().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> VariableTable {
        VariableTable::new()
            .add("accent", Color::rgb(255, 0, 0))
            .add("accent_faded", Color::rgb_alias("accent", "disabled"))
            .add_opacity("disabled", 0.38)
    }

    #[test]
    fn test_backend_ids() {
        assert_eq!(Backend::Css.template_id(), "css");
        assert_eq!(Backend::Views.template_id(), "views_h");
        assert_eq!(Backend::Views.to_string(), "Views");
    }

    #[test]
    fn test_var_names_per_backend() {
        let table = table();
        let css = Generator::new(Backend::Css, &table, GeneratorConfig::new().with_prefix("cros"));
        let names: Vec<String> = css.var_names().into_iter().collect();
        assert_eq!(
            names,
            vec!["--cros-accent", "--cros-accent-faded", "--cros-disabled"]
        );

        let views = Generator::new(Backend::Views, &table, GeneratorConfig::default());
        assert!(views.var_names().contains("kAccentFaded"));
    }

    #[test]
    fn test_mode_definition_defers_undefined_modes() {
        let table = VariableTable::new()
            .add("bg", Color::rgb(255, 255, 255))
            .add_mode("bg", Mode::Dark, Color::rgb(0, 0, 0))
            .add("text", Color::alias("bg"));
        let gen = Generator::new(Backend::Css, &table, GeneratorConfig::default());

        assert_eq!(
            gen.mode_definition("bg", Mode::Dark),
            Ok(Some(&Color::rgb(0, 0, 0)))
        );
        assert_eq!(gen.mode_definition("text", Mode::Dark), Ok(None));
        assert_eq!(
            gen.mode_definition("text", Mode::Light),
            Ok(Some(&Color::alias("bg")))
        );
        assert!(gen.mode_definition("missing", Mode::Dark).is_err());
    }

    #[test]
    fn test_unspecified_rgb_alpha_in_expressions() {
        let table = VariableTable::new()
            .add("base", Color::rgb(0, 0, 0))
            .add("tint", Color::rgb_alias("base", Alpha::Unspecified));
        let tint = Color::rgb_alias("base", Alpha::Unspecified);

        let reject = Generator::new(Backend::Css, &table, GeneratorConfig::default());
        assert!(reject.color_expression("tint", &tint).is_err());

        let opaque = Generator::new(
            Backend::Css,
            &table,
            GeneratorConfig::new().with_unspecified_rgb_alpha(UnspecifiedAlpha::Opaque),
        );
        assert_eq!(
            opaque.color_expression("tint", &tint).unwrap(),
            "rgb(var(--base-rgb))"
        );

        let inherit = Generator::new(
            Backend::Views,
            &table,
            GeneratorConfig::new().with_unspecified_rgb_alpha(UnspecifiedAlpha::Inherit),
        );
        assert_eq!(
            inherit.color_expression("tint", &tint).unwrap(),
            "ResolveColor(ColorName::kBase, is_dark_mode)"
        );
    }

    #[test]
    fn test_render_validates_first() {
        let table = VariableTable::new().add("a", Color::alias("missing"));
        let generator = Generator::new(Backend::Css, &table, GeneratorConfig::default());
        assert!(matches!(
            generator.render(ModeSelection::All),
            Err(GenerateError::Validation(ValidationError::UndefinedReference { .. }))
        ));
    }

    #[test]
    fn test_css_rgb_name_collision() {
        let table = VariableTable::new()
            .add("a", Color::rgb(0, 0, 0))
            .add("a_rgb", Color::rgb(1, 1, 1));
        let generator = Generator::new(Backend::Css, &table, GeneratorConfig::default());
        assert!(matches!(
            generator.validate(),
            Err(ValidationError::NameCollision { generated, .. }) if generated == "--a-rgb"
        ));
    }

    #[test]
    fn test_views_colors_and_opacities_have_separate_namespaces() {
        let table = VariableTable::new()
            .add("disabled", Color::rgb(0, 0, 0))
            .add_opacity("disabled", 0.38);

        let views = Generator::new(Backend::Views, &table, GeneratorConfig::default());
        assert_eq!(views.validate(), Ok(()));

        let css = Generator::new(Backend::Css, &table, GeneratorConfig::default());
        assert!(matches!(
            css.validate(),
            Err(ValidationError::NameCollision { .. })
        ));
    }

    #[test]
    fn test_render_configured_uses_single_mode() {
        let table = VariableTable::new()
            .add("bg", Color::rgb(255, 255, 255))
            .add_mode("bg", Mode::Dark, Color::rgb(0, 0, 0));
        let config = GeneratorConfig::new().with_single_mode(Mode::Dark);
        let css = Generator::new(Backend::Css, &table, config)
            .render_configured()
            .unwrap();
        assert!(css.contains("--bg: rgb(0, 0, 0);"));
        assert!(!css.contains("@media"));
    }

    #[test]
    fn test_custom_template() {
        let mut engine = MiniJinjaEngine::new();
        engine
            .add_template(
                "names",
                "{% for color in colors %}{{ color.name }} {% endfor %}",
            )
            .unwrap();
        let table = table();
        let output = Generator::new(Backend::Css, &table, GeneratorConfig::default())
            .with_engine(engine)
            .with_template("names")
            .render(ModeSelection::All)
            .unwrap();
        assert_eq!(output, "--accent --accent-faded ");
    }
}
