//! Template engine abstraction.
//!
//! [`TemplateEngine`] is the seam between generators and text assembly. The
//! default implementation is [`MiniJinjaEngine`].

use std::path::Path;

use minijinja::{Environment, Value};

use crate::error::RenderError;

/// Built-in templates as `(id, source)` pairs.
pub const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("css", include_str!("../../templates/css.jinja")),
    ("views_h", include_str!("../../templates/views_h.jinja")),
];

/// Returns the source of a built-in template.
pub fn builtin_template(id: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, source)| *source)
}

/// A template engine that can render templates with data.
pub trait TemplateEngine: Send + Sync {
    /// Renders a template string with the given data.
    fn render_template(&self, template: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    /// Adds a named template, replacing any template of the same name.
    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError>;

    /// Renders a named template.
    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError>;

    /// Checks if a template with the given name exists.
    fn has_template(&self, name: &str) -> bool;
}

/// MiniJinja-based template engine.
///
/// Block tags on their own line leave no blank line behind (`trim_blocks` and
/// `lstrip_blocks` are on), and the trailing newline of a template is kept.
///
/// # Example
///
/// ```rust
/// use stylevars::template::{MiniJinjaEngine, TemplateEngine};
/// use serde_json::json;
///
/// let engine = MiniJinjaEngine::new();
/// assert!(engine.has_template("css"));
///
/// let output = engine
///     .render_template("{{ name }}: {{ value }};", &json!({"name": "--a", "value": "red"}))
///     .unwrap();
/// assert_eq!(output, "--a: red;");
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates an engine serving the built-in templates.
    pub fn new() -> Self {
        let mut env = configured_environment();
        env.set_loader(|name| Ok(builtin_template(name).map(str::to_string)));
        Self { env }
    }

    /// Creates an engine that looks for `<id>.jinja` in `dir` before falling
    /// back to the built-in templates.
    pub fn with_template_dir(dir: impl AsRef<Path>) -> Result<Self, RenderError> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(RenderError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("template directory not found: {}", dir.display()),
            )));
        }

        let from_dir = minijinja::path_loader(dir.to_path_buf());
        let mut env = configured_environment();
        env.set_loader(move |name| match from_dir(&format!("{}.jinja", name))? {
            Some(source) => Ok(Some(source)),
            None => Ok(builtin_template(name).map(str::to_string)),
        });
        Ok(Self { env })
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment,
    /// e.g. to register filters for custom templates.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn configured_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_template(&self, template: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let value = Value::from_serialize(data);
        Ok(self.env.render_str(template, value)?)
    }

    fn add_template(&mut self, name: &str, source: &str) -> Result<(), RenderError> {
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String, RenderError> {
        let tmpl = self.env.get_template(name)?;
        let value = Value::from_serialize(data);
        Ok(tmpl.render(value)?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}
