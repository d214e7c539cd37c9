//! Template rendering for generator backends.
//!
//! Generators build a JSON context and hand it to a [`TemplateEngine`] along
//! with a template id (`css` or `views_h`). The default engine,
//! [`MiniJinjaEngine`], ships both templates embedded in the crate and can be
//! pointed at a directory of overrides:
//!
//! ```rust,no_run
//! use stylevars::template::MiniJinjaEngine;
//!
//! // ./templates/css.jinja, if present, replaces the built-in `css` template.
//! let engine = MiniJinjaEngine::with_template_dir("./templates").unwrap();
//! # let _ = engine;
//! ```

mod engine;

pub use engine::{builtin_template, MiniJinjaEngine, TemplateEngine, BUILTIN_TEMPLATES};
