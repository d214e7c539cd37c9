//! The validation pass run before any output is produced.
//!
//! Validation is all-or-nothing: the first problem found, in table order,
//! is returned and nothing is generated. Checks run per variable:
//!
//! - a definition exists for the default mode
//! - every color and opacity reference names an existing variable
//! - literal alphas and opacity values lie in `[0, 1]`
//! - alpha is specified where it must be
//!
//! Cycles are found by resolving every variable under every mode once the
//! structural checks pass.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{GeneratorConfig, UnspecifiedAlpha};
use crate::model::{Alpha, Color, Mode, ValidationError, VariableTable};
use crate::resolve::Resolver;

/// Validates `table` under `config`.
pub fn validate(table: &VariableTable, config: &GeneratorConfig) -> Result<(), ValidationError> {
    debug!(
        colors = table.len(),
        opacities = table.opacities().count(),
        "validating variable table"
    );

    for (name, value) in table.opacities() {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::invalid(
                name,
                format!("opacity {} is outside [0, 1]", value),
            ));
        }
    }

    for (name, values) in table.iter() {
        if values.get(config.default_mode).is_none() {
            return Err(ValidationError::MissingDefaultMode {
                name: name.to_string(),
                mode: config.default_mode,
            });
        }
        for (_, color) in values.iter() {
            check_definition(table, config, name, color)?;
        }
    }

    let resolver = Resolver::new(table, config);
    for (name, _) in table.iter() {
        for mode in Mode::ALL {
            resolver.resolve(name, mode, true)?;
        }
    }

    debug!("variable table is valid");
    Ok(())
}

fn check_definition(
    table: &VariableTable,
    config: &GeneratorConfig,
    name: &str,
    color: &Color,
) -> Result<(), ValidationError> {
    if let Some(target) = color.color_reference() {
        if !table.exists(target) {
            return Err(ValidationError::undefined(name, target));
        }
    }

    match color.alpha() {
        Some(Alpha::Value(a)) if !(0.0..=1.0).contains(a) => Err(ValidationError::invalid(
            name,
            format!("alpha {} is outside [0, 1]", a),
        )),
        Some(Alpha::Opacity(opacity)) if !table.has_opacity(opacity) => {
            Err(ValidationError::undefined(name, opacity))
        }
        Some(Alpha::Unspecified) => match color {
            Color::Literal { .. } => Err(ValidationError::invalid(
                name,
                "literal has neither an alpha nor an opacity_var",
            )),
            Color::RgbAlias { rgb_var, .. }
                if config.unspecified_rgb_alpha == UnspecifiedAlpha::Reject =>
            {
                Err(ValidationError::invalid(
                    name,
                    format!("rgb_var '{}' has no alpha or opacity_var", rgb_var),
                ))
            }
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}

/// Checks that no two declared names map to the same generated name.
///
/// Takes `(declared, generated)` pairs and reports the first collision.
pub fn check_unique_names<'a, I>(names: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut seen: HashMap<String, &'a str> = HashMap::new();
    for (declared, generated) in names {
        if let Some(first) = seen.get(&generated) {
            return Err(ValidationError::NameCollision {
                generated,
                first: first.to_string(),
                second: declared.to_string(),
            });
        }
        seen.insert(generated, declared);
    }
    Ok(())
}
