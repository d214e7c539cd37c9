//! CSS custom-property backend.
//!
//! Every color `x` produces two properties: `--x` with the color itself and
//! `--x-rgb` with its bare channel triple. RGB aliases compose against the
//! triple, so `rgba(var(--x-rgb), 0.5)` keeps following `x` when a media
//! block redefines it.

use serde_json::{json, Map, Value};

use super::{Generator, ModeSelection};
use crate::model::{Alpha, Color, Mode, ValidationError, VariableTable};

/// Custom-property name for `name`: `--<prefix>-<name>` with `_` as `-`.
///
/// Names that already start with `--` are returned unchanged.
///
/// ```rust
/// use stylevars::generator::css::to_var_name;
///
/// assert_eq!(to_var_name("cros", "text_primary"), "--cros-text-primary");
/// assert_eq!(to_var_name("", "text_primary"), "--text-primary");
/// assert_eq!(to_var_name("cros", "--cros-text-primary"), "--cros-text-primary");
/// ```
pub fn to_var_name(prefix: &str, name: &str) -> String {
    if name.starts_with("--") {
        return name.to_string();
    }
    let name = name.replace('_', "-");
    if prefix.is_empty() {
        format!("--{}", name)
    } else {
        format!("--{}-{}", prefix.replace('_', "-"), name)
    }
}

/// Name of the RGB triple property for `name`.
pub fn rgb_var_name(prefix: &str, name: &str) -> String {
    format!("{}-rgb", to_var_name(prefix, name))
}

/// Formats an opacity as a short decimal: `0.5`, `0.38`, `1`, `0`.
pub fn format_opacity(a: f64) -> String {
    let formatted = format!("{:.6}", a);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

pub(super) fn opacity(prefix: &str, name: &str, alpha: &Alpha) -> Result<String, ValidationError> {
    match alpha {
        Alpha::Value(a) => Ok(format_opacity(*a)),
        Alpha::Opacity(opacity) => Ok(format!("var({})", to_var_name(prefix, opacity))),
        Alpha::Unspecified => Err(ValidationError::invalid(
            name,
            "no alpha or opacity_var to build an opacity from",
        )),
    }
}

pub(super) fn color_expression(
    prefix: &str,
    name: &str,
    color: &Color,
) -> Result<String, ValidationError> {
    Ok(match color {
        Color::Alias(target) => format!("var({})", to_var_name(prefix, target)),
        Color::RgbAlias { rgb_var, alpha } if alpha.is_opaque() => {
            format!("rgb(var({}))", rgb_var_name(prefix, rgb_var))
        }
        Color::RgbAlias { rgb_var, alpha } => format!(
            "rgba(var({}), {})",
            rgb_var_name(prefix, rgb_var),
            opacity(prefix, name, alpha)?
        ),
        Color::Literal { r, g, b, alpha } if alpha.is_opaque() => {
            format!("rgb({}, {}, {})", r, g, b)
        }
        Color::Literal { r, g, b, alpha } => {
            format!("rgba({}, {}, {}, {})", r, g, b, opacity(prefix, name, alpha)?)
        }
    })
}

/// Value of the `-rgb` property for a definition.
fn rgb_expression(prefix: &str, color: &Color) -> String {
    match color {
        Color::Literal { r, g, b, .. } => format!("{}, {}, {}", r, g, b),
        Color::Alias(target) | Color::RgbAlias { rgb_var: target, .. } => {
            format!("var({})", rgb_var_name(prefix, target))
        }
    }
}

/// Every generated name with the declared name it came from, for collision
/// checks. Colors and opacities share one namespace.
pub(super) fn declared_names<'t>(
    table: &'t VariableTable,
    prefix: &str,
) -> Vec<(&'t str, String)> {
    let mut names = Vec::new();
    for (name, _) in table.iter() {
        names.push((name, to_var_name(prefix, name)));
        names.push((name, rgb_var_name(prefix, name)));
    }
    for (name, _) in table.opacities() {
        names.push((name, to_var_name(prefix, name)));
    }
    names
}

fn color_entry(gen: &Generator<'_>, name: &str, color: &Color) -> Result<Value, ValidationError> {
    let prefix = gen.config().prefix.as_str();
    Ok(json!({
        "name": to_var_name(prefix, name),
        "rgb_name": rgb_var_name(prefix, name),
        "rgb": rgb_expression(prefix, color),
        "value": gen.color_expression(name, color)?,
    }))
}

pub(super) fn parameters(
    gen: &Generator<'_>,
    selection: ModeSelection,
) -> Result<Map<String, Value>, ValidationError> {
    let table = gen.table();
    let default_mode = gen.config().default_mode;

    let mut colors = Vec::with_capacity(table.len());
    let mut mode_blocks = Vec::new();
    match selection {
        ModeSelection::Single(mode) => {
            for (name, _) in table.iter() {
                colors.push(color_entry(gen, name, &gen.flattened(name, mode)?)?);
            }
        }
        ModeSelection::All => {
            for (name, _) in table.iter() {
                colors.push(color_entry(gen, name, gen.default_definition(name)?)?);
            }
            for mode in Mode::ALL.into_iter().filter(|m| *m != default_mode) {
                let mut block = Vec::new();
                for (name, _) in table.iter() {
                    if let Some(color) = gen.mode_definition(name, mode)? {
                        block.push(color_entry(gen, name, color)?);
                    }
                }
                if !block.is_empty() {
                    mode_blocks.push(json!({ "mode": mode, "colors": block }));
                }
            }
        }
    }

    let prefix = gen.config().prefix.as_str();
    let opacities: Vec<Value> = table
        .opacities()
        .map(|(name, value)| {
            json!({
                "name": to_var_name(prefix, name),
                "value": format_opacity(value),
            })
        })
        .collect();

    let mut params = Map::new();
    params.insert("colors".into(), Value::Array(colors));
    params.insert("mode_blocks".into(), Value::Array(mode_blocks));
    params.insert("opacities".into(), Value::Array(opacities));
    Ok(params)
}

pub(super) fn globals(gen: &Generator<'_>) -> Map<String, Value> {
    let mut globals = Map::new();
    globals.insert("prefix".into(), Value::from(gen.config().prefix.clone()));
    globals.insert("in_files".into(), gen.in_files());
    globals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Backend, GeneratorConfig};

    #[test]
    fn test_to_var_name() {
        assert_eq!(to_var_name("", "accent"), "--accent");
        assert_eq!(to_var_name("cros", "bg_color_elevated"), "--cros-bg-color-elevated");
        assert_eq!(to_var_name("my_app", "x"), "--my-app-x");
    }

    #[test]
    fn test_to_var_name_is_idempotent() {
        let once = to_var_name("cros", "text_primary");
        assert_eq!(to_var_name("cros", &once), once);
    }

    #[test]
    fn test_format_opacity() {
        assert_eq!(format_opacity(0.5), "0.5");
        assert_eq!(format_opacity(0.25), "0.25");
        assert_eq!(format_opacity(0.38), "0.38");
        assert_eq!(format_opacity(0.0), "0");
        assert_eq!(format_opacity(1.0), "1");
        assert_eq!(format_opacity(0.123456789), "0.123457");
    }

    #[test]
    fn test_opacity() {
        assert_eq!(opacity("", "x", &Alpha::Value(0.5)).unwrap(), "0.5");
        assert_eq!(
            opacity("cros", "x", &Alpha::Opacity("disabled_opacity".into())).unwrap(),
            "var(--cros-disabled-opacity)"
        );
        assert!(matches!(
            opacity("", "x", &Alpha::Unspecified),
            Err(ValidationError::InvalidColorSpec { name, .. }) if name == "x"
        ));
    }

    #[test]
    fn test_color_expressions() {
        let expr = |color: Color| color_expression("", "x", &color).unwrap();

        assert_eq!(expr(Color::alias("accent")), "var(--accent)");
        assert_eq!(expr(Color::rgb_alias("accent", 1.0)), "rgb(var(--accent-rgb))");
        assert_eq!(
            expr(Color::rgb_alias("accent", 0.5)),
            "rgba(var(--accent-rgb), 0.5)"
        );
        assert_eq!(
            expr(Color::rgb_alias("accent", "hover")),
            "rgba(var(--accent-rgb), var(--hover))"
        );
        assert_eq!(expr(Color::rgb(255, 0, 0)), "rgb(255, 0, 0)");
        assert_eq!(expr(Color::rgba(255, 0, 0, 0.25)), "rgba(255, 0, 0, 0.25)");
        assert_eq!(expr(Color::rgba(1, 2, 3, 0.0)), "rgba(1, 2, 3, 0)");
    }

    #[test]
    fn test_rgb_expression() {
        assert_eq!(rgb_expression("", &Color::rgba(1, 2, 3, 0.5)), "1, 2, 3");
        assert_eq!(rgb_expression("", &Color::alias("a")), "var(--a-rgb)");
        assert_eq!(
            rgb_expression("cros", &Color::rgb_alias("b", 0.1)),
            "var(--cros-b-rgb)"
        );
    }

    #[test]
    fn test_parameters_all_modes() {
        let table = VariableTable::new()
            .add("bg", Color::rgb(255, 255, 255))
            .add_mode("bg", Mode::Dark, Color::rgb(0, 0, 0))
            .add("text", Color::alias("bg"));
        let gen = Generator::new(Backend::Css, &table, GeneratorConfig::default());
        let params = gen.parameters(ModeSelection::All).unwrap();

        assert_eq!(params["colors"].as_array().unwrap().len(), 2);
        let blocks = params["mode_blocks"].as_array().unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["mode"], "dark");
        let dark = blocks[0]["colors"].as_array().unwrap();
        assert_eq!(dark.len(), 1);
        assert_eq!(dark[0]["name"], "--bg");
        assert_eq!(dark[0]["value"], "rgb(0, 0, 0)");
    }

    #[test]
    fn test_parameters_single_mode_flattens() {
        let table = VariableTable::new()
            .add("bg", Color::rgb(255, 255, 255))
            .add_mode("bg", Mode::Dark, Color::rgb(0, 0, 0))
            .add("scrim", Color::rgb_alias("bg", "scrim_opacity"))
            .add_opacity("scrim_opacity", 0.6);
        let gen = Generator::new(Backend::Css, &table, GeneratorConfig::default());
        let params = gen.parameters(ModeSelection::Single(Mode::Dark)).unwrap();

        let colors = params["colors"].as_array().unwrap();
        assert_eq!(colors[1]["value"], "rgba(0, 0, 0, var(--scrim-opacity))");
        assert_eq!(colors[1]["rgb"], "0, 0, 0");
        assert!(params["mode_blocks"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_globals() {
        let table = VariableTable::new().add_source("colors.yaml");
        let gen = Generator::new(Backend::Css, &table, GeneratorConfig::new().with_prefix("cros"));
        let globals = gen.globals();
        assert_eq!(globals["prefix"], "cros");
        assert_eq!(globals["in_files"], json!(["colors.yaml"]));
    }
}
