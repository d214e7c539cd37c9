//! Views backend: a C++ header of `SkColor` expressions.
//!
//! Colors become `ColorName` enumerators resolved at runtime by
//! `ResolveColor(ColorName, bool is_dark_mode)`; opacities become
//! `OpacityName` enumerators read through `GetOpacity`.

use std::path::Path;

use serde_json::{json, Map, Value};

use super::{Generator, ModeSelection};
use crate::model::{Alpha, Color, Mode, ValidationError};

/// Constant name for `name`: `k` followed by the title-cased prefix and name,
/// with underscores removed.
///
/// Names that are already constant names pass through unchanged.
///
/// ```rust
/// use stylevars::generator::views::to_const_name;
///
/// assert_eq!(to_const_name("", "accent_faded"), "kAccentFaded");
/// assert_eq!(to_const_name("cros", "bg_2dp"), "kCrosBg2Dp");
/// assert_eq!(to_const_name("", "kAccentFaded"), "kAccentFaded");
/// ```
pub fn to_const_name(prefix: &str, name: &str) -> String {
    if is_const_name(name) {
        return name.to_string();
    }
    format!("k{}{}", title_case(prefix), title_case(name))
}

fn is_const_name(name: &str) -> bool {
    match name.strip_prefix('k') {
        Some(rest) => {
            !rest.is_empty()
                && rest.chars().all(|c| c.is_ascii_alphanumeric())
                && rest.chars().any(|c| c.is_ascii_uppercase())
        }
        None => false,
    }
}

/// Upper-cases letters that follow a non-letter, lower-cases the rest, keeps
/// digits and drops everything else, so the result is a valid C++ identifier
/// tail.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut after_letter = false;
    for c in s.chars() {
        if c.is_ascii_alphabetic() {
            if after_letter {
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c.to_ascii_uppercase());
            }
            after_letter = true;
        } else {
            after_letter = false;
            if c.is_ascii_digit() {
                out.push(c);
            }
        }
    }
    out
}

/// Formats an alpha in `[0, 1]` as a hex byte: `0.5` is `0x80`.
pub fn alpha_to_hex(a: f64) -> String {
    format!("0x{:02X}", (a.clamp(0.0, 1.0) * 255.0).round() as u8)
}

pub(super) fn opacity(prefix: &str, name: &str, alpha: &Alpha) -> Result<String, ValidationError> {
    match alpha {
        Alpha::Value(a) => Ok(alpha_to_hex(*a)),
        Alpha::Opacity(opacity) => Ok(format!(
            "GetOpacity(OpacityName::{})",
            to_const_name(prefix, opacity)
        )),
        Alpha::Unspecified => Err(ValidationError::invalid(
            name,
            "no alpha or opacity_var to build an opacity from",
        )),
    }
}

fn resolve_call(prefix: &str, target: &str) -> String {
    format!(
        "ResolveColor(ColorName::{}, is_dark_mode)",
        to_const_name(prefix, target)
    )
}

pub(super) fn color_expression(
    prefix: &str,
    name: &str,
    color: &Color,
) -> Result<String, ValidationError> {
    Ok(match color {
        Color::Alias(target) => resolve_call(prefix, target),
        Color::RgbAlias { rgb_var, alpha } => format!(
            "SkColorSetA({}, {})",
            resolve_call(prefix, rgb_var),
            opacity(prefix, name, alpha)?
        ),
        Color::Literal { r, g, b, alpha } if alpha.is_opaque() => {
            format!("SkColorSetRGB(0x{:02X}, 0x{:02X}, 0x{:02X})", r, g, b)
        }
        Color::Literal { r, g, b, alpha } => format!(
            "SkColorSetARGB({}, 0x{:02X}, 0x{:02X}, 0x{:02X})",
            opacity(prefix, name, alpha)?,
            r,
            g,
            b
        ),
    })
}

fn mode_expression(
    gen: &Generator<'_>,
    name: &str,
    color: Option<&Color>,
) -> Result<Value, ValidationError> {
    match color {
        Some(color) => Ok(Value::from(gen.color_expression(name, color)?)),
        None => Ok(Value::Null),
    }
}

pub(super) fn parameters(
    gen: &Generator<'_>,
    selection: ModeSelection,
) -> Result<Map<String, Value>, ValidationError> {
    let prefix = gen.config().prefix.as_str();
    let table = gen.table();

    let mut colors = Vec::with_capacity(table.len());
    for (name, _) in table.iter() {
        let entry = match selection {
            ModeSelection::Single(mode) => json!({
                "name": to_const_name(prefix, name),
                "default": gen.color_expression(name, &gen.flattened(name, mode)?)?,
                "light": Value::Null,
                "dark": Value::Null,
            }),
            ModeSelection::All => json!({
                "name": to_const_name(prefix, name),
                "default": gen.color_expression(name, gen.default_definition(name)?)?,
                "light": mode_expression(gen, name, gen.mode_definition(name, Mode::Light)?)?,
                "dark": mode_expression(gen, name, gen.mode_definition(name, Mode::Dark)?)?,
            }),
        };
        colors.push(entry);
    }

    let opacities: Vec<Value> = table
        .opacities()
        .map(|(name, value)| {
            json!({
                "name": to_const_name(prefix, name),
                "value": alpha_to_hex(value),
            })
        })
        .collect();

    let mut params = Map::new();
    params.insert("colors".into(), Value::Array(colors));
    params.insert("opacities".into(), Value::Array(opacities));
    params.insert(
        "single_mode".into(),
        Value::Bool(matches!(selection, ModeSelection::Single(_))),
    );
    Ok(params)
}

/// Namespace for the generated header: the output file stem, or `colors`.
pub fn namespace_for(output_identifier: Option<&str>) -> String {
    output_identifier
        .and_then(|id| Path::new(id).file_stem())
        .map(|stem| {
            stem.to_string_lossy()
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect::<String>()
        })
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "colors".to_string())
}

/// Include guard for the generated header: `ui/colors.h` gives
/// `UI_COLORS_H_`.
pub fn header_guard_for(output_identifier: Option<&str>) -> String {
    let id = output_identifier.unwrap_or("colors.h");
    let mut guard: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    guard.push('_');
    guard
}

pub(super) fn globals(gen: &Generator<'_>) -> Map<String, Value> {
    let identifier = gen.config().output_identifier.as_deref();

    let mut globals = Map::new();
    globals.insert("prefix".into(), Value::from(gen.config().prefix.clone()));
    globals.insert("in_files".into(), gen.in_files());
    globals.insert(
        "out_file_path".into(),
        identifier.map(Value::from).unwrap_or(Value::Null),
    );
    globals.insert("namespace".into(), Value::from(namespace_for(identifier)));
    globals.insert("header_guard".into(), Value::from(header_guard_for(identifier)));
    globals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Backend, GeneratorConfig, VariableTable};

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("accent_faded"), "AccentFaded");
        assert_eq!(title_case("bg_2dp"), "Bg2Dp");
        assert_eq!(title_case("a1b"), "A1B");
        assert_eq!(title_case("TEXT_primary"), "TextPrimary");
        assert_eq!(title_case("text-primary"), "TextPrimary");
        assert_eq!(title_case("on.surface 2"), "OnSurface2");
    }

    #[test]
    fn test_to_const_name() {
        assert_eq!(to_const_name("", "accent"), "kAccent");
        assert_eq!(to_const_name("cros", "accent"), "kCrosAccent");
        assert_eq!(to_const_name("", "k"), "kK");
        assert_eq!(to_const_name("", "kind"), "kKind");
        assert_eq!(to_const_name("", "text-primary"), "kTextPrimary");
    }

    #[test]
    fn test_to_const_name_is_idempotent() {
        for name in ["accent", "bg_2dp", "kind", "x_y_z", "text-primary"] {
            let once = to_const_name("cros", name);
            assert_eq!(to_const_name("cros", &once), once);
        }
    }

    #[test]
    fn test_alpha_to_hex() {
        assert_eq!(alpha_to_hex(0.0), "0x00");
        assert_eq!(alpha_to_hex(0.5), "0x80");
        assert_eq!(alpha_to_hex(0.38), "0x61");
        assert_eq!(alpha_to_hex(1.0), "0xFF");
    }

    #[test]
    fn test_color_expressions() {
        let expr = |color: Color| color_expression("", "x", &color).unwrap();

        assert_eq!(
            expr(Color::alias("accent")),
            "ResolveColor(ColorName::kAccent, is_dark_mode)"
        );
        assert_eq!(
            expr(Color::rgb_alias("accent", 1.0)),
            "SkColorSetA(ResolveColor(ColorName::kAccent, is_dark_mode), 0xFF)"
        );
        assert_eq!(
            expr(Color::rgb_alias("accent", "disabled")),
            "SkColorSetA(ResolveColor(ColorName::kAccent, is_dark_mode), \
             GetOpacity(OpacityName::kDisabled))"
        );
        assert_eq!(expr(Color::rgb(255, 0, 0)), "SkColorSetRGB(0xFF, 0x00, 0x00)");
        assert_eq!(
            expr(Color::rgba(255, 0, 0, 0.5)),
            "SkColorSetARGB(0x80, 0xFF, 0x00, 0x00)"
        );
    }

    #[test]
    fn test_namespace_and_header_guard() {
        assert_eq!(namespace_for(Some("ui/chromeos/colors.h")), "colors");
        assert_eq!(namespace_for(Some("cros-colors.h")), "cros_colors");
        assert_eq!(namespace_for(None), "colors");
        assert_eq!(header_guard_for(Some("ui/colors.h")), "UI_COLORS_H_");
        assert_eq!(header_guard_for(None), "COLORS_H_");
    }

    #[test]
    fn test_parameters_all_modes() {
        let table = VariableTable::new()
            .add("bg", Color::rgb(255, 255, 255))
            .add_mode("bg", Mode::Dark, Color::rgb(0, 0, 0))
            .add("text", Color::alias("bg"));
        let gen = Generator::new(Backend::Views, &table, GeneratorConfig::default());
        let params = gen.parameters(ModeSelection::All).unwrap();

        let colors = params["colors"].as_array().unwrap();
        assert_eq!(colors[0]["name"], "kBg");
        assert_eq!(colors[0]["dark"], "SkColorSetRGB(0x00, 0x00, 0x00)");
        assert_eq!(colors[1]["dark"], Value::Null);
        assert_eq!(params["single_mode"], false);
    }

    #[test]
    fn test_globals() {
        let table = VariableTable::new();
        let config = GeneratorConfig::new().with_output_identifier("ui/cros_colors.h");
        let gen = Generator::new(Backend::Views, &table, config);
        let globals = gen.globals();
        assert_eq!(globals["namespace"], "cros_colors");
        assert_eq!(globals["header_guard"], "UI_CROS_COLORS_H_");
        assert_eq!(globals["out_file_path"], "ui/cros_colors.h");
    }
}
