//! The color string syntax used in definition files.
//!
//! Strings are tokenized with `cssparser`, so whitespace and comments behave
//! as they do in CSS:
//!
//! | Form                          | Meaning                                  |
//! |-------------------------------|------------------------------------------|
//! | `#rgb`, `#rrggbb`, `#rrggbbaa`| literal                                  |
//! | `rgb(r, g, b)`                | opaque literal                           |
//! | `rgba(r, g, b, a)`            | literal with alpha (number or percent)   |
//! | `rgba(r, g, b, $opacity)`     | literal with a named opacity             |
//! | `$name`                       | alias                                    |
//! | `rgb($name.rgb)`              | opaque RGB alias                         |
//! | `rgba($name.rgb, a)`          | RGB alias with alpha                     |
//! | `rgba($name.rgb, $opacity)`   | RGB alias with a named opacity           |

use cssparser::{BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, Token};

use crate::model::{Alpha, Color};

type ParseResult<'i, T> = Result<T, ParseError<'i, String>>;

/// Parses a color string. The error is a human-readable message.
///
/// ```rust
/// use stylevars::loader::parse_color;
/// use stylevars::Color;
///
/// assert_eq!(parse_color("#ff0000"), Ok(Color::rgb(255, 0, 0)));
/// assert_eq!(parse_color("$accent"), Ok(Color::alias("accent")));
/// assert_eq!(parse_color("rgba($accent.rgb, 0.5)"), Ok(Color::rgb_alias("accent", 0.5)));
/// assert!(parse_color("rgb(1, 2)").is_err());
/// ```
pub fn parse_color(value: &str) -> Result<Color, String> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(parse_value).map_err(describe)
}

fn describe(err: ParseError<'_, String>) -> String {
    let location = format!("line {}, column {}", err.location.line + 1, err.location.column);
    match err.kind {
        ParseErrorKind::Custom(message) => format!("{} at {}", message, location),
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            format!("unexpected end of input at {}", location)
        }
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected {:?} at {}", token, location)
        }
        ParseErrorKind::Basic(kind) => format!("{:?} at {}", kind, location),
    }
}

fn parse_value<'i>(input: &mut Parser<'i, '_>) -> ParseResult<'i, Color> {
    let location = input.current_source_location();
    let token = input.next()?.clone();
    match token {
        Token::Hash(ref value) | Token::IDHash(ref value) => parse_hex(value)
            .ok_or_else(|| location.new_custom_error(format!("invalid hex color '#{}'", value))),
        Token::Delim('$') => Ok(Color::Alias(parse_name(input)?)),
        Token::Function(ref name) if name.eq_ignore_ascii_case("rgb") => {
            input.parse_nested_block(|input| parse_arguments(input, false))
        }
        Token::Function(ref name) if name.eq_ignore_ascii_case("rgba") => {
            input.parse_nested_block(|input| parse_arguments(input, true))
        }
        token => Err(location.new_unexpected_token_error(token)),
    }
}

fn parse_hex(value: &str) -> Option<Color> {
    let digits = value
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()?;
    let byte = |hi: u8, lo: u8| hi * 16 + lo;
    match digits.as_slice() {
        [r, g, b] => Some(Color::rgb(r * 17, g * 17, b * 17)),
        [r1, r2, g1, g2, b1, b2] => Some(Color::rgb(byte(*r1, *r2), byte(*g1, *g2), byte(*b1, *b2))),
        [r1, r2, g1, g2, b1, b2, a1, a2] => Some(Color::rgba(
            byte(*r1, *r2),
            byte(*g1, *g2),
            byte(*b1, *b2),
            f64::from(byte(*a1, *a2)) / 255.0,
        )),
        _ => None,
    }
}

/// The identifier directly after a `$`.
fn parse_name<'i>(input: &mut Parser<'i, '_>) -> ParseResult<'i, String> {
    let location = input.current_source_location();
    let token = input.next_including_whitespace()?.clone();
    match token {
        Token::Ident(name) => Ok(name.as_ref().to_string()),
        token => Err(location.new_unexpected_token_error(token)),
    }
}

/// The `.rgb` after an RGB alias name.
fn parse_rgb_suffix<'i>(input: &mut Parser<'i, '_>) -> ParseResult<'i, ()> {
    let location = input.current_source_location();
    let token = input.next_including_whitespace()?.clone();
    if token != Token::Delim('.') {
        return Err(location.new_unexpected_token_error(token));
    }
    let location = input.current_source_location();
    let token = input.next_including_whitespace()?.clone();
    match token {
        Token::Ident(ref suffix) if suffix.eq_ignore_ascii_case("rgb") => Ok(()),
        token => Err(location.new_unexpected_token_error(token)),
    }
}

fn parse_arguments<'i>(input: &mut Parser<'i, '_>, with_alpha: bool) -> ParseResult<'i, Color> {
    if input.try_parse(|input| input.expect_delim('$')).is_ok() {
        let rgb_var = parse_name(input)?;
        parse_rgb_suffix(input)?;
        let alpha = parse_trailing_alpha(input, with_alpha)?;
        return Ok(Color::RgbAlias { rgb_var, alpha });
    }

    let r = parse_channel(input)?;
    input.expect_comma()?;
    let g = parse_channel(input)?;
    input.expect_comma()?;
    let b = parse_channel(input)?;
    let alpha = parse_trailing_alpha(input, with_alpha)?;
    Ok(Color::Literal { r, g, b, alpha })
}

fn parse_trailing_alpha<'i>(input: &mut Parser<'i, '_>, with_alpha: bool) -> ParseResult<'i, Alpha> {
    if !with_alpha {
        return Ok(Alpha::OPAQUE);
    }
    input.expect_comma()?;
    parse_alpha(input)
}

fn parse_channel<'i>(input: &mut Parser<'i, '_>) -> ParseResult<'i, u8> {
    let location = input.current_source_location();
    let token = input.next()?.clone();
    match token {
        Token::Number {
            int_value: Some(v), ..
        } => u8::try_from(v)
            .map_err(|_| location.new_custom_error(format!("channel {} is outside 0-255", v))),
        token => Err(location.new_unexpected_token_error(token)),
    }
}

fn parse_alpha<'i>(input: &mut Parser<'i, '_>) -> ParseResult<'i, Alpha> {
    if input.try_parse(|input| input.expect_delim('$')).is_ok() {
        return Ok(Alpha::Opacity(parse_name(input)?));
    }

    let location = input.current_source_location();
    let token = input.next()?.clone();
    let value = match token {
        Token::Number { value, .. } => widen(value),
        Token::Percentage { unit_value, .. } => widen(unit_value),
        token => return Err(location.new_unexpected_token_error(token)),
    };
    if !(0.0..=1.0).contains(&value) {
        return Err(location.new_custom_error(format!("alpha {} is outside [0, 1]", value)));
    }
    Ok(Alpha::Value(value))
}

/// Widens the tokenizer's `f32` through its shortest decimal form, so `0.38`
/// stays `0.38` rather than `0.3799999952316284`.
fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}
