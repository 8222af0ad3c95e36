//! Scalar resolution: raw text + tag + style → IR value.
//!
//! Resolution dispatches on [`TagClass`], a closed classification of the
//! tag. Untagged plain scalars go through the implicit tokenizer; quoting
//! suppresses implicit typing but never an explicit tag.

use crate::error::{Error, Location};
use crate::ir::nodes::{Direction, Literal, Value};
use crate::options::Options;
use crate::tree::{Scalar, Tag};
use crate::vocab::{I18N_BASE, XSD_BASE, YAML_CORE};
use once_cell::sync::Lazy;
use regex::Regex;

/// Timestamps: `2001-12-14t21:59:43.10-05:00`, `2001-12-14 21:59:43.10 -5`.
static TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^-?\d{4}-\d{1,2}-\d{1,2}(?:[Tt]|\s+)\d{1,2}:\d\d:\d\d(?:\.\d*)?(?:\s*(?:Z|[-+]\d{1,2}:?(?:\d\d)?))?$",
    )
    .expect("timestamp pattern")
});
/// Calendar dates: `2002-12-14`, `2002-1-4`.
static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(?:1[012]|0\d|\d)-(?:[12]\d|3[01]|0\d|\d)$").expect("date pattern")
});
/// Base-60 integers and floats such as `1:30` and `1:30:15.5`.
static SEXAGESIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?[0-9][0-9_]*(?::[0-5]?[0-9]){1,2}(?:\.[0-9_]*)?$")
        .expect("sexagesimal pattern")
});
/// Decimal integers with optional sign and `_` separators.
static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?[0-9][0-9_]*$").expect("int pattern"));
/// Fixed and exponent floats: `1.5`, `.5`, `1.`, `6.8523015e+5`.
static FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?(?:\.[0-9][0-9_]*|[0-9][0-9_]*(?:\.[0-9_]*)?)(?:[eE][-+]?[0-9]+)?$")
        .expect("float pattern")
});
/// `.inf` in its three spellings; the sign is captured.
static INFINITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([-+]?)\.(?:inf|Inf|INF)$").expect("inf pattern"));
/// `.nan` in its three spellings.
static NAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\.(?:nan|NaN|NAN)$").expect("nan pattern"));

/// Closed classification of a scalar's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass<'a> {
    /// No tag: implicit typing applies.
    Implicit,
    /// The non-specific `!` tag: always a string.
    NonSpecific,
    Str,
    Int,
    Float,
    Null,
    Bool,
    /// A tag in the XML Schema namespace, carried whole.
    Xsd(&'a str),
    /// The part of an i18n tag after the namespace, e.g. `en_ltr` or `_rtl`.
    I18n(&'a str),
    /// Anything else, carried whole.
    Other(&'a str),
}

impl<'a> TagClass<'a> {
    pub fn classify(tag: Option<&'a Tag>) -> Self {
        let Some(tag) = tag else {
            return TagClass::Implicit;
        };
        let text = tag.as_str();
        if text.is_empty() {
            return TagClass::Implicit;
        }
        if text == "!" {
            return TagClass::NonSpecific;
        }
        let core = text
            .strip_prefix(YAML_CORE)
            .or_else(|| text.strip_prefix('!'));
        match core {
            Some("str") => return TagClass::Str,
            Some("int") => return TagClass::Int,
            Some("float") => return TagClass::Float,
            Some("null") => return TagClass::Null,
            Some("bool") => return TagClass::Bool,
            _ => {}
        }
        if text.starts_with(XSD_BASE) {
            TagClass::Xsd(text)
        } else if let Some(rest) = text.strip_prefix(I18N_BASE) {
            TagClass::I18n(rest.strip_prefix('#').unwrap_or(rest))
        } else {
            TagClass::Other(text)
        }
    }
}

/// Resolve a scalar node to an IR value under `options`.
///
/// Errors carry [`Location::UNKNOWN`]; callers attach positions.
pub fn resolve(scalar: &Scalar, options: &Options) -> Result<Value, Error> {
    let text = scalar.value.as_str();
    match TagClass::classify(scalar.tag.as_ref()) {
        TagClass::Implicit if scalar.is_plain() => Ok(resolve_implicit(text)),
        TagClass::Implicit | TagClass::NonSpecific | TagClass::Str => {
            Ok(Value::String(text.to_string()))
        }
        TagClass::Int => parse_int(text)
            .map(Value::Integer)
            .ok_or_else(|| parse_error(text, "integer")),
        TagClass::Float => match tokenize(text) {
            Value::Integer(i) => Ok(Value::Float(i as f64)),
            Value::Float(f) => Ok(Value::Float(f)),
            _ => Err(parse_error(text, "float")),
        },
        TagClass::Null => Ok(Value::Null),
        // Anything but `true`, in any case, is false.
        TagClass::Bool => Ok(Value::Bool(text.eq_ignore_ascii_case("true"))),
        TagClass::Xsd(datatype) => Ok(if options.profile.is_extended() {
            Value::Literal(Literal::typed(text, datatype))
        } else {
            Value::String(text.to_string())
        }),
        TagClass::I18n(suffix) => {
            if options.language_direction_enabled() {
                i18n_literal(text, suffix, scalar).map(Value::Literal)
            } else if scalar.is_plain() {
                Ok(resolve_implicit(text))
            } else {
                Ok(Value::String(text.to_string()))
            }
        }
        TagClass::Other(tag) => {
            if options.profile.is_extended() {
                Ok(Value::Literal(Literal::typed(text, tag)))
            } else {
                Err(unsupported(tag, text))
            }
        }
    }
}

fn i18n_literal(text: &str, suffix: &str, scalar: &Scalar) -> Result<Literal, Error> {
    let (language, direction) = match suffix.split_once('_') {
        Some((language, direction)) => {
            let direction = Direction::parse(direction).ok_or_else(|| {
                unsupported(scalar.tag.as_ref().map_or("", |t| t.as_str()), text)
            })?;
            (language, Some(direction))
        }
        None => (suffix, None),
    };
    if language.is_empty() && direction.is_none() {
        return Err(unsupported(
            scalar.tag.as_ref().map_or("", |t| t.as_str()),
            text,
        ));
    }
    let language = (!language.is_empty()).then(|| language.to_string());
    Ok(Literal::language_tagged(text, language, direction))
}

/// Implicit typing for an untagged plain scalar. Date and time forms stay
/// strings so they never collide with typed literal lexical forms.
pub fn resolve_implicit(text: &str) -> Value {
    if is_temporal(text) {
        return Value::String(text.to_string());
    }
    tokenize(text)
}

pub fn is_temporal(text: &str) -> bool {
    TIMESTAMP.is_match(text) || DATE.is_match(text) || SEXAGESIMAL.is_match(text)
}

/// The generic scalar tokenizer: null, booleans, integers and floats,
/// falling back to string.
pub fn tokenize(text: &str) -> Value {
    match text {
        "" | "~" | "null" | "Null" | "NULL" => return Value::Null,
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Some(i) = parse_int(text) {
        return Value::Integer(i);
    }
    if DECIMAL.is_match(text) || FLOAT.is_match(text) {
        if let Ok(f) = text.replace('_', "").parse::<f64>() {
            return Value::Float(f);
        }
    }
    if let Some(caps) = INFINITY.captures(text) {
        return Value::Float(if &caps[1] == "-" {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    if NAN.is_match(text) {
        return Value::Float(f64::NAN);
    }
    Value::String(text.to_string())
}

/// Parse decimal, `0x`, `0o` and `0b` integers with optional sign and `_`
/// separators. Returns `None` on malformed input or overflow.
pub fn parse_int(text: &str) -> Option<i64> {
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let (radix, digits) = if let Some(d) = body.strip_prefix("0x") {
        (16, d)
    } else if let Some(d) = body.strip_prefix("0o") {
        (8, d)
    } else if let Some(d) = body.strip_prefix("0b") {
        (2, d)
    } else if DECIMAL.is_match(body) {
        (10, body)
    } else {
        return None;
    };
    let digits = digits.replace('_', "");
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let magnitude = i128::from_str_radix(&digits, radix).ok()?;
    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed).ok()
}

fn parse_error(text: &str, expected: &'static str) -> Error {
    Error::ScalarParse {
        value: text.to_string(),
        expected,
        location: Location::UNKNOWN,
    }
}

fn unsupported(tag: &str, text: &str) -> Error {
    Error::UnsupportedTag {
        tag: tag.to_string(),
        value: text.to_string(),
        location: Location::UNKNOWN,
    }
}
