//! printf-style rendering of message catalog templates.
//!
//! Placeholders follow `%<width>.<precision><type>` with `type` one of `d`, `f`
//! or `s`. Width is parsed and ignored. Arguments are consumed left to right.

use std::borrow::Cow;

/// One positional value substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg<'a> {
    Num(f64),
    Text(Cow<'a, str>),
    /// Missing number; renders like a non-finite one.
    Absent,
}

impl From<f64> for Arg<'_> {
    fn from(value: f64) -> Self {
        Arg::Num(value)
    }
}

impl From<Option<f64>> for Arg<'_> {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Arg::Absent, Arg::Num)
    }
}

impl From<i64> for Arg<'_> {
    fn from(value: i64) -> Self {
        Arg::Num(value as f64)
    }
}

impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        Arg::Num(value as f64)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Text(Cow::Borrowed(value))
    }
}

impl From<String> for Arg<'_> {
    fn from(value: String) -> Self {
        Arg::Text(Cow::Owned(value))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Arg::Text(Cow::Borrowed(value.as_str()))
    }
}

/// Builds the argument slice for [`render`] from heterogeneous values.
#[macro_export]
macro_rules! fmt_args {
    ($($value:expr),* $(,)?) => {
        [$($crate::format::Arg::from($value)),*]
    };
}

pub fn render(template: &str, args: &[Arg<'_>]) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    let mut next_arg = args.iter();

    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        match parse_placeholder(after) {
            Some((spec, consumed)) => {
                out.push_str(&spec.apply(next_arg.next()));
                rest = &after[consumed..];
            }
            None => {
                out.push('%');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Integer,
    Fixed,
    Str,
}

#[derive(Debug, Clone, Copy)]
struct Placeholder {
    precision: Option<usize>,
    conversion: Conversion,
}

/// Parses the text after a `%`, returning the placeholder and bytes consumed.
fn parse_placeholder(text: &str) -> Option<(Placeholder, usize)> {
    let bytes = text.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() && bytes[idx].is_ascii_digit() {
        idx += 1;
    }

    let mut precision = None;
    if idx < bytes.len() && bytes[idx] == b'.' {
        let start = idx + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        // A dot without digits is not part of the grammar; the width (if any)
        // must then be followed directly by the type.
        if end > start {
            precision = text[start..end].parse().ok();
            idx = end;
        }
    }

    let conversion = match bytes.get(idx)? {
        b'd' => Conversion::Integer,
        b'f' => Conversion::Fixed,
        b's' => Conversion::Str,
        _ => return None,
    };

    Some((
        Placeholder {
            precision,
            conversion,
        },
        idx + 1,
    ))
}

impl Placeholder {
    fn apply(&self, arg: Option<&Arg<'_>>) -> String {
        match (self.conversion, arg) {
            (Conversion::Str, Some(Arg::Text(text))) => text.to_string(),
            (Conversion::Str, None) => String::new(),
            (Conversion::Str, Some(Arg::Num(value))) => shortest(*value),
            (_, None | Some(Arg::Absent)) => "NaN".to_string(),
            (Conversion::Integer, Some(arg)) => match numeric(arg) {
                Some(value) if value.is_finite() => format!("{}", value.trunc() as i64),
                _ => "NaN".to_string(),
            },
            (Conversion::Fixed, Some(arg)) => match (numeric(arg), self.precision) {
                (Some(value), Some(decimals)) if value.is_finite() => {
                    fixed(value, decimals)
                }
                (Some(value), None) => shortest(value),
                _ => "NaN".to_string(),
            },
        }
    }
}

fn numeric(arg: &Arg<'_>) -> Option<f64> {
    match arg {
        Arg::Num(value) => Some(*value),
        Arg::Text(text) => text.trim().parse::<f64>().ok(),
        Arg::Absent => None,
    }
}

/// Shortest round-trip rendering; `-0` prints as `0`.
pub fn shortest(value: f64) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// Fixed-point rendering with `decimals` digits; non-finite renders `NaN`.
pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", decimals, 0.0);
    }
    format!("{:.*}", decimals, value)
}
