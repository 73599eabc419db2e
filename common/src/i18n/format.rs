//! Printf-style positional substitution for message templates.
//!
//! Supports `%%`, sequential and `%N$` positional arguments, the `-`, `+`
//! and `0` flags, a minimum width, a precision, and the conversions
//! `s`, `j`, `d`, `i`, `u`, `f`, `e`, `x`, `X`, `o` and `b`. Arguments are
//! strings; numeric conversions parse them first and fall back to the raw
//! argument when it is not a number. Missing arguments render as empty.

use log::error;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// `>>> 0` wraps integers into the unsigned 32-bit range.
const UNSIGNED_RANGE: f64 = 4_294_967_296.0;

static PLACEHOLDER: Lazy<Option<Regex>> = Lazy::new(|| {
    compile_regex(
        r"%(?:(?P<position>[1-9][0-9]*)\$)?(?P<flags>[-+0]*)(?P<width>[0-9]+)?(?:\.(?P<precision>[0-9]+))?(?P<kind>[%sjdiufexXob])",
        "placeholder",
    )
});

fn compile_regex(pattern: &str, context: &str) -> Option<Regex> {
    Regex::new(pattern)
        .inspect_err(|failure| {
            error!(target: "navglot::i18n", "{context} pattern failed to compile: {failure}");
        })
        .ok()
}

#[derive(Clone, Copy, Debug, Default)]
struct Flags {
    left: bool,
    plus: bool,
    zero: bool,
}

impl Flags {
    fn parse(raw: &str) -> Self {
        raw.chars().fold(Self::default(), |flags, flag| match flag {
            '-' => Self { left: true, ..flags },
            '+' => Self { plus: true, ..flags },
            '0' => Self { zero: true, ..flags },
            _ => flags,
        })
    }
}

/// Substitute `args` into `template`.
///
/// ```
/// use navglot_common::i18n::vsprintf;
///
/// assert_eq!(vsprintf("%s has %d items", &["Cart", "3"]), "Cart has 3 items");
/// assert_eq!(vsprintf("%2$s, %1$s", &["world", "Hello"]), "Hello, world");
/// assert_eq!(vsprintf("%.2f%%", &["12.346"]), "12.35%");
/// ```
#[must_use]
pub fn vsprintf<S: AsRef<str>>(template: &str, args: &[S]) -> String {
    let Some(placeholder) = PLACEHOLDER.as_ref() else {
        return template.to_owned();
    };
    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;
    let mut last = 0;

    for captures in placeholder.captures_iter(template) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        output.push_str(template.get(last..whole.start()).unwrap_or_default());
        last = whole.end();

        let kind = captures.name("kind").map_or("s", |kind| kind.as_str());
        if kind == "%" {
            output.push('%');
            continue;
        }

        let argument = captures.name("position").map_or_else(
            || {
                let next = args.get(cursor);
                cursor += 1;
                next
            },
            |position| {
                position
                    .as_str()
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| index.checked_sub(1))
                    .and_then(|index| args.get(index))
            },
        );
        let raw = argument.map_or("", AsRef::as_ref);
        output.push_str(&render(&captures, kind, raw));
    }

    output.push_str(template.get(last..).unwrap_or_default());
    output
}

fn render(captures: &Captures<'_>, kind: &str, raw: &str) -> String {
    let flags = Flags::parse(captures.name("flags").map_or("", |flags| flags.as_str()));
    let width = numeric_group(captures, "width");
    let precision = numeric_group(captures, "precision");

    let (body, numeric) = match kind {
        "s" | "j" => (truncate(raw, precision), false),
        other => match raw.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => (convert_number(other, number, precision), true),
            _ => (raw.to_owned(), false),
        },
    };

    let signed = if numeric && !body.starts_with('-') && matches!(kind, "d" | "i" | "f" | "e") {
        if flags.plus { format!("+{body}") } else { body }
    } else {
        body
    };

    pad(signed, width, flags, numeric)
}

fn numeric_group(captures: &Captures<'_>, name: &str) -> Option<usize> {
    captures
        .name(name)
        .and_then(|group| group.as_str().parse().ok())
}

fn truncate(raw: &str, precision: Option<usize>) -> String {
    precision.map_or_else(|| raw.to_owned(), |limit| raw.chars().take(limit).collect())
}

// Whole numbers print through the float formatter so large values keep
// every digit; `-0` collapses to `0`.
fn whole_text(number: f64) -> String {
    let text = format!("{:.0}", number.trunc());
    if text == "-0" { String::from("0") } else { text }
}

// Integer conversions wrap like JavaScript's `>>> 0`.
fn convert_number(kind: &str, number: f64, precision: Option<usize>) -> String {
    let unsigned = whole_text(number.trunc().rem_euclid(UNSIGNED_RANGE))
        .parse::<u64>()
        .unwrap_or_default();
    match kind {
        "d" | "i" => whole_text(number),
        "u" => unsigned.to_string(),
        "f" => precision.map_or_else(|| number.to_string(), |digits| format!("{number:.digits$}")),
        "e" => exponent(number, precision),
        "x" => format!("{unsigned:x}"),
        "X" => format!("{unsigned:X}"),
        "o" => format!("{unsigned:o}"),
        "b" => format!("{unsigned:b}"),
        _ => number.to_string(),
    }
}

fn exponent(number: f64, precision: Option<usize>) -> String {
    let formatted = precision.map_or_else(
        || format!("{number:e}"),
        |digits| format!("{number:.digits$e}"),
    );
    if let Some((mantissa, power)) = formatted.split_once('e')
        && !power.starts_with('-')
    {
        return format!("{mantissa}e+{power}");
    }
    formatted
}

fn pad(body: String, width: Option<usize>, flags: Flags, numeric: bool) -> String {
    let length = body.chars().count();
    let Some(missing) = width.and_then(|minimum| minimum.checked_sub(length)) else {
        return body;
    };
    if missing == 0 {
        return body;
    }
    if flags.left {
        return format!("{body}{}", " ".repeat(missing));
    }
    if flags.zero && numeric {
        let (sign, digits) = match body.chars().next() {
            Some(sign @ ('-' | '+')) => (Some(sign), body.get(1..).unwrap_or_default()),
            _ => (None, body.as_str()),
        };
        let mut padded = String::with_capacity(body.len() + missing);
        if let Some(symbol) = sign {
            padded.push(symbol);
        }
        padded.push_str(&"0".repeat(missing));
        padded.push_str(digits);
        return padded;
    }
    format!("{}{body}", " ".repeat(missing))
}
