//! Number formatting conventions carried by a language pack.
//!
//! Packs may declare `decimal`, `thousands`, `grouping`, `currency`,
//! `numerals`, `percent`, `minus` and `nan` at their top level, in the same
//! shape `d3-format` locales use. Absent or malformed fields keep the
//! `en-US` convention.

use serde::de::DeserializeOwned;

use super::pack::LocalePack;

/// Separators, digit grouping and symbols for rendering numbers.
///
/// ```
/// use navglot_common::i18n::{LocalePack, NumberFormat};
/// use serde_json::json;
///
/// let pack = LocalePack::new("Nederlands")
///     .with_group("decimal", json!(","))
///     .with_group("thousands", json!("."))
///     .with_group("currency", json!(["€\u{a0}", ""]));
/// let format = NumberFormat::from_pack(&pack);
///
/// assert_eq!(format.format(1234567.891, 2), "1.234.567,89");
/// assert_eq!(format.currency(-12.5, 2), "\u{2212}€\u{a0}12,50");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NumberFormat {
    /// Decimal point.
    pub decimal: String,
    /// Separator between digit groups.
    pub thousands: String,
    /// Group sizes from the right; the list repeats once exhausted.
    pub grouping: Vec<usize>,
    /// Currency prefix and suffix.
    pub currency: (String, String),
    /// Replacements for the digits `0` to `9`.
    pub numerals: Option<Vec<String>>,
    /// Percent sign.
    pub percent: String,
    /// Minus sign.
    pub minus: String,
    /// Text for values that are not a number.
    pub nan: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal: String::from("."),
            thousands: String::from(","),
            grouping: vec![3],
            currency: (String::from("$"), String::new()),
            numerals: None,
            percent: String::from("%"),
            minus: String::from("\u{2212}"),
            nan: String::from("NaN"),
        }
    }
}

fn field_or<T: DeserializeOwned>(pack: &LocalePack, name: &str, default: T) -> T {
    pack.field(name)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or(default)
}

impl NumberFormat {
    /// Read the conventions declared by `pack`.
    #[must_use]
    pub fn from_pack(pack: &LocalePack) -> Self {
        let defaults = Self::default();
        Self {
            decimal: field_or(pack, "decimal", defaults.decimal),
            thousands: field_or(pack, "thousands", defaults.thousands),
            grouping: field_or(pack, "grouping", defaults.grouping),
            currency: field_or(pack, "currency", defaults.currency),
            numerals: pack
                .field("numerals")
                .and_then(|value| serde_json::from_value::<Vec<String>>(value).ok())
                .filter(|digits| digits.len() == 10),
            percent: field_or(pack, "percent", defaults.percent),
            minus: field_or(pack, "minus", defaults.minus),
            nan: field_or(pack, "nan", defaults.nan),
        }
    }

    /// Insert the thousands separator into a run of ASCII digits.
    ///
    /// A zero group size stops grouping and keeps the remaining digits
    /// together.
    #[must_use]
    pub fn group(&self, digits: &str) -> String {
        let mut groups: Vec<&str> = Vec::new();
        let mut end = digits.len();
        for size in self.grouping.iter().copied().cycle() {
            if end == 0 || size == 0 {
                break;
            }
            let start = end.saturating_sub(size);
            groups.push(digits.get(start..end).unwrap_or_default());
            end = start;
        }
        if end > 0 {
            groups.push(digits.get(..end).unwrap_or_default());
        }
        groups.reverse();
        groups.join(&self.thousands)
    }

    /// Render `value` with `precision` fraction digits.
    #[must_use]
    pub fn format(&self, value: f64, precision: usize) -> String {
        self.render(value, precision, ("", ""))
    }

    /// Render `value` as an amount between the currency prefix and suffix.
    #[must_use]
    pub fn currency(&self, value: f64, precision: usize) -> String {
        self.render(value, precision, (&self.currency.0, &self.currency.1))
    }

    fn render(&self, value: f64, precision: usize, (prefix, suffix): (&str, &str)) -> String {
        if value.is_nan() {
            return self.nan.clone();
        }
        let magnitude = format!("{:.precision$}", value.abs());
        let (whole, fraction) = magnitude
            .split_once('.')
            .map_or((magnitude.as_str(), None), |(whole, fraction)| {
                (whole, Some(fraction))
            });
        let mut body = if whole.bytes().all(|byte| byte.is_ascii_digit()) {
            self.group(whole)
        } else {
            whole.to_owned()
        };
        if let Some(digits) = fraction {
            body.push_str(&self.decimal);
            body.push_str(digits);
        }
        let negative = value.is_sign_negative()
            && magnitude.bytes().any(|byte| matches!(byte, b'1'..=b'9'));
        let sign = if negative { self.minus.as_str() } else { "" };
        format!("{sign}{prefix}{}{suffix}", self.localise_digits(&body))
    }

    fn localise_digits(&self, text: &str) -> String {
        let Some(numerals) = &self.numerals else {
            return text.to_owned();
        };
        text.chars()
            .map(|character| {
                character
                    .to_digit(10)
                    .and_then(|digit| usize::try_from(digit).ok())
                    .and_then(|digit| numerals.get(digit))
                    .map_or_else(|| character.to_string(), Clone::clone)
            })
            .collect()
    }
}
