//! Value transforms applied before validation.
//!
//! Transforms compose left-to-right; each takes the previous step's output.
//! They are pure rewrites: a transform either produces a new value or
//! reports why it could not, and never panics on bad input. Values already
//! of the target shape pass through unchanged, so re-applying a chain to an
//! already-transformed value is a no-op.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Currency symbols stripped by [`Transform::StripCurrency`].
const CURRENCY_SYMBOLS: &[char] = &['$', '€', '£', '¥'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Trim surrounding whitespace from string values.
    Trim,
    /// Strip a leading currency symbol (e.g. `$12.50` -> `12.50`).
    StripCurrency,
    /// Strip a trailing percent sign (e.g. `5%` -> `5`).
    StripPercent,
    /// Remove thousands separators (e.g. `1,000` -> `1000`).
    StripThousands,
    Uppercase,
    Lowercase,
    /// Parse the string as a finite number.
    ParseNumber,
}

impl Transform {
    /// Apply this transform to a value.
    ///
    /// Non-string values pass through untouched except for `ParseNumber`,
    /// which accepts numbers as-is and rejects everything non-numeric.
    pub fn apply(&self, value: &Value) -> Result<Value, String> {
        match self {
            Transform::Trim => Ok(map_str(value, |s| s.trim().to_string())),
            Transform::StripCurrency => Ok(map_str(value, |s| {
                s.trim()
                    .trim_start_matches(CURRENCY_SYMBOLS)
                    .trim()
                    .to_string()
            })),
            Transform::StripPercent => Ok(map_str(value, |s| {
                s.trim().trim_end_matches('%').trim().to_string()
            })),
            Transform::StripThousands => Ok(map_str(value, |s| s.replace(',', ""))),
            Transform::Uppercase => Ok(map_str(value, str::to_uppercase)),
            Transform::Lowercase => Ok(map_str(value, str::to_lowercase)),
            Transform::ParseNumber => parse_number(value),
        }
    }

    /// Apply a chain of transforms in order, stopping at the first failure.
    pub fn apply_all(transforms: &[Transform], value: Value) -> Result<Value, String> {
        let mut current = value;
        for transform in transforms {
            current = transform.apply(&current)?;
        }
        Ok(current)
    }
}

fn map_str(value: &Value, f: impl Fn(&str) -> String) -> Value {
    match value {
        Value::Str(s) => Value::Str(f(s)),
        other => other.clone(),
    }
}

fn parse_number(value: &Value) -> Result<Value, String> {
    match value {
        Value::Num(n) => Ok(Value::Num(*n)),
        Value::Str(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Value::Num)
                .ok_or_else(|| format!("cannot parse '{trimmed}' as a number"))
        }
        other => Err(format!("cannot parse {} as a number", type_name(other))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Str(_) => "string",
        Value::Num(_) => "number",
        Value::Date(_) => "date",
        Value::Bool(_) => "boolean",
        Value::Null => "empty value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Value {
        Value::Str(text.to_string())
    }

    #[test]
    fn strips_currency_and_percent() {
        let out = Transform::StripCurrency.apply(&s("$12.50")).unwrap();
        assert_eq!(out, s("12.50"));
        let out = Transform::StripPercent.apply(&s("5%")).unwrap();
        assert_eq!(out, s("5"));
        let out = Transform::StripThousands.apply(&s("1,234,567")).unwrap();
        assert_eq!(out, s("1234567"));
    }

    #[test]
    fn chain_composes_left_to_right() {
        let chain = [Transform::StripPercent, Transform::ParseNumber];
        let out = Transform::apply_all(&chain, s(" 5% ")).unwrap();
        assert_eq!(out, Value::Num(5.0));
    }

    #[test]
    fn chain_is_idempotent_on_transformed_values() {
        let chain = [Transform::StripPercent, Transform::ParseNumber];
        let once = Transform::apply_all(&chain, s("0.5%")).unwrap();
        let twice = Transform::apply_all(&chain, once.clone()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn parse_number_rejects_garbage() {
        assert!(Transform::ParseNumber.apply(&s("abc")).is_err());
        assert!(Transform::ParseNumber.apply(&s("NaN")).is_err());
        assert!(Transform::ParseNumber.apply(&Value::Null).is_err());
    }

    #[test]
    fn case_transforms() {
        assert_eq!(Transform::Uppercase.apply(&s("asin")).unwrap(), s("ASIN"));
        assert_eq!(Transform::Lowercase.apply(&s("SKU")).unwrap(), s("sku"));
    }
}
