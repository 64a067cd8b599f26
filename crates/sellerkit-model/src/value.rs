use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// A single cell value, either raw from CSV or produced by a transform.
///
/// Raw CSV cells always start life as `Str`; transforms and type coercion
/// narrow them into the other variants. `Null` marks a cell that was absent
/// from the source row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Str(String),
    Num(f64),
    Date(NaiveDate),
    Bool(bool),
    Null,
}

impl Value {
    /// True when the value counts as absent for required-column checks.
    /// Null and blank strings are indistinguishable here.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Str(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Numeric interpretation of the value, if one exists.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(*n),
            Value::Str(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Render the value the way it would appear in a CSV cell.
    /// Whole numbers drop the trailing `.0`.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Num(n) => format_numeric(*n),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

/// Format a float without a spurious fractional part.
pub fn format_numeric(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_detection() {
        assert!(Value::Null.is_empty());
        assert!(Value::Str("  ".to_string()).is_empty());
        assert!(!Value::Str("0".to_string()).is_empty());
        assert!(!Value::Num(0.0).is_empty());
        assert!(!Value::Bool(false).is_empty());
    }

    #[test]
    fn numeric_interpretation() {
        assert_eq!(Value::Num(5.0).as_number(), Some(5.0));
        assert_eq!(Value::Str(" 3.5 ".to_string()).as_number(), Some(3.5));
        assert_eq!(Value::Str("abc".to_string()).as_number(), None);
        assert_eq!(Value::Bool(true).as_number(), None);
    }

    #[test]
    fn display_strings() {
        assert_eq!(Value::Num(1000.0).to_display_string(), "1000");
        assert_eq!(Value::Num(5.25).to_display_string(), "5.25");
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(Value::Date(date).to_display_string(), "2024-01-15");
        assert_eq!(Value::Null.to_display_string(), "");
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_string(&Value::Num(5.0)).unwrap();
        assert_eq!(json, "5.0");
        let json = serde_json::to_string(&Value::Str("x".to_string())).unwrap();
        assert_eq!(json, "\"x\"");
    }
}
