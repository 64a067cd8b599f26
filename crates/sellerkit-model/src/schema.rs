//! Declarative schema model for seller report CSVs.
//!
//! A [`SchemaDef`] names the columns a report is expected to carry and, per
//! column, the data type, requiredness, format pattern, numeric bounds,
//! allowed values, value transforms, and free-form rules. Schemas are built
//! once (by the registry or the TOML loader) and never mutated afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::transform::Transform;
use crate::value::Value;

/// Expected data type of a column after transforms have run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Number,
    Date,
    Boolean,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::String => "string",
            ColumnType::Number => "number",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(ColumnType::String),
            "number" => Ok(ColumnType::Number),
            "date" => Ok(ColumnType::Date),
            "boolean" | "bool" => Ok(ColumnType::Boolean),
            other => Err(format!("unknown column type: {other}")),
        }
    }
}

/// A domain-specific check not expressible through the declarative fields.
/// Rules run last, against the transformed and coerced value.
#[derive(Debug, Clone)]
pub struct Rule {
    pub message: String,
    pub predicate: fn(&Value) -> bool,
}

impl Rule {
    pub fn new(message: impl Into<String>, predicate: fn(&Value) -> bool) -> Self {
        Self {
            message: message.into(),
            predicate,
        }
    }
}

/// Definition of one expected column.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub data_type: ColumnType,
    pub required: bool,
    /// Regex the stringified value must match. Compiled by the validator.
    pub format: Option<String>,
    /// Inclusive numeric bounds, checked post-transform.
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Finite set of permitted stringified values.
    pub allowed_values: Option<Vec<String>>,
    pub rules: Vec<Rule>,
    /// Applied left-to-right before any validation check.
    pub transforms: Vec<Transform>,
}

impl ColumnDef {
    pub fn new(data_type: ColumnType) -> Self {
        Self {
            data_type,
            required: false,
            format: None,
            min: None,
            max: None,
            allowed_values: None,
            rules: Vec::new(),
            transforms: Vec::new(),
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_format(mut self, pattern: impl Into<String>) -> Self {
        self.format = Some(pattern.into());
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_range(self, min: f64, max: f64) -> Self {
        self.with_min(min).with_max(max)
    }

    #[must_use]
    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_rule(mut self, message: impl Into<String>, predicate: fn(&Value) -> bool) -> Self {
        self.rules.push(Rule::new(message, predicate));
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }
}

/// A named, versioned collection of column definitions.
///
/// Column keys are case-sensitive and must match raw CSV header text exactly.
/// When `strict` is set, any column present in a row but absent from the
/// schema is itself a violation.
#[derive(Debug, Clone)]
pub struct SchemaDef {
    pub name: String,
    pub version: String,
    pub description: Option<String>,
    pub strict: bool,
    pub columns: BTreeMap<String, ColumnDef>,
}

impl SchemaDef {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
            strict: false,
            columns: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    #[must_use]
    pub fn with_column(mut self, name: impl Into<String>, def: ColumnDef) -> Self {
        self.columns.insert(name.into(), def);
        self
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_parsing() {
        assert_eq!("number".parse::<ColumnType>().unwrap(), ColumnType::Number);
        assert_eq!("Bool".parse::<ColumnType>().unwrap(), ColumnType::Boolean);
        assert!("decimal".parse::<ColumnType>().is_err());
    }

    #[test]
    fn builder_composes() {
        let schema = SchemaDef::new("Test Schema", "1.0")
            .strict()
            .with_column(
                "Impressions",
                ColumnDef::new(ColumnType::Number).required().with_min(0.0),
            )
            .with_column("Notes", ColumnDef::new(ColumnType::String));

        assert_eq!(schema.columns.len(), 2);
        assert!(schema.strict);
        let col = schema.column("Impressions").unwrap();
        assert!(col.required);
        assert_eq!(col.min, Some(0.0));
        assert!(schema.column("Missing").is_none());
    }

    #[test]
    fn rule_predicate_runs() {
        let rule = Rule::new("must not be blank", |v| !v.is_empty());
        assert!((rule.predicate)(&Value::Str("x".to_string())));
        assert!(!(rule.predicate)(&Value::Null));
    }
}
