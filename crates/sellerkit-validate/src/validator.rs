//! Schema-driven row validation.
//!
//! The validator walks every row against every schema column, in this order:
//!
//! 1. **Strict mode**: row keys absent from the schema are violations.
//! 2. **Requiredness**: a required column that is missing or blank is a
//!    violation; further checks for that cell are skipped. A blank optional
//!    cell is valid absence and skips everything.
//! 3. **Transforms**: applied left-to-right; a failing transform is recorded
//!    as a violation on that cell, never propagated.
//! 4. **Type coercion**: the transformed value must coerce to the declared
//!    column type; failure skips the remaining checks for that cell.
//! 5. **Format / bounds / allowed values / rules**: each breach is its own
//!    violation; none of these short-circuit the others.
//!
//! Violations accumulate across the whole input. The pass is all-or-nothing:
//! either every row comes back transformed, or a single [`AggregateError`]
//! carries every violation found, in row-then-column encounter order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use regex::Regex;

use sellerkit_model::{
    AggregateError, ColumnDef, ColumnType, IssueCode, RowRecord, SchemaConfigError, SchemaDef,
    Transform, Value, ValidationIssue,
};

/// Validation engine for one schema.
///
/// Construction compiles every format pattern once; a bad pattern or an
/// empty column map is a configuration error, not a per-row violation.
#[derive(Debug)]
pub struct Validator<'a> {
    schema: &'a SchemaDef,
    formats: BTreeMap<String, Regex>,
}

impl<'a> Validator<'a> {
    pub fn new(schema: &'a SchemaDef) -> Result<Self, SchemaConfigError> {
        if schema.columns.is_empty() {
            return Err(SchemaConfigError::EmptyColumns {
                name: schema.name.clone(),
            });
        }

        let mut formats = BTreeMap::new();
        for (name, def) in &schema.columns {
            if let Some(pattern) = &def.format {
                let regex =
                    Regex::new(pattern).map_err(|e| SchemaConfigError::InvalidFormatPattern {
                        name: schema.name.clone(),
                        column: name.clone(),
                        message: e.to_string(),
                    })?;
                formats.insert(name.clone(), regex);
            }
        }

        Ok(Self { schema, formats })
    }

    /// Validate and transform a sequence of rows.
    ///
    /// Returns the transformed rows in input order, or every violation found
    /// across the whole input. Never returns a partial result set.
    pub fn validate(&self, rows: &[RowRecord]) -> Result<Vec<RowRecord>, AggregateError> {
        let mut issues: Vec<ValidationIssue> = Vec::new();
        let mut output: Vec<RowRecord> = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let row_number = index + 1;

            if self.schema.strict {
                for key in row.keys() {
                    if !self.schema.columns.contains_key(key) {
                        issues.push(ValidationIssue::new(
                            IssueCode::UnexpectedColumn,
                            row_number,
                            key.clone(),
                            format!("unexpected column '{key}'"),
                        ));
                    }
                }
            }

            // Iterate schema columns, not row keys, so required columns are
            // checked even when entirely absent from the row.
            let mut out_row = RowRecord::new();
            for (name, def) in &self.schema.columns {
                let raw = row.get(name).cloned().unwrap_or(Value::Null);
                let value = self.check_cell(name, def, raw, row_number, &mut issues);
                out_row.insert(name.clone(), value);
            }
            output.push(out_row);
        }

        if issues.is_empty() {
            Ok(output)
        } else {
            tracing::debug!(
                schema = %self.schema.name,
                rows = rows.len(),
                issues = issues.len(),
                "validation failed"
            );
            Err(AggregateError::new(issues))
        }
    }

    /// Run the per-cell pipeline, recording violations and returning the
    /// value to store in the output row.
    fn check_cell(
        &self,
        name: &str,
        def: &ColumnDef,
        raw: Value,
        row_number: usize,
        issues: &mut Vec<ValidationIssue>,
    ) -> Value {
        if raw.is_empty() {
            if def.required {
                issues.push(ValidationIssue::new(
                    IssueCode::MissingRequired,
                    row_number,
                    name,
                    "missing required value",
                ));
            }
            // Blank optional cells are valid absence; either way no further
            // checks apply to an empty cell.
            return Value::Null;
        }

        let transformed = match Transform::apply_all(&def.transforms, raw) {
            Ok(value) => value,
            Err(reason) => {
                issues.push(ValidationIssue::new(
                    IssueCode::TransformFailed,
                    row_number,
                    name,
                    format!("transform failed: {reason}"),
                ));
                return Value::Null;
            }
        };

        // Stringified form of the transformed value, used by the format and
        // allowed-value checks.
        let display = transformed.to_display_string();

        let coerced = match coerce(&transformed, def.data_type) {
            Ok(value) => value,
            Err(reason) => {
                issues.push(ValidationIssue::new(
                    IssueCode::InvalidType,
                    row_number,
                    name,
                    reason,
                ));
                return transformed;
            }
        };

        if let Some(regex) = self.formats.get(name)
            && !regex.is_match(&display)
        {
            issues.push(ValidationIssue::new(
                IssueCode::FormatMismatch,
                row_number,
                name,
                format!("value '{display}' does not match the expected format"),
            ));
        }

        if def.data_type == ColumnType::Number
            && let Some(number) = coerced.as_number()
        {
            if let Some(min) = def.min
                && number < min
            {
                issues.push(ValidationIssue::new(
                    IssueCode::BelowMin,
                    row_number,
                    name,
                    format!("value {number} is below the minimum {min}"),
                ));
            }
            if let Some(max) = def.max
                && number > max
            {
                issues.push(ValidationIssue::new(
                    IssueCode::AboveMax,
                    row_number,
                    name,
                    format!("value {number} is above the maximum {max}"),
                ));
            }
        }

        if let Some(allowed) = &def.allowed_values
            && !allowed.iter().any(|candidate| candidate == &display)
        {
            issues.push(ValidationIssue::new(
                IssueCode::ValueNotAllowed,
                row_number,
                name,
                format!("value '{display}' is not in the allowed set"),
            ));
        }

        for rule in &def.rules {
            if !(rule.predicate)(&coerced) {
                issues.push(ValidationIssue::new(
                    IssueCode::RuleFailed,
                    row_number,
                    name,
                    rule.message.clone(),
                ));
            }
        }

        coerced
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Coerce a transformed value to the declared column type.
fn coerce(value: &Value, data_type: ColumnType) -> Result<Value, String> {
    match data_type {
        ColumnType::String => Ok(match value {
            Value::Str(s) => Value::Str(s.clone()),
            other => Value::Str(other.to_display_string()),
        }),
        ColumnType::Number => value
            .as_number()
            .map(Value::Num)
            .ok_or_else(|| format!("expected a number, got '{}'", value.to_display_string())),
        ColumnType::Date => match value {
            Value::Date(d) => Ok(Value::Date(*d)),
            other => parse_date(&other.to_display_string())
                .map(Value::Date)
                .ok_or_else(|| format!("invalid date '{}'", other.to_display_string())),
        },
        ColumnType::Boolean => match value {
            Value::Bool(b) => Ok(Value::Bool(*b)),
            other => parse_boolean(&other.to_display_string())
                .map(Value::Bool)
                .ok_or_else(|| format!("invalid boolean '{}'", other.to_display_string())),
        },
    }
}

/// Parse the date formats seen across seller report exports.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];
    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    // Datetime exports carry a time component; keep the date part.
    if let Ok(datetime) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(datetime.date());
    }
    None
}

/// Booleans may arrive as actual booleans or the literals
/// `true`/`false`/`0`/`1`, case-insensitive.
fn parse_boolean(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
