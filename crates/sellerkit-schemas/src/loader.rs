//! TOML schema loader for user-supplied report schemas.
//!
//! Covers the declarative subset of [`SchemaDef`]: types, requiredness,
//! format patterns, bounds, allowed values, and named transforms. Free-form
//! rules are code, not configuration, and stay with the built-in schemas.
//!
//! ```toml
//! name = "Returns Report"
//! version = "1.0"
//! strict = true
//!
//! [columns."Order ID"]
//! type = "string"
//! required = true
//!
//! [columns.Refund]
//! type = "number"
//! transforms = ["strip_currency", "parse_number"]
//! min = 0
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use sellerkit_model::{ColumnDef, ColumnType, SchemaDef, Transform};

use crate::error::SchemaSourceError;

#[derive(Debug, Deserialize)]
struct RawSchema {
    name: String,
    version: String,
    description: Option<String>,
    #[serde(default)]
    strict: bool,
    #[serde(default)]
    columns: BTreeMap<String, RawColumn>,
}

#[derive(Debug, Deserialize)]
struct RawColumn {
    #[serde(rename = "type")]
    data_type: ColumnType,
    #[serde(default)]
    required: bool,
    format: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    allowed: Option<Vec<String>>,
    #[serde(default)]
    transforms: Vec<Transform>,
}

/// Load a schema definition from a TOML file.
pub fn load_schema_file(path: &Path) -> Result<SchemaDef, SchemaSourceError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| SchemaSourceError::io(path, e))?;
    let raw: RawSchema = toml::from_str(&contents).map_err(|e| SchemaSourceError::Toml {
        path: path.to_path_buf(),
        source: e,
    })?;

    if raw.columns.is_empty() {
        return Err(SchemaSourceError::Invalid {
            path: path.to_path_buf(),
            message: format!("schema '{}' defines no columns", raw.name),
        });
    }

    let mut schema = SchemaDef::new(raw.name, raw.version);
    if let Some(description) = raw.description {
        schema = schema.with_description(description);
    }
    if raw.strict {
        schema = schema.strict();
    }
    for (name, raw_column) in raw.columns {
        schema = schema.with_column(name, build_column(raw_column));
    }
    Ok(schema)
}

fn build_column(raw: RawColumn) -> ColumnDef {
    let mut def = ColumnDef::new(raw.data_type);
    if raw.required {
        def = def.required();
    }
    if let Some(format) = raw.format {
        def = def.with_format(format);
    }
    if let Some(min) = raw.min {
        def = def.with_min(min);
    }
    if let Some(max) = raw.max {
        def = def.with_max(max);
    }
    if let Some(allowed) = raw.allowed {
        def = def.with_allowed_values(allowed);
    }
    for transform in raw.transforms {
        def = def.with_transform(transform);
    }
    def
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_schema(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write schema");
        file
    }

    #[test]
    fn loads_full_schema() {
        let file = write_schema(
            r#"
name = "Returns Report"
version = "1.0"
description = "Manual returns export"
strict = true

[columns."Order ID"]
type = "string"
required = true

[columns.Refund]
type = "number"
transforms = ["strip_currency", "parse_number"]
min = 0

[columns.Reason]
type = "string"
allowed = ["damaged", "unwanted", "wrong item"]
"#,
        );

        let schema = load_schema_file(file.path()).unwrap();
        assert_eq!(schema.name, "Returns Report");
        assert!(schema.strict);
        assert_eq!(schema.columns.len(), 3);

        let refund = schema.column("Refund").unwrap();
        assert_eq!(refund.data_type, ColumnType::Number);
        assert_eq!(
            refund.transforms,
            vec![Transform::StripCurrency, Transform::ParseNumber]
        );
        assert_eq!(refund.min, Some(0.0));

        let order = schema.column("Order ID").unwrap();
        assert!(order.required);
    }

    #[test]
    fn rejects_schema_without_columns() {
        let file = write_schema("name = \"Empty\"\nversion = \"1.0\"\n");
        let error = load_schema_file(file.path()).unwrap_err();
        assert!(matches!(error, SchemaSourceError::Invalid { .. }));
    }

    #[test]
    fn rejects_unknown_type() {
        let file = write_schema(
            "name = \"Bad\"\nversion = \"1\"\n[columns.X]\ntype = \"decimal\"\n",
        );
        let error = load_schema_file(file.path()).unwrap_err();
        assert!(matches!(error, SchemaSourceError::Toml { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let error = load_schema_file(Path::new("/nonexistent/schema.toml")).unwrap_err();
        assert!(matches!(error, SchemaSourceError::Io { .. }));
    }
}
