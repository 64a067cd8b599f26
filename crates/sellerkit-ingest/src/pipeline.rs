//! The single ingestion entry point every consumer calls.
//!
//! Registry lookup, CSV read, and schema validation in one step, so tool
//! frontends cannot drift into their own ad hoc column checks.

use std::path::Path;

use sellerkit_model::{RowRecord, SchemaDef};
use sellerkit_validate::Validator;

use crate::error::IngestError;
use crate::reader::{read_csv_table, read_csv_table_with_progress};

/// Parse a CSV file and validate it against a registered schema.
pub fn parse_and_validate(path: &Path, schema_key: &str) -> Result<Vec<RowRecord>, IngestError> {
    let schema =
        sellerkit_schemas::get_schema(schema_key).ok_or_else(|| IngestError::UnknownSchema {
            key: schema_key.to_string(),
        })?;
    parse_and_validate_with_schema(path, schema)
}

/// Parse a CSV file and validate it against an explicit schema (e.g. one
/// loaded from a TOML file).
pub fn parse_and_validate_with_schema(
    path: &Path,
    schema: &SchemaDef,
) -> Result<Vec<RowRecord>, IngestError> {
    let validator = Validator::new(schema)?;
    let table = read_csv_table(path)?;
    let records = table.to_records();
    tracing::info!(
        path = %path.display(),
        schema = %schema.name,
        rows = records.len(),
        "validating csv"
    );
    Ok(validator.validate(&records)?)
}

/// Same as [`parse_and_validate_with_schema`], reporting approximate read
/// progress through the callback.
pub fn parse_and_validate_with_progress(
    path: &Path,
    schema: &SchemaDef,
    progress: &mut dyn FnMut(f32),
) -> Result<Vec<RowRecord>, IngestError> {
    let validator = Validator::new(schema)?;
    let table = read_csv_table_with_progress(path, progress)?;
    let records = table.to_records();
    Ok(validator.validate(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use sellerkit_model::Value;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn valid_acos_export_round_trips() {
        let file = write_csv(
            "Date,Impressions,Clicks,CTR,Spend,Sales,ACOS\n\
             2024-01-15,1000,50,5%,$25.00,$100.00,25%\n\
             2024-01-16,\"2,000\",80,4%,$40.00,$180.00,22.2%\n",
        );

        let rows = parse_and_validate(file.path(), "acos-report").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Impressions"], Value::Num(1000.0));
        assert_eq!(rows[0]["CTR"], Value::Num(5.0));
        assert_eq!(rows[0]["Spend"], Value::Num(25.0));
        assert_eq!(rows[1]["Impressions"], Value::Num(2000.0));
    }

    #[test]
    fn violations_surface_as_aggregate() {
        let file = write_csv(
            "Date,Impressions,Clicks,CTR,Spend,Sales,ACOS\n\
             not-a-date,-10,5,150%,$1.00,$2.00,10%\n",
        );

        let error = parse_and_validate(file.path(), "acos-report").unwrap_err();
        let IngestError::Validation(aggregate) = error else {
            panic!("expected validation error");
        };
        assert_eq!(aggregate.issues.len(), 3);
    }

    #[test]
    fn unknown_schema_key_is_rejected() {
        let file = write_csv("A\n1\n");
        let error = parse_and_validate(file.path(), "no-such-report").unwrap_err();
        assert!(matches!(error, IngestError::UnknownSchema { .. }));
    }
}
