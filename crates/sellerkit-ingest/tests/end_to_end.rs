//! End-to-end ingestion: CSV file -> records -> schema-aware batch
//! processing and the full validation pipeline.

use std::io::Write;

use sellerkit_ingest::{
    BatchOptions, BatchProcessor, BatchStatus, parse_and_validate, read_csv_table,
};
use sellerkit_model::Value;
use sellerkit_validate::Validator;

fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn listing_export_validates_and_coerces() {
    let file = write_csv(
        "SKU,ASIN,Title,Price,Quantity,Status\n\
         WIDGET-1,b0abc12345,Blue Widget,$19.99,10,Active\n\
         WIDGET-2,B0XYZ98765,Red Widget,\"$1,299.00\",3,inactive\n",
    );

    let rows = parse_and_validate(file.path(), "product-listing").unwrap();
    assert_eq!(rows.len(), 2);
    // ASIN is upper-cased, price stripped of currency noise, status lowered.
    assert_eq!(rows[0]["ASIN"], Value::Str("B0ABC12345".to_string()));
    assert_eq!(rows[1]["Price"], Value::Num(1299.0));
    assert_eq!(rows[0]["Status"], Value::Str("active".to_string()));
}

#[test]
fn schema_aware_batch_tolerates_bad_rows() {
    let file = write_csv(
        "Keyword,Match Type,Impressions,Clicks,Bid\n\
         blue widget,exact,100,5,$0.50\n\
         red widget,sideways,200,8,$0.75\n\
         green widget,phrase,300,2,$0.40\n",
    );

    let table = read_csv_table(file.path()).unwrap();
    let records = table.to_records();

    // Wrap the validator as a per-row check: one bad row must not sink the
    // batch the way it fails the all-or-nothing validate() pass.
    let schema = sellerkit_schemas::get_schema("keyword-report").unwrap();
    let validator = Validator::new(schema).unwrap();
    let mut processor = BatchProcessor::with_row_check(
        BatchOptions::default(),
        Box::new(move |row| {
            validator
                .validate(std::slice::from_ref(row))
                .map(|_| ())
                .map_err(|error| error.to_string())
        }),
    );

    let progress = processor.process_batch(&records).unwrap();
    assert_eq!(progress.status, BatchStatus::Completed);
    assert_eq!(progress.total_rows, 3);
    assert_eq!(progress.processed_rows, 2);
    assert_eq!(progress.error_count, 1);
    assert_eq!(processor.errors()[0].row, 1);
}

#[test]
fn strict_schema_flags_extra_export_columns() {
    let file = write_csv(
        "SKU,Available,Internal Notes\n\
         WIDGET-1,5,ship friday\n",
    );

    let error = parse_and_validate(file.path(), "inventory-report").unwrap_err();
    let sellerkit_ingest::IngestError::Validation(aggregate) = error else {
        panic!("expected validation error");
    };
    assert!(
        aggregate
            .issues
            .iter()
            .any(|issue| issue.to_string().contains("Internal Notes"))
    );
}
