//! Seller report ingestion: CSV reading, error-tolerant batch processing,
//! and the consolidated parse-and-validate pipeline.

pub mod batch;
pub mod error;
pub mod pipeline;
pub mod reader;

pub use batch::{
    BatchError, BatchOptions, BatchProcessor, BatchStatus, DEFAULT_MEMORY_THRESHOLD_BYTES,
    ProcessingError, ProcessingProgress, RowCheck,
};
pub use error::IngestError;
pub use pipeline::{
    parse_and_validate, parse_and_validate_with_progress, parse_and_validate_with_schema,
};
pub use reader::{CsvTable, read_csv_table, read_csv_table_with_progress};
