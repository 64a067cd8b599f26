use std::path::PathBuf;

use sellerkit_model::{AggregateError, SchemaConfigError, SellerError};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("unknown schema key: {key}")]
    UnknownSchema { key: String },

    #[error("failed to read CSV {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error(transparent)]
    SchemaConfig(#[from] SchemaConfigError),

    #[error(transparent)]
    Validation(#[from] AggregateError),
}

/// Fold ingestion failures into the shared domain taxonomy. Validation and
/// configuration keep their kinds; everything else is a data-processing
/// failure.
impl From<IngestError> for SellerError {
    fn from(error: IngestError) -> Self {
        match error {
            IngestError::Validation(inner) => SellerError::Validation(inner),
            IngestError::SchemaConfig(inner) => SellerError::SchemaConfig(inner),
            other => SellerError::DataProcessing(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_into_domain_taxonomy() {
        let error = IngestError::UnknownSchema {
            key: "bogus".to_string(),
        };
        assert_eq!(SellerError::from(error).code(), "DATA_PROCESSING_ERROR");

        let error = IngestError::Validation(AggregateError::new(vec![
            sellerkit_model::ValidationIssue::new(
                sellerkit_model::IssueCode::MissingRequired,
                1,
                "SKU",
                "missing required value",
            ),
        ]));
        assert_eq!(SellerError::from(error).code(), "VALIDATION_ERROR");
    }
}
