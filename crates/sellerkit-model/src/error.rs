//! Error taxonomy for the validation subsystem.
//!
//! Three tiers, mirroring how failures propagate:
//!
//! - [`ValidationIssue`]: one per detected violation, collected and never
//!   raised individually.
//! - [`AggregateError`]: the single error a `validate()` call can produce,
//!   wrapping every issue found in one pass.
//! - [`SellerError`]: the flat domain taxonomy; every error leaving this
//!   subsystem is one of these kinds, each with a stable string code.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Stable machine-readable code for a violation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    UnexpectedColumn,
    MissingRequired,
    TransformFailed,
    InvalidType,
    FormatMismatch,
    BelowMin,
    AboveMax,
    ValueNotAllowed,
    RuleFailed,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::UnexpectedColumn => "UNEXPECTED_COLUMN",
            IssueCode::MissingRequired => "MISSING_REQUIRED",
            IssueCode::TransformFailed => "TRANSFORM_FAILED",
            IssueCode::InvalidType => "INVALID_TYPE",
            IssueCode::FormatMismatch => "FORMAT_MISMATCH",
            IssueCode::BelowMin => "BELOW_MIN",
            IssueCode::AboveMax => "ABOVE_MAX",
            IssueCode::ValueNotAllowed => "VALUE_NOT_ALLOWED",
            IssueCode::RuleFailed => "RULE_FAILED",
        }
    }
}

/// A single detected violation.
///
/// Row numbers are 1-based as shown to users; the raw row index is
/// `row - 1`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub row: usize,
    pub column: Option<String>,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(
        code: IssueCode,
        row: usize,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            row,
            column: Some(column.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.column {
            Some(column) => write!(f, "row {}, column '{}': {}", self.row, column, self.message),
            None => write!(f, "row {}: {}", self.row, self.message),
        }
    }
}

/// All violations found during one validation pass.
///
/// Never constructed with an empty issue list: a pass with zero violations
/// returns normally instead.
#[derive(Debug, Clone, Error)]
#[error("CSV validation failed: {} issue(s)", .issues.len())]
pub struct AggregateError {
    pub issues: Vec<ValidationIssue>,
}

impl AggregateError {
    /// Wrap a non-empty issue list.
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        debug_assert!(!issues.is_empty(), "aggregate error with no issues");
        Self { issues }
    }
}

/// Schema configuration errors. These are caller mistakes, raised
/// immediately rather than accumulated with data violations.
#[derive(Debug, Error)]
pub enum SchemaConfigError {
    #[error("schema '{name}' defines no columns")]
    EmptyColumns { name: String },

    #[error("schema '{name}': invalid format pattern for column '{column}': {message}")]
    InvalidFormatPattern {
        name: String,
        column: String,
        message: String,
    },
}

/// Flat domain error taxonomy shared across the seller tooling.
#[derive(Debug, Error)]
pub enum SellerError {
    #[error(transparent)]
    Validation(#[from] AggregateError),

    #[error("schema configuration error: {0}")]
    SchemaConfig(#[from] SchemaConfigError),

    #[error("security violation: {0}")]
    Security(String),

    #[error("inventory optimization failed: {0}")]
    InventoryOptimization(String),

    #[error("pricing optimization failed: {0}")]
    PricingOptimization(String),

    #[error("data processing failed: {0}")]
    DataProcessing(String),

    #[error("rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("Amazon API error: {0}")]
    AmazonApi(String),
}

impl SellerError {
    /// Stable string code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SellerError::Validation(_) => "VALIDATION_ERROR",
            SellerError::SchemaConfig(_) => "SCHEMA_CONFIG_ERROR",
            SellerError::Security(_) => "SECURITY_ERROR",
            SellerError::InventoryOptimization(_) => "INVENTORY_OPTIMIZATION_ERROR",
            SellerError::PricingOptimization(_) => "PRICING_OPTIMIZATION_ERROR",
            SellerError::DataProcessing(_) => "DATA_PROCESSING_ERROR",
            SellerError::RateLimit(_) => "RATE_LIMIT_ERROR",
            SellerError::Authentication(_) => "AUTHENTICATION_ERROR",
            SellerError::AmazonApi(_) => "AMAZON_API_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_renders_row_and_column() {
        let issue = ValidationIssue::new(
            IssueCode::MissingRequired,
            3,
            "Impressions",
            "missing required value",
        );
        assert_eq!(
            issue.to_string(),
            "row 3, column 'Impressions': missing required value"
        );
    }

    #[test]
    fn aggregate_counts_issues() {
        let error = AggregateError::new(vec![
            ValidationIssue::new(IssueCode::BelowMin, 1, "Spend", "below minimum 0"),
            ValidationIssue::new(IssueCode::AboveMax, 2, "CTR", "above maximum 100"),
        ]);
        assert_eq!(error.to_string(), "CSV validation failed: 2 issue(s)");
        assert_eq!(error.issues.len(), 2);
    }

    #[test]
    fn stable_error_codes() {
        assert_eq!(SellerError::Security("x".to_string()).code(), "SECURITY_ERROR");
        assert_eq!(
            SellerError::RateLimit("x".to_string()).code(),
            "RATE_LIMIT_ERROR"
        );
        let aggregate = AggregateError::new(vec![ValidationIssue::new(
            IssueCode::RuleFailed,
            1,
            "Price",
            "price must be positive",
        )]);
        assert_eq!(SellerError::from(aggregate).code(), "VALIDATION_ERROR");
    }

    #[test]
    fn issue_serializes_with_code() {
        let issue = ValidationIssue::new(IssueCode::FormatMismatch, 2, "Date", "format mismatch");
        let json = serde_json::to_string(&issue).unwrap();
        assert!(json.contains("\"FORMAT_MISMATCH\""));
        assert!(json.contains("\"row\":2"));
    }
}
