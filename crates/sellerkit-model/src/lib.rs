//! Data model for seller report CSV validation.
//!
//! Leaf crate of the workspace: cell values, column/schema definitions,
//! value transforms, and the error taxonomy. No I/O happens here.

pub mod error;
pub mod record;
pub mod schema;
pub mod transform;
pub mod value;

pub use error::{AggregateError, IssueCode, SchemaConfigError, SellerError, ValidationIssue};
pub use record::RowRecord;
pub use schema::{ColumnDef, ColumnType, Rule, SchemaDef};
pub use transform::Transform;
pub use value::Value;
