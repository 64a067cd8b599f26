//! Schema registry for supported seller report CSV types.
//!
//! Built-in schemas live in a static map keyed by short registry names
//! (e.g. `acos-report`); user-supplied schemas load from TOML files.

pub mod builtin;
pub mod error;
pub mod loader;
pub mod registry;

pub use error::SchemaSourceError;
pub use loader::load_schema_file;
pub use registry::{get_schema, is_known_schema, schema_keys};
