//! Library surface of the CLI crate: logging setup shared with tests.

pub mod logging;
