//! Validation engine for seller report CSVs.
//!
//! Pairs a [`sellerkit_model::SchemaDef`] with a sequence of parsed rows and
//! produces either the fully transformed rows or an aggregate of every
//! violation found. See [`validator::Validator`] for the exact pipeline.

pub mod validator;

pub use validator::Validator;
