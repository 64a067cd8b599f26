use std::collections::BTreeMap;

use crate::value::Value;

/// One parsed CSV row, keyed by raw header text (case-sensitive).
///
/// Map semantics guarantee unique column keys; the validator iterates schema
/// columns rather than row keys, so insertion order is irrelevant.
pub type RowRecord = BTreeMap<String, Value>;
