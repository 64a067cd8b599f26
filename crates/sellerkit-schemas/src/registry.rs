//! Static schema registry.
//!
//! Schemas are configuration, not runtime state: the map is built once at
//! first use and only ever read through these accessors. A missing key is
//! the caller's branch to take, not an error.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use sellerkit_model::SchemaDef;

use crate::builtin;

static REGISTRY: LazyLock<BTreeMap<&'static str, SchemaDef>> = LazyLock::new(build_registry);

fn build_registry() -> BTreeMap<&'static str, SchemaDef> {
    BTreeMap::from([
        ("acos-report", builtin::acos_report()),
        ("product-listing", builtin::product_listing()),
        ("keyword-report", builtin::keyword_report()),
        ("inventory-report", builtin::inventory_report()),
        ("ppc-campaign", builtin::ppc_campaign()),
    ])
}

/// Look up a built-in schema by registry key.
pub fn get_schema(key: &str) -> Option<&'static SchemaDef> {
    REGISTRY.get(key)
}

/// True when `key` names a built-in schema.
pub fn is_known_schema(key: &str) -> bool {
    REGISTRY.contains_key(key)
}

/// All registry keys, sorted.
pub fn schema_keys() -> Vec<&'static str> {
    REGISTRY.keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve() {
        assert!(is_known_schema("acos-report"));
        assert!(is_known_schema("product-listing"));
        assert!(!is_known_schema("ACOS Report Schema"));
        assert!(get_schema("nonexistent").is_none());
    }

    #[test]
    fn every_builtin_schema_has_columns() {
        for key in schema_keys() {
            let schema = get_schema(key).unwrap();
            assert!(
                !schema.columns.is_empty(),
                "schema '{key}' must define columns"
            );
            assert!(!schema.name.is_empty());
            assert!(!schema.version.is_empty());
        }
    }

    #[test]
    fn keys_are_sorted_and_stable() {
        let keys = schema_keys();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(keys.len(), 5);
    }
}
