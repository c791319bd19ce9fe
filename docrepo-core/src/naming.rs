//! Collection name resolution.
//!
//! A document type maps to a collection name by, in order:
//!
//! 1. its explicit [`Document::collection_name`] override, used verbatim;
//! 2. otherwise its simple type name, pluralized and camelized (`OrderLine` -> `orderLines`);
//! 3. prefixed with `"<partition_key>-"` when a non-empty partition key is given.
//!
//! Resolution is pure and cheap, so it runs on every call and is never cached. Pluralization
//! only applies English suffix rules. Irregular nouns come out wrong (`Person` -> `persons`),
//! and changing that would silently rename existing collections.

use crate::document::Document;

/// Separator between the partition key and the collection name.
pub const PARTITION_SEPARATOR: char = '-';

/// Resolves the collection backing `D` for an optional partition key.
///
/// An empty partition key is treated as absent.
pub fn resolve_collection_name<D: Document>(partition_key: Option<&str>) -> String {
    let name = collection_name(D::type_name(), D::collection_name(), partition_key);

    tracing::trace!(document = D::type_name(), collection = %name, "resolved collection name");

    name
}

/// Resolves a collection name from its raw parts.
pub fn collection_name(
    type_name: &str,
    override_name: Option<&str>,
    partition_key: Option<&str>,
) -> String {
    let base = match override_name {
        Some(name) => name.to_string(),
        None => camelize(&pluralize(type_name)),
    };

    match partition_key.filter(|key| !key.is_empty()) {
        Some(key) => {
            let mut result = String::with_capacity(key.len() + 1 + base.len());
            result.push_str(key);
            result.push(PARTITION_SEPARATOR);
            result.push_str(&base);
            result
        }
        None => base,
    }
}

/// Naively pluralizes an English word by its suffix.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }

    let lower = word.to_ascii_lowercase();

    if ["s", "x", "z", "ch", "sh"].iter().any(|suffix| lower.ends_with(suffix)) {
        return format!("{word}es");
    }

    if lower.ends_with('y') {
        let before_y = lower.chars().rev().nth(1);
        if before_y.is_some_and(|c| c.is_ascii_alphabetic() && !"aeiou".contains(c)) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
    }

    format!("{word}s")
}

/// Joins `_`, `-` and space separated words and lowercases the first character.
///
/// `OrderLines` becomes `orderLines`, `order_lines` becomes `orderLines`.
pub fn camelize(word: &str) -> String {
    let mut result = String::with_capacity(word.len());
    let mut upper_next = false;

    for c in word.chars() {
        if matches!(c, '_' | '-' | ' ') {
            upper_next = !result.is_empty();
            continue;
        }

        if result.is_empty() {
            result.extend(c.to_lowercase());
        } else if upper_next {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        upper_next = false;
    }

    result
}

/// Strips the module path and generic arguments from a full type name.
///
/// `my_app::model::OrderLine` becomes `OrderLine`; `my_app::Wrapper<my_app::Item>` becomes
/// `Wrapper`.
pub fn short_type_name(full: &'static str) -> &'static str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics.rsplit("::").next().unwrap_or(without_generics)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct OrderLine {
        id: i64,
    }

    impl Document for OrderLine {
        type Key = i64;

        fn id(&self) -> &i64 {
            &self.id
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct CustomOrder {
        id: String,
    }

    impl Document for CustomOrder {
        type Key = String;

        fn id(&self) -> &String {
            &self.id
        }

        fn collection_name() -> Option<&'static str> {
            Some("custom_orders")
        }
    }

    #[test]
    fn conventional_name_is_pluralized_and_camelized() {
        assert_eq!(resolve_collection_name::<OrderLine>(None), "orderLines");
        assert_eq!(resolve_collection_name::<OrderLine>(Some("tenantA")), "tenantA-orderLines");
    }

    #[test]
    fn override_is_used_verbatim_under_the_partition_prefix() {
        assert_eq!(resolve_collection_name::<CustomOrder>(None), "custom_orders");
        assert_eq!(
            resolve_collection_name::<CustomOrder>(Some("tenantA")),
            "tenantA-custom_orders"
        );
    }

    #[test]
    fn empty_partition_key_is_absent() {
        assert_eq!(
            resolve_collection_name::<OrderLine>(Some("")),
            resolve_collection_name::<OrderLine>(None)
        );
        assert_eq!(
            resolve_collection_name::<CustomOrder>(Some("")),
            resolve_collection_name::<CustomOrder>(None)
        );
    }

    #[test]
    fn resolution_is_deterministic_and_partitions_are_distinct() {
        for key in [None, Some(""), Some("tenantA"), Some("tenantB")] {
            assert_eq!(
                resolve_collection_name::<OrderLine>(key),
                resolve_collection_name::<OrderLine>(key)
            );
        }

        assert_ne!(
            resolve_collection_name::<OrderLine>(Some("tenantA")),
            resolve_collection_name::<OrderLine>(Some("tenantB"))
        );
        assert_ne!(
            resolve_collection_name::<CustomOrder>(Some("tenantA")),
            resolve_collection_name::<CustomOrder>(Some("tenantB"))
        );
    }

    #[test]
    fn pluralize_suffix_rules() {
        assert_eq!(pluralize("User"), "Users");
        assert_eq!(pluralize("Address"), "Addresses");
        assert_eq!(pluralize("Box"), "Boxes");
        assert_eq!(pluralize("Quiz"), "Quizes");
        assert_eq!(pluralize("Batch"), "Batches");
        assert_eq!(pluralize("Wish"), "Wishes");
        assert_eq!(pluralize("Category"), "Categories");
        assert_eq!(pluralize("Key"), "Keys");
        assert_eq!(pluralize("Day"), "Days");
        assert_eq!(pluralize(""), "");
    }

    #[test]
    fn irregular_nouns_are_not_special_cased() {
        assert_eq!(pluralize("Person"), "Persons");
        assert_eq!(pluralize("Child"), "Childs");
    }

    #[test]
    fn camelize_joins_words() {
        assert_eq!(camelize("OrderLines"), "orderLines");
        assert_eq!(camelize("order_lines"), "orderLines");
        assert_eq!(camelize("order-line items"), "orderLineItems");
        assert_eq!(camelize("_Leading"), "leading");
        assert_eq!(camelize("orders"), "orders");
    }

    #[test]
    fn short_type_name_strips_paths_and_generics() {
        assert_eq!(short_type_name("my_app::model::OrderLine"), "OrderLine");
        assert_eq!(short_type_name("my_app::Wrapper<my_app::Item>"), "Wrapper");
        assert_eq!(short_type_name("Plain"), "Plain");
    }
}
