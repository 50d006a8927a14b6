//! Recursive merge of configuration trees.
//!
//! Merging `right` into `left`:
//!
//! - objects merge key by key; when both sides of a key are containers the
//!   merge recurses, otherwise the right value overrides
//! - arrays are lists: the right elements are appended
//! - any other pair: the right value wins

use serde_json::Value;

/// Merge `other` into `base` in place.
pub fn merge_into(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                let nested = is_container(other_val)
                    && base_map.get(key).is_some_and(is_container);
                if !nested {
                    base_map.insert(key.clone(), other_val.clone());
                } else if let Some(base_val) = base_map.get_mut(key) {
                    merge_into(base_val, other_val);
                }
            }
        }
        (Value::Array(base_items), Value::Array(other_items)) => {
            base_items.extend(other_items.iter().cloned());
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}

/// Merge two trees into a new one, `right` taking precedence.
pub fn recursive_merge(left: &Value, right: &Value) -> Value {
    let mut merged = left.clone();
    merge_into(&mut merged, right);
    merged
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_string_keys_override() {
        let merged = recursive_merge(
            &json!({"debug": false, "name": "app"}),
            &json!({"debug": true}),
        );
        assert_eq!(merged, json!({"debug": true, "name": "app"}));
    }

    #[test]
    fn test_nested_objects_merge() {
        let merged = recursive_merge(
            &json!({"a": 1, "b": {"x": 10, "y": 20}}),
            &json!({"b": {"y": 25, "z": 30}, "c": 3}),
        );
        assert_eq!(merged, json!({"a": 1, "b": {"x": 10, "y": 25, "z": 30}, "c": 3}));
    }

    #[test]
    fn test_lists_append() {
        let merged = recursive_merge(
            &json!({"paths": ["a", "b"]}),
            &json!({"paths": ["c"]}),
        );
        assert_eq!(merged, json!({"paths": ["a", "b", "c"]}));
    }

    #[test]
    fn test_container_replaced_by_scalar() {
        let merged = recursive_merge(&json!({"mapping": {"a": 1}}), &json!({"mapping": false}));
        assert_eq!(merged, json!({"mapping": false}));
    }

    #[test]
    fn test_object_and_list_mismatch_right_wins() {
        let merged = recursive_merge(&json!({"x": [1, 2]}), &json!({"x": {"k": "v"}}));
        assert_eq!(merged, json!({"x": {"k": "v"}}));
    }

    #[test]
    fn test_merge_keeps_left_key_order() {
        let merged = recursive_merge(&json!({"b": 1, "a": 2}), &json!({"c": 3, "b": 4}));
        let keys: Vec<_> = merged.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_scalars_right_wins() {
        assert_eq!(recursive_merge(&json!(1), &json!("x")), json!("x"));
    }
}
