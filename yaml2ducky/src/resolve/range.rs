//! Key-range expansion: `"6-10": [A, E, "1", "2", "3"]` becomes one entry
//! per key.

use crate::source::KeyValue;
use duckypad_core::{CompileError, KeyId, TOTAL_KEYS};
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySpec {
    Single(i64),
    Range { start: i64, end: i64 },
}

impl KeySpec {
    pub fn parse(value: &Value, scope: &str) -> Result<Self, CompileError> {
        let invalid = || CompileError::InvalidKeySpec {
            scope: scope.to_string(),
            spec: spec_text(value),
        };

        match value {
            Value::Number(n) => n.as_i64().map(KeySpec::Single).ok_or_else(invalid),
            Value::String(s) => {
                let s = s.trim();
                match s.split_once('-') {
                    Some((start, end)) => {
                        let start = start.trim().parse::<i64>().map_err(|_| invalid())?;
                        let end = end.trim().parse::<i64>().map_err(|_| invalid())?;
                        if start > end {
                            return Err(invalid());
                        }
                        Ok(KeySpec::Range { start, end })
                    }
                    None => s.parse::<i64>().map(KeySpec::Single).map_err(|_| invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }

    /// Inclusive ids covered by this spec, each checked against the key range.
    pub fn key_ids(&self, scope: &str) -> Result<Vec<KeyId>, CompileError> {
        let (start, end) = match *self {
            KeySpec::Single(id) => (id, id),
            KeySpec::Range { start, end } => (start, end),
        };

        (start..=end)
            .map(|id| {
                KeyId::new(id).ok_or_else(|| CompileError::KeyIdOutOfRange {
                    scope: scope.to_string(),
                    id,
                    max: TOTAL_KEYS,
                })
            })
            .collect()
    }

    pub fn is_range(&self) -> bool {
        matches!(self, KeySpec::Range { .. })
    }
}

fn spec_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

/// Flatten a `keys:` mapping into one value per key id.
///
/// Entries apply in document order, so a later entry for the same id
/// replaces an earlier one. A range mapped to a list takes one list item
/// per key and the list length must match the range; any other value is
/// shared by every key in the range.
pub fn expand_key_map(
    keys: &Mapping,
    scope: &str,
) -> Result<BTreeMap<KeyId, KeyValue>, CompileError> {
    let mut expanded = BTreeMap::new();

    for (spec_value, raw) in keys {
        let spec = KeySpec::parse(spec_value, scope)?;
        let ids = spec.key_ids(scope)?;

        let value: KeyValue =
            serde_yaml::from_value(raw.clone()).map_err(|e| CompileError::InvalidKeyDefinition {
                scope: scope.to_string(),
                key: ids.first().map_or(0, |k| k.get()),
                message: e.to_string(),
            })?;

        match value {
            KeyValue::List(items) if spec.is_range() => {
                if items.len() != ids.len() {
                    return Err(CompileError::RangeLengthMismatch {
                        scope: scope.to_string(),
                        spec: spec_text(spec_value),
                        expected: ids.len(),
                        actual: items.len(),
                    });
                }
                expanded.extend(ids.into_iter().zip(items));
            }
            value => {
                for id in ids {
                    expanded.insert(id, value.clone());
                }
            }
        }
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Scalar;
    use pretty_assertions::assert_eq;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn id(n: i64) -> KeyId {
        KeyId::new(n).unwrap()
    }

    #[test]
    fn test_range_with_value_list() {
        let keys = mapping(r#""6-10": [A, E, "1", "2", "3"]"#);
        let expanded = expand_key_map(&keys, "profile 'Test'").unwrap();

        let expected: BTreeMap<KeyId, KeyValue> = [
            (id(6), KeyValue::text("A")),
            (id(7), KeyValue::text("E")),
            (id(8), KeyValue::text("1")),
            (id(9), KeyValue::text("2")),
            (id(10), KeyValue::text("3")),
        ]
        .into_iter()
        .collect();
        assert_eq!(expanded, expected);
    }

    #[test]
    fn test_range_length_mismatch() {
        let keys = mapping(r#""6-10": [A, E, "1", "2"]"#);
        match expand_key_map(&keys, "profile 'Test'") {
            Err(CompileError::RangeLengthMismatch {
                spec,
                expected,
                actual,
                ..
            }) => {
                assert_eq!(spec, "6-10");
                assert_eq!(expected, 5);
                assert_eq!(actual, 4);
            }
            other => panic!("Expected RangeLengthMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_range_shares_single_value() {
        let keys = mapping(r#""1-3": { key: SPACE }"#);
        let expanded = expand_key_map(&keys, "scope").unwrap();
        assert_eq!(expanded.len(), 3);
        assert!(expanded.values().all(|v| v == &expanded[&id(1)]));
    }

    #[test]
    fn test_single_key_list_is_not_split() {
        let keys = mapping(r#"3: [A, "Lbl"]"#);
        let expanded = expand_key_map(&keys, "scope").unwrap();
        assert_eq!(
            expanded[&id(3)],
            KeyValue::List(vec![KeyValue::text("A"), KeyValue::text("Lbl")])
        );
    }

    #[test]
    fn test_integer_scalars_survive() {
        let keys = mapping("1: 7\n\"2\": x\n");
        let expanded = expand_key_map(&keys, "scope").unwrap();
        assert_eq!(expanded[&id(1)], KeyValue::Scalar(Scalar::Int(7)));
        assert_eq!(expanded[&id(2)], KeyValue::text("x"));
    }

    #[test]
    fn test_later_entries_override() {
        let keys = mapping("\"1-3\": A\n2: B\n");
        let expanded = expand_key_map(&keys, "scope").unwrap();
        assert_eq!(expanded[&id(1)], KeyValue::text("A"));
        assert_eq!(expanded[&id(2)], KeyValue::text("B"));
        assert_eq!(expanded[&id(3)], KeyValue::text("A"));
    }

    #[test]
    fn test_out_of_range_ids() {
        for yaml in ["0: A", "27: A", "\"25-27\": [A, B, C]"] {
            match expand_key_map(&mapping(yaml), "scope") {
                Err(CompileError::KeyIdOutOfRange { id, max, .. }) => {
                    assert!(id == 0 || id == 27, "unexpected id {}", id);
                    assert_eq!(max, 26);
                }
                other => panic!("Expected KeyIdOutOfRange for {}, got {:?}", yaml, other),
            }
        }
    }

    #[test]
    fn test_invalid_specs() {
        for yaml in ["\"a-b\": A", "\"5-2\": A", "\"x\": A", "\"-3\": A"] {
            assert!(
                matches!(
                    expand_key_map(&mapping(yaml), "scope"),
                    Err(CompileError::InvalidKeySpec { .. })
                ),
                "spec {} should be invalid",
                yaml
            );
        }
    }
}
