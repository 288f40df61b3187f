// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Anything that can be logged to the console.
///
/// Values are owned trees. `List` children are keyed by position, `Map` and
/// `Record` children by name; the two keyed shapes only differ in how their
/// header is printed.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    /// Numbers, strings and anything else that prints as a single piece of text.
    Scalar(String),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
    Record(Vec<(String, Value)>),
}

impl Value {
    pub fn scalar(text: impl Into<String>) -> Self {
        Value::Scalar(text.into())
    }

    /// A named-field value, printed with an `Object` header.
    pub fn record<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Convert any serializable value. JSON objects become records, so a
    /// struct prints with an `Object` header. Field order follows
    /// `serde_json`'s map, which is sorted by key.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
        Ok(from_json(serde_json::to_value(value)?, true))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }
}

fn from_json(value: serde_json::Value, objects_as_records: bool) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => Value::Scalar(n.to_string()),
        serde_json::Value::String(s) => Value::Scalar(s),
        serde_json::Value::Array(items) => Value::List(
            items
                .into_iter()
                .map(|v| from_json(v, objects_as_records))
                .collect(),
        ),
        serde_json::Value::Object(fields) => {
            let fields = fields
                .into_iter()
                .map(|(k, v)| (k, from_json(v, objects_as_records)))
                .collect();
            if objects_as_records {
                Value::Record(fields)
            } else {
                Value::Map(fields)
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        from_json(value, false)
    }
}

macro_rules! scalar_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(value: $t) -> Self {
                    Value::Scalar(value.to_string())
                }
            }
        )*
    };
}

scalar_from!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, char, String,
    &str, &String,
);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Clone + Into<Value>> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<IndexMap<K, V>> for Value {
    fn from(map: IndexMap<K, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(map: BTreeMap<K, V>) -> Self {
        Value::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Keys are sorted; hash order would make the output differ between runs.
impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(map: HashMap<K, V>) -> Self {
        let mut fields: Vec<(String, Value)> =
            map.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        Value::Map(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_primitive_conversions() {
        assert_eq!(Value::from(42), Value::scalar("42"));
        assert_eq!(Value::from(1.5), Value::scalar("1.5"));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::scalar("x"));
        assert_eq!(
            Value::from(vec![1, 2]),
            Value::List(vec![Value::scalar("1"), Value::scalar("2")])
        );
    }

    #[test]
    fn test_hash_map_keys_are_sorted() {
        let mut map = HashMap::new();
        map.insert("b", 2);
        map.insert("a", 1);
        map.insert("c", 3);

        let Value::Map(fields) = Value::from(map) else {
            panic!("expected a map");
        };
        let keys: Vec<_> = fields.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[derive(Serialize)]
    struct User {
        name: String,
        roles: Vec<&'static str>,
        manager: Option<u32>,
    }

    #[test]
    fn test_from_serialize_builds_records() {
        let user = User {
            name: "ada".into(),
            roles: vec!["admin"],
            manager: None,
        };

        let value = Value::from_serialize(&user).unwrap();
        let Value::Record(fields) = value else {
            panic!("expected a record");
        };
        assert_eq!(fields.len(), 3);
        assert!(fields.contains(&("name".to_string(), Value::scalar("ada"))));
        assert!(fields.contains(&("manager".to_string(), Value::Null)));
    }

    #[test]
    fn test_json_objects_become_maps() {
        let json = serde_json::json!({ "id": 7 });
        assert_eq!(
            Value::from(json),
            Value::Map(vec![("id".to_string(), Value::scalar("7"))])
        );
    }
}
