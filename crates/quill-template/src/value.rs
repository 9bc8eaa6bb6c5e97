/*
 * value.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Template value types.
//!
//! [`TemplateValue`] is what ends up in the tag store: a scalar with a
//! canonical string form. [`Assignable`] is the shape a caller hands to
//! `assign`, which decides whether a key becomes a tag, a flattened group of
//! tags, or an iteration list. [`Entry`] is one normalized item of an
//! iteration list.

use indexmap::IndexMap;

/// Key under which a bare scalar iteration entry is exposed.
pub const SCALAR_ENTRY_KEY: &str = "value";

/// A scalar stored in the tag store.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    /// A string value.
    String(String),

    /// An integral number.
    Integer(i64),

    /// A floating point number.
    Float(f64),

    /// A boolean value.
    Bool(bool),
}

impl TemplateValue {
    /// Check if this value counts as empty for `is` conditions.
    ///
    /// Empty values are the empty string, `"0"`, numeric zero and `false`.
    pub fn is_empty(&self) -> bool {
        match self {
            TemplateValue::String(s) => s.is_empty() || s == "0",
            TemplateValue::Integer(n) => *n == 0,
            TemplateValue::Float(f) => *f == 0.0,
            TemplateValue::Bool(b) => !b,
        }
    }

    /// Render this value in its canonical string form.
    ///
    /// - String: returned as-is
    /// - Integer/Float: decimal
    /// - Bool: "true" or "false"
    pub fn render(&self) -> String {
        match self {
            TemplateValue::String(s) => s.clone(),
            TemplateValue::Integer(n) => n.to_string(),
            TemplateValue::Float(f) => f.to_string(),
            TemplateValue::Bool(b) => b.to_string(),
        }
    }
}

impl Default for TemplateValue {
    fn default() -> Self {
        TemplateValue::String(String::new())
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::String(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::String(value)
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        TemplateValue::Bool(value)
    }
}

impl From<i32> for TemplateValue {
    fn from(value: i32) -> Self {
        TemplateValue::Integer(i64::from(value))
    }
}

impl From<i64> for TemplateValue {
    fn from(value: i64) -> Self {
        TemplateValue::Integer(value)
    }
}

impl From<u32> for TemplateValue {
    fn from(value: u32) -> Self {
        TemplateValue::Integer(i64::from(value))
    }
}

impl From<usize> for TemplateValue {
    fn from(value: usize) -> Self {
        i64::try_from(value).map_or_else(
            |_| TemplateValue::String(value.to_string()),
            TemplateValue::Integer,
        )
    }
}

impl From<u64> for TemplateValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or_else(
            |_| TemplateValue::String(value.to_string()),
            TemplateValue::Integer,
        )
    }
}

impl From<f64> for TemplateValue {
    fn from(value: f64) -> Self {
        TemplateValue::Float(value)
    }
}

/// A value as passed to `assign`.
///
/// The shape decides where the key lands:
/// - `Scalar` goes to the tag store.
/// - `List`, an empty `Map`, or a `Map` whose first key is an integer
///   becomes an iteration list.
/// - Any other `Map` is flattened into dotted tag keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Assignable {
    /// A single scalar.
    Scalar(TemplateValue),

    /// An ordered list of values.
    List(Vec<Assignable>),

    /// A keyed mapping, in insertion order.
    Map(IndexMap<String, Assignable>),
}

impl Assignable {
    /// Consume this value as a sequence of list items.
    pub(crate) fn into_items(self) -> Vec<Assignable> {
        match self {
            Assignable::Scalar(_) => vec![self],
            Assignable::List(items) => items,
            Assignable::Map(map) => map.into_values().collect(),
        }
    }
}

/// An empty map, or one whose first key is an integer, is a list.
pub(crate) fn is_index_keyed(map: &IndexMap<String, Assignable>) -> bool {
    map.keys()
        .next()
        .is_none_or(|first| first.parse::<i64>().is_ok())
}

macro_rules! impl_scalar_assignable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Assignable {
                fn from(value: $ty) -> Self {
                    Assignable::Scalar(value.into())
                }
            }
        )*
    };
}

impl_scalar_assignable!(&str, String, bool, i32, i64, u32, u64, usize, f64);

impl From<TemplateValue> for Assignable {
    fn from(value: TemplateValue) -> Self {
        Assignable::Scalar(value)
    }
}

impl<T: Into<Assignable>> From<Vec<T>> for Assignable {
    fn from(items: Vec<T>) -> Self {
        Assignable::List(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Assignable>> From<IndexMap<K, V>> for Assignable {
    fn from(map: IndexMap<K, V>) -> Self {
        Assignable::Map(map.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<serde_json::Value> for Assignable {
    /// Convert JSON data.
    ///
    /// `null` becomes the empty string. An object whose first key is an
    /// integer is read as a list, the same way integer-keyed arrays are.
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Assignable::Scalar(TemplateValue::default()),
            Value::Bool(b) => Assignable::Scalar(TemplateValue::Bool(b)),
            Value::Number(n) => Assignable::Scalar(if let Some(i) = n.as_i64() {
                TemplateValue::Integer(i)
            } else if n.is_u64() {
                // Beyond i64: keep the exact digits rather than rounding through f64.
                TemplateValue::String(n.to_string())
            } else {
                n.as_f64().map_or_else(
                    || TemplateValue::String(n.to_string()),
                    TemplateValue::Float,
                )
            }),
            Value::String(s) => Assignable::Scalar(TemplateValue::String(s)),
            Value::Array(items) => Assignable::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                Assignable::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// One item of an iteration list, normalized to a keyed mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry(IndexMap<String, Assignable>);

impl Entry {
    /// Get a field of this entry.
    pub fn get(&self, key: &str) -> Option<&Assignable> {
        self.0.get(key)
    }

    /// Iterate over the fields of this entry in order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Assignable)> {
        self.0.iter()
    }
}

impl From<Assignable> for Entry {
    /// Normalize a list item.
    ///
    /// Scalars are wrapped under [`SCALAR_ENTRY_KEY`]; lists are keyed by
    /// their index.
    fn from(value: Assignable) -> Self {
        match value {
            Assignable::Scalar(_) => {
                let mut fields = IndexMap::new();
                fields.insert(SCALAR_ENTRY_KEY.to_string(), value);
                Entry(fields)
            }
            Assignable::List(items) => Entry(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (i.to_string(), v))
                    .collect(),
            ),
            Assignable::Map(map) => Entry(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emptiness() {
        assert!(TemplateValue::String(String::new()).is_empty());
        assert!(TemplateValue::String("0".to_string()).is_empty());
        assert!(!TemplateValue::String("false".to_string()).is_empty()); // only "0" and "" are empty strings
        assert!(TemplateValue::Integer(0).is_empty());
        assert!(TemplateValue::Float(0.0).is_empty());
        assert!(TemplateValue::Bool(false).is_empty());

        assert!(!TemplateValue::Integer(3).is_empty());
        assert!(!TemplateValue::Bool(true).is_empty());
    }

    #[test]
    fn test_render() {
        assert_eq!(TemplateValue::from("Ada").render(), "Ada");
        assert_eq!(TemplateValue::from(42).render(), "42");
        assert_eq!(TemplateValue::from(2.5).render(), "2.5");
        assert_eq!(TemplateValue::from(true).render(), "true");
        assert_eq!(TemplateValue::from(false).render(), "false");
    }

    #[test]
    fn test_list_shape() {
        assert!(matches!(Assignable::from(vec![1, 2]), Assignable::List(_)));
        assert!(is_index_keyed(&IndexMap::new()));

        let mut indexed = IndexMap::new();
        indexed.insert("0".to_string(), Assignable::from("a"));
        assert!(is_index_keyed(&indexed));

        let mut keyed = IndexMap::new();
        keyed.insert("name".to_string(), Assignable::from("a"));
        assert!(!is_index_keyed(&keyed));
    }

    #[test]
    fn test_json_conversion() {
        let value = Assignable::from(json!({
            "name": "Ada",
            "age": 36,
            "ratio": 0.5,
            "admin": false,
            "nickname": null,
            "tags": ["x", "y"],
        }));

        let Assignable::Map(map) = value else {
            panic!("object should convert to a map");
        };
        assert_eq!(map["name"], Assignable::from("Ada"));
        assert_eq!(map["age"], Assignable::from(36));
        assert_eq!(map["ratio"], Assignable::from(0.5));
        assert_eq!(map["admin"], Assignable::from(false));
        assert_eq!(map["nickname"], Assignable::from(""));
        assert_eq!(map["tags"], Assignable::from(vec!["x", "y"]));
    }

    #[test]
    fn test_json_integers_beyond_i64_keep_their_digits() {
        let Assignable::Scalar(value) = Assignable::from(json!(u64::MAX)) else {
            panic!("number should convert to a scalar");
        };
        assert_eq!(value.render(), "18446744073709551615");

        let Assignable::Scalar(value) = Assignable::from(json!(i64::MIN)) else {
            panic!("number should convert to a scalar");
        };
        assert_eq!(value, TemplateValue::Integer(i64::MIN));
    }

    #[test]
    fn test_large_unsigned_values_render_exactly() {
        assert_eq!(TemplateValue::from(u64::MAX).render(), "18446744073709551615");
        assert_eq!(TemplateValue::from(usize::MAX).render(), usize::MAX.to_string());
        assert_eq!(TemplateValue::from(7u64), TemplateValue::Integer(7));
    }

    #[test]
    fn test_entry_normalization() {
        let scalar = Entry::from(Assignable::from(7));
        assert_eq!(scalar.get(SCALAR_ENTRY_KEY), Some(&Assignable::from(7)));
        assert_eq!(scalar.0.len(), 1);

        let list = Entry::from(Assignable::from(vec!["a", "b"]));
        assert_eq!(list.get("1"), Some(&Assignable::from("b")));

        let mut fields = IndexMap::new();
        fields.insert("label", "A");
        let map = Entry::from(Assignable::from(fields));
        assert_eq!(map.get("label"), Some(&Assignable::from("A")));
        assert!(map.get(SCALAR_ENTRY_KEY).is_none());
    }
}
