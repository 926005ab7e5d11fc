//! Subjects: the values a type signature validates
//!
//! A [`Subject`] is either a JSON-shaped [`Value`] or the absent marker, the
//! placeholder used when no value was supplied at all. `Value::Null` is a
//! deliberately supplied null and never equals [`Subject::Absent`].
//!
//! This module also hosts the canonical shape predicates that every
//! transformer, predicate and the structural matcher share:
//!
//! | predicate | holds for |
//! |-----------|-----------|
//! | [`Subject::is_collection_like`] | strings, arrays, objects with an integer `length` field |
//! | [`Subject::is_keyable`] | objects, arrays, strings |
//! | [`Subject::is_object_like`] | objects, arrays |
//!
//! # Example
//!
//! ```rust
//! use typs::Subject;
//! use serde_json::json;
//!
//! let subject = Subject::from(json!({"a": [1, 2]}));
//! assert!(subject.is_keyable());
//! assert_eq!(subject.get("a").length(), Some(2));
//! assert!(subject.get("missing").is_absent());
//! ```

use serde_json::{Map, Value};

/// A value under validation, or the marker for "no value supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Subject {
    /// No value was supplied.
    #[default]
    Absent,
    /// A supplied value, `null` included.
    Value(Value),
}

impl Subject {
    /// Returns `true` for the absent marker.
    pub fn is_absent(&self) -> bool {
        matches!(self, Subject::Absent)
    }

    /// Returns `true` for the absent marker and for `null`.
    pub fn is_null_like(&self) -> bool {
        matches!(self, Subject::Absent | Subject::Value(Value::Null))
    }

    /// Borrow the underlying value, if any.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Subject::Absent => None,
            Subject::Value(value) => Some(value),
        }
    }

    /// Convert into a value, storing `null` in place of the absent marker.
    pub fn into_value(self) -> Value {
        match self {
            Subject::Absent => Value::Null,
            Subject::Value(value) => value,
        }
    }

    /// Short name of the subject's kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Subject::Absent => "absent",
            Subject::Value(Value::Null) => "null",
            Subject::Value(Value::Bool(_)) => "boolean",
            Subject::Value(Value::Number(_)) => "number",
            Subject::Value(Value::String(_)) => "string",
            Subject::Value(Value::Array(_)) => "array",
            Subject::Value(Value::Object(_)) => "object",
        }
    }

    /// Objects, arrays and strings can be indexed by key.
    pub fn is_keyable(&self) -> bool {
        matches!(
            self,
            Subject::Value(Value::Object(_) | Value::Array(_) | Value::String(_))
        )
    }

    /// Objects and arrays own enumerable properties.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Subject::Value(Value::Object(_) | Value::Array(_)))
    }

    /// Anything with a length.
    pub fn is_collection_like(&self) -> bool {
        self.length().is_some()
    }

    /// Length of a collection-like subject.
    ///
    /// Strings count characters, arrays count items and array-like objects
    /// report their `length` field when it is a non-negative integer no
    /// greater than the object's own entry count. A larger `length` would
    /// describe elements that cannot be present, so such objects are not
    /// collection-like.
    pub fn length(&self) -> Option<usize> {
        match self.as_value()? {
            Value::String(s) => Some(s.chars().count()),
            Value::Array(items) => Some(items.len()),
            Value::Object(map) => map
                .get("length")
                .and_then(Value::as_u64)
                .and_then(|len| usize::try_from(len).ok())
                .filter(|&len| len <= map.len()),
            _ => None,
        }
    }

    /// Index a keyable subject. Missing keys and non-keyable subjects yield
    /// the absent marker.
    pub fn get(&self, key: &str) -> Subject {
        let found = match self.as_value() {
            Some(Value::Object(map)) => map.get(key).cloned(),
            Some(Value::Array(items)) => key
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index).cloned()),
            Some(Value::String(s)) => key
                .parse::<usize>()
                .ok()
                .and_then(|index| s.chars().nth(index))
                .map(|c| Value::String(c.to_string())),
            _ => None,
        };
        found.map_or(Subject::Absent, Subject::Value)
    }

    /// Elements of a collection-like subject, `None` otherwise.
    pub fn elements(&self) -> Option<Vec<Subject>> {
        match self.as_value()? {
            Value::String(s) => Some(
                s.chars()
                    .map(|c| Subject::Value(Value::String(c.to_string())))
                    .collect(),
            ),
            Value::Array(items) => Some(items.iter().cloned().map(Subject::Value).collect()),
            Value::Object(_) => {
                let len = self.length()?;
                Some((0..len).map(|i| self.get(&i.to_string())).collect())
            }
            _ => None,
        }
    }

    /// Own keys of a keyable subject. Array and string indices are rendered
    /// as strings.
    pub fn keys(&self) -> Option<Vec<String>> {
        match self.as_value()? {
            Value::Object(map) => Some(map.keys().cloned().collect()),
            Value::Array(items) => Some((0..items.len()).map(|i| i.to_string()).collect()),
            Value::String(s) => Some((0..s.chars().count()).map(|i| i.to_string()).collect()),
            _ => None,
        }
    }

    /// Own property values of an object-like subject.
    pub fn property_values(&self) -> Option<Vec<Value>> {
        match self.as_value()? {
            Value::Object(map) => Some(map.values().cloned().collect()),
            Value::Array(items) => Some(items.clone()),
            _ => None,
        }
    }

    /// `{ "key": k, "value": v }` pairs of a keyable subject.
    pub fn entries(&self) -> Option<Vec<Value>> {
        let keys = self.keys()?;
        Some(
            keys.into_iter()
                .map(|key| {
                    let value = self.get(&key).into_value();
                    let mut entry = Map::new();
                    entry.insert("key".to_string(), Value::String(key));
                    entry.insert("value".to_string(), value);
                    Value::Object(entry)
                })
                .collect(),
        )
    }

    /// Strict structural equality, see [`deep_equals`].
    pub fn deep_equals(&self, other: &Subject) -> bool {
        match (self, other) {
            (Subject::Absent, Subject::Absent) => true,
            (Subject::Value(a), Subject::Value(b)) => deep_equals(a, b),
            _ => false,
        }
    }
}

/// Strict, type-aware structural equality of two values.
///
/// Numbers compare by numeric value regardless of their integer or float
/// representation; arrays compare in order; objects must have identical key
/// sets with deep-equal values.
///
/// ```rust
/// use typs::deep_equals;
/// use serde_json::json;
///
/// assert!(deep_equals(&json!({"a": [1, 2.0]}), &json!({"a": [1.0, 2]})));
/// assert!(!deep_equals(&json!("1"), &json!(1)));
/// ```
pub fn deep_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if x.is_f64() || y.is_f64() {
                x.as_f64() == y.as_f64()
            } else {
                x == y
            }
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equals(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| deep_equals(x, y)))
        }
        _ => a == b,
    }
}

impl From<Value> for Subject {
    fn from(value: Value) -> Self {
        Subject::Value(value)
    }
}

impl From<&Value> for Subject {
    fn from(value: &Value) -> Self {
        Subject::Value(value.clone())
    }
}

impl From<Option<Value>> for Subject {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Subject::Absent, Subject::Value)
    }
}

macro_rules! impl_subject_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Subject {
                fn from(value: $ty) -> Self {
                    Subject::Value(Value::from(value))
                }
            }
        )*
    };
}

impl_subject_from!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, String, &str);

impl<T: Into<Value>> From<Vec<T>> for Subject {
    fn from(items: Vec<T>) -> Self {
        Subject::Value(Value::Array(items.into_iter().map(Into::into).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_is_not_null() {
        assert!(Subject::Absent.is_absent());
        assert!(!Subject::from(Value::Null).is_absent());
        assert!(Subject::Absent.is_null_like());
        assert!(Subject::from(Value::Null).is_null_like());
        assert!(!Subject::Absent.deep_equals(&Subject::from(Value::Null)));
    }

    #[test]
    fn shape_predicates() {
        let string = Subject::from("abc");
        let array = Subject::from(json!([1, 2]));
        let object = Subject::from(json!({"a": 1}));
        let array_like = Subject::from(json!({"length": 2, "0": "x"}));
        let number = Subject::from(4);

        assert!(string.is_keyable() && string.is_collection_like() && !string.is_object_like());
        assert!(array.is_keyable() && array.is_collection_like() && array.is_object_like());
        assert!(object.is_keyable() && !object.is_collection_like() && object.is_object_like());
        assert!(array_like.is_collection_like());
        assert!(!number.is_keyable() && !number.is_collection_like());
        assert!(!Subject::Absent.is_keyable());
    }

    #[test]
    fn length_counts_chars() {
        assert_eq!(Subject::from("héllo").length(), Some(5));
        assert_eq!(Subject::from(json!({"length": -1})).length(), None);
        assert_eq!(Subject::from(json!({"length": 1.5})).length(), None);
    }

    #[test]
    fn get_indexes_every_keyable_kind() {
        let array = Subject::from(json!([10, 20]));
        assert_eq!(array.get("1"), Subject::from(20));
        assert!(array.get("5").is_absent());
        assert!(array.get("x").is_absent());

        assert_eq!(Subject::from("abc").get("2"), Subject::from("c"));
        assert!(Subject::from(3).get("0").is_absent());
    }

    #[test]
    fn oversized_length_is_not_collection_like() {
        let huge = Subject::from(json!({"length": 1u64 << 62}));
        assert_eq!(huge.length(), None);
        assert!(!huge.is_collection_like());
        assert!(huge.elements().is_none());

        let sparse = Subject::from(json!({"length": 5, "0": "a"}));
        assert_eq!(sparse.length(), None);
        assert_eq!(Subject::from(json!({"length": 1, "0": "a"})).length(), Some(1));
    }

    #[test]
    fn oversized_length_passes_through_transformers() {
        let huge = json!({"length": 1u64 << 62});
        assert!(crate::typs!(huge.clone()).each_element().object().check().is_true());
        assert!(crate::typs!(huge.clone()).map(|s| s).object().check().is_true());
        assert!(crate::typs!(huge.clone()).not_empty().check().is_false());
        assert!(crate::typs().one_of(huge).is_err());
    }

    #[test]
    fn elements_of_array_like_object() {
        let subject = Subject::from(json!({"length": 3, "0": "a", "2": "c"}));
        let elements = subject.elements().unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0], Subject::from("a"));
        assert!(elements[1].is_absent());
        assert_eq!(elements[2], Subject::from("c"));
    }

    #[test]
    fn keys_and_entries() {
        assert_eq!(
            Subject::from(json!(["x", "y"])).keys(),
            Some(vec!["0".to_string(), "1".to_string()])
        );
        assert_eq!(Subject::from(true).keys(), None);

        let entries = Subject::from(json!({"a": 1})).entries().unwrap();
        assert_eq!(entries, vec![json!({"key": "a", "value": 1})]);
    }

    #[test]
    fn deep_equality_is_numeric_for_numbers() {
        assert!(deep_equals(&json!(1), &json!(1.0)));
        assert!(!deep_equals(&json!(1), &json!(true)));
        assert!(!deep_equals(&json!([1, 2]), &json!([2, 1])));
        assert!(!deep_equals(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(deep_equals(&json!({"a": {"b": null}}), &json!({"a": {"b": null}})));
    }
}
