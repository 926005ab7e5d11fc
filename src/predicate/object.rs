//! Value and object predicates

use serde_json::Value;

use crate::outcome::Outcome;
use crate::signature::Typs;
use crate::subject::Subject;

impl Typs {
    /// Require a supplied, non-null value.
    ///
    /// `false`, `0` and `""` are all values.
    ///
    /// ```rust
    /// use typs::typs;
    /// use serde_json::{json, Value};
    ///
    /// assert!(typs!(false, 0, "", json!([]), 1e300).not_null().check() == true);
    /// assert!(typs().not_null().check() == false);
    /// assert!(typs!(Value::Null).not_null().check() == false);
    /// ```
    pub fn not_null(&self) -> Typs {
        self.add(|subject| Outcome::from(!subject.is_null_like()))
    }

    /// Require a boolean.
    pub fn boolean(&self) -> Typs {
        self.add(|subject| {
            Outcome::from(matches!(subject, Subject::Value(Value::Bool(_))))
        })
    }

    /// Require an object-like subject: an object or an array.
    pub fn object(&self) -> Typs {
        self.add(|subject| Outcome::from(subject.is_object_like()))
    }

    /// Require a subject that can be indexed by key: an object, an array or a
    /// string.
    pub fn keyable(&self) -> Typs {
        self.add(|subject| Outcome::from(subject.is_keyable()))
    }

    /// Require a keyable subject in which every key of `keys` holds a
    /// non-null value.
    ///
    /// ```rust
    /// use typs::typs;
    /// use serde_json::json;
    ///
    /// assert!(typs!(json!({"a": 1, "b": 2})).has_keys(["a", "b"]).check() == true);
    /// assert!(typs!(json!({"a": 1, "b": 2})).has_keys(["a", "c"]).check() == false);
    /// ```
    pub fn has_keys<I>(&self, keys: I) -> Typs
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.add(move |subject| {
            Outcome::from(
                subject.is_keyable() && keys.iter().all(|key| !subject.get(key).is_null_like()),
            )
        })
    }

    /// Require a subject deeply equal to `value`.
    ///
    /// ```rust
    /// use typs::typs;
    /// use serde_json::json;
    ///
    /// assert!(typs!(json!({"a": [1, 2]})).equals(json!({"a": [1, 2]})).check() == true);
    /// assert!(typs!(1).equals("1").check() == false);
    /// ```
    pub fn equals(&self, value: impl Into<Subject>) -> Typs {
        let expected = value.into();
        self.add(move |subject| Outcome::from(subject.deep_equals(&expected)))
    }

    /// Require a subject that is not deeply equal to `value`.
    pub fn not_equals(&self, value: impl Into<Subject>) -> Typs {
        let expected = value.into();
        self.add(move |subject| Outcome::from(!subject.deep_equals(&expected)))
    }
}
