//! Subject transformers
//!
//! A transformer appends a transform step: when the chain runs, the step
//! rewrites the current subject sequence and every later step sees the
//! rewritten sequence instead. Steps before the transformer are unaffected.
//!
//! # Example
//!
//! ```rust
//! use typs::typs;
//! use serde_json::json;
//!
//! let all_positive = typs().array().and_each().integer().positive();
//! assert!(all_positive.check_on(json!([1, 2, 3])) == true);
//! assert!(all_positive.check_on(json!([1, -2, 3])) == false);
//!
//! let lowercase_keys = typs().each_key().regex("^[a-z]+$").unwrap();
//! assert!(lowercase_keys.check_on(json!({"ab": 1, "cd": 2})) == true);
//! assert!(lowercase_keys.check_on(json!({"Ab": 1})) == false);
//! ```

use serde_json::Value;

use crate::error::Rejection;
use crate::signature::Typs;
use crate::subject::Subject;

/// Replace every collection-like subject by its elements.
fn flatten(subjects: Vec<Subject>) -> Vec<Subject> {
    let mut flat = Vec::with_capacity(subjects.len());
    for subject in subjects {
        match subject.elements() {
            Some(elements) => flat.extend(elements),
            None => flat.push(subject),
        }
    }
    flat
}

fn require_keyable(operation: &'static str, subject: &Subject) -> Result<(), Rejection> {
    if subject.is_keyable() {
        Ok(())
    } else {
        Err(Rejection::NotKeyable {
            operation,
            found: subject.kind(),
        })
    }
}

impl Typs {
    /// Replace every subject by its image under `f`.
    ///
    /// A collection-like subject is mapped element-wise and becomes the array
    /// of its elements' images. Absent images inside that array are stored as
    /// `null`. Strings are collection-like too, so even an identity map turns
    /// `"ab"` into `["a", "b"]`: `typs!("ab").map(|s| s).string()` fails
    /// where `typs!("ab").string()` passes. Verdicts only agree again once the
    /// result is flattened with [`each_element`](Typs::each_element).
    ///
    /// ```rust
    /// use typs::{typs, Subject};
    /// use serde_json::json;
    ///
    /// let lengths = typs!(json!(["a", "abc"]))
    ///     .map(|s| s.length().map_or(Subject::Absent, Subject::from))
    ///     .and_each()
    ///     .positive();
    /// assert!(lengths.check() == true);
    /// ```
    pub fn map<F>(&self, f: F) -> Typs
    where
        F: Fn(Subject) -> Subject + Send + Sync + 'static,
    {
        self.transform(move |subjects| {
            Ok(subjects
                .into_iter()
                .map(|subject| match subject.elements() {
                    Some(elements) => Subject::Value(Value::Array(
                        elements.into_iter().map(|e| f(e).into_value()).collect(),
                    )),
                    None => f(subject),
                })
                .collect())
        })
    }

    /// Validate the elements of collection-like subjects instead of the
    /// collections themselves.
    ///
    /// Element lists of all subjects are concatenated into one sequence;
    /// subjects that are not collection-like pass through unchanged.
    pub fn each_element(&self) -> Typs {
        self.transform(|subjects| Ok(flatten(subjects)))
    }

    /// Alias of [`each_element`](Typs::each_element).
    pub fn and_each(&self) -> Typs {
        self.each_element()
    }

    /// Validate the property values of object-like subjects.
    ///
    /// ```rust
    /// use typs::typs;
    /// use serde_json::json;
    ///
    /// let sig = typs!(json!({"a": 1, "b": 2})).each_property().integer();
    /// assert!(sig.check() == true);
    /// ```
    pub fn each_property(&self) -> Typs {
        self.transform(|subjects| {
            let rewritten = subjects
                .into_iter()
                .map(|subject| match subject.property_values() {
                    Some(values) => Subject::Value(Value::Array(values)),
                    None => subject,
                })
                .collect();
            Ok(flatten(rewritten))
        })
    }

    /// Validate the keys of keyable subjects, as strings.
    ///
    /// A subject without keys rejects the evaluation with
    /// [`Rejection::NotKeyable`].
    pub fn each_key(&self) -> Typs {
        self.transform(|subjects| {
            let mut rewritten = Vec::with_capacity(subjects.len());
            for subject in subjects {
                require_keyable("each_key", &subject)?;
                let keys = subject.keys().unwrap_or_default();
                rewritten.push(Subject::Value(Value::Array(
                    keys.into_iter().map(Value::String).collect(),
                )));
            }
            Ok(flatten(rewritten))
        })
    }

    /// Validate `{ "key": k, "value": v }` entries of keyable subjects.
    ///
    /// A subject without keys rejects the evaluation with
    /// [`Rejection::NotKeyable`].
    ///
    /// ```rust
    /// use typs::{typs, TypeTree};
    /// use serde_json::json;
    ///
    /// let entry = TypeTree::fields([
    ///     ("key", typs().string().into()),
    ///     ("value", typs().number().into()),
    /// ]);
    /// assert!(typs!(json!({"x": 1, "y": 2})).each_entry().matches(entry).check() == true);
    /// ```
    pub fn each_entry(&self) -> Typs {
        self.transform(|subjects| {
            let mut rewritten = Vec::with_capacity(subjects.len());
            for subject in subjects {
                require_keyable("each_entry", &subject)?;
                let entries = subject.entries().unwrap_or_default();
                rewritten.push(Subject::Value(Value::Array(entries)));
            }
            Ok(flatten(rewritten))
        })
    }
}
