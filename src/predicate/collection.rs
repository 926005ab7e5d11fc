//! Collection predicates
//!
//! Length checks apply to anything collection-like: strings (counted in
//! characters), arrays and objects carrying an integer `length` field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::outcome::Outcome;
use crate::signature::Typs;
use crate::subject::Subject;

/// Bounds on the length of a collection-like subject.
///
/// At least one bound must be set, and `min` may not exceed `max`.
///
/// # Example
///
/// ```rust
/// use typs::{typs, LengthBounds};
///
/// let pair = typs().len(LengthBounds::new().with_exact(2)).unwrap();
/// assert!(pair.check_on(vec![1, 2]) == true);
/// assert!(pair.check_on("ab") == true);
/// assert!(pair.check_on(vec![1]) == false);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LengthBounds {
    /// Minimum length, inclusive.
    pub min: Option<usize>,
    /// Maximum length, inclusive.
    pub max: Option<usize>,
    /// Exact length.
    pub exact: Option<usize>,
}

impl LengthBounds {
    /// Bounds with nothing set yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum length.
    pub fn with_min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the maximum length.
    pub fn with_max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Set the exact length.
    pub fn with_exact(mut self, exact: usize) -> Self {
        self.exact = Some(exact);
        self
    }

    /// Read bounds from dynamic configuration such as `{"min": 1, "max": 8}`.
    ///
    /// Every present bound must be a non-negative integer.
    ///
    /// ```rust
    /// use typs::{ConfigError, LengthBounds};
    /// use serde_json::json;
    ///
    /// let bounds = LengthBounds::from_value(&json!({"min": 1, "max": 8})).unwrap();
    /// assert_eq!(bounds, LengthBounds::new().with_min(1).with_max(8));
    ///
    /// assert!(LengthBounds::from_value(&json!({"min": -1})).is_err());
    /// assert_eq!(
    ///     LengthBounds::from_value(&json!({})).unwrap_err(),
    ///     ConfigError::MissingLengthBounds
    /// );
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let bounds: LengthBounds =
            serde_json::from_value(value.clone()).map_err(|e| ConfigError::Malformed {
                what: "length",
                reason: e.to_string(),
            })?;
        bounds.validate()?;
        Ok(bounds)
    }

    /// Check that at least one bound is set and that the bounds are ordered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min.is_none() && self.max.is_none() && self.exact.is_none() {
            return Err(ConfigError::MissingLengthBounds);
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ConfigError::UnorderedLength { min, max });
            }
        }
        Ok(())
    }

    /// Whether `len` satisfies every bound that is set.
    pub fn contains(&self, len: usize) -> bool {
        self.min.map_or(true, |min| len >= min)
            && self.max.map_or(true, |max| len <= max)
            && self.exact.map_or(true, |exact| len == exact)
    }
}

impl Typs {
    /// Require an array.
    pub fn array(&self) -> Typs {
        self.add(|subject| {
            Outcome::from(matches!(subject, Subject::Value(Value::Array(_))))
        })
    }

    /// Require a collection-like subject whose length satisfies `bounds`.
    ///
    /// Fails immediately with a [`ConfigError`] if no bound is set or if the
    /// bounds are unordered.
    pub fn len(&self, bounds: LengthBounds) -> Result<Typs, ConfigError> {
        bounds.validate()?;
        Ok(self.add(move |subject| {
            Outcome::from(subject.length().is_some_and(|len| bounds.contains(len)))
        }))
    }

    /// Require a collection-like subject with at least one element.
    ///
    /// ```rust
    /// use typs::typs;
    ///
    /// assert!(typs!("a", [0]).not_empty().check() == true);
    /// assert!(typs!("").not_empty().check() == false);
    /// assert!(typs!(7).not_empty().check() == false);
    /// ```
    pub fn not_empty(&self) -> Typs {
        self.add(|subject| Outcome::from(subject.length().is_some_and(|len| len > 0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typs;
    use serde_json::json;

    #[test]
    fn array() {
        assert!(typs!([1, 2, 3]).array().check().is_true());
        assert!(typs!(json!([])).array().check().is_true());
        assert!(typs!("abc").array().check().is_false());
        assert!(typs!(json!({"length": 0})).array().check().is_false());
    }

    #[test]
    fn len_with_each_bound() {
        let at_least_two = typs().len(LengthBounds::new().with_min(2)).unwrap();
        assert!(at_least_two.check_on("ab").is_true());
        assert!(at_least_two.check_on("a").is_false());

        let at_most_two = typs().len(LengthBounds::new().with_max(2)).unwrap();
        assert!(at_most_two.check_on(json!([1, 2])).is_true());
        assert!(at_most_two.check_on(json!([1, 2, 3])).is_false());

        let between = typs()
            .len(LengthBounds::new().with_min(1).with_max(3))
            .unwrap();
        assert!(between.check_on(json!({"length": 2, "0": "a"})).is_true());
        assert!(between.check_on(json!({"length": 4, "0": "a", "1": "b", "2": "c"})).is_false());
        assert!(between.check_on(json!({"length": 2})).is_false());
    }

    #[test]
    fn len_fails_for_non_collections() {
        let sig = typs().len(LengthBounds::new().with_min(0)).unwrap();
        assert!(sig.check_on(12).is_false());
        assert!(sig.check_on(json!({"a": 1})).is_false());
        assert!(sig.check().is_false());
    }

    #[test]
    fn len_validates_bounds_at_attachment() {
        assert_eq!(
            typs().len(LengthBounds::new()).unwrap_err(),
            ConfigError::MissingLengthBounds
        );
        assert_eq!(
            typs()
                .len(LengthBounds::new().with_min(4).with_max(1))
                .unwrap_err(),
            ConfigError::UnorderedLength { min: 4, max: 1 }
        );
    }

    #[test]
    fn length_bounds_from_value_rejects_non_integers() {
        let err = LengthBounds::from_value(&json!({"max": 2.5})).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { what: "length", .. }));
        let err = LengthBounds::from_value(&json!({"exact": "3"})).unwrap_err();
        assert!(matches!(err, ConfigError::Malformed { .. }));
    }

    #[test]
    fn not_empty() {
        assert!(typs!("x").not_empty().check().is_true());
        assert!(typs!(json!([])).not_empty().check().is_false());
        assert!(typs().not_empty().check().is_false());
    }
}
