//! Negation and disjunction combinators
//!
//! These compose type trees (and therefore other chains) into new steps:
//!
//! - [`not`](Typs::not): the subject must *not* match a tree,
//! - [`matches_any`](Typs::matches_any): the subject must match at least one
//!   of several trees,
//! - [`one_of`](Typs::one_of): the subject must be an element of a domain.
//!
//! # Example
//!
//! ```rust
//! use typs::typs;
//!
//! let id = typs().matches_any([typs().integer().positive(), typs().string().not_empty()]);
//! assert!(id.check_on(17) == true);
//! assert!(id.check_on("abc") == true);
//! assert!(id.check_on(-1) == false);
//! ```

use crate::error::ConfigError;
use crate::outcome::Outcome;
use crate::signature::Typs;
use crate::subject::Subject;
use crate::tree::TypeTree;

impl Typs {
    /// Require subjects that do not structurally match `tree`.
    ///
    /// ```rust
    /// use typs::typs;
    ///
    /// assert!(typs!("text").not(typs().number()).check() == true);
    /// assert!(typs!(4).not(typs().number()).check() == false);
    /// ```
    pub fn not(&self, tree: impl Into<TypeTree>) -> Typs {
        let tree = tree.into();
        self.add(move |subject| tree.match_subject(subject).not())
    }

    /// Require subjects that structurally match at least one of `trees`.
    ///
    /// An empty list matches nothing.
    pub fn matches_any<I>(&self, trees: I) -> Typs
    where
        I: IntoIterator,
        I::Item: Into<TypeTree>,
    {
        let trees: Vec<TypeTree> = trees.into_iter().map(Into::into).collect();
        self.add(move |subject| Outcome::any(trees.iter().map(|tree| tree.match_subject(subject))))
    }

    /// Shortcut for `matches_any(trees).check()`.
    pub fn is_any<I>(&self, trees: I) -> Outcome
    where
        I: IntoIterator,
        I::Item: Into<TypeTree>,
    {
        self.matches_any(trees).check()
    }

    /// Require a supplied subject that deeply equals an element of `domain`.
    ///
    /// `domain` must be collection-like; anything else is a
    /// [`ConfigError::NotCollection`].
    ///
    /// ```rust
    /// use typs::typs;
    /// use serde_json::json;
    ///
    /// let weekday = typs().one_of(json!(["mon", "tue", "wed"])).unwrap();
    /// assert!(weekday.check_on("tue") == true);
    /// assert!(weekday.check_on("sun") == false);
    /// assert!(typs().one_of(3).is_err());
    /// ```
    pub fn one_of(&self, domain: impl Into<Subject>) -> Result<Typs, ConfigError> {
        let domain = domain.into();
        let elements = domain.elements().ok_or(ConfigError::NotCollection {
            operation: "one_of",
            found: domain.kind(),
        })?;
        Ok(self.add(move |subject| {
            Outcome::from(
                !subject.is_absent() && elements.iter().any(|element| element.deep_equals(subject)),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ConfigError;
    use crate::subject::Subject;
    use crate::tree::TypeTree;
    use crate::typs;
    use serde_json::json;

    fn point() -> TypeTree {
        TypeTree::fields([("x", typs().number().into()), ("y", typs().number().into())])
    }

    #[test]
    fn not_is_the_dual_of_matches() {
        for subject in [json!({"x": 1, "y": 2}), json!({"x": 1}), json!(3), json!(null)] {
            let matched = typs!(subject.clone()).matches(point()).check();
            let negated = typs!(subject).not(point()).check();
            assert_eq!(negated.resolved(), matched.resolved().map(|m| !m));
        }
    }

    #[test]
    fn matches_any_needs_one_match() {
        let sig = typs().matches_any([point(), TypeTree::literal("origin")]);
        assert!(sig.check_on(json!({"x": 0, "y": 0})).is_true());
        assert!(sig.check_on("origin").is_true());
        assert!(sig.check_on(json!({"x": 0})).is_false());
    }

    #[test]
    fn matches_any_of_nothing_fails() {
        let sig = typs!(1).matches_any(Vec::<TypeTree>::new());
        assert!(sig.check().is_false());
    }

    #[test]
    fn is_any_shortcut() {
        assert!(typs!(true).is_any([typs().number(), typs().boolean()]).is_true());
        assert!(typs!(json!([])).is_any([typs().number(), typs().boolean()]).is_false());
    }

    #[tokio::test]
    async fn matches_any_awaits_pending_alternatives() {
        let slow_yes = typs().satisfies_async(|_| async { Ok(true) });
        let outcome = typs!("x").is_any([typs().number(), slow_yes]);
        assert!(outcome.is_pending());
        assert!(outcome.await.unwrap());
    }

    #[test]
    fn one_of_uses_deep_equality() {
        let sig = typs().one_of(json!([1, [2, 3], {"a": null}])).unwrap();
        assert!(sig.check_on(1.0).is_true());
        assert!(sig.check_on(json!([2, 3])).is_true());
        assert!(sig.check_on(json!({"a": null})).is_true());
        assert!(sig.check_on(json!([3, 2])).is_false());
    }

    #[test]
    fn one_of_never_accepts_absent() {
        let sig = typs().one_of(json!([null])).unwrap();
        assert!(sig.check().is_false());
        assert!(sig.check_on(Subject::from(serde_json::Value::Null)).is_true());
    }

    #[test]
    fn one_of_string_domain_holds_characters() {
        let vowel = typs().one_of("aeiou").unwrap();
        assert!(vowel.check_on("e").is_true());
        assert!(vowel.check_on("x").is_false());
    }

    #[test]
    fn one_of_rejects_non_collections_at_attachment() {
        assert_eq!(
            typs().one_of(json!({"a": 1})).unwrap_err(),
            ConfigError::NotCollection {
                operation: "one_of",
                found: "object"
            }
        );
        assert!(typs().one_of(Subject::Absent).is_err());
    }
}
