//! Testing utilities for chains and outcomes
//!
//! This module provides assertion macros for [`Outcome`](crate::Outcome)s
//! and, behind the `proptest` feature, an [`Arbitrary`] implementation for
//! [`Subject`](crate::Subject).
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use typs::{typs, assert_checks, assert_fails, assert_pending};
//!
//! assert_checks!(typs!(3).integer().check());
//! assert_fails!(typs!(3.5).integer().check());
//! let _deferred = assert_pending!(typs!(3).satisfies_async(|_| async { Ok(true) }).check());
//! ```

/// Assert that an outcome resolved to `true`.
///
/// # Example
///
/// ```rust
/// use typs::{typs, assert_checks};
///
/// assert_checks!(typs!("abc").string().not_empty().check());
/// ```
#[macro_export]
macro_rules! assert_checks {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Resolved(true) => {}
            other => {
                panic!("Expected Resolved(true), got {:?}", other);
            }
        }
    };
}

/// Assert that an outcome resolved to `false`.
///
/// # Example
///
/// ```rust
/// use typs::{typs, assert_fails};
///
/// assert_fails!(typs!(-1).positive().check());
/// ```
#[macro_export]
macro_rules! assert_fails {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Resolved(false) => {}
            other => {
                panic!("Expected Resolved(false), got {:?}", other);
            }
        }
    };
}

/// Assert that an outcome is still pending, and yield its future.
///
/// # Example
///
/// ```rust
/// use typs::{typs, assert_pending};
///
/// # tokio_test::block_on(async {
/// let deferred = assert_pending!(typs!(1).satisfies_async(|_| async { Ok(false) }).check());
/// assert_eq!(deferred.await.unwrap(), false);
/// # });
/// ```
#[macro_export]
macro_rules! assert_pending {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Pending(deferred) => deferred,
            other => {
                panic!("Expected Pending, got {:?}", other);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
use serde_json::{Map, Number, Value};

#[cfg(feature = "proptest")]
use crate::subject::Subject;

/// Strategy for arbitrary JSON values, nested at most `depth` levels.
#[cfg(feature = "proptest")]
pub fn json_value(depth: u32) -> BoxedStrategy<Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6..1.0e6f64).prop_map(|f| Number::from_f64(f).map_or(Value::Null, Value::Number)),
        "[a-z0-9 ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(depth, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..4)
                .prop_map(|fields| Value::Object(fields.into_iter().collect::<Map<_, _>>())),
        ]
    })
    .boxed()
}

#[cfg(feature = "proptest")]
impl Arbitrary for Subject {
    type Parameters = u32;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(depth: Self::Parameters) -> Self::Strategy {
        let depth = if depth == 0 { 3 } else { depth };
        prop_oneof![
            1 => Just(Subject::Absent),
            9 => json_value(depth).prop_map(Subject::Value),
        ]
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use crate::typs;

    #[test]
    fn assert_checks_passes_on_true() {
        assert_checks!(typs!(1).number().check());
    }

    #[test]
    #[should_panic(expected = "Expected Resolved(true)")]
    fn assert_checks_panics_on_false() {
        assert_checks!(typs!("1").boolean().check());
    }

    #[test]
    fn assert_fails_passes_on_false() {
        assert_fails!(typs!(0).not_zero().check());
    }

    #[test]
    #[should_panic(expected = "Expected Resolved(false)")]
    fn assert_fails_panics_on_pending() {
        assert_fails!(typs!(0).satisfies_async(|_| async { Ok(false) }).check());
    }

    #[test]
    #[should_panic(expected = "Expected Pending")]
    fn assert_pending_panics_on_resolved() {
        let _ = assert_pending!(typs!(0).check());
    }

    #[tokio::test]
    async fn assert_pending_yields_the_future() {
        let deferred = assert_pending!(typs!(2).satisfies_async(|_| async { Ok(true) }).check());
        assert!(deferred.await.unwrap());
    }

    #[cfg(feature = "proptest")]
    mod proptest_tests {
        use crate::subject::Subject;
        use crate::typs;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn empty_chain_accepts_arbitrary_subjects(subject in any::<Subject>()) {
                prop_assert!(typs().check_on(subject).is_true());
            }

            #[test]
            fn not_null_agrees_with_is_null_like(subject in any::<Subject>()) {
                let expected = !subject.is_null_like();
                prop_assert_eq!(typs().not_null().check_on(subject).resolved(), Some(expected));
            }
        }
    }
}
