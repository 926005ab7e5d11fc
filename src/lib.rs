//! # Typs
//!
//! Fluent, immutable runtime validation of dynamic values.
//!
//! A signature ([`Typs`]) holds one or more subjects and an ordered chain of
//! constraints. Chaining never mutates: every call returns a new signature
//! that shares the steps of the one it was built from, so partial chains can
//! be stored and extended freely.
//!
//! - **Predicates** test each subject: `number()`, `integer()`, `string()`,
//!   `regex(..)`, `len(..)`, `has_keys(..)`, `equals(..)` and more.
//! - **Transformers** rewrite the subjects seen by later steps:
//!   `each_element()`, `each_property()`, `each_key()`, `each_entry()`,
//!   `map(..)`.
//! - **Structural matching** checks nested shapes with [`TypeTree`]s.
//! - **Asynchronous predicates** turn the verdict into a future that can be
//!   awaited.
//!
//! ## Quick Example
//!
//! ```rust
//! use typs::{typs, LengthBounds, TypeTree};
//! use serde_json::json;
//!
//! // Plain chains
//! assert!(typs!(42).integer().positive().check() == true);
//! assert!(typs!(1, 2, "3").number().check() == true);
//! assert!(typs!(1, 2, "x").number().check() == false);
//!
//! // Reusable chains and per-element checks
//! let tags = typs()
//!     .array()
//!     .and_each()
//!     .string()
//!     .len(LengthBounds::new().with_min(1).with_max(16))
//!     .unwrap();
//! assert!(tags.check_on(json!(["rust", "json"])) == true);
//! assert!(tags.check_on(json!(["rust", ""])) == false);
//!
//! // Nested shapes
//! let user = TypeTree::fields([
//!     ("name", typs().string().not_empty().into()),
//!     ("tags", tags.into()),
//! ]);
//! assert!(typs!(json!({"name": "ada", "tags": ["math"], "id": 1})).is(user) == true);
//! ```
//!
//! ## Asynchronous constraints
//!
//! ```rust
//! use typs::{typs, Rejection};
//!
//! # tokio_test::block_on(async {
//! let available = typs().string().satisfies_async(|s| {
//!     let taken = s.as_value().and_then(|v| v.as_str()) == Some("admin");
//!     async move { Ok::<_, Rejection>(!taken) }
//! });
//!
//! assert!(available.check_on("ada").await.unwrap());
//! assert!(!available.check_on("admin").await.unwrap());
//! // Synchronous steps before the async one still short-circuit.
//! assert!(available.check_on(7) == false);
//! # });
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod checker;
pub mod combinators;
pub mod error;
mod evaluate;
pub mod outcome;
pub mod predicate;
pub mod signature;
pub mod subject;
pub mod testing;
pub mod transform;
pub mod tree;

// Re-exports
pub use checker::{Assertion, Checker};
pub use error::{BoxError, ConfigError, Rejection};
pub use outcome::{BoxFuture, Deferred, Outcome};
pub use predicate::{as_number, Interval, LengthBounds, Predicate};
pub use signature::Typs;
pub use subject::{deep_equals, Subject};
pub use tree::TypeTree;

/// Start a chain over the absent marker.
///
/// Use [`check_on`](Typs::check_on) or a [`Checker`] to apply it to values.
///
/// ```rust
/// use typs::typs;
///
/// let even = typs().integer().satisfies(|s: &typs::Subject| {
///     typs::as_number(s).is_some_and(|n| n % 2.0 == 0.0)
/// });
/// assert!(even.check_on(10) == true);
/// ```
pub fn typs() -> Typs {
    Typs::new()
}

/// Build a signature over the given subjects.
///
/// Each argument is converted with [`serde_json::json!`], so literals,
/// arrays of literals and existing values all work. With no arguments the
/// signature holds the absent marker, like [`typs()`].
///
/// ```rust
/// use typs::typs;
/// use serde_json::json;
///
/// assert!(typs!().check() == true);
/// assert!(typs!(1, 2.5, -3).number().check() == true);
/// assert!(typs!([1, 2], "ab").not_empty().check() == true);
/// assert!(typs!(json!({"a": 1})).has_keys(["a"]).check() == true);
/// ```
#[macro_export]
macro_rules! typs {
    () => {
        $crate::Typs::new()
    };
    ($($subject:expr),+ $(,)?) => {
        $crate::Typs::of_all([$($crate::Subject::from(::serde_json::json!($subject))),+])
    };
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::checker::{Assertion, Checker};
    pub use crate::error::{ConfigError, Rejection};
    pub use crate::outcome::Outcome;
    pub use crate::predicate::{Interval, LengthBounds, Predicate};
    pub use crate::signature::Typs;
    pub use crate::subject::Subject;
    pub use crate::tree::TypeTree;
    pub use crate::typs;
}
