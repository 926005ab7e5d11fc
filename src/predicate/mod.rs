//! The predicate catalogue
//!
//! Each predicate in this module is an independent single-subject test,
//! attached to a chain through [`Typs::add`](crate::Typs::add). They fall
//! into four groups:
//!
//! - numbers: [`number`](crate::Typs::number), [`finite`](crate::Typs::finite),
//!   [`infinite`](crate::Typs::infinite), [`integer`](crate::Typs::integer),
//!   [`positive`](crate::Typs::positive), [`negative`](crate::Typs::negative),
//!   [`not_zero`](crate::Typs::not_zero), [`interval`](crate::Typs::interval)
//! - strings: [`string`](crate::Typs::string), [`regex`](crate::Typs::regex)
//! - collections: [`array`](crate::Typs::array), [`len`](crate::Typs::len),
//!   [`not_empty`](crate::Typs::not_empty)
//! - values and objects: [`not_null`](crate::Typs::not_null),
//!   [`boolean`](crate::Typs::boolean), [`object`](crate::Typs::object),
//!   [`keyable`](crate::Typs::keyable), [`has_keys`](crate::Typs::has_keys),
//!   [`equals`](crate::Typs::equals), [`not_equals`](crate::Typs::not_equals)
//!
//! Predicates that take configuration validate it when they are attached and
//! return a [`ConfigError`](crate::ConfigError) instead of a chain.
//!
//! # Example
//!
//! ```rust
//! use typs::{typs, LengthBounds};
//!
//! let username = typs()
//!     .string()
//!     .len(LengthBounds::new().with_min(3).with_max(20))
//!     .unwrap()
//!     .regex("^[a-z_]+$")
//!     .unwrap();
//!
//! assert!(username.check_on("john_doe") == true);
//! assert!(username.check_on("jo") == false);
//! assert!(username.check_on("John") == false);
//! ```

mod collection;
mod number;
mod object;
mod string;

pub use collection::LengthBounds;
pub use number::{as_number, Interval};

use crate::outcome::Outcome;
use crate::subject::Subject;

/// A single-subject test that yields a resolved or deferred verdict.
///
/// Closures taking `&Subject` and returning `bool` are predicates, and so
/// are chains and [`Checker`](crate::Checker)s.
///
/// # Example
///
/// ```rust
/// use typs::{Predicate, Subject};
///
/// let is_absent = |s: &Subject| s.is_absent();
/// assert!(is_absent.test(&Subject::Absent) == true);
/// ```
pub trait Predicate: Send + Sync {
    /// Test one subject.
    fn test(&self, subject: &Subject) -> Outcome;
}

impl<F> Predicate for F
where
    F: Fn(&Subject) -> bool + Send + Sync,
{
    #[inline]
    fn test(&self, subject: &Subject) -> Outcome {
        Outcome::Resolved(self(subject))
    }
}
