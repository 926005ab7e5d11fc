//! Reusable checkers and assertions
//!
//! A [`Checker`] freezes a chain so it can be applied to many subjects, and
//! an [`Assertion`] turns it into a `Result` with a caller-chosen error.
//!
//! # Example
//!
//! ```rust
//! use typs::typs;
//! use serde_json::json;
//!
//! let is_port = typs().integer().interval(typs::Interval::closed(1.0, 65535.0)).unwrap();
//! let port = is_port.checker();
//! assert!(port.check(8080) == true);
//! assert!(port.check(0) == false);
//!
//! let require_port = is_port.assertion("not a port");
//! assert_eq!(require_port.assert(json!(443)), Ok(()));
//! assert_eq!(require_port.assert("http"), Err("not a port"));
//! ```

use std::fmt;

use crate::outcome::Outcome;
use crate::predicate::Predicate;
use crate::signature::Typs;
use crate::subject::Subject;

/// A chain frozen into a reusable predicate.
#[derive(Clone)]
pub struct Checker {
    signature: Typs,
}

impl Checker {
    /// Evaluate the frozen chain against `subject`.
    pub fn check(&self, subject: impl Into<Subject>) -> Outcome {
        self.signature.check_on(subject)
    }

    /// Number of steps in the frozen chain.
    pub fn step_count(&self) -> usize {
        self.signature.step_count()
    }
}

impl Predicate for Checker {
    fn test(&self, subject: &Subject) -> Outcome {
        self.check(subject.clone())
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker")
            .field("steps", &self.signature.step_count())
            .finish()
    }
}

/// A checker that reports failure as a fixed error value.
///
/// Only a resolved `true` passes; pending and rejected verdicts yield the
/// error just like a resolved `false`.
#[derive(Clone)]
pub struct Assertion<E> {
    checker: Checker,
    error: E,
}

impl<E: Clone> Assertion<E> {
    /// Return `Ok(())` if `subject` checks, otherwise a clone of the error.
    pub fn assert(&self, subject: impl Into<Subject>) -> Result<(), E> {
        if self.checker.check(subject).is_true() {
            Ok(())
        } else {
            Err(self.error.clone())
        }
    }

    /// The error returned on failure.
    pub fn error(&self) -> &E {
        &self.error
    }
}

impl<E: fmt::Debug> fmt::Debug for Assertion<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assertion")
            .field("checker", &self.checker)
            .field("error", &self.error)
            .finish()
    }
}

impl Typs {
    /// Freeze this chain into a reusable [`Checker`].
    ///
    /// Stored subjects are ignored; the checker tests whatever it is given.
    pub fn checker(&self) -> Checker {
        Checker {
            signature: self.clone(),
        }
    }

    /// Freeze this chain into an [`Assertion`] failing with `error`.
    pub fn assertion<E: Clone>(&self, error: E) -> Assertion<E> {
        Assertion {
            checker: self.checker(),
            error,
        }
    }
}
