//! Resolved or deferred verdicts
//!
//! Every predicate step and every terminal operation produces an
//! [`Outcome`]. A chain built only from synchronous predicates always yields
//! [`Outcome::Resolved`]; a single asynchronous predicate turns the rest of
//! the evaluation into [`Outcome::Pending`].
//!
//! # Example
//!
//! ```rust
//! use typs::{typs, Outcome};
//!
//! let outcome = typs!(42).integer().check();
//! assert!(matches!(outcome, Outcome::Resolved(true)));
//! assert!(outcome == true);
//!
//! # tokio_test::block_on(async {
//! let deferred = typs!(42).satisfies_async(|_| async { Ok(true) }).check();
//! assert!(deferred.is_pending());
//! assert_eq!(deferred.await.unwrap(), true);
//! # });
//! ```

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;

use futures::future::try_join_all;

use crate::error::Rejection;

/// A boxed future that is Send + 'static
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Future of a deferred verdict.
pub type Deferred = BoxFuture<'static, Result<bool, Rejection>>;

/// The verdict of a predicate or a chain.
pub enum Outcome {
    /// The verdict is known now.
    Resolved(bool),
    /// The verdict depends on asynchronous predicates.
    Pending(Deferred),
    /// Evaluation failed before a verdict could be reached.
    Rejected(Rejection),
}

impl Outcome {
    /// Wrap a future as a pending outcome.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<bool, Rejection>> + Send + 'static,
    {
        Outcome::Pending(Box::pin(future))
    }

    /// Returns `true` only for `Resolved(true)`.
    pub fn is_true(&self) -> bool {
        matches!(self, Outcome::Resolved(true))
    }

    /// Returns `true` only for `Resolved(false)`.
    pub fn is_false(&self) -> bool {
        matches!(self, Outcome::Resolved(false))
    }

    /// Returns `true` if the verdict is still deferred.
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending(_))
    }

    /// Returns `true` if evaluation was rejected synchronously.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// The verdict, if it is already known.
    pub fn resolved(&self) -> Option<bool> {
        match self {
            Outcome::Resolved(verdict) => Some(*verdict),
            _ => None,
        }
    }

    /// Invert the verdict. Rejections pass through untouched.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Outcome {
        match self {
            Outcome::Resolved(verdict) => Outcome::Resolved(!verdict),
            Outcome::Pending(deferred) => {
                Outcome::pending(async move { deferred.await.map(|verdict| !verdict) })
            }
            rejected @ Outcome::Rejected(_) => rejected,
        }
    }

    /// Conjunction of outcomes.
    ///
    /// Outcomes are pulled lazily: the first `Resolved(false)` or `Rejected`
    /// settles the result immediately, and outcomes that were already pending
    /// are dropped without being awaited. Otherwise pending outcomes are
    /// awaited together and the result is `true` only if all of them are.
    /// A pending rejection rejects the conjunction.
    pub fn all<I>(outcomes: I) -> Outcome
    where
        I: IntoIterator<Item = Outcome>,
    {
        let mut pending = Vec::new();
        for outcome in outcomes {
            match outcome {
                Outcome::Resolved(true) => {}
                Outcome::Pending(deferred) => pending.push(deferred),
                settled => return settled,
            }
        }
        if pending.is_empty() {
            return Outcome::Resolved(true);
        }
        Outcome::pending(async move {
            let verdicts = try_join_all(pending).await?;
            Ok(verdicts.into_iter().all(|verdict| verdict))
        })
    }

    /// Disjunction of outcomes.
    ///
    /// Mirror image of [`Outcome::all`]: the first `Resolved(true)` settles
    /// the result, a `Rejected` outcome rejects it, and pending outcomes are
    /// awaited together when no synchronous outcome succeeded.
    pub fn any<I>(outcomes: I) -> Outcome
    where
        I: IntoIterator<Item = Outcome>,
    {
        let mut pending = Vec::new();
        for outcome in outcomes {
            match outcome {
                Outcome::Resolved(false) => {}
                Outcome::Pending(deferred) => pending.push(deferred),
                settled => return settled,
            }
        }
        if pending.is_empty() {
            return Outcome::Resolved(false);
        }
        Outcome::pending(async move {
            let verdicts = try_join_all(pending).await?;
            Ok(verdicts.into_iter().any(|verdict| verdict))
        })
    }
}

impl From<bool> for Outcome {
    fn from(verdict: bool) -> Self {
        Outcome::Resolved(verdict)
    }
}

impl From<Rejection> for Outcome {
    fn from(rejection: Rejection) -> Self {
        Outcome::Rejected(rejection)
    }
}

impl IntoFuture for Outcome {
    type Output = Result<bool, Rejection>;
    type IntoFuture = Deferred;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Outcome::Resolved(verdict) => Box::pin(futures::future::ready(Ok(verdict))),
            Outcome::Pending(deferred) => deferred,
            Outcome::Rejected(rejection) => Box::pin(futures::future::ready(Err(rejection))),
        }
    }
}

/// Only a resolved outcome compares equal to a boolean.
impl PartialEq<bool> for Outcome {
    fn eq(&self, other: &bool) -> bool {
        self.resolved() == Some(*other)
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Resolved(verdict) => f.debug_tuple("Resolved").field(verdict).finish(),
            Outcome::Pending(_) => f.debug_tuple("Pending").field(&"<future>").finish(),
            Outcome::Rejected(rejection) => f.debug_tuple("Rejected").field(rejection).finish(),
        }
    }
}
