//! The immutable type signature
//!
//! A [`Typs`] pairs the subjects to validate with an ordered list of steps.
//! Every chain method returns a new signature with one more step appended;
//! the original is never modified, and the new signature shares the previous
//! steps instead of copying them.
//!
//! # Example
//!
//! ```rust
//! use typs::typs;
//!
//! let base = typs!(42).number();
//! let stricter = base.integer().positive();
//!
//! assert_eq!(base.step_count(), 1);
//! assert_eq!(stricter.step_count(), 3);
//! assert!(stricter.check() == true);
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::error::Rejection;
use crate::evaluate::evaluate;
use crate::outcome::Outcome;
use crate::predicate::Predicate;
use crate::subject::Subject;

pub(crate) type PredicateFn = Arc<dyn Fn(&Subject) -> Outcome + Send + Sync>;
pub(crate) type TransformFn =
    Arc<dyn Fn(Vec<Subject>) -> Result<Vec<Subject>, Rejection> + Send + Sync>;

/// One step of a chain.
#[derive(Clone)]
pub(crate) enum Step {
    /// Tests every current subject.
    Predicate(PredicateFn),
    /// Rewrites the current subject sequence for the steps after it.
    Transform(TransformFn),
}

struct Link {
    step: Step,
    prev: Option<Arc<Link>>,
}

/// Persistent list of steps, newest first.
#[derive(Clone, Default)]
pub(crate) struct Steps {
    last: Option<Arc<Link>>,
    len: usize,
}

impl Steps {
    fn push(&self, step: Step) -> Steps {
        Steps {
            last: Some(Arc::new(Link {
                step,
                prev: self.last.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Steps in attachment order.
    pub(crate) fn to_chain(&self) -> Arc<[Step]> {
        let mut chain = Vec::with_capacity(self.len);
        let mut cursor = self.last.as_deref();
        while let Some(link) = cursor {
            chain.push(link.step.clone());
            cursor = link.prev.as_deref();
        }
        chain.reverse();
        chain.into()
    }
}

/// An immutable type signature: subjects plus the constraints they must meet.
///
/// Build one with [`typs()`](crate::typs()), the [`typs!`](crate::typs!)
/// macro, [`Typs::of`] or [`Typs::of_all`], then chain predicates,
/// transformers and combinators onto it.
#[derive(Clone)]
pub struct Typs {
    subjects: Arc<[Subject]>,
    steps: Steps,
}

impl Typs {
    /// A signature over the absent marker.
    pub fn new() -> Self {
        Typs::of(Subject::Absent)
    }

    /// A signature over a single subject.
    pub fn of(subject: impl Into<Subject>) -> Self {
        Typs {
            subjects: Arc::new([subject.into()]),
            steps: Steps::default(),
        }
    }

    /// A signature over several subjects.
    ///
    /// An empty iterator yields a signature over the absent marker.
    ///
    /// ```rust
    /// use typs::{Subject, Typs};
    ///
    /// let sig = Typs::of_all(Vec::<Subject>::new());
    /// assert!(sig.subjects()[0].is_absent());
    ///
    /// assert!(Typs::of_all([1, 2, 3]).integer().check() == true);
    /// ```
    pub fn of_all<I>(subjects: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Subject>,
    {
        let subjects: Vec<Subject> = subjects.into_iter().map(Into::into).collect();
        if subjects.is_empty() {
            return Typs::new();
        }
        Typs {
            subjects: subjects.into(),
            steps: Steps::default(),
        }
    }

    /// The subjects [`check`](Typs::check) evaluates.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Number of attached steps.
    pub fn step_count(&self) -> usize {
        self.steps.len
    }

    pub(crate) fn push(&self, step: Step) -> Typs {
        Typs {
            subjects: Arc::clone(&self.subjects),
            steps: self.steps.push(step),
        }
    }

    /// Register a raw predicate step.
    ///
    /// This is the mechanism every catalogue predicate is built on.
    ///
    /// ```rust
    /// use typs::{typs, Outcome, Subject};
    ///
    /// let even = typs!(4).add(|s: &Subject| {
    ///     Outcome::from(s.as_value().and_then(|v| v.as_i64()).is_some_and(|n| n % 2 == 0))
    /// });
    /// assert!(even.check() == true);
    /// ```
    pub fn add<F>(&self, predicate: F) -> Typs
    where
        F: Fn(&Subject) -> Outcome + Send + Sync + 'static,
    {
        self.push(Step::Predicate(Arc::new(predicate)))
    }

    /// Register a transform step that rewrites the subject sequence seen by
    /// every later step.
    pub fn transform<F>(&self, transform: F) -> Typs
    where
        F: Fn(Vec<Subject>) -> Result<Vec<Subject>, Rejection> + Send + Sync + 'static,
    {
        self.push(Step::Transform(Arc::new(transform)))
    }

    /// Require subjects to satisfy an arbitrary predicate.
    ///
    /// ```rust
    /// use typs::{typs, Subject};
    ///
    /// let sig = typs!("hello").satisfies(|s: &Subject| s.length() == Some(5));
    /// assert!(sig.check() == true);
    /// ```
    pub fn satisfies<P>(&self, predicate: P) -> Typs
    where
        P: Predicate + 'static,
    {
        self.add(move |subject| predicate.test(subject))
    }

    /// Require subjects to satisfy an asynchronous predicate.
    ///
    /// The chain's verdict becomes pending from this step on. A future that
    /// resolves to `Err` rejects the whole chain.
    ///
    /// ```rust
    /// use typs::{typs, Rejection};
    ///
    /// # tokio_test::block_on(async {
    /// let sig = typs!(7).satisfies_async(|s| {
    ///     let known = s.as_value().and_then(|v| v.as_u64()) == Some(7);
    ///     async move { Ok::<_, Rejection>(known) }
    /// });
    /// assert!(sig.check().await.unwrap());
    /// # });
    /// ```
    pub fn satisfies_async<F, Fut>(&self, predicate: F) -> Typs
    where
        F: Fn(&Subject) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<bool, Rejection>> + Send + 'static,
    {
        self.add(move |subject| Outcome::pending(predicate(subject)))
    }

    /// Evaluate the chain against every stored subject; all must pass.
    pub fn check(&self) -> Outcome {
        let chain = self.steps.to_chain();
        Outcome::all(
            self.subjects
                .iter()
                .map(|subject| evaluate(Arc::clone(&chain), 0, vec![subject.clone()])),
        )
    }

    /// Evaluate the chain against `subject`, ignoring the stored subjects.
    ///
    /// ```rust
    /// use typs::typs;
    ///
    /// let positive_int = typs().integer().positive();
    /// assert!(positive_int.check_on(12) == true);
    /// assert!(positive_int.check_on(-3) == false);
    /// ```
    pub fn check_on(&self, subject: impl Into<Subject>) -> Outcome {
        evaluate(self.steps.to_chain(), 0, vec![subject.into()])
    }

    /// Require every stored subject to fail the chain.
    ///
    /// The negation applies per subject: with one passing and one failing
    /// subject the result is `false`, not the negation of
    /// [`check`](Typs::check).
    ///
    /// ```rust
    /// use typs::typs;
    ///
    /// assert!(typs!("x", "y").number().check_not() == true);
    /// assert!(typs!("x", 1).number().check_not() == false);
    /// ```
    pub fn check_not(&self) -> Outcome {
        let chain = self.steps.to_chain();
        Outcome::all(
            self.subjects
                .iter()
                .map(|subject| evaluate(Arc::clone(&chain), 0, vec![subject.clone()]).not()),
        )
    }

    /// Negation of [`check_on`](Typs::check_on).
    pub fn check_not_on(&self, subject: impl Into<Subject>) -> Outcome {
        self.check_on(subject).not()
    }

    /// Return `error` unless the stored subjects check.
    ///
    /// Meant for synchronous chains: a pending or rejected verdict counts as
    /// unsatisfactory and yields `error`.
    ///
    /// ```rust
    /// use typs::typs;
    ///
    /// assert_eq!(typs!(3).integer().check_or("not an integer"), Ok(()));
    /// assert_eq!(typs!(3.5).integer().check_or("not an integer"), Err("not an integer"));
    /// ```
    pub fn check_or<E>(&self, error: E) -> Result<(), E> {
        if self.check().is_true() {
            Ok(())
        } else {
            Err(error)
        }
    }

    /// Return `error` unless every stored subject fails the chain.
    ///
    /// Same limitation as [`check_or`](Typs::check_or): a pending or
    /// rejected verdict yields `error`.
    pub fn check_not_or<E>(&self, error: E) -> Result<(), E> {
        if self.check_not().is_true() {
            Ok(())
        } else {
            Err(error)
        }
    }
}

impl Default for Typs {
    fn default() -> Self {
        Typs::new()
    }
}

impl fmt::Debug for Typs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typs")
            .field("subjects", &self.subjects)
            .field("steps", &self.steps.len)
            .finish()
    }
}

/// A chain is itself a predicate: it tests a subject with
/// [`check_on`](Typs::check_on).
impl Predicate for Typs {
    fn test(&self, subject: &Subject) -> Outcome {
        self.check_on(subject.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typs;

    #[test]
    fn empty_chain_is_vacuously_true() {
        assert!(typs().check().is_true());
        assert!(typs().check_on(Subject::Absent).is_true());
        assert!(typs!(1, "two", [3]).check().is_true());
    }

    #[test]
    fn appending_does_not_touch_the_original() {
        let base = typs!(-1);
        let constrained = base.positive();

        assert_eq!(base.step_count(), 0);
        assert!(base.check().is_true());
        assert!(constrained.check().is_false());
    }

    #[test]
    fn branches_share_their_prefix() {
        let number = typs().number();
        let positive = number.positive();
        let negative = number.negative();

        assert!(positive.check_on(3).is_true());
        assert!(negative.check_on(3).is_false());
        assert!(number.check_on(3).is_true());
        assert_eq!(positive.step_count(), 2);
        assert_eq!(negative.step_count(), 2);
    }

    #[test]
    fn steps_run_in_attachment_order() {
        use std::sync::Mutex;

        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = |tag: &'static str| {
            let seen = Arc::clone(&seen);
            move |_: &Subject| {
                seen.lock().unwrap().push(tag);
                true
            }
        };

        let sig = typs!(1)
            .satisfies(record("first"))
            .satisfies(record("second"))
            .satisfies(record("third"));
        assert!(sig.check().is_true());
        assert_eq!(*seen.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn check_requires_every_subject() {
        assert!(typs!(1, 2, 3).positive().check().is_true());
        assert!(typs!(1, -2, 3).positive().check().is_false());
    }

    #[test]
    fn check_on_ignores_stored_subjects() {
        let sig = typs!(-5).positive();
        assert!(sig.check_on(5).is_true());
        assert!(sig.check().is_false());
    }

    #[test]
    fn negated_terminals() {
        assert!(typs!("x").number().check_not().is_true());
        assert!(typs().number().check_not_on(4).is_false());
        assert_eq!(typs!("x").number().check_not_or("is a number"), Ok(()));
        assert_eq!(typs!(1).number().check_not_or("is a number"), Err("is a number"));
    }

    #[test]
    fn negated_terminals_apply_per_subject() {
        let mixed = typs!("x", 1).number();
        assert!(mixed.check().is_false());
        assert!(mixed.check_not().is_false());
        assert_eq!(mixed.check_not_or("has a number"), Err("has a number"));

        let none = typs!("x", "y").number();
        assert!(none.check_not().is_true());
        assert_eq!(none.check_not_or("has a number"), Ok(()));
    }

    #[tokio::test]
    async fn check_not_awaits_each_subject() {
        let sig = typs!(1, 2).satisfies_async(|s| {
            let one = s.as_value().and_then(|v| v.as_i64()) == Some(1);
            async move { Ok(one) }
        });
        assert!(!sig.check_not().await.unwrap());
        assert!(typs!(3, 4)
            .satisfies_async(|_| async { Ok(false) })
            .check_not()
            .await
            .unwrap());
    }

    #[test]
    fn check_or_treats_pending_as_failure() {
        let sig = typs!(1).satisfies_async(|_| async { Ok(true) });
        assert_eq!(sig.check_or("deferred"), Err("deferred"));
    }

    #[test]
    fn chains_nest_as_predicates() {
        let positive_int = typs().integer().positive();
        assert!(typs!(8).satisfies(positive_int.clone()).check().is_true());
        assert!(typs!(-8).satisfies(positive_int).check().is_false());
    }

    #[test]
    fn debug_shows_subjects_and_step_count() {
        let rendered = format!("{:?}", typs!(1).number());
        assert_eq!(rendered, "Typs { subjects: [Value(Number(1))], steps: 1 }");
    }
}
