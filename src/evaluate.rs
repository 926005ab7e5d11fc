//! Continuation-style chain evaluation.
//!
//! Steps run in attachment order over the current subject sequence. The walk
//! stays synchronous until a predicate step yields a pending verdict; from
//! there the remaining steps are evaluated inside a deferred continuation that
//! resumes once every pending verdict of that step has resolved.

use std::sync::Arc;

use crate::outcome::Outcome;
use crate::signature::Step;
use crate::subject::Subject;

/// Evaluate `chain[from..]` against `subjects`.
pub(crate) fn evaluate(chain: Arc<[Step]>, from: usize, mut subjects: Vec<Subject>) -> Outcome {
    let mut index = from;
    while index < chain.len() {
        let step = chain[index].clone();
        index += 1;
        match step {
            Step::Transform(transform) => match transform(subjects) {
                Ok(next) => subjects = next,
                Err(rejection) => {
                    let rejected = Outcome::Rejected(rejection);
                    #[cfg(feature = "tracing")]
                    trace_settled(index - 1, &rejected);
                    return rejected;
                }
            },
            Step::Predicate(predicate) => {
                match Outcome::all(subjects.iter().map(|subject| predicate(subject))) {
                    Outcome::Resolved(true) => {}
                    Outcome::Pending(deferred) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(
                            step = index - 1,
                            subjects = subjects.len(),
                            "awaiting deferred predicates"
                        );
                        return Outcome::pending(async move {
                            if deferred.await? {
                                evaluate(chain, index, subjects).await
                            } else {
                                Ok(false)
                            }
                        });
                    }
                    settled => {
                        #[cfg(feature = "tracing")]
                        trace_settled(index - 1, &settled);
                        return settled;
                    }
                }
            }
        }
    }
    Outcome::Resolved(true)
}

#[cfg(feature = "tracing")]
fn trace_settled(step: usize, outcome: &Outcome) {
    match outcome {
        Outcome::Rejected(rejection) => {
            tracing::debug!(step, error = %rejection, "chain rejected");
        }
        _ => tracing::trace!(step, "predicate failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rejection;
    use crate::signature::Typs;
    use crate::typs;
    use futures::future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting(calls: &Arc<AtomicUsize>, verdict: bool) -> impl Fn(&Subject) -> bool {
        let calls = Arc::clone(calls);
        move |_: &Subject| {
            calls.fetch_add(1, Ordering::SeqCst);
            verdict
        }
    }

    #[test]
    fn sync_failure_skips_later_steps() {
        let later = Arc::new(AtomicUsize::new(0));
        let sig = typs!(1)
            .satisfies(|_: &Subject| false)
            .satisfies(counting(&later, true));

        assert!(sig.check().is_false());
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn sync_failure_stops_at_the_failing_subject() {
        let calls = Arc::new(AtomicUsize::new(0));
        let sig = Typs::new().each_element().satisfies(counting(&calls, false));

        assert!(sig.check_on(serde_json::json!([1, 2, 3])).is_false());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn sync_false_wins_over_pending_verdicts() {
        let sig = typs!(1, 2).add(|subject| {
            if subject.as_value().and_then(|v| v.as_i64()) == Some(1) {
                Outcome::pending(future::pending())
            } else {
                Outcome::from(false)
            }
        });
        assert!(sig.check().is_false());
    }

    #[tokio::test]
    async fn pending_step_keeps_the_rest_deferred() {
        let later = Arc::new(AtomicUsize::new(0));
        let sig = typs!(5)
            .satisfies_async(|_| async { Ok(true) })
            .satisfies(counting(&later, true));

        let outcome = sig.check();
        assert!(outcome.is_pending());
        assert_eq!(later.load(Ordering::SeqCst), 0);
        assert_eq!(outcome.await.unwrap(), true);
        assert_eq!(later.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pending_false_skips_later_steps() {
        let later = Arc::new(AtomicUsize::new(0));
        let sig = typs!(5)
            .satisfies_async(|_| async { Ok(false) })
            .satisfies(counting(&later, true));

        assert_eq!(sig.check().await.unwrap(), false);
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn later_sync_failure_still_applies_after_pending() {
        let sig = typs!(5)
            .satisfies_async(|_| async { Ok(true) })
            .negative();
        let outcome = sig.check();
        assert!(outcome.is_pending());
        assert_eq!(outcome.await.unwrap(), false);
    }

    #[tokio::test]
    async fn pending_rejection_is_the_terminal_outcome() {
        let sig = typs!(5)
            .satisfies_async(|_| async { Err(Rejection::msg("lookup failed")) })
            .positive();
        let err = sig.check().await.unwrap_err();
        assert_eq!(err.to_string(), "predicate rejected: lookup failed");
    }

    #[test]
    fn transform_rejection_is_synchronous() {
        let outcome = typs!(3).each_key().string().check();
        assert!(outcome.is_rejected());
    }

    #[cfg(feature = "tracing")]
    mod tracing_tests {
        use crate::typs;
        use tracing_test::traced_test;

        #[traced_test]
        #[test]
        fn logs_short_circuit() {
            assert!(typs!("x").number().check().is_false());
            assert!(logs_contain("predicate failed"));
        }

        #[traced_test]
        #[test]
        fn logs_rejection() {
            assert!(typs!(1).each_key().check().is_rejected());
            assert!(logs_contain("chain rejected"));
        }
    }
}
