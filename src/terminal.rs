//! Already-resolved results.
//!
//! Used when the answer is known up front. They carry nothing but the fixed
//! outcome, take no lock, and reject every completing call.
use crate::{AsyncResult, Cause, Outcome, ResultView};

/// A result that has already succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct Succeeded<T> {
    outcome: Outcome<T>,
}

/// A result that has already failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Failed<T> {
    outcome: Outcome<T>,
}

impl<T> Succeeded<T> {
    pub fn new(value: T) -> Self {
        Self {
            outcome: Outcome::success(value),
        }
    }

    pub fn empty() -> Self {
        Self {
            outcome: Outcome::empty(),
        }
    }
}

impl<T> Failed<T> {
    pub fn new<C: Into<Cause>>(cause: C) -> Self {
        Self {
            outcome: Outcome::failure(cause),
        }
    }
}

macro_rules! terminal_result {
    ($ty:ident) => {
        impl<T> ResultView<T> for $ty<T> {
            fn inspect<R, F>(&self, f: F) -> R
            where
                F: FnOnce(Option<&Outcome<T>>) -> R,
            {
                f(Some(&self.outcome))
            }
        }

        impl<T> AsyncResult<T> for $ty<T> {
            fn try_resolve(&self, outcome: Outcome<T>) -> bool {
                tracing::debug!(
                    current = self.outcome.kind(),
                    attempted = outcome.kind(),
                    "result.complete.rejected"
                );
                false
            }

            /// Replays the fixed outcome on every call.
            fn set_handler<F>(&self, handler: F)
            where
                F: FnOnce(&Outcome<T>) + Send + 'static,
            {
                handler(&self.outcome);
            }

            fn set_exception_handler<F>(&self, handler: F)
            where
                F: FnOnce(&Cause) + Send + 'static,
            {
                if let Outcome::Failed(cause) = &self.outcome {
                    handler(cause);
                }
            }
        }
    };
}

terminal_result!(Succeeded);
terminal_result!(Failed);

#[cfg(test)]
mod tests {
    use super::{Failed, Succeeded};
    use crate::{AsyncResult, Cause, Error, ResultView};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_succeeded_reads() {
        let ok = Succeeded::new("v");
        assert!(ok.succeeded());
        assert!(!ok.failed());
        assert!(ok.is_completed());
        assert_eq!(ok.result(), Some("v"));
        assert_eq!(ok.cause(), None);

        let empty = Succeeded::<u8>::empty();
        assert!(empty.succeeded());
        assert!(empty.result_is_empty());
        assert_eq!(empty.result_or_default(4), 4);
    }

    #[test]
    fn test_failed_reads() {
        let cause = Cause::msg("gone");
        let failed = Failed::<u8>::new(cause.clone());
        assert!(failed.failed());
        assert!(!failed.succeeded());
        assert_eq!(failed.cause(), Some(cause));
        assert_eq!(failed.result(), None);
    }

    #[test]
    fn test_terminal_rejects_mutation() {
        let ok = Succeeded::new(1);
        assert!(!ok.try_complete(2));
        assert!(!ok.try_fail_msg("no"));
        assert!(matches!(ok.complete(2), Err(Error::AlreadyCompleted)));
        assert_eq!(ok.result(), Some(1));

        let failed = Failed::<i32>::new(Cause::msg("no"));
        assert!(!failed.try_complete_empty());
        assert!(matches!(failed.fail_msg("again"), Err(Error::AlreadyCompleted)));
        assert_eq!(failed.cause().unwrap().to_string(), "no");
    }

    #[test]
    fn test_terminal_replays_every_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let ok = Succeeded::new(10);
        for _ in 0..3 {
            let seen = calls.clone();
            ok.set_handler(move |outcome| {
                assert_eq!(outcome.result(), Some(10));
                seen.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_exception_handler_on_terminals() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        Succeeded::new(()).set_exception_handler(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let seen = calls.clone();
        Failed::<()>::new(Cause::msg("x")).set_exception_handler(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
