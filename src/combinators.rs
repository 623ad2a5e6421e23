//! Combinators deriving new results from existing ones.
//!
//! Each combinator registers a handler on its source and returns a fresh
//! pending [`CompletableResult`] that resolves when the source does. The
//! source is never mutated, but note that the registration occupies the
//! source's single handler slot: chain further from the derived result
//! rather than deriving twice from one source.
//!
//! A failure passes through `map` and `compose` untouched; `otherwise` and
//! `recover` are the combinators that turn it back into a success. An empty
//! success passes through without invoking the callback.
use std::convert::Infallible;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{AsyncResult, Cause, CompletableResult, Error, Outcome, Result, Suspended};

fn forward<U>(target: CompletableResult<U>) -> impl FnOnce(&Outcome<U>) + Send + 'static
where
    U: Clone + Send + Sync + 'static,
{
    move |outcome: &Outcome<U>| {
        target.try_resolve(outcome.clone());
    }
}

enum Attach {
    InProgress(Option<Cause>),
    Done,
}

/// Combinators available on every [`AsyncResult`].
///
/// # Examples
///
/// ```
/// use completable_result::{ResultExt, ResultFactory, ResultView};
///
/// let factory = ResultFactory::new();
/// let port = factory
///     .failed_msg::<String, _>("PORT not set")
///     .otherwise_value("8080".to_string())
///     .try_map(|raw| raw.parse::<u16>());
/// assert_eq!(port.result(), Some(8080));
/// ```
pub trait ResultExt<T>: AsyncResult<T> {
    /// Transforms the value. `f` is not invoked on failure.
    fn map<U, F>(&self, f: F) -> CompletableResult<U>
    where
        T: Clone + Send + Sync + 'static,
        U: Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.try_map(move |value| Ok::<U, Infallible>(f(value)))
    }

    /// Like [`map`](Self::map); an `Err` from `f` fails the derived result.
    fn try_map<U, E, F>(&self, f: F) -> CompletableResult<U>
    where
        T: Clone + Send + Sync + 'static,
        U: Send + Sync + 'static,
        E: Into<Cause>,
        F: FnOnce(T) -> std::result::Result<U, E> + Send + 'static,
    {
        let derived = CompletableResult::new();
        let target = derived.clone();
        self.set_handler(move |outcome| {
            let mapped = match outcome {
                Outcome::Succeeded(Some(value)) => Outcome::from_result(f(value.clone())),
                Outcome::Succeeded(None) => Outcome::empty(),
                Outcome::Failed(cause) => Outcome::Failed(cause.clone()),
            };
            target.try_resolve(mapped);
        });
        derived
    }

    /// Replaces any success, empty or not, with `value`.
    fn map_to<U>(&self, value: U) -> CompletableResult<U>
    where
        U: Send + Sync + 'static,
    {
        let derived = CompletableResult::new();
        let target = derived.clone();
        self.set_handler(move |outcome| {
            let mapped = match outcome {
                Outcome::Succeeded(_) => Outcome::success(value),
                Outcome::Failed(cause) => Outcome::Failed(cause.clone()),
            };
            target.try_resolve(mapped);
        });
        derived
    }

    /// Chains another asynchronous step; the derived result follows the
    /// result returned by `f`.
    fn compose<U, R, F>(&self, f: F) -> CompletableResult<U>
    where
        T: Clone + Send + Sync + 'static,
        U: Clone + Send + Sync + 'static,
        R: AsyncResult<U>,
        F: FnOnce(T) -> R + Send + 'static,
    {
        self.try_compose(move |value| Ok::<R, Infallible>(f(value)))
    }

    fn try_compose<U, R, E, F>(&self, f: F) -> CompletableResult<U>
    where
        T: Clone + Send + Sync + 'static,
        U: Clone + Send + Sync + 'static,
        R: AsyncResult<U>,
        E: Into<Cause>,
        F: FnOnce(T) -> std::result::Result<R, E> + Send + 'static,
    {
        let derived = CompletableResult::new();
        let target = derived.clone();
        self.set_handler(move |outcome| match outcome {
            Outcome::Succeeded(Some(value)) => match f(value.clone()) {
                Ok(next) => next.set_handler(forward(target)),
                Err(err) => {
                    target.try_resolve(Outcome::failure(err));
                }
            },
            Outcome::Succeeded(None) => {
                target.try_resolve(Outcome::empty());
            }
            Outcome::Failed(cause) => {
                target.try_resolve(Outcome::Failed(cause.clone()));
            }
        });
        derived
    }

    /// Hands the value to `handler`, which is expected to complete `next`.
    ///
    /// A failure of the source fails `next` with the same cause. An `Err`
    /// from `handler` fails `next` if it is still pending. If `next` is
    /// already resolved the error has nowhere to go: when the source was
    /// already resolved it is returned as [`Error::Unreported`], otherwise it
    /// is logged when the source resolves.
    fn compose_into<U, N, E, F>(&self, handler: F, next: N) -> Result<()>
    where
        T: Clone + Send + Sync + 'static,
        N: AsyncResult<U> + Send + 'static,
        E: Into<Cause>,
        F: FnOnce(T, &N) -> std::result::Result<(), E> + Send + 'static,
    {
        let attach = Arc::new(Mutex::new(Attach::InProgress(None)));
        let report = attach.clone();
        self.set_handler(move |outcome| {
            let err: Cause = match outcome {
                Outcome::Succeeded(Some(value)) => match handler(value.clone(), &next) {
                    Ok(()) => return,
                    Err(err) => err.into(),
                },
                Outcome::Succeeded(None) => {
                    next.try_complete_empty();
                    return;
                }
                Outcome::Failed(cause) => {
                    next.try_fail(cause.clone());
                    return;
                }
            };
            if next.try_fail(err.clone()) {
                return;
            }
            match &mut *report.lock() {
                Attach::InProgress(slot) => *slot = Some(err),
                Attach::Done => {
                    tracing::error!(cause = %err, "result.compose_into.unreported");
                }
            }
        });
        let state = std::mem::replace(&mut *attach.lock(), Attach::Done);
        match state {
            Attach::InProgress(Some(cause)) => Err(Error::Unreported(cause)),
            _ => Ok(()),
        }
    }

    /// Converts a failure into a value computed from its cause.
    fn otherwise<F>(&self, f: F) -> CompletableResult<T>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce(Cause) -> T + Send + 'static,
    {
        self.try_otherwise(move |cause| Ok::<T, Infallible>(f(cause)))
    }

    fn try_otherwise<E, F>(&self, f: F) -> CompletableResult<T>
    where
        T: Clone + Send + Sync + 'static,
        E: Into<Cause>,
        F: FnOnce(Cause) -> std::result::Result<T, E> + Send + 'static,
    {
        let derived = CompletableResult::new();
        let target = derived.clone();
        self.set_handler(move |outcome| {
            let recovered = match outcome {
                Outcome::Failed(cause) => Outcome::from_result(f(cause.clone())),
                succeeded => succeeded.clone(),
            };
            target.try_resolve(recovered);
        });
        derived
    }

    fn otherwise_value(&self, value: T) -> CompletableResult<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        self.otherwise(move |_| value)
    }

    /// Converts a failure into an empty success.
    fn otherwise_empty(&self) -> CompletableResult<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let derived = CompletableResult::new();
        let target = derived.clone();
        self.set_handler(move |outcome| {
            let recovered = match outcome {
                Outcome::Failed(_) => Outcome::empty(),
                succeeded => succeeded.clone(),
            };
            target.try_resolve(recovered);
        });
        derived
    }

    /// Replaces a failure with another asynchronous step; the mirror of
    /// [`compose`](Self::compose).
    fn recover<R, F>(&self, f: F) -> CompletableResult<T>
    where
        T: Clone + Send + Sync + 'static,
        R: AsyncResult<T>,
        F: FnOnce(Cause) -> R + Send + 'static,
    {
        self.try_recover(move |cause| Ok::<R, Infallible>(f(cause)))
    }

    fn try_recover<R, E, F>(&self, f: F) -> CompletableResult<T>
    where
        T: Clone + Send + Sync + 'static,
        R: AsyncResult<T>,
        E: Into<Cause>,
        F: FnOnce(Cause) -> std::result::Result<R, E> + Send + 'static,
    {
        let derived = CompletableResult::new();
        let target = derived.clone();
        self.set_handler(move |outcome| match outcome {
            Outcome::Failed(cause) => match f(cause.clone()) {
                Ok(fallback) => fallback.set_handler(forward(target)),
                Err(err) => {
                    target.try_resolve(Outcome::failure(err));
                }
            },
            succeeded => {
                target.try_resolve(succeeded.clone());
            }
        });
        derived
    }

    /// A future for awaiting this result from a host runtime. Takes over the
    /// handler slot, like any combinator.
    fn to_suspendable(&self) -> Suspended<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        Suspended::new(self)
    }
}

impl<T, R> ResultExt<T> for R where R: AsyncResult<T> + ?Sized {}
