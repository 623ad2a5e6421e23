//! A complete-once asynchronous result.
//!
//! A result starts pending, is assigned exactly once with either a value or a
//! failure [`Cause`], and lets an observer attach a handler that fires when
//! (or as soon as) that assignment happens. Derived results are built with
//! the [`ResultExt`] combinators, and failures flow through them untouched
//! until `otherwise` or `recover` turns them back into a success.
//!
//! The primitive never spawns threads or schedules work: completion and
//! handler dispatch run inline on whichever thread completes the result, or on
//! the thread attaching a handler to an already resolved one.
//!
//! # Examples
//!
//! ```
//! use completable_result::{AsyncResult, ResultExt, ResultFactory, ResultView};
//!
//! let factory = ResultFactory::new();
//! let pending = factory.pending::<u32>();
//! let doubled = pending.map(|v| v * 2).otherwise_value(0);
//!
//! pending.complete(21).unwrap();
//! assert_eq!(doubled.result(), Some(42));
//! assert!(!pending.try_complete(1));
//! ```
pub mod bridge;
pub mod cause;
pub mod combinators;
pub mod completable;
pub mod factory;
pub mod outcome;
pub mod terminal;

pub use bridge::{from_future, from_future_observed, Suspended};
pub use cause::Cause;
pub use combinators::ResultExt;
pub use completable::CompletableResult;
pub use factory::ResultFactory;
pub use outcome::Outcome;
pub use terminal::{Failed, Succeeded};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A strict completing call hit an instance that is no longer pending.
    #[error("result already completed")]
    AlreadyCompleted,
    /// The awaited result failed with this cause.
    #[error("{0}")]
    Failed(Cause),
    /// A `compose_into` handler failed after its target was already resolved.
    #[error("handler failed after its target was resolved: {0}")]
    Unreported(Cause),
    /// The one-shot handler of a suspended waiter was dropped before the
    /// result resolved.
    #[error("result dropped or handler replaced before completion")]
    Abandoned,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Read-only view of a result's final or in-progress outcome.
///
/// Implementors only provide [`inspect`](ResultView::inspect); every query is
/// derived from it and none of them mutate.
pub trait ResultView<T> {
    /// Runs `f` against the resolved outcome, or `None` while pending.
    fn inspect<R, F>(&self, f: F) -> R
    where
        F: FnOnce(Option<&Outcome<T>>) -> R;

    fn succeeded(&self) -> bool {
        self.inspect(|o| matches!(o, Some(Outcome::Succeeded(_))))
    }

    fn failed(&self) -> bool {
        self.inspect(|o| matches!(o, Some(Outcome::Failed(_))))
    }

    fn is_completed(&self) -> bool {
        self.inspect(|o| o.is_some())
    }

    /// Succeeded with a value.
    fn has_result(&self) -> bool {
        self.inspect(|o| matches!(o, Some(Outcome::Succeeded(Some(_)))))
    }

    /// Succeeded without a value.
    fn result_is_empty(&self) -> bool {
        self.inspect(|o| matches!(o, Some(Outcome::Succeeded(None))))
    }

    fn has_cause(&self) -> bool {
        self.failed()
    }

    /// The value if succeeded with one, `None` otherwise. Never fails.
    fn result(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inspect(|o| match o {
            Some(Outcome::Succeeded(value)) => value.clone(),
            _ => None,
        })
    }

    fn result_or_default(&self, default: T) -> T
    where
        T: Clone,
    {
        self.result().unwrap_or(default)
    }

    /// The failure cause; `None` unless failed.
    fn cause(&self) -> Option<Cause> {
        self.inspect(|o| match o {
            Some(Outcome::Failed(cause)) => Some(cause.clone()),
            _ => None,
        })
    }

    fn outcome(&self) -> Option<Outcome<T>>
    where
        T: Clone,
    {
        self.inspect(|o| o.cloned())
    }
}

/// Completion side of a result.
///
/// `try_*` operations return `false` when the instance is no longer pending;
/// the strict forms return [`Error::AlreadyCompleted`] instead.
pub trait AsyncResult<T>: ResultView<T> {
    /// Moves a pending instance to `outcome`. First writer wins.
    fn try_resolve(&self, outcome: Outcome<T>) -> bool;

    /// Invokes `handler` now if resolved, otherwise stores it for the moment
    /// of completion. There is one slot: a later call replaces an earlier,
    /// not yet fired, handler.
    fn set_handler<F>(&self, handler: F)
    where
        F: FnOnce(&Outcome<T>) + Send + 'static;

    /// Handler invoked once when the instance fails.
    fn set_exception_handler<F>(&self, handler: F)
    where
        F: FnOnce(&Cause) + Send + 'static;

    fn try_complete(&self, value: T) -> bool {
        self.try_resolve(Outcome::success(value))
    }

    fn try_complete_empty(&self) -> bool {
        self.try_resolve(Outcome::empty())
    }

    fn try_fail<C: Into<Cause>>(&self, cause: C) -> bool {
        self.try_resolve(Outcome::failure(cause))
    }

    fn try_fail_msg<M: Into<String>>(&self, message: M) -> bool {
        self.try_resolve(Outcome::Failed(Cause::msg(message)))
    }

    fn resolve(&self, outcome: Outcome<T>) -> Result<()> {
        if self.try_resolve(outcome) {
            Ok(())
        } else {
            Err(Error::AlreadyCompleted)
        }
    }

    fn complete(&self, value: T) -> Result<()> {
        self.resolve(Outcome::success(value))
    }

    fn complete_empty(&self) -> Result<()> {
        self.resolve(Outcome::empty())
    }

    fn fail<C: Into<Cause>>(&self, cause: C) -> Result<()> {
        self.resolve(Outcome::failure(cause))
    }

    fn fail_msg<M: Into<String>>(&self, message: M) -> Result<()> {
        self.resolve(Outcome::Failed(Cause::msg(message)))
    }
}
