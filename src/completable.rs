//! The pending, complete-once state machine.
//!
//! All reads and transitions happen under one instance-scoped lock. A
//! transition records the outcome, takes the stored handlers out of their
//! slots, and releases the lock before running them, so a handler may freely
//! touch the same instance again.
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{AsyncResult, Cause, Outcome, ResultView};

type Handler<T> = Box<dyn FnOnce(&Outcome<T>) + Send>;
type ExceptionHandler = Box<dyn FnOnce(&Cause) + Send>;

/// A result that starts pending and is completed at most once.
///
/// Clones share the same state: the producer keeps one handle to complete it
/// and consumers read through theirs.
///
/// # Examples
///
/// ```
/// use completable_result::{AsyncResult, CompletableResult, ResultView};
/// use std::thread;
///
/// let result = CompletableResult::<String>::new();
/// let producer = result.clone();
/// let task = thread::spawn(move || producer.complete("🍓".into()));
/// task.join().expect("The producer thread has panicked").unwrap();
/// assert_eq!(result.result().as_deref(), Some("🍓"));
/// ```
pub struct CompletableResult<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

enum ResultState<T> {
    Pending,
    Resolved(Arc<Outcome<T>>),
}

struct Inner<T> {
    state: ResultState<T>,
    handler: Option<Handler<T>>,
    exception_handler: Option<ExceptionHandler>,
}

impl<T> CompletableResult<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: ResultState::Pending,
                handler: None,
                exception_handler: None,
            })),
        }
    }

    fn resolved(&self) -> Option<Arc<Outcome<T>>> {
        match &self.inner.lock().state {
            ResultState::Pending => None,
            ResultState::Resolved(outcome) => Some(outcome.clone()),
        }
    }
}

impl<T> Default for CompletableResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for CompletableResult<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for CompletableResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.resolved() {
            None => f.write_str("CompletableResult(Pending)"),
            Some(outcome) => f
                .debug_tuple("CompletableResult")
                .field(&*outcome)
                .finish(),
        }
    }
}

impl<T> ResultView<T> for CompletableResult<T> {
    fn inspect<R, F>(&self, f: F) -> R
    where
        F: FnOnce(Option<&Outcome<T>>) -> R,
    {
        let outcome = self.resolved();
        f(outcome.as_deref())
    }
}

impl<T> AsyncResult<T> for CompletableResult<T> {
    fn try_resolve(&self, outcome: Outcome<T>) -> bool {
        let (outcome, handler, exception_handler) = {
            let mut inner = self.inner.lock();
            if let ResultState::Resolved(current) = &inner.state {
                tracing::debug!(
                    current = current.kind(),
                    attempted = outcome.kind(),
                    "result.complete.rejected"
                );
                return false;
            }
            let outcome = Arc::new(outcome);
            inner.state = ResultState::Resolved(outcome.clone());
            (outcome, inner.handler.take(), inner.exception_handler.take())
        };
        match &*outcome {
            Outcome::Succeeded(_) => {
                tracing::trace!(has_handler = handler.is_some(), "result.complete")
            }
            Outcome::Failed(cause) => {
                tracing::trace!(has_handler = handler.is_some(), cause = %cause, "result.fail")
            }
        }

        if let Outcome::Failed(cause) = &*outcome {
            if let Some(exception_handler) = exception_handler {
                exception_handler(cause);
            }
        }
        if let Some(handler) = handler {
            handler(&outcome);
        }
        true
    }

    fn set_handler<F>(&self, handler: F)
    where
        F: FnOnce(&Outcome<T>) + Send + 'static,
    {
        let mut handler = Some(handler);
        let previous = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            match &inner.state {
                ResultState::Resolved(outcome) => Err(outcome.clone()),
                ResultState::Pending => Ok(inner
                    .handler
                    .replace(Box::new(handler.take().expect("handler present")))),
            }
        };
        // The replaced handler is dropped only after the lock is released.
        match previous {
            Ok(Some(_replaced)) => tracing::trace!("result.handler.replaced"),
            Ok(None) => {}
            Err(outcome) => {
                tracing::trace!(outcome = outcome.kind(), "result.handler.immediate");
                if let Some(handler) = handler.take() {
                    handler(&outcome);
                }
            }
        }
    }

    fn set_exception_handler<F>(&self, handler: F)
    where
        F: FnOnce(&Cause) + Send + 'static,
    {
        let mut handler = Some(handler);
        let previous = {
            let mut guard = self.inner.lock();
            let inner = &mut *guard;
            match &inner.state {
                ResultState::Resolved(outcome) => Err(outcome.clone()),
                ResultState::Pending => Ok(inner
                    .exception_handler
                    .replace(Box::new(handler.take().expect("handler present")))),
            }
        };
        match previous {
            Ok(replaced) => drop(replaced),
            Err(outcome) => {
                if let Outcome::Failed(cause) = &*outcome {
                    if let Some(handler) = handler.take() {
                        handler(cause);
                    }
                }
            }
        }
    }
}
