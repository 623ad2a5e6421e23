//! Bridges between results and a host runtime's futures.
//!
//! Both directions are thin: a [`Suspended`] future parks a task until a
//! result resolves, and [`from_future`] turns an external future into a
//! result. Neither spawns anything; polling stays with the caller's runtime.
use std::future::{Future, IntoFuture};
use std::mem;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;

use crate::{AsyncResult, Cause, CompletableResult, Error, Failed, Outcome, Result, Succeeded};

#[derive(Debug)]
enum WakerState {
    Fresh,
    Tainted,
}

struct Slot<T> {
    outcome: Option<Outcome<T>>,
    waker: std::result::Result<Waker, WakerState>,
}

/// One-shot resume side, installed as the result's handler.
struct Resumer<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Resumer<T> {
    fn resume(self, outcome: Outcome<T>) {
        let mut slot = self.slot.lock();
        slot.outcome = Some(outcome);
        if let Ok(waker) = mem::replace(&mut slot.waker, Err(WakerState::Tainted)) {
            waker.wake()
        }
    }
}

impl<T> Drop for Resumer<T> {
    /// If the handler is dropped unfired, wake the waiter so it can observe
    /// the abandonment.
    fn drop(&mut self) {
        let mut slot = self.slot.lock();
        if let Ok(waker) = mem::replace(&mut slot.waker, Err(WakerState::Tainted)) {
            waker.wake()
        }
    }
}

/// A future resolving when its result does.
///
/// Yields the value (or `None` for an empty success), [`Error::Failed`] with
/// the cause, or [`Error::Abandoned`] if the result was dropped, or its
/// handler slot overwritten, before it resolved.
///
/// # Examples
///
/// ```
/// use completable_result::{AsyncResult, CompletableResult};
/// use futures::executor::block_on;
/// use std::thread;
///
/// let result = CompletableResult::<String>::new();
/// let waiter = result.clone();
/// let task = thread::spawn(move || block_on(async { waiter.await }));
/// result.complete("Hi".into()).unwrap();
/// let received = task.join().expect("The waiting thread has panicked.");
/// assert_eq!(received.unwrap().as_deref(), Some("Hi"));
/// ```
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Suspended<T> {
    slot: Arc<Mutex<Slot<T>>>,
}

impl<T> Suspended<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Takes over `result`'s handler slot.
    pub fn new<R>(result: &R) -> Self
    where
        R: AsyncResult<T> + ?Sized,
    {
        let slot = Arc::new(Mutex::new(Slot {
            outcome: None,
            waker: Err(WakerState::Fresh),
        }));
        let resumer = Resumer { slot: slot.clone() };
        result.set_handler(move |outcome| resumer.resume(outcome.clone()));
        Self { slot }
    }
}

impl<T> Future for Suspended<T> {
    type Output = Result<Option<T>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut slot = self.slot.lock();
        match slot.outcome.take() {
            Some(outcome) => Poll::Ready(outcome.into_result().map_err(Error::Failed)),
            None => match mem::replace(&mut slot.waker, Ok(cx.waker().clone())) {
                Err(WakerState::Tainted) => Poll::Ready(Err(Error::Abandoned)),
                _ => Poll::Pending,
            },
        }
    }
}

macro_rules! into_suspended {
    ($ty:ident) => {
        impl<T> IntoFuture for $ty<T>
        where
            T: Clone + Send + Sync + 'static,
        {
            type Output = Result<Option<T>>;
            type IntoFuture = Suspended<T>;

            fn into_future(self) -> Self::IntoFuture {
                Suspended::new(&self)
            }
        }
    };
}

into_suspended!(CompletableResult);
into_suspended!(Succeeded);
into_suspended!(Failed);

/// Drives a new result from an external future.
///
/// Returns the pending result and the driver future; the caller's runtime
/// must poll the driver, which completes the result when `source` finishes.
pub fn from_future<T, E, Fut>(source: Fut) -> (CompletableResult<T>, impl Future<Output = ()>)
where
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Into<Cause>,
{
    from_future_observed(source, |_: &Outcome<T>| {})
}

/// Like [`from_future`], with `on_done` seeing the outcome exactly once,
/// just before the result is completed with it.
pub fn from_future_observed<T, E, Fut, O>(
    source: Fut,
    on_done: O,
) -> (CompletableResult<T>, impl Future<Output = ()>)
where
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Into<Cause>,
    O: FnOnce(&Outcome<T>),
{
    let result = CompletableResult::new();
    let target = result.clone();
    let driver = async move {
        let outcome = Outcome::from_result(source.await);
        tracing::trace!(outcome = outcome.kind(), "result.bridge.resolved");
        on_done(&outcome);
        target.try_resolve(outcome);
    };
    (result, driver)
}
