use crate::{AsyncResult, Cause, CompletableResult, Failed, Outcome, Succeeded};

/// Creation point for results.
///
/// A plain value: construct one where it is needed or pass it along; there is
/// no process-wide instance.
///
/// # Examples
///
/// ```
/// use completable_result::{ResultFactory, ResultView};
///
/// let factory = ResultFactory::new();
/// assert_eq!(factory.wrap(|| "4".parse::<i32>()).result(), Some(4));
/// assert!(factory.wrap(|| "four".parse::<i32>()).failed());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultFactory;

impl ResultFactory {
    pub const fn new() -> Self {
        ResultFactory
    }

    pub fn pending<T>(&self) -> CompletableResult<T> {
        CompletableResult::new()
    }

    pub fn succeeded<T>(&self, value: T) -> Succeeded<T> {
        Succeeded::new(value)
    }

    pub fn succeeded_empty<T>(&self) -> Succeeded<T> {
        Succeeded::empty()
    }

    pub fn failed<T, C: Into<Cause>>(&self, cause: C) -> Failed<T> {
        Failed::new(cause)
    }

    pub fn failed_msg<T, M: Into<String>>(&self, message: M) -> Failed<T> {
        Failed::new(Cause::msg(message))
    }

    /// Runs `computation` now, on this thread, and captures its outcome.
    /// The returned result is never pending.
    pub fn wrap<T, E, F>(&self, computation: F) -> CompletableResult<T>
    where
        E: Into<Cause>,
        F: FnOnce() -> Result<T, E>,
    {
        self.wrap_optional(|| computation().map(Some))
    }

    /// Like [`wrap`](Self::wrap), but a `None` return yields an empty success.
    pub fn wrap_optional<T, E, F>(&self, computation: F) -> CompletableResult<T>
    where
        E: Into<Cause>,
        F: FnOnce() -> Result<Option<T>, E>,
    {
        let outcome = match computation() {
            Ok(Some(value)) => Outcome::success(value),
            Ok(None) => Outcome::empty(),
            Err(err) => Outcome::failure(err),
        };
        let result = CompletableResult::new();
        result.try_resolve(outcome);
        result
    }
}
