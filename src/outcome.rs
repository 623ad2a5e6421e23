use crate::{Cause, ResultView};

/// A resolved result: either a success, possibly without a value, or a
/// failure with its cause.
///
/// Handlers receive the outcome by reference, and since `Outcome` is itself a
/// [`ResultView`] they can query it the same way they would query the result.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Succeeded(Option<T>),
    Failed(Cause),
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Outcome::Succeeded(Some(value))
    }

    pub fn empty() -> Self {
        Outcome::Succeeded(None)
    }

    pub fn failure<C: Into<Cause>>(cause: C) -> Self {
        Outcome::Failed(cause.into())
    }

    pub fn from_result<E: Into<Cause>>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::success(value),
            Err(err) => Outcome::failure(err),
        }
    }

    pub fn into_result(self) -> Result<Option<T>, Cause> {
        match self {
            Outcome::Succeeded(value) => Ok(value),
            Outcome::Failed(cause) => Err(cause),
        }
    }

    pub fn as_result(&self) -> Result<Option<&T>, &Cause> {
        match self {
            Outcome::Succeeded(value) => Ok(value.as_ref()),
            Outcome::Failed(cause) => Err(cause),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Outcome::Succeeded(_) => "succeeded",
            Outcome::Failed(_) => "failed",
        }
    }
}

impl<T> ResultView<T> for Outcome<T> {
    fn inspect<R, F>(&self, f: F) -> R
    where
        F: FnOnce(Option<&Outcome<T>>) -> R,
    {
        f(Some(self))
    }
}

#[cfg(test)]
mod tests {
    use super::Outcome;
    use crate::{Cause, ResultView};

    #[test]
    fn test_outcome_is_a_view() {
        let ok = Outcome::success(3);
        assert!(ok.succeeded());
        assert!(ok.has_result());
        assert_eq!(ok.result(), Some(3));

        let empty = Outcome::<i32>::empty();
        assert!(empty.succeeded());
        assert!(empty.result_is_empty());
        assert_eq!(empty.result_or_default(7), 7);

        let cause = Cause::msg("nope");
        let failed = Outcome::<i32>::failure(cause.clone());
        assert!(failed.failed());
        assert_eq!(failed.cause(), Some(cause.clone()));
        assert_eq!(failed.into_result(), Err(cause));
    }

    #[test]
    fn test_outcome_from_result() {
        let parsed: Outcome<i32> = Outcome::from_result("12".parse::<i32>());
        assert_eq!(parsed, Outcome::success(12));

        let broken: Outcome<i32> = Outcome::from_result("x".parse::<i32>());
        let cause = broken.cause().expect("parse failure");
        assert!(cause.downcast_ref::<std::num::ParseIntError>().is_some());
    }
}
