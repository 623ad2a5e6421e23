//! The failure cause carried inside a failed result.
//!
//! A `Cause` is data, not a raised error: it is stored in the `Failed` state
//! and handed to observers. Any `std::error::Error` converts into one, so a
//! callback can return its own error type and have it land here unchanged.
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
enum Reported {
    #[error("{0}")]
    Message(String),
    #[error("cause not reported")]
    NotReported,
}

/// Shared, cheaply clonable failure cause.
///
/// Two causes are equal when they are the same reported error, i.e. clones
/// of one `Cause`.
///
/// # Examples
///
/// ```
/// use completable_result::Cause;
///
/// let cause = Cause::msg("disk full");
/// assert_eq!(cause.to_string(), "disk full");
/// assert_eq!(cause.clone(), cause);
/// assert!(Cause::msg("").is_not_reported());
/// ```
#[derive(Clone)]
pub struct Cause {
    error: Arc<dyn StdError + Send + Sync + 'static>,
}

impl Cause {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            error: Arc::new(error),
        }
    }

    /// A cause made of a plain message. Empty or blank messages normalize to
    /// [`Cause::not_reported`].
    pub fn msg(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            return Self::not_reported();
        }
        Self::new(Reported::Message(message))
    }

    /// The generic cause substituted when a failure arrives without one.
    pub fn not_reported() -> Self {
        Self::new(Reported::NotReported)
    }

    /// Normalizes an absent cause.
    pub fn or_not_reported(cause: Option<Cause>) -> Self {
        cause.unwrap_or_else(Self::not_reported)
    }

    pub fn is_not_reported(&self) -> bool {
        matches!(self.downcast_ref::<Reported>(), Some(Reported::NotReported))
    }

    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.error.downcast_ref::<E>()
    }

    pub fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.error
    }
}

impl<E> From<E> for Cause
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl PartialEq for Cause {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.error, &other.error)
    }
}

impl Eq for Cause {}

impl fmt::Debug for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.error, f)
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.error, f)
    }
}
