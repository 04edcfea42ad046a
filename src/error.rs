//! Error taxonomy for promises and tasks.
//!
//! Every result slot in this crate carries a [`TaskError`] on the failure
//! path. The type is cheap to clone because a completed promise hands the
//! identical error to arbitrarily many concurrent readers.

use std::sync::Arc;

use thiserror::Error;

use crate::cancel::CancelReason;

/// The error type produced by promise readers and task combinators.
///
/// The combinators never reinterpret or suppress task errors; a caller task's
/// error travels verbatim through [`then`](crate::then) chains and
/// [`wait`](crate::wait) joins until a reader observes it.
#[derive(Clone, Debug, Error)]
pub enum TaskError {
    /// Returned by [`Promise::try_get`](crate::Promise::try_get) when the task
    /// behind the promise has not completed yet. Fully recoverable; poll again
    /// or switch to the blocking [`get`](crate::Promise::get).
    #[error("incomplete")]
    Incomplete,

    /// The context's cancellation signal fired before the wrapped task
    /// completed. Carries the reason supplied by whoever cancelled.
    #[error("{0}")]
    Cancelled(CancelReason),

    /// An error returned by a caller-supplied task, relayed as-is.
    #[error(transparent)]
    Failed(Arc<dyn std::error::Error + Send + Sync + 'static>),
}

impl TaskError {
    /// Wraps an arbitrary error value as a task failure.
    ///
    /// Accepts anything convertible into a boxed error, including plain
    /// strings.
    ///
    /// # Example
    /// ```
    /// # use promix::TaskError;
    /// #
    /// let err = TaskError::failed("upstream unavailable");
    /// assert_eq!(err.to_string(), "upstream unavailable");
    /// ```
    pub fn failed<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        TaskError::Failed(Arc::from(err.into()))
    }
}
