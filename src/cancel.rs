//! Cooperative cancellation contexts.
//!
//! A [`Context`] is threaded through every task invocation. It is read-only
//! from the task's point of view: the owning half, [`Cancellation`], is the
//! only way to cancel. Cancellation is advisory, it makes waiters stop
//! waiting; it never interrupts work that is already running.

use std::{
    fmt,
    sync::{Arc, Mutex},
    task::{Poll, Waker},
};

use crate::error::TaskError;

/// The reason a context was cancelled.
///
/// Retrievable from [`Context::reason`] and carried inside
/// [`TaskError::Cancelled`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CancelReason(Arc<str>);

impl CancelReason {
    fn new(reason: impl Into<String>) -> Self {
        Self(Arc::from(reason.into()))
    }
}

impl Default for CancelReason {
    fn default() -> Self {
        Self::new("context cancelled")
    }
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

enum State {
    Active { wakers: Vec<Waker> },
    Cancelled(CancelReason),
}

struct Inner {
    state: Mutex<State>,
}

impl Inner {
    // One-shot: the first cancellation wins, later calls are ignored.
    fn cancel(&self, reason: CancelReason) {
        let mut state = self.state.lock().unwrap();
        if let State::Active { wakers } = &mut *state {
            let wakers = std::mem::take(wakers);
            *state = State::Cancelled(reason);
            drop(state);
            for waker in wakers {
                waker.wake();
            }
        }
    }

    fn reason(&self) -> Option<CancelReason> {
        match &*self.state.lock().unwrap() {
            State::Cancelled(reason) => Some(reason.clone()),
            State::Active { .. } => None,
        }
    }
}

/// A cancellation context passed to every task invocation.
///
/// Cloning is cheap; all clones observe the same cancellation state. A
/// background context is never cancelled, a cancellable one flips to
/// cancelled exactly once when its [`Cancellation`] handle fires.
#[derive(Clone)]
pub struct Context {
    inner: Option<Arc<Inner>>,
}

impl Context {
    /// Creates a context that is never cancelled.
    #[must_use]
    pub fn background() -> Self {
        Self { inner: None }
    }

    /// Creates a cancellable context together with its owning handle.
    ///
    /// The returned [`Cancellation`] is the only way to cancel the context.
    /// Dropping the handle without calling [`cancel`](Cancellation::cancel)
    /// cancels the context with the default reason, so callers that want the
    /// context to stay live must keep the handle around.
    #[must_use]
    pub fn cancellable() -> (Self, Cancellation) {
        let inner = Arc::new(Inner {
            state: Mutex::new(State::Active { wakers: Vec::new() }),
        });
        let context = Self {
            inner: Some(Arc::clone(&inner)),
        };
        (context, Cancellation { inner })
    }

    /// Returns `true` if the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.reason().is_some()
    }

    /// Returns the cancellation reason, if the context has been cancelled.
    pub fn reason(&self) -> Option<CancelReason> {
        self.inner.as_ref().and_then(|inner| inner.reason())
    }

    /// Returns the cancellation reason as a [`TaskError`], if cancelled.
    pub fn error(&self) -> Option<TaskError> {
        self.reason().map(TaskError::Cancelled)
    }

    /// Returns a future that resolves to the cancellation reason once the
    /// context is cancelled.
    ///
    /// For a background context the returned future never resolves. Any
    /// number of waiters may await the same context concurrently; all of them
    /// are woken by the single cancellation.
    pub fn done(&self) -> Done {
        Done {
            inner: self.inner.clone(),
        }
    }
}

/// The owning half of a cancellable context.
///
/// Obtained from [`Context::cancellable`]. Cancelling is one-shot: the first
/// reason sticks and later cancellations have no effect. Dropping the handle
/// cancels the context with the default reason.
pub struct Cancellation {
    inner: Arc<Inner>,
}

impl Cancellation {
    /// Cancels the context with the default reason.
    pub fn cancel(&self) {
        self.inner.cancel(CancelReason::default());
    }

    /// Cancels the context with the given reason.
    pub fn cancel_with(&self, reason: impl Into<String>) {
        self.inner.cancel(CancelReason::new(reason));
    }

    /// Returns `true` if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.reason().is_some()
    }
}

impl Drop for Cancellation {
    fn drop(&mut self) {
        self.inner.cancel(CancelReason::default());
    }
}

/// Future returned by [`Context::done`].
#[must_use = "futures do nothing unless polled or .awaited"]
pub struct Done {
    inner: Option<Arc<Inner>>,
}

impl Future for Done {
    type Output = CancelReason;

    fn poll(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> Poll<Self::Output> {
        let Some(inner) = &self.inner else {
            // Background context, there is nothing to wait for.
            return Poll::Pending;
        };
        let mut state = inner.state.lock().unwrap();
        match &mut *state {
            State::Cancelled(reason) => Poll::Ready(reason.clone()),
            State::Active { wakers } => {
                wakers.push(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}
