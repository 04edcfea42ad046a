//! Defines the `Promise` handle and the `Waiting` join capability.
//!
//! A `Promise` is a one-shot container for a task's eventual result. Exactly
//! one producer, the detached future executing the task, writes the result
//! slot; it does so at most once. Any number of readers may hold clones of
//! the handle and observe the identical result after completion.

use std::{
    sync::{Arc, Mutex},
    task::{Poll, Waker},
};

use futures::future::BoxFuture;

use crate::error::TaskError;

enum State<V> {
    Pending { wakers: Vec<Waker> },
    Complete(Result<V, TaskError>),
}

struct Inner<V> {
    state: Mutex<State<V>>,
}

/// A handle to the eventual result of a task launched with
/// [`run`](crate::run) or chained with [`then`](crate::then).
///
/// The handle is cheap to clone regardless of `V`; every clone points at the
/// same result slot. The slot transitions from pending to complete exactly
/// once, and the mutex release on that write is what makes the result visible
/// to every reader woken afterwards, so no reader can observe a partial
/// write.
pub struct Promise<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for Promise<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> Promise<V> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State::Pending { wakers: Vec::new() }),
            }),
        }
    }

    // Writes the result slot and wakes every registered reader. A second
    // completion would violate the single-writer protocol and is ignored.
    pub(crate) fn complete(&self, result: Result<V, TaskError>) {
        let mut state = self.inner.state.lock().unwrap();
        if let State::Pending { wakers } = &mut *state {
            let wakers = std::mem::take(wakers);
            *state = State::Complete(result);
            drop(state);
            for waker in wakers {
                waker.wake();
            }
        }
    }

    fn poll_complete(&self, cx: &mut std::task::Context<'_>) -> Poll<()> {
        let mut state = self.inner.state.lock().unwrap();
        match &mut *state {
            State::Complete(_) => Poll::Ready(()),
            State::Pending { wakers } => {
                wakers.push(cx.waker().clone());
                Poll::Pending
            }
        }
    }

    async fn completed(&self) {
        std::future::poll_fn(|cx| self.poll_complete(cx)).await;
    }

    /// Returns `true` once the task behind this promise has completed.
    pub fn is_complete(&self) -> bool {
        matches!(&*self.inner.state.lock().unwrap(), State::Complete(_))
    }

    /// Waits for the task to complete and returns its result.
    ///
    /// Safe for many concurrent callers; all of them observe the identical
    /// result. If the task has already completed, returns immediately.
    ///
    /// # Example
    /// ```
    /// # use promix::{Context, run, task_fn};
    /// #
    /// # async {
    /// let ctx = Context::background();
    /// let promise = run(ctx, 10, task_fn(|_ctx, n: i32| async move { Ok(n * 2) }));
    /// assert_eq!(promise.get().await.unwrap(), 20);
    /// # };
    /// ```
    pub async fn get(&self) -> Result<V, TaskError>
    where
        V: Clone,
    {
        self.completed().await;
        match &*self.inner.state.lock().unwrap() {
            State::Complete(result) => result.clone(),
            State::Pending { .. } => unreachable!("promise woken before completion"),
        }
    }

    /// Returns the result without waiting.
    ///
    /// If the task has not completed yet, returns
    /// [`TaskError::Incomplete`] immediately and has no side effects; the
    /// caller may poll again or switch to [`get`](Promise::get). After
    /// completion this behaves exactly like `get`.
    pub fn try_get(&self) -> Result<V, TaskError>
    where
        V: Clone,
    {
        match &*self.inner.state.lock().unwrap() {
            State::Complete(result) => result.clone(),
            State::Pending { .. } => Err(TaskError::Incomplete),
        }
    }

    /// Waits for the task to complete, discarding the value and returning
    /// only the error, if any.
    ///
    /// This is the operation exposed through the [`Waiting`] capability,
    /// which lets promises of differing value types be joined with
    /// [`wait`](crate::wait).
    pub async fn wait(&self) -> Result<(), TaskError> {
        self.completed().await;
        match &*self.inner.state.lock().unwrap() {
            State::Complete(Ok(_)) => Ok(()),
            State::Complete(Err(err)) => Err(err.clone()),
            State::Pending { .. } => unreachable!("promise woken before completion"),
        }
    }
}

/// The narrow capability used by [`wait`](crate::wait) to join promises of
/// heterogeneous value types.
///
/// Implemented by every [`Promise`] regardless of its value type; the join
/// only needs a blocking wait that yields the error, never the value.
pub trait Waiting: Send + Sync {
    /// Returns a future that resolves once the underlying promise completes,
    /// yielding its error, if any.
    fn wait(&self) -> BoxFuture<'static, Result<(), TaskError>>;
}

impl<V: Send + 'static> Waiting for Promise<V> {
    fn wait(&self) -> BoxFuture<'static, Result<(), TaskError>> {
        let promise = self.clone();
        Box::pin(async move { Promise::wait(&promise).await })
    }
}
