//! Defines the `Task` trait and the cancellation adapter.
//!
//! A `Task` is a polymorphic unit of work: given a cancellation context and
//! an input it produces an output or an error. Tasks are stateless from the
//! combinators' perspective and are usually built from async closures with
//! [`task_fn`]. [`with_cancellation`] adapts any task into one that races its
//! completion against the context's cancellation signal.

use futures::{channel::oneshot, future::BoxFuture};
use pin_project_lite::pin_project;

use crate::{
    cancel::{Context, Done},
    error::TaskError,
    pool,
};

/// A parameterized unit of asynchronous work.
///
/// Implementations receive a read-only [`Context`] and an input and return a
/// boxed future yielding the output or an error. The combinators never retry
/// a task and never recover from panics inside one; a fallible task is
/// expected to report failure through its `Result`.
pub trait Task<In>: Send + Sync {
    /// The value produced on success.
    type Output;

    /// Starts the work for one input, returning its future.
    fn run(&self, ctx: Context, input: In) -> BoxFuture<'static, Result<Self::Output, TaskError>>;
}

/// A [`Task`] built from an async closure. Created with [`task_fn`].
pub struct TaskFn<F> {
    f: F,
}

/// Wraps an async closure `(Context, In) -> Result<Out, TaskError>` into a
/// [`Task`].
///
/// # Example
/// ```
/// # use promix::{Context, run, task_fn};
/// #
/// # async {
/// let double = task_fn(|_ctx, n: i32| async move { Ok(n * 2) });
/// let promise = run(Context::background(), 21, double);
/// assert_eq!(promise.get().await.unwrap(), 42);
/// # };
/// ```
pub fn task_fn<F>(f: F) -> TaskFn<F> {
    TaskFn { f }
}

impl<In, Out, Fut, F> Task<In> for TaskFn<F>
where
    F: Fn(Context, In) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Out, TaskError>> + Send + 'static,
{
    type Output = Out;

    fn run(&self, ctx: Context, input: In) -> BoxFuture<'static, Result<Out, TaskError>> {
        Box::pin((self.f)(ctx, input))
    }
}

/// A [`Task`] adapter that races the wrapped task against cancellation.
/// Created with [`with_cancellation`] or
/// [`TaskExt::with_cancellation`](crate::task_ext::TaskExt::with_cancellation).
pub struct WithCancellation<T> {
    task: T,
}

/// Adapts a task into one with identical input and output types that
/// additionally honors the context's cancellation signal.
///
/// On invocation the wrapped task is detached onto the shared thread pool and
/// the returned future races its completion against [`Context::done`]. If the
/// task finishes first its result is returned verbatim. If cancellation fires
/// first the adapter returns [`TaskError::Cancelled`] with the context's
/// reason right away.
///
/// Cancellation is advisory only: the detached task is never interrupted, it
/// runs to natural completion and its result is discarded once the
/// cancellation path has already returned.
pub fn with_cancellation<T>(task: T) -> WithCancellation<T> {
    WithCancellation { task }
}

impl<In, T> Task<In> for WithCancellation<T>
where
    T: Task<In>,
    T::Output: Send + 'static,
{
    type Output = T::Output;

    fn run(&self, ctx: Context, input: In) -> BoxFuture<'static, Result<T::Output, TaskError>> {
        let future = self.task.run(ctx.clone(), input);
        let (sender, receiver) = oneshot::channel();
        pool::get().spawn_ok(async move {
            let _ = sender.send(future.await);
        });
        Box::pin(Race {
            result: receiver,
            done: ctx.done(),
        })
    }
}

pin_project! {
    struct Race<Out> {
        #[pin]
        result: oneshot::Receiver<Result<Out, TaskError>>,
        #[pin]
        done: Done,
    }
}

impl<Out> Future for Race<Out> {
    type Output = Result<Out, TaskError>;

    fn poll(
        self: std::pin::Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Self::Output> {
        let this = self.project();
        // Completion is preferred when both signals are ready in the same poll.
        if let std::task::Poll::Ready(result) = this.result.poll(cx) {
            return std::task::Poll::Ready(match result {
                Ok(result) => result,
                // The detached task dropped its sender without reporting,
                // which only happens if it panicked.
                Err(dropped) => Err(TaskError::failed(dropped)),
            });
        }
        if let std::task::Poll::Ready(reason) = this.done.poll(cx) {
            return std::task::Poll::Ready(Err(TaskError::Cancelled(reason)));
        }
        std::task::Poll::Pending
    }
}
