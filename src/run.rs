//! Launching tasks and chaining continuations.

use crate::{cancel::Context, pool, promise::Promise, task::Task};

/// Launches a task concurrently and returns a handle to its eventual result.
///
/// The promise is returned immediately, no matter how long the task takes;
/// the task itself executes on the shared thread pool. When it finishes, its
/// result is written to the promise's slot and every reader is woken, exactly
/// once. There are no retries and no panic recovery.
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
pub fn run<In, T>(ctx: Context, input: In, task: T) -> Promise<T::Output>
where
    T: Task<In>,
    T::Output: Send + 'static,
{
    let promise = Promise::new();
    let completer = promise.clone();
    let future = task.run(ctx, input);
    pool::get().spawn_ok(async move {
        completer.complete(future.await);
    });
    promise
}

/// Chains a continuation task onto a promise, returning a new promise
/// immediately.
///
/// Concurrently, the continuation waits for the predecessor to complete. If
/// the predecessor failed, its error is propagated into the new promise
/// as-is and the continuation is never invoked. Otherwise the continuation
/// runs under the same context with the predecessor's value as input, and
/// its result completes the new promise. The predecessor's completion signal
/// guarantees the continuation observes a fully written result.
///
/// # Example
/// ```
/// # use promix::{Context, run, task_fn, then};
/// #
/// # async {
/// let ctx = Context::background();
/// let doubled = run(ctx.clone(), 10, task_fn(|_ctx, n: i32| async move { Ok(n * 2) }));
/// let rendered = then(ctx, &doubled, task_fn(|_ctx, n: i32| async move { Ok(n.to_string()) }));
/// assert_eq!(rendered.get().await.unwrap(), "20");
/// # };
/// ```
pub fn then<T, K>(ctx: Context, promise: &Promise<T>, task: K) -> Promise<K::Output>
where
    T: Clone + Send + 'static,
    K: Task<T> + 'static,
    K::Output: Send + 'static,
{
    let next = Promise::new();
    let completer = next.clone();
    let predecessor = promise.clone();
    pool::get().spawn_ok(async move {
        match predecessor.get().await {
            Ok(value) => completer.complete(task.run(ctx, value).await),
            Err(err) => completer.complete(Err(err)),
        }
    });
    next
}
