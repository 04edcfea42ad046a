//! Joining over heterogeneous promise handles.

use futures::{StreamExt, channel::mpsc};

use crate::{error::TaskError, pool, promise::Waiting};

/// Waits for a set of promises of possibly differing value types.
///
/// Spawns one observer per handle on the shared thread pool and blocks the
/// caller until either the first error is observed, which is returned
/// immediately, or every handle has completed without error, in which case
/// `Ok(())` is returned. First error wins: when several handles fail
/// concurrently only one error, nondeterministically selected, is surfaced.
///
/// Observers that are still running when an error is returned keep running to
/// natural completion in the background; their reports are discarded. An
/// empty set of handles returns `Ok(())` right away.
///
/// # Example
/// ```
/// # use promix::{Context, Waiting, run, task_fn, wait};
/// #
/// # async {
/// let ctx = Context::background();
/// let number = run(ctx.clone(), 3, task_fn(|_ctx, n: i32| async move { Ok(n * n) }));
/// let text = run(ctx, "tag", task_fn(|_ctx, s: &'static str| async move { Ok(s.to_uppercase()) }));
/// wait([&number as &dyn Waiting, &text]).await.unwrap();
/// # };
/// ```
pub async fn wait<'a, I>(handles: I) -> Result<(), TaskError>
where
    I: IntoIterator<Item = &'a dyn Waiting>,
{
    let observers: Vec<_> = handles.into_iter().map(|handle| handle.wait()).collect();
    if observers.is_empty() {
        return Ok(());
    }

    // Sized to the observer count so `try_send` never drops a report while
    // the receiver is still listening.
    let (sender, mut receiver) = mpsc::channel(observers.len());
    for observer in observers {
        let mut sender = sender.clone();
        pool::get().spawn_ok(async move {
            let result = observer.await;
            let _ = sender.try_send(result);
        });
    }
    drop(sender);

    // The stream ends once every observer has reported and dropped its
    // sender, so reaching `Ok` means all handles actually completed.
    while let Some(result) = receiver.next().await {
        result?;
    }
    Ok(())
}
