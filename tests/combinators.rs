use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use promix::{Context, TaskError, Waiting, run, task_fn, then, wait};

#[tokio::test(flavor = "multi_thread")]
async fn run_then_chain() {
    let ctx = Context::background();
    let doubled = run(ctx.clone(), 10, task_fn(|_ctx, n: i32| async move { Ok(n * 2) }));
    let rendered = then(
        ctx,
        &doubled,
        task_fn(|_ctx, n: i32| async move { Ok(n.to_string()) }),
    );

    let result = rendered.get().await;
    assert_eq!(result.unwrap(), "20", "Chained result should be \"20\"");
}

#[tokio::test(flavor = "multi_thread")]
async fn then_skips_continuation_on_predecessor_error() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let invoked_cl = Arc::clone(&invoked);

    let ctx = Context::background();
    let failed = run(
        ctx.clone(),
        (),
        task_fn(|_ctx, ()| async { Err::<i32, _>(TaskError::failed("predecessor failed")) }),
    );
    let chained = then(
        ctx,
        &failed,
        task_fn(move |_ctx, n: i32| {
            let invoked = Arc::clone(&invoked_cl);
            async move {
                invoked.fetch_add(1, Ordering::Relaxed);
                Ok(n + 1)
            }
        }),
    );

    let err = chained.get().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "predecessor failed",
        "Predecessor error should propagate unchanged"
    );
    assert_eq!(
        invoked.load(Ordering::Relaxed),
        0,
        "Continuation should never be invoked"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn wait_returns_after_every_handle_completes() {
    let completed = Arc::new(AtomicUsize::new(0));
    let completed_cl1 = Arc::clone(&completed);
    let completed_cl2 = Arc::clone(&completed);
    let completed_cl3 = Arc::clone(&completed);

    let ctx = Context::background();
    let number = run(
        ctx.clone(),
        6,
        task_fn(move |_ctx, n: i32| {
            let completed = Arc::clone(&completed_cl1);
            async move {
                std::thread::sleep(Duration::from_millis(60));
                completed.fetch_add(1, Ordering::Relaxed);
                Ok(n * 7)
            }
        }),
    );
    let text = run(
        ctx.clone(),
        "two",
        task_fn(move |_ctx, s: &'static str| {
            let completed = Arc::clone(&completed_cl2);
            async move {
                std::thread::sleep(Duration::from_millis(20));
                completed.fetch_add(1, Ordering::Relaxed);
                Ok(s.to_string())
            }
        }),
    );
    let unit = run(
        ctx,
        (),
        task_fn(move |_ctx, ()| {
            let completed = Arc::clone(&completed_cl3);
            async move {
                completed.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
        }),
    );

    let result = wait([&number as &dyn Waiting, &text, &unit]).await;
    assert!(result.is_ok(), "Join over successful handles should be Ok");
    assert_eq!(
        completed.load(Ordering::Relaxed),
        3,
        "wait should return only after all three handles completed"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn wait_surfaces_first_error() {
    let ctx = Context::background();
    let slow_ok = run(
        ctx.clone(),
        1,
        task_fn(|_ctx, n: i32| async move {
            std::thread::sleep(Duration::from_millis(250));
            Ok(n)
        }),
    );
    let failing = run(
        ctx,
        (),
        task_fn(|_ctx, ()| async {
            std::thread::sleep(Duration::from_millis(10));
            Err::<(), _>(TaskError::failed("join failure"))
        }),
    );

    let err = wait([&slow_ok as &dyn Waiting, &failing]).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "join failure",
        "The first error should be surfaced"
    );

    // The straggler keeps running in the background and still completes.
    assert_eq!(
        slow_ok.get().await.unwrap(),
        1,
        "Slow handle should finish naturally after the early return"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn wait_with_no_handles() {
    let handles: [&dyn Waiting; 0] = [];
    assert!(
        wait(handles).await.is_ok(),
        "An empty join should be an immediate no-op"
    );
}
