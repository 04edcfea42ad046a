use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use promix::{Context, TaskError, run, task_fn};

#[tokio::test(flavor = "multi_thread")]
async fn promise_get_and_try_get_after_completion() {
    let ctx = Context::background();
    let promise = run(ctx, 4, task_fn(|_ctx, n: i32| async move { Ok(n + 1) }));

    let result = promise.get().await;
    assert_eq!(result.unwrap(), 5, "Task result should be 5");

    // A completed promise keeps answering without blocking.
    for _ in 0..3 {
        let result = promise.try_get();
        assert_eq!(result.unwrap(), 5, "Completed promise should keep returning 5");
    }
    assert!(promise.is_complete(), "Promise should report completion");
}

#[tokio::test(flavor = "multi_thread")]
async fn try_get_before_completion_is_incomplete() {
    let ctx = Context::background();
    let promise = run(
        ctx,
        (),
        task_fn(|_ctx, ()| async {
            std::thread::sleep(Duration::from_millis(400));
            Ok("done")
        }),
    );

    for _ in 0..5 {
        assert!(
            matches!(promise.try_get(), Err(TaskError::Incomplete)),
            "Polling before completion should report Incomplete"
        );
        futures_lite::future::yield_now().await;
    }

    assert_eq!(
        promise.get().await.unwrap(),
        "done",
        "Blocking read should still observe the final value"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_getters_observe_one_result() {
    let runs = Arc::new(AtomicUsize::new(0));
    let runs_cl = Arc::clone(&runs);

    let ctx = Context::background();
    let promise = run(
        ctx,
        7,
        task_fn(move |_ctx, n: u32| {
            let runs = Arc::clone(&runs_cl);
            async move {
                runs.fetch_add(1, Ordering::Relaxed);
                std::thread::sleep(Duration::from_millis(50));
                Ok(n * 3)
            }
        }),
    );

    let mut readers = Vec::new();
    for _ in 0..8 {
        let promise = promise.clone();
        readers.push(tokio::spawn(async move { promise.get().await }));
    }
    for reader in readers {
        let result = reader.await.unwrap();
        assert_eq!(result.unwrap(), 21, "Every reader should observe 21");
    }
    assert_eq!(
        runs.load(Ordering::Relaxed),
        1,
        "Task should run exactly once regardless of reader count"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn task_error_relayed_to_every_reader() {
    let ctx = Context::background();
    let promise = run(
        ctx,
        (),
        task_fn(|_ctx, ()| async { Err::<u8, _>(TaskError::failed("boom")) }),
    );

    let err = promise.wait().await.unwrap_err();
    assert_eq!(err.to_string(), "boom", "wait should relay the task error");
    let err = promise.get().await.unwrap_err();
    assert_eq!(err.to_string(), "boom", "get should relay the same error");
    let err = promise.try_get().unwrap_err();
    assert_eq!(err.to_string(), "boom", "try_get should relay the same error");
}
