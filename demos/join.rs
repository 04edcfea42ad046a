use std::time::Duration;

use promix::{Context, TaskError, Waiting, run, task_fn, wait};

#[tokio::main]
async fn main() {
    let ctx = Context::background();

    let squared = run(
        ctx.clone(),
        3u64,
        task_fn(|_ctx, n: u64| async move {
            std::thread::sleep(Duration::from_millis(100 * n));
            Ok(n * n)
        }),
    );
    let label = run(
        ctx.clone(),
        "payload",
        task_fn(|_ctx, s: &'static str| async move { Ok(s.to_uppercase()) }),
    );
    let flaky = run(
        ctx,
        (),
        task_fn(|_ctx, ()| async {
            std::thread::sleep(Duration::from_millis(50));
            Err::<(), _>(TaskError::failed("upstream unavailable"))
        }),
    );

    // Handles of three different value types joined through the narrow
    // `Waiting` capability.
    match wait([&squared as &dyn Waiting, &label, &flaky]).await {
        Ok(()) => println!("All handles settled cleanly"),
        Err(err) => println!("First failure: {err}"),
    }
}
