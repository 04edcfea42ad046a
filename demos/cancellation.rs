use std::time::Duration;

use promix::{Context, run, task_ext::TaskExt, task_fn};

#[tokio::main]
async fn main() {
    let (ctx, cancellation) = Context::cancellable();

    let slow_report = task_fn(|_ctx, name: &'static str| async move {
        // Simulates work that is slower than the caller is willing to wait.
        std::thread::sleep(Duration::from_secs(3));
        Ok(format!("{name} report"))
    })
    .with_cancellation();

    let promise = run(ctx, "quarterly", slow_report);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        cancellation.cancel_with("operator abort");
    });

    match promise.get().await {
        Ok(report) => println!("Finished: {report}"),
        Err(err) => println!("Gave up waiting: {err}"),
    }
}
