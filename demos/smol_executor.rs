use std::time::Duration;

use macro_rules_attribute::apply;
use promix::{Context, TaskError, run, task_fn, then};
use smol::Timer;
use smol_macros::{Executor, main};

#[apply(main!)]
async fn main(ex: &Executor<'_>) {
    let ctx = Context::background();

    let parsed = run(
        ctx.clone(),
        "21",
        task_fn(|_ctx, s: &'static str| async move { s.parse::<i32>().map_err(TaskError::failed) }),
    );
    let doubled = then(ctx, &parsed, task_fn(|_ctx, n: i32| async move { Ok(n * 2) }));

    ex.spawn(async move {
        println!("Doubled: {:?}", doubled.get().await);
    })
    .detach();

    println!("After promise spawn");
    Timer::after(Duration::from_secs(1)).await;
}
