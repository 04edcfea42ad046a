use promix::{Context, run, task_fn, then};

#[tokio::main]
async fn main() {
    let ctx = Context::background();

    let doubled = run(ctx.clone(), 10, task_fn(|_ctx, n: i32| async move { Ok(n * 2) }));
    let rendered = then(
        ctx,
        &doubled,
        task_fn(|_ctx, n: i32| async move { Ok(n.to_string()) }),
    );

    match rendered.get().await {
        Ok(value) => println!("Chained result: {value}"),
        Err(err) => eprintln!("Chain failed: {err}"),
    }
}
