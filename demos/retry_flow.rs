// demos/retry_flow.rs
use routeflow::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    routeflow::init();

    // Graphs can also come from JSON; `null` marks a terminal transition.
    let config = WorkflowConfig::from_json(
        r#"{
            "nodes": [
                {"handler": "fetch", "transitions": {"onRetry": "fetch", "onSuccess": "store", "onCancel": null}},
                {"handler": "store", "transitions": {"onSuccess": "archive"}}
            ]
        }"#,
    )?;

    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    let handlers = HandlerRegistry::<()>::new()
        .with(
            "fetch",
            handler_fn(move |_: ()| {
                let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if attempt < 3 {
                        println!("fetch: attempt {attempt} failed, retrying");
                        Ok::<_, HandlerError>(StepResult::transition(Transition::Retry, attempt))
                    } else {
                        println!("fetch: attempt {attempt} succeeded");
                        Ok(StepResult::success(attempt))
                    }
                }
            }),
        )
        .with("store", handler_fn(|_: ()| async { Ok::<_, HandlerError>(StepResult::success("stored")) }));

    for issue in analysis::check(&config, &handlers) {
        println!("check: {issue}");
    }
    println!("has cycle: {}", analysis::has_cycle(&config));

    let executor = Executor::new(&handlers).with_max_steps(10);
    match executor.execute(&config, &()).await {
        Ok(run) => {
            println!("completed in {} steps", run.len());
            for edge in run.trail() {
                println!("  {} -[{}]-> {:?}", edge.from, edge.transition, edge.to);
            }
        }
        Err(err) => {
            println!("run failed: {err}");
            if let Some(partial) = err.partial_results() {
                println!("  {} steps ran before the failure", partial.len());
            }
        }
    }
    println!("fetch attempts: {}", attempts.load(Ordering::SeqCst));
    Ok(())
}
