use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use routeflow_core::{
    Executor, Handler, HandlerError, HandlerRegistry, RunCtx, StepResult, Transition, WorkflowBuilder,
};
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
struct BenchParams {
    retries: usize,
}

struct Pass;

#[async_trait]
impl Handler<BenchParams> for Pass {
    async fn handle(&self, _ctx: &RunCtx<'_, BenchParams>) -> Result<StepResult, HandlerError> {
        Ok(StepResult::success(Value::Null))
    }
}

// Retries until it has been visited `retries` times.
struct Flaky;

#[async_trait]
impl Handler<BenchParams> for Flaky {
    async fn handle(&self, ctx: &RunCtx<'_, BenchParams>) -> Result<StepResult, HandlerError> {
        let seen = ctx.results().history(ctx.handler().as_str()).count();
        if seen < ctx.params().retries {
            Ok(StepResult::transition(Transition::Retry, Value::Null))
        } else {
            Ok(StepResult::success(Value::Null))
        }
    }
}

fn benchmark_linear_workflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("workflow_execution");
    group.measurement_time(Duration::from_secs(10));

    let mut builder = WorkflowBuilder::new().node("step-0");
    for i in 1..50 {
        builder = builder.on_success(format!("step-{i}")).node(format!("step-{i}"));
    }
    let config = builder.build();

    let mut registry = HandlerRegistry::<BenchParams>::new();
    for node in config.nodes() {
        registry.register(node.handler().clone(), Pass);
    }
    let executor = Executor::new(registry);
    let params = BenchParams { retries: 0 };

    group.bench_function("linear_50_steps", |b| {
        b.to_async(tokio::runtime::Runtime::new().unwrap())
            .iter(|| async { black_box(executor.execute(&config, &params).await.unwrap()) })
    });

    group.finish();
}

fn benchmark_retry_loop(c: &mut Criterion) {
    let mut group = c.benchmark_group("workflow_execution");

    let config = WorkflowBuilder::new()
        .node("fetch")
        .on_retry("fetch")
        .on_success("store")
        .node("store")
        .build();
    let registry = HandlerRegistry::<BenchParams>::new().with("fetch", Flaky).with("store", Pass);
    let executor = Executor::new(registry).with_max_steps(1_000);
    let params = BenchParams { retries: 100 };

    group.bench_function("retry_loop_100", |b| {
        b.to_async(tokio::runtime::Runtime::new().unwrap())
            .iter(|| async { black_box(executor.execute(&config, &params).await.unwrap()) })
    });

    group.finish();
}

criterion_group!(benches, benchmark_linear_workflow, benchmark_retry_loop);
criterion_main!(benches);
