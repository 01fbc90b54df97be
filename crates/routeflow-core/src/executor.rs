//! The run loop.
//!
//! Starting at the first node, the executor resolves and invokes one handler
//! at a time, records its result, and picks the next handler from the
//! current node's transitions:
//!
//! 1. an explicit named transition on the result, else
//! 2. `onSuccess` for a success, else
//! 3. `onFail` for a fail, else
//! 4. the result is ambiguous and the run fails.
//!
//! A declared target continues the run, a declared `None` target ends it
//! deliberately, and an undeclared transition ends it gracefully.
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::WorkflowConfig;
use crate::context::RunCtx;
use crate::error::WorkflowError;
use crate::handler::HandlerResolver;
use crate::node::Route;
use crate::results::RunResults;

/// Per-executor run options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorOptions {
    /// Maximum number of handler invocations per run. `None` is unbounded.
    #[serde(default)]
    pub max_steps: Option<usize>,
}

impl ExecutorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail a run with [`WorkflowError::StepLimitExceeded`] once it has
    /// invoked `max_steps` handlers and would invoke another.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }
}

/// Runs workflow configs against a handler resolver.
///
/// An executor holds no per-run state, so one instance (and one config) can
/// serve any number of concurrent runs.
#[derive(Debug, Clone)]
pub struct Executor<R> {
    resolver: R,
    options: ExecutorOptions,
}

impl<R> Executor<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            options: ExecutorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExecutorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.options.max_steps = Some(max_steps);
        self
    }

    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Run `config` from its first node until a terminal condition.
    ///
    /// Every handler receives the same `params`.
    pub async fn execute<P>(&self, config: &WorkflowConfig, params: &P) -> Result<RunResults, WorkflowError>
    where
        R: HandlerResolver<P>,
        P: Send + Sync,
    {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("workflow_run", run_id = %run_id);
        self.run(config, params, run_id).instrument(span).await
    }

    async fn run<P>(&self, config: &WorkflowConfig, params: &P, run_id: String) -> Result<RunResults, WorkflowError>
    where
        R: HandlerResolver<P>,
        P: Send + Sync,
    {
        let first = match config.first() {
            Some(node) => node,
            None => {
                error!("Workflow has no nodes");
                return Err(WorkflowError::EmptyWorkflow);
            }
        };

        let mut current = first.handler().clone();
        let mut run = RunResults::new(run_id);
        info!(start = %current, nodes = config.len(), "Starting workflow run");

        loop {
            let step = run.len();
            if let Some(limit) = self.options.max_steps {
                if step >= limit {
                    error!(handler = %current, limit, "Step limit reached");
                    return Err(WorkflowError::StepLimitExceeded {
                        limit,
                        handler: current,
                        partial: Box::new(run),
                    });
                }
            }

            let handler = match self.resolver.resolve(&current) {
                Some(handler) => handler,
                None => {
                    error!(handler = %current, step, "Handler could not be resolved");
                    return Err(WorkflowError::HandlerResolution {
                        handler: current,
                        partial: Box::new(run),
                    });
                }
            };
            if !config.contains(current.as_str()) {
                warn!(handler = %current, "Handler has no node; its transitions all end the run");
            }

            debug!(handler = %current, step, "Invoking handler");
            let started_at = Utc::now();
            let outcome = handler
                .handle(&RunCtx::new(&current, step, params, &run))
                .await;

            let result = match outcome {
                Ok(result) => result,
                Err(source) => {
                    error!(handler = %current, step, error = %source, "Handler failed");
                    return Err(WorkflowError::HandlerExecution {
                        handler: current,
                        source,
                        partial: Box::new(run),
                    });
                }
            };

            let transition = result.routing_transition();
            let visit = run.record(current.clone(), result, started_at);
            debug!(handler = %current, step, status = visit.result.status(), "Handler completed");

            let transition = match transition {
                Some(transition) => transition,
                None => {
                    let status = visit.result.status().to_string();
                    error!(handler = %current, step, status = %status, "Result has no usable status or transition");
                    return Err(WorkflowError::AmbiguousResult {
                        handler: current,
                        status,
                        partial: Box::new(run),
                    });
                }
            };

            match config.route(current.as_str(), &transition) {
                Route::Next(target) => {
                    debug!(handler = %current, transition = %transition, target = %target, "Following transition");
                    let target = target.clone();
                    run.follow(current, transition, Some(target.clone()));
                    current = target;
                }
                Route::Terminal => {
                    debug!(handler = %current, transition = %transition, "Terminal transition");
                    run.follow(current, transition, None);
                    break;
                }
                Route::Undefined => {
                    debug!(handler = %current, transition = %transition, "No transition defined; stopping");
                    break;
                }
            }
        }

        info!(steps = run.len(), "Workflow run completed");
        Ok(run)
    }
}

/// One-shot form of [`Executor::execute`] with default options.
pub async fn execute<P, R>(config: &WorkflowConfig, resolver: R, params: &P) -> Result<RunResults, WorkflowError>
where
    R: HandlerResolver<P>,
    P: Send + Sync,
{
    Executor::new(resolver).execute(config, params).await
}
