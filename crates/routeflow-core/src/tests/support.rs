use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use crate::context::RunCtx;
use crate::error::HandlerError;
use crate::handler::{Handler, HandlerRegistry};
use crate::result::StepResult;

/// Run parameters shared by every handler: a tag plus a call log.
#[derive(Debug, Clone, Default)]
pub(crate) struct Params {
    pub tag: String,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl Params {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            log: Arc::default(),
        }
    }

    /// Handler ids in invocation order.
    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

/// Handler that replays a script: the n-th visit returns the n-th entry,
/// repeating the last one once the script runs out.
pub(crate) struct Scripted {
    script: Vec<Result<StepResult, HandlerError>>,
}

impl Scripted {
    pub fn new(script: Vec<Result<StepResult, HandlerError>>) -> Self {
        assert!(!script.is_empty());
        Self { script }
    }

    pub fn always(result: StepResult) -> Self {
        Self::new(vec![Ok(result)])
    }

    pub fn success() -> Self {
        Self::always(StepResult::success(json!(null)))
    }

    pub fn fail() -> Self {
        Self::always(StepResult::fail(json!(null)))
    }

    pub fn erroring(error: HandlerError) -> Self {
        Self::new(vec![Err(error)])
    }
}

#[async_trait]
impl Handler<Params> for Scripted {
    async fn handle(&self, ctx: &RunCtx<'_, Params>) -> Result<StepResult, HandlerError> {
        ctx.params().log.lock().unwrap().push(ctx.handler().to_string());
        tokio::task::yield_now().await;
        let seen = ctx.results().history(ctx.handler().as_str()).count();
        self.script[seen.min(self.script.len() - 1)].clone()
    }
}

/// Handler that succeeds with the run's tag and its own step number.
pub(crate) struct Tagger;

#[async_trait]
impl Handler<Params> for Tagger {
    async fn handle(&self, ctx: &RunCtx<'_, Params>) -> Result<StepResult, HandlerError> {
        ctx.params().log.lock().unwrap().push(ctx.handler().to_string());
        tokio::task::yield_now().await;
        Ok(StepResult::success(json!({
            "tag": ctx.params().tag,
            "step": ctx.step(),
            "run": ctx.run_id(),
        })))
    }
}

pub(crate) fn registry<H>(entries: Vec<(&str, H)>) -> HandlerRegistry<Params>
where
    H: Handler<Params> + 'static,
{
    let mut registry = HandlerRegistry::new();
    for (id, handler) in entries {
        registry.register(id, handler);
    }
    registry
}
