//! Handlers and the resolver that maps handler ids onto them.
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::context::RunCtx;
use crate::error::HandlerError;
use crate::node::HandlerId;
use crate::result::StepResult;

/// A unit of work the executor can invoke.
///
/// `P` is the run's parameter set, shared by every handler of the run.
#[async_trait]
pub trait Handler<P = ()>: Send + Sync {
    /// Do the work and report which way the run should go.
    async fn handle(&self, ctx: &RunCtx<'_, P>) -> Result<StepResult, HandlerError>;
}

/// Maps a handler id to something invocable.
///
/// The executor only depends on this capability; how handlers are built
/// (registry, factory, container) is up to the implementor.
pub trait HandlerResolver<P>: Send + Sync {
    fn resolve(&self, handler: &HandlerId) -> Option<Arc<dyn Handler<P>>>;
}

impl<P, R: HandlerResolver<P> + ?Sized> HandlerResolver<P> for &R {
    fn resolve(&self, handler: &HandlerId) -> Option<Arc<dyn Handler<P>>> {
        (**self).resolve(handler)
    }
}

impl<P, R: HandlerResolver<P> + ?Sized> HandlerResolver<P> for Arc<R> {
    fn resolve(&self, handler: &HandlerId) -> Option<Arc<dyn Handler<P>>> {
        (**self).resolve(handler)
    }
}

/// Create a resolver from a closure.
pub fn resolver_fn<P, F>(closure: F) -> FnResolver<F>
where
    F: Fn(&HandlerId) -> Option<Arc<dyn Handler<P>>> + Send + Sync,
{
    FnResolver { closure }
}

/// A resolver wrapping a closure; see [`resolver_fn`].
#[derive(Clone)]
pub struct FnResolver<F> {
    closure: F,
}

impl<F> Debug for FnResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnResolver").finish_non_exhaustive()
    }
}

impl<P, F> HandlerResolver<P> for FnResolver<F>
where
    F: Fn(&HandlerId) -> Option<Arc<dyn Handler<P>>> + Send + Sync,
{
    fn resolve(&self, handler: &HandlerId) -> Option<Arc<dyn Handler<P>>> {
        (self.closure)(handler)
    }
}

/// Map-backed resolver.
pub struct HandlerRegistry<P> {
    handlers: HashMap<HandlerId, Arc<dyn Handler<P>>>,
}

impl<P> HandlerRegistry<P> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register `handler` under `id`, replacing any previous entry.
    pub fn register<H>(&mut self, id: impl Into<HandlerId>, handler: H) -> &mut Self
    where
        H: Handler<P> + 'static,
    {
        self.handlers.insert(id.into(), Arc::new(handler));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<H>(mut self, id: impl Into<HandlerId>, handler: H) -> Self
    where
        H: Handler<P> + 'static,
    {
        self.register(id, handler);
        self
    }

    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<P> Default for HandlerRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Debug for HandlerRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&str> = self.handlers.keys().map(HandlerId::as_str).collect();
        ids.sort_unstable();
        f.debug_struct("HandlerRegistry").field("handlers", &ids).finish()
    }
}

impl<P> HandlerResolver<P> for HandlerRegistry<P> {
    fn resolve(&self, handler: &HandlerId) -> Option<Arc<dyn Handler<P>>> {
        self.handlers.get(handler).cloned()
    }
}

/// Create a handler from an async closure.
///
/// The closure receives its own clone of the run parameters.
pub fn handler_fn<P, F, Fut>(closure: F) -> FnHandler<F, P>
where
    P: Clone + Send + Sync + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepResult, HandlerError>> + Send + 'static,
{
    FnHandler {
        closure,
        _phantom: PhantomData,
    }
}

/// A handler wrapping a closure; see [`handler_fn`].
#[derive(Clone)]
pub struct FnHandler<F, P> {
    closure: F,
    _phantom: PhantomData<fn(P)>,
}

impl<F, P> Debug for FnHandler<F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").finish_non_exhaustive()
    }
}

#[async_trait]
impl<P, F, Fut> Handler<P> for FnHandler<F, P>
where
    P: Clone + Send + Sync + 'static,
    F: Fn(P) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<StepResult, HandlerError>> + Send + 'static,
{
    async fn handle(&self, ctx: &RunCtx<'_, P>) -> Result<StepResult, HandlerError> {
        (self.closure)(ctx.params().clone()).await
    }
}
