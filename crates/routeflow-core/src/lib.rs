//! # Routeflow Core
//!
//! Graph model, builder and executor for outcome-routed workflows: each
//! handler returns a [`StepResult`] and the executor follows the matching
//! named transition of the current node.

pub mod analysis;
pub mod builder;
pub mod config;
pub mod context;
mod dot;
pub mod error;
pub mod executor;
pub mod handler;
pub mod node;
pub mod result;
pub mod results;
pub mod transition;

pub use builder::{BuilderError, NodeBuilder, WorkflowBuilder};
pub use config::{ConfigError, WorkflowConfig};
pub use context::RunCtx;
pub use error::{HandlerError, WorkflowError};
pub use executor::{execute, Executor, ExecutorOptions};
pub use handler::{handler_fn, resolver_fn, FnHandler, FnResolver, Handler, HandlerRegistry, HandlerResolver};
pub use node::{HandlerId, Node, Route, Transitions};
pub use result::{Outcome, StepResult};
pub use results::{Edge, RunResults, Visit};
pub use transition::{CustomName, Transition};
