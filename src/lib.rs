//! # Routeflow - an outcome-routed workflow engine
//!
//! A workflow is a graph of handler nodes joined by named transitions
//! (`onSuccess`, `onFail`, `onRetry`, ... or any custom name). Each handler
//! returns a [`StepResult`](core::StepResult); the executor follows the
//! transition it names and stops when a transition is terminal or undefined.
//!
//! ## Usage
//!
//! ```rust
//! use routeflow::core::{execute, handler_fn, HandlerError, HandlerRegistry, StepResult, WorkflowBuilder};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = WorkflowBuilder::new()
//!     .node("payment")
//!         .on_success("shipping")
//!         .on_fail("notify")
//!     .node("shipping")
//!     .node("notify")
//!     .build();
//!
//! let mut handlers: HandlerRegistry<u64> = HandlerRegistry::new();
//! handlers
//!     .register("payment", handler_fn(|amount: u64| async move {
//!         Ok::<_, HandlerError>(if amount > 0 { StepResult::success(amount) } else { StepResult::fail("empty") })
//!     }))
//!     .register("shipping", handler_fn(|_: u64| async { Ok::<_, HandlerError>(StepResult::success("shipped")) }))
//!     .register("notify", handler_fn(|_: u64| async { Ok::<_, HandlerError>(StepResult::success("notified")) }));
//!
//! let run = execute(&config, &handlers, &42).await.unwrap();
//! assert_eq!(run.get("shipping").unwrap().data(), "shipped");
//! # }
//! ```

/// Initialize the engine with default settings.
///
/// This installs a `tracing` fmt subscriber so run and step events are
/// printed. Libraries embedding the engine should install their own
/// subscriber instead.
pub fn init() {
    tracing_subscriber::fmt::init();
}

// Re-export the core crate
pub use routeflow_core as core;
pub use routeflow_core::*;
