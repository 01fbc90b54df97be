//! Fluent construction of a [`WorkflowConfig`].
//!
//! ```
//! use routeflow_core::WorkflowBuilder;
//!
//! let config = WorkflowBuilder::new()
//!     .node("payment")
//!         .on_success("shipping")
//!         .on_fail("notify")
//!     .node("shipping")
//!         .on_success("confirm")
//!     .build();
//!
//! assert_eq!(config.len(), 2);
//! ```
use thiserror::Error;

use crate::config::WorkflowConfig;
use crate::node::{HandlerId, Transitions};
use crate::transition::Transition;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A transition was added before any node was opened.
    #[error("No open node to attach transition {0} to")]
    NoOpenNode(Transition),
}

/// Workflow-level builder. Holds the config built so far and the node
/// currently being configured.
#[derive(Debug, Default)]
pub struct WorkflowBuilder {
    config: WorkflowConfig,
    open: Option<(HandlerId, Transitions)>,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit any open node and start configuring `handler`.
    pub fn node(mut self, handler: impl Into<HandlerId>) -> NodeBuilder {
        self.commit();
        self.open = Some((handler.into(), Transitions::new()));
        NodeBuilder { workflow: self }
    }

    /// Attach a transition to the open node.
    ///
    /// This is the hook [`NodeBuilder`] goes through; prefer the node DSL.
    pub fn add_transition(
        &mut self,
        name: impl Into<Transition>,
        target: Option<HandlerId>,
    ) -> Result<&mut Self, BuilderError> {
        let name = name.into();
        match self.open.as_mut() {
            Some((_, transitions)) => {
                transitions.insert(name, target);
                Ok(self)
            }
            None => Err(BuilderError::NoOpenNode(name)),
        }
    }

    /// Commit any open node and return the finished config.
    pub fn build(mut self) -> WorkflowConfig {
        self.commit();
        self.config
    }

    fn commit(&mut self) {
        if let Some((handler, transitions)) = self.open.take() {
            self.config.add_node(handler, transitions);
        }
    }
}

/// Node-level builder scoped to a single open node.
#[derive(Debug)]
pub struct NodeBuilder {
    workflow: WorkflowBuilder,
}

macro_rules! transition_setters {
    ($($(#[$doc:meta])* $method:ident => $variant:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $method(self, target: impl Into<HandlerId>) -> Self {
                self.set(Transition::$variant, Some(target.into()))
            }
        )*
    };
}

impl NodeBuilder {
    transition_setters! {
        /// Route here when the handler reports success.
        on_success => Success,
        /// Route here when the handler reports failure.
        on_fail => Fail,
        on_error => Error,
        on_timeout => Timeout,
        on_retry => Retry,
        on_skip => Skip,
        on_pending => Pending,
        on_cancel => Cancel,
    }

    /// Route an arbitrary, possibly user-defined, transition to `target`.
    pub fn on(self, name: impl Into<Transition>, target: impl Into<HandlerId>) -> Self {
        self.set(name.into(), Some(target.into()))
    }

    /// Declare `name` as a deliberate end of the run.
    pub fn terminate_on(self, name: impl Into<Transition>) -> Self {
        self.set(name.into(), None)
    }

    /// Commit this node and start configuring `handler`.
    pub fn node(self, handler: impl Into<HandlerId>) -> NodeBuilder {
        self.workflow.node(handler)
    }

    pub fn build(self) -> WorkflowConfig {
        self.workflow.build()
    }

    fn set(mut self, name: Transition, target: Option<HandlerId>) -> Self {
        if let Some((_, transitions)) = self.workflow.open.as_mut() {
            transitions.insert(name, target);
        }
        self
    }
}
