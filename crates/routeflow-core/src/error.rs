use std::time::Duration;

use thiserror::Error;

use crate::node::HandlerId;
use crate::results::RunResults;

/// Fault raised by a handler that could not produce a result.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("Generic error: {0}")]
    Generic(String),
    /// The handler observed a cancellation request.
    #[error("Handler cancelled")]
    Cancelled,
    /// The handler gave up after its own deadline.
    #[error("Handler timed out after {0:?}")]
    Timeout(Duration),
}

impl HandlerError {
    pub fn generic(message: impl std::fmt::Display) -> Self {
        Self::Generic(message.to_string())
    }
}

/// Reasons a workflow run stops without completing.
///
/// Every variant except [`WorkflowError::EmptyWorkflow`] carries the results
/// collected before the failure.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The config has no nodes, so there is nothing to start from.
    #[error("Workflow has no nodes")]
    EmptyWorkflow,

    /// The resolver has no handler for an id the run reached.
    #[error("Cannot resolve handler: {handler}")]
    HandlerResolution {
        handler: HandlerId,
        partial: Box<RunResults>,
    },

    /// A handler returned a result that is neither success, fail nor a
    /// named transition.
    #[error("Ambiguous result from handler {handler}: status {status:?}")]
    AmbiguousResult {
        handler: HandlerId,
        status: String,
        partial: Box<RunResults>,
    },

    /// A handler failed instead of returning a result.
    #[error("Handler {handler} failed: {source}")]
    HandlerExecution {
        handler: HandlerId,
        #[source]
        source: HandlerError,
        partial: Box<RunResults>,
    },

    /// The run hit its configured step limit.
    #[error("Step limit of {limit} reached before running {handler}")]
    StepLimitExceeded {
        limit: usize,
        handler: HandlerId,
        partial: Box<RunResults>,
    },
}

impl WorkflowError {
    /// Results accumulated before the run stopped, if any.
    pub fn partial_results(&self) -> Option<&RunResults> {
        match self {
            Self::EmptyWorkflow => None,
            Self::HandlerResolution { partial, .. }
            | Self::AmbiguousResult { partial, .. }
            | Self::HandlerExecution { partial, .. }
            | Self::StepLimitExceeded { partial, .. } => Some(partial),
        }
    }

    pub fn into_partial_results(self) -> Option<RunResults> {
        match self {
            Self::EmptyWorkflow => None,
            Self::HandlerResolution { partial, .. }
            | Self::AmbiguousResult { partial, .. }
            | Self::HandlerExecution { partial, .. }
            | Self::StepLimitExceeded { partial, .. } => Some(*partial),
        }
    }

    /// The handler the run was at when it stopped.
    pub fn handler(&self) -> Option<&HandlerId> {
        match self {
            Self::EmptyWorkflow => None,
            Self::HandlerResolution { handler, .. }
            | Self::AmbiguousResult { handler, .. }
            | Self::HandlerExecution { handler, .. }
            | Self::StepLimitExceeded { handler, .. } => Some(handler),
        }
    }
}
