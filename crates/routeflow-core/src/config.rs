//! The node/transition graph.
//!
//! A [`WorkflowConfig`] is an ordered list of [`Node`]s keyed by handler id.
//! It does not check that transition targets exist as nodes: targets are
//! bound late, when the executor actually reaches them. See
//! [`analysis`](crate::analysis) for static checks.
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{HandlerId, Node, Route, Transitions};
use crate::transition::Transition;

/// Errors loading or storing a workflow graph.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize)]
struct ConfigRepr {
    nodes: Vec<Node>,
}

/// Ordered, handler-keyed workflow graph.
///
/// The first node added is where every run starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConfigRepr", into = "ConfigRepr")]
pub struct WorkflowConfig {
    nodes: Vec<Node>,
    index: HashMap<HandlerId, usize>,
}

impl WorkflowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, or merge `transitions` into the existing node for `handler`.
    ///
    /// Merging keeps the node's original position; for each transition name
    /// the last value written wins.
    pub fn add_node(&mut self, handler: impl Into<HandlerId>, transitions: Transitions) -> &mut Self {
        let handler = handler.into();
        match self.index.get(&handler) {
            Some(&pos) => self.nodes[pos].merge(transitions),
            None => {
                self.index.insert(handler.clone(), self.nodes.len());
                self.nodes.push(Node::new(handler, transitions));
            }
        }
        self
    }

    /// All nodes in declaration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, handler: &str) -> Option<&Node> {
        self.index.get(handler).map(|&pos| &self.nodes[pos])
    }

    /// Transition map for `handler`, or `None` if no node exists for it.
    ///
    /// A declared node without transitions yields `Some` of an empty map.
    pub fn transitions(&self, handler: &str) -> Option<&Transitions> {
        self.node(handler).map(Node::transitions)
    }

    /// Entry node of the workflow.
    pub fn first(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn contains(&self, handler: &str) -> bool {
        self.index.contains_key(handler)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up where `transition` leads from `handler`.
    ///
    /// A handler with no node has no transitions, so every lookup is
    /// [`Route::Undefined`].
    pub fn route(&self, handler: &str, transition: &Transition) -> Route<'_> {
        match self.node(handler) {
            Some(node) => node.route(transition),
            None => Route::Undefined,
        }
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<ConfigRepr> for WorkflowConfig {
    fn from(repr: ConfigRepr) -> Self {
        let mut config = WorkflowConfig::new();
        for node in repr.nodes {
            let (handler, transitions) = node.into_parts();
            config.add_node(handler, transitions);
        }
        config
    }
}

impl From<WorkflowConfig> for ConfigRepr {
    fn from(config: WorkflowConfig) -> Self {
        ConfigRepr { nodes: config.nodes }
    }
}
