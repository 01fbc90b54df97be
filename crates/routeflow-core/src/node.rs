use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transition::Transition;

/// Opaque identifier naming a unit of work.
///
/// The engine never interprets it; a [`HandlerResolver`](crate::HandlerResolver)
/// maps it to something invocable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerId(String);

impl HandlerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier derived from a Rust type's name.
    pub fn of<T: ?Sized>() -> Self {
        Self(std::any::type_name::<T>().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for HandlerId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HandlerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for HandlerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&HandlerId> for HandlerId {
    fn from(id: &HandlerId) -> Self {
        id.clone()
    }
}

/// Transition map of a node. A `None` target terminates the run.
pub type Transitions = BTreeMap<Transition, Option<HandlerId>>;

/// Result of looking a transition up on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Continue with this handler.
    Next(&'a HandlerId),
    /// The transition is declared with no target: stop deliberately.
    Terminal,
    /// The transition is not declared: nothing further to run.
    Undefined,
}

/// A graph vertex: one handler and its outgoing named transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    handler: HandlerId,
    #[serde(default)]
    transitions: Transitions,
}

impl Node {
    pub fn new(handler: impl Into<HandlerId>, transitions: Transitions) -> Self {
        Self {
            handler: handler.into(),
            transitions,
        }
    }

    pub fn handler(&self) -> &HandlerId {
        &self.handler
    }

    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    /// Resolve a transition name against this node.
    pub fn route(&self, transition: &Transition) -> Route<'_> {
        match self.transitions.get(transition) {
            Some(Some(target)) => Route::Next(target),
            Some(None) => Route::Terminal,
            None => Route::Undefined,
        }
    }

    /// Overlay `transitions` onto this node; later values win per name.
    pub(crate) fn merge(&mut self, transitions: Transitions) {
        self.transitions.extend(transitions);
    }

    pub(crate) fn into_parts(self) -> (HandlerId, Transitions) {
        (self.handler, self.transitions)
    }
}
