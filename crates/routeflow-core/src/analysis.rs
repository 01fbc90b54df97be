//! Static checks over a [`WorkflowConfig`].
//!
//! None of these are enforced by the config or the executor, since targets
//! are bound late. Tooling can run them before executing a graph.
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use crate::config::WorkflowConfig;
use crate::handler::HandlerResolver;
use crate::node::HandlerId;
use crate::transition::Transition;

/// A problem found by [`check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    /// The config has no nodes.
    Empty,
    /// A transition points at a handler that has no node of its own.
    UndeclaredTarget {
        from: HandlerId,
        transition: Transition,
        target: HandlerId,
    },
    /// The resolver cannot produce this handler.
    Unresolvable(HandlerId),
    /// No path from the first node reaches this node.
    Unreachable(HandlerId),
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "workflow has no nodes"),
            Self::UndeclaredTarget {
                from,
                transition,
                target,
            } => write!(f, "{from} -[{transition}]-> {target}: target has no node"),
            Self::Unresolvable(handler) => write!(f, "{handler}: handler cannot be resolved"),
            Self::Unreachable(handler) => write!(f, "{handler}: unreachable from the first node"),
        }
    }
}

/// Transitions whose target has no node in `config`, in declaration order.
pub fn undeclared_targets(config: &WorkflowConfig) -> Vec<(HandlerId, Transition, HandlerId)> {
    config
        .nodes()
        .iter()
        .flat_map(|node| {
            node.transitions()
                .iter()
                .filter_map(move |(transition, target)| match target {
                    Some(target) if !config.contains(target.as_str()) => {
                        Some((node.handler().clone(), transition.clone(), target.clone()))
                    }
                    _ => None,
                })
        })
        .collect()
}

/// Every handler id mentioned by `config` (nodes and targets) that
/// `resolver` cannot resolve.
pub fn unresolvable_handlers<P, R>(config: &WorkflowConfig, resolver: &R) -> Vec<HandlerId>
where
    R: HandlerResolver<P> + ?Sized,
{
    let mut seen = HashSet::new();
    let mut missing = Vec::new();
    for handler in mentioned(config) {
        if seen.insert(handler) && resolver.resolve(handler).is_none() {
            missing.push(handler.clone());
        }
    }
    missing
}

/// Declared nodes that cannot be reached from the first node.
pub fn unreachable_nodes(config: &WorkflowConfig) -> Vec<HandlerId> {
    let Some(first) = config.first() else {
        return Vec::new();
    };
    let mut reached: HashSet<&HandlerId> = HashSet::new();
    let mut stack = vec![first.handler()];
    while let Some(handler) = stack.pop() {
        if !reached.insert(handler) {
            continue;
        }
        if let Some(transitions) = config.transitions(handler.as_str()) {
            stack.extend(transitions.values().flatten());
        }
    }
    config
        .nodes()
        .iter()
        .map(|node| node.handler())
        .filter(|handler| !reached.contains(handler))
        .cloned()
        .collect()
}

/// Whether following transitions can return to an already visited handler.
///
/// Retry loops are cycles; they are legal, but a run over them only stops
/// when a handler routes out or a step limit is set.
pub fn has_cycle(config: &WorkflowConfig) -> bool {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Active,
        Done,
    }

    fn visit<'a>(config: &'a WorkflowConfig, handler: &'a HandlerId, marks: &mut HashMap<&'a HandlerId, Mark>) -> bool {
        match marks.get(handler) {
            Some(Mark::Active) => return true,
            Some(Mark::Done) => return false,
            None => {}
        }
        marks.insert(handler, Mark::Active);
        if let Some(transitions) = config.transitions(handler.as_str()) {
            for target in transitions.values().flatten() {
                if visit(config, target, marks) {
                    return true;
                }
            }
        }
        marks.insert(handler, Mark::Done);
        false
    }

    let mut marks = HashMap::new();
    config
        .nodes()
        .iter()
        .any(|node| visit(config, node.handler(), &mut marks))
}

/// Run every check and collect the issues found.
pub fn check<P, R>(config: &WorkflowConfig, resolver: &R) -> Vec<GraphIssue>
where
    R: HandlerResolver<P> + ?Sized,
{
    if config.is_empty() {
        return vec![GraphIssue::Empty];
    }
    let mut issues: Vec<GraphIssue> = undeclared_targets(config)
        .into_iter()
        .map(|(from, transition, target)| GraphIssue::UndeclaredTarget {
            from,
            transition,
            target,
        })
        .collect();
    issues.extend(unresolvable_handlers(config, resolver).into_iter().map(GraphIssue::Unresolvable));
    issues.extend(unreachable_nodes(config).into_iter().map(GraphIssue::Unreachable));
    issues
}

/// Terminal transition names used anywhere in `config`.
pub fn terminal_transitions(config: &WorkflowConfig) -> BTreeSet<&Transition> {
    config
        .nodes()
        .iter()
        .flat_map(|node| node.transitions().iter())
        .filter(|(_, target)| target.is_none())
        .map(|(transition, _)| transition)
        .collect()
}

fn mentioned(config: &WorkflowConfig) -> impl Iterator<Item = &HandlerId> {
    config.nodes().iter().flat_map(|node| {
        std::iter::once(node.handler()).chain(node.transitions().values().flatten())
    })
}
