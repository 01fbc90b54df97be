//! Per-run record of handler visits and followed transitions.
//!
//! Results are keyed by visit sequence, so a handler reached more than once
//! (for example through an `onRetry` back-edge) keeps every result.
//! [`RunResults::get`] and [`RunResults::into_map`] give the latest result
//! per handler.
use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::node::HandlerId;
use crate::result::StepResult;
use crate::transition::Transition;

/// One handler invocation within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Zero-based position in the run.
    pub seq: usize,
    pub handler: HandlerId,
    pub result: StepResult,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// A transition the executor followed. `to` is `None` for a terminal edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: HandlerId,
    pub transition: Transition,
    pub to: Option<HandlerId>,
}

/// Everything a run produced, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResults {
    run_id: String,
    visits: Vec<Visit>,
    trail: Vec<Edge>,
}

impl RunResults {
    pub(crate) fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            visits: Vec::new(),
            trail: Vec::new(),
        }
    }

    pub(crate) fn record(
        &mut self,
        handler: HandlerId,
        result: StepResult,
        started_at: DateTime<Utc>,
    ) -> &Visit {
        let seq = self.visits.len();
        self.visits.push(Visit {
            seq,
            handler,
            result,
            started_at,
            finished_at: Utc::now(),
        });
        &self.visits[seq]
    }

    pub(crate) fn follow(&mut self, from: HandlerId, transition: Transition, to: Option<HandlerId>) {
        self.trail.push(Edge {
            from,
            transition,
            to,
        });
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Latest result recorded for `handler`.
    pub fn get(&self, handler: &str) -> Option<&StepResult> {
        self.visits
            .iter()
            .rev()
            .find(|v| v.handler.as_str() == handler)
            .map(|v| &v.result)
    }

    /// Every result recorded for `handler`, oldest first.
    pub fn history<'a>(&'a self, handler: &'a str) -> impl Iterator<Item = &'a StepResult> + 'a {
        self.visits
            .iter()
            .filter(move |v| v.handler.as_str() == handler)
            .map(|v| &v.result)
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn trail(&self) -> &[Edge] {
        &self.trail
    }

    /// The last visit of the run, if any handler ran.
    pub fn last(&self) -> Option<&Visit> {
        self.visits.last()
    }

    /// Distinct handlers in order of first visit.
    pub fn handlers(&self) -> Vec<&HandlerId> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        for visit in &self.visits {
            if seen.insert(&visit.handler) {
                order.push(&visit.handler);
            }
        }
        order
    }

    pub fn contains(&self, handler: &str) -> bool {
        self.visits.iter().any(|v| v.handler.as_str() == handler)
    }

    /// Number of handler invocations.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Collapse into a handler-keyed map holding the latest result per handler.
    pub fn into_map(self) -> HashMap<HandlerId, StepResult> {
        self.visits
            .into_iter()
            .map(|v| (v.handler, v.result))
            .collect()
    }
}
