//! Outcome values returned by handlers.
//!
//! A [`StepResult`] is produced fresh by every handler invocation. Routing is
//! driven by its [`Outcome`]: status-based (success / fail) and named
//! transitions are separate channels, and a named transition always wins.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transition::Transition;

/// Raw status string for a successful result.
pub const STATUS_SUCCESS: &str = "success";
/// Raw status string for a failed result.
pub const STATUS_FAIL: &str = "fail";

/// Which routing channel a result uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Outcome {
    /// Status success; routes via `onSuccess`.
    Success,
    /// Status fail; routes via `onFail`.
    Fail,
    /// Explicit named transition; takes precedence over status.
    Named(Transition),
    /// A raw status that is neither success, fail nor a known transition.
    /// Only [`StepResult::from_status`] can produce this; the executor
    /// rejects it as ambiguous.
    Unrecognized(String),
}

#[derive(Deserialize)]
struct StepResultRepr {
    outcome: Outcome,
    #[serde(default)]
    data: Value,
}

impl From<StepResultRepr> for StepResult {
    fn from(repr: StepResultRepr) -> Self {
        match repr.outcome {
            Outcome::Unrecognized(raw) => Self::from_status(&raw, repr.data),
            outcome => Self {
                outcome,
                data: repr.data,
            },
        }
    }
}

/// Immutable outcome of one handler step, plus its data payload.
///
/// Deserialising re-reads unrecognized statuses, so a stored `"success"`
/// comes back as a success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StepResultRepr")]
pub struct StepResult {
    outcome: Outcome,
    data: Value,
}

impl StepResult {
    /// Build a result from a raw status, payload and optional transition override.
    ///
    /// An override always makes the result a named transition.
    pub fn new(status: &str, data: Value, transition: Option<Transition>) -> Self {
        match transition {
            Some(t) => Self::transition(t, data),
            None => Self::from_status(status, data),
        }
    }

    pub fn success(data: impl Into<Value>) -> Self {
        Self {
            outcome: Outcome::Success,
            data: data.into(),
        }
    }

    pub fn fail(data: impl Into<Value>) -> Self {
        Self {
            outcome: Outcome::Fail,
            data: data.into(),
        }
    }

    /// A result that routes through the named transition.
    pub fn transition(transition: impl Into<Transition>, data: impl Into<Value>) -> Self {
        Self {
            outcome: Outcome::Named(transition.into()),
            data: data.into(),
        }
    }

    /// Interpret a raw status string.
    ///
    /// `"success"` and `"fail"` map to status outcomes, the eight standard
    /// transition names map to named transitions. Anything else is kept as
    /// [`Outcome::Unrecognized`].
    pub fn from_status(status: &str, data: impl Into<Value>) -> Self {
        let outcome = match status {
            STATUS_SUCCESS => Outcome::Success,
            STATUS_FAIL => Outcome::Fail,
            other => match Transition::from_name(other) {
                Transition::Custom(raw) => Outcome::Unrecognized(raw.into_string()),
                named => Outcome::Named(named),
            },
        };
        Self {
            outcome,
            data: data.into(),
        }
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The raw status string: `success`, `fail`, or the transition name.
    pub fn status(&self) -> &str {
        match &self.outcome {
            Outcome::Success => STATUS_SUCCESS,
            Outcome::Fail => STATUS_FAIL,
            Outcome::Named(t) => t.name(),
            Outcome::Unrecognized(raw) => raw,
        }
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    /// The explicit transition, if the result carries one.
    pub fn transition_name(&self) -> Option<&Transition> {
        match &self.outcome {
            Outcome::Named(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self.outcome, Outcome::Fail)
    }

    pub fn has_explicit_transition(&self) -> bool {
        matches!(self.outcome, Outcome::Named(_))
    }

    /// The transition the executor should follow, or `None` if the result is ambiguous.
    pub fn routing_transition(&self) -> Option<Transition> {
        match &self.outcome {
            Outcome::Named(t) => Some(t.clone()),
            Outcome::Success => Some(Transition::Success),
            Outcome::Fail => Some(Transition::Fail),
            Outcome::Unrecognized(_) => None,
        }
    }
}
