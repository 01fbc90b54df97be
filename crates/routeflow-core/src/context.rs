use crate::node::HandlerId;
use crate::results::RunResults;

/// What a handler sees while it runs.
///
/// Every handler of a run gets the same parameters; the results recorded
/// so far are readable but not writable.
#[derive(Debug)]
pub struct RunCtx<'a, P> {
    run_id: &'a str,
    handler: &'a HandlerId,
    step: usize,
    params: &'a P,
    results: &'a RunResults,
}

impl<'a, P> RunCtx<'a, P> {
    pub(crate) fn new(handler: &'a HandlerId, step: usize, params: &'a P, results: &'a RunResults) -> Self {
        Self {
            run_id: results.run_id(),
            handler,
            step,
            params,
            results,
        }
    }

    pub fn run_id(&self) -> &'a str {
        self.run_id
    }

    /// Id of the handler being invoked.
    pub fn handler(&self) -> &'a HandlerId {
        self.handler
    }

    /// Zero-based step number within the run.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn params(&self) -> &'a P {
        self.params
    }

    pub fn results(&self) -> &'a RunResults {
        self.results
    }

    /// Run `f` against the parameters.
    pub fn with_params<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&P) -> R,
    {
        f(self.params)
    }
}
