use crate::{Phase, ResultPayload};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub phase: Phase,
    pub result: Option<ResultPayload>,
    pub pending_requests: usize,
    pub dirty: bool,
}

impl AppViewModel {
    /// Whether the displayed result is a failed request.
    pub fn failed(&self) -> bool {
        self.result.as_ref().is_some_and(ResultPayload::is_failure)
    }
}
