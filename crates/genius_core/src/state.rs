use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::view_model::AppViewModel;

pub type RequestId = u64;

/// Shown when a successful reply carries no report text.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response received";
/// Prefix for every failure shown to the user.
pub const ERROR_PREFIX: &str = "Error: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Waiting,
    Generating,
    Displayed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestKind {
    Submission,
    Document,
}

/// A Markdown blob ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub filename: String,
    pub content: String,
    /// Where the shell saved the blob, if it did.
    pub location: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPayload {
    Message(String),
    /// A failed request; the text already carries `ERROR_PREFIX`.
    Failure(String),
    Document(GeneratedDocument),
}

impl ResultPayload {
    pub(crate) fn from_submission(result: Result<Option<String>, String>) -> Self {
        match result {
            Ok(Some(text)) if !text.is_empty() => Self::Message(text),
            Ok(_) => Self::Message(NO_RESPONSE_PLACEHOLDER.to_string()),
            Err(message) => Self::error(&message),
        }
    }

    pub(crate) fn error(message: &str) -> Self {
        Self::Failure(format!("{ERROR_PREFIX}{message}"))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    phase: Phase,
    result: Option<ResultPayload>,
    pending: BTreeMap<RequestId, RequestKind>,
    next_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            phase: self.phase,
            result: self.result.clone(),
            pending_requests: self.pending.len(),
            dirty: self.dirty,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    pub(crate) fn begin_request(&mut self, kind: RequestKind) -> RequestId {
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.pending.insert(request_id, kind);
        self.phase = match kind {
            RequestKind::Submission => Phase::Waiting,
            RequestKind::Document => Phase::Generating,
        };
        self.mark_dirty();
        request_id
    }

    /// Records a completion. Returns false for ids that are not in flight.
    pub(crate) fn complete_request(
        &mut self,
        request_id: RequestId,
        kind: RequestKind,
        payload: ResultPayload,
    ) -> bool {
        if self.pending.get(&request_id) != Some(&kind) {
            return false;
        }
        self.pending.remove(&request_id);
        // The most recent completion owns the display.
        self.result = Some(payload);
        if let Some(latest) = self.pending.values().next_back() {
            self.phase = match latest {
                RequestKind::Submission => Phase::Waiting,
                RequestKind::Document => Phase::Generating,
            };
        } else {
            self.phase = Phase::Displayed;
        }
        self.mark_dirty();
        true
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
