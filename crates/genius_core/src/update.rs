use genius_logging::{genius_debug, genius_warn};

use crate::state::RequestKind;
use crate::{AppState, Effect, Msg, ResultPayload};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Empty input is valid and takes the same path.
            let request_id = state.begin_request(RequestKind::Submission);
            genius_debug!("submit request_id={} input_len={}", request_id, state.input().len());
            vec![Effect::SubmitRepository {
                request_id,
                github_link: state.input().to_string(),
            }]
        }
        Msg::GenerateClicked => {
            let request_id = state.begin_request(RequestKind::Document);
            genius_debug!("generate request_id={} input_len={}", request_id, state.input().len());
            vec![Effect::GenerateDocument {
                request_id,
                input: state.input().to_string(),
            }]
        }
        Msg::SubmissionDone { request_id, result } => {
            let payload = ResultPayload::from_submission(result);
            if !state.complete_request(request_id, RequestKind::Submission, payload) {
                genius_warn!("Ignoring submission result for unknown request {}", request_id);
            }
            Vec::new()
        }
        Msg::DocumentReady { request_id, result } => {
            let payload = match result {
                Ok(document) => ResultPayload::Document(document),
                Err(message) => ResultPayload::error(&message),
            };
            if !state.complete_request(request_id, RequestKind::Document, payload) {
                genius_warn!("Ignoring document for unknown request {}", request_id);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
