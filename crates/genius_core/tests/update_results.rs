use std::path::PathBuf;
use std::sync::Once;

use genius_core::{
    update, AppState, GeneratedDocument, Msg, Phase, ResultPayload, ERROR_PREFIX,
    NO_RESPONSE_PLACEHOLDER,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(genius_logging::initialize_for_tests);
}

fn submitted(input: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::InputChanged(input.to_string()));
    let (state, _) = update(state, Msg::SubmitClicked);
    state
}

fn message(state: &AppState) -> String {
    match state.view().result {
        Some(ResultPayload::Message(text)) | Some(ResultPayload::Failure(text)) => text,
        other => panic!("expected a message, got {other:?}"),
    }
}

#[test]
fn successful_reply_is_displayed() {
    init_logging();
    let (mut state, effects) = update(
        submitted("https://github.com/user/repo"),
        Msg::SubmissionDone {
            request_id: 1,
            result: Ok(Some("X".to_string())),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.phase(), Phase::Displayed);
    assert_eq!(message(&state), "X");
    assert!(state.consume_dirty());
}

#[test]
fn missing_or_empty_report_falls_back_to_placeholder() {
    init_logging();
    for reply in [None, Some(String::new())] {
        let (state, _) = update(
            submitted("repo"),
            Msg::SubmissionDone {
                request_id: 1,
                result: Ok(reply),
            },
        );
        assert_eq!(message(&state), NO_RESPONSE_PLACEHOLDER);
    }
}

#[test]
fn failures_are_prefixed() {
    init_logging();
    let (state, _) = update(
        submitted("repo"),
        Msg::SubmissionDone {
            request_id: 1,
            result: Err("upstream exploded".to_string()),
        },
    );

    let text = message(&state);
    assert!(text.starts_with(ERROR_PREFIX));
    assert!(text.contains("upstream exploded"));
    assert!(state.view().failed());
    assert_eq!(state.phase(), Phase::Displayed);
}

#[test]
fn report_text_that_looks_like_an_error_is_still_a_success() {
    init_logging();
    let (state, _) = update(
        submitted("repo"),
        Msg::SubmissionDone {
            request_id: 1,
            result: Ok(Some("Error: handling in this repo is thorough".to_string())),
        },
    );

    assert_eq!(
        state.view().result,
        Some(ResultPayload::Message(
            "Error: handling in this repo is thorough".to_string()
        ))
    );
    assert!(!state.view().failed());
}

#[test]
fn last_completion_wins() {
    init_logging();
    let (state, _) = update(submitted("repo"), Msg::SubmitClicked);

    let (state, _) = update(
        state,
        Msg::SubmissionDone {
            request_id: 2,
            result: Ok(Some("second".to_string())),
        },
    );
    assert_eq!(state.phase(), Phase::Waiting);
    assert_eq!(message(&state), "second");

    let (state, _) = update(
        state,
        Msg::SubmissionDone {
            request_id: 1,
            result: Ok(Some("first".to_string())),
        },
    );
    assert_eq!(state.phase(), Phase::Displayed);
    assert_eq!(message(&state), "first");
}

#[test]
fn unknown_completion_is_ignored() {
    init_logging();
    let before = submitted("repo");
    let (after, effects) = update(
        before.clone(),
        Msg::SubmissionDone {
            request_id: 42,
            result: Ok(Some("stray".to_string())),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(after, before);
    assert_eq!(after.phase(), Phase::Waiting);
}

#[test]
fn document_completion_is_presented_as_download() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::InputChanged("T".to_string()));
    let (state, _) = update(state, Msg::GenerateClicked);

    let document = GeneratedDocument {
        filename: "output.md".to_string(),
        content: "# Codebase Genius\n\nT".to_string(),
        location: Some(PathBuf::from("out/output.md")),
    };
    let (state, _) = update(
        state,
        Msg::DocumentReady {
            request_id: 1,
            result: Ok(document.clone()),
        },
    );

    assert_eq!(state.phase(), Phase::Displayed);
    assert_eq!(state.view().result, Some(ResultPayload::Document(document)));
}

#[test]
fn document_completion_does_not_settle_a_submission_id() {
    init_logging();
    let (state, _) = update(
        submitted("repo"),
        Msg::DocumentReady {
            request_id: 1,
            result: Err("disk full".to_string()),
        },
    );

    assert_eq!(state.phase(), Phase::Waiting);
    assert!(state.view().result.is_none());
}

#[test]
fn document_save_failure_is_prefixed() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::GenerateClicked);
    let (state, _) = update(
        state,
        Msg::DocumentReady {
            request_id: 1,
            result: Err("disk full".to_string()),
        },
    );

    assert_eq!(message(&state), "Error: disk full");
    assert!(state.view().failed());
}
