use genius_core::{AppViewModel, Phase, ResultPayload};

/// What the terminal shows for one view: a status line and the result body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    pub status: String,
    pub result: Option<String>,
}

pub fn render(view: &AppViewModel) -> Frame {
    let status = match view.phase {
        Phase::Idle if view.input.is_empty() => "Idle".to_string(),
        Phase::Idle => format!("Input: {} chars", view.input.chars().count()),
        Phase::Waiting => format!("Waiting for response ({} in flight)", view.pending_requests),
        Phase::Generating => "Generating document".to_string(),
        Phase::Displayed if view.pending_requests > 0 => {
            format!("Displayed ({} in flight)", view.pending_requests)
        }
        Phase::Displayed => "Displayed".to_string(),
    };

    Frame {
        status,
        result: view.result.as_ref().map(format_result),
    }
}

fn format_result(result: &ResultPayload) -> String {
    match result {
        ResultPayload::Message(text) | ResultPayload::Failure(text) => text.clone(),
        ResultPayload::Document(doc) => match &doc.location {
            Some(path) => format!(
                "Saved {} ({} bytes) to {}",
                doc.filename,
                doc.content.len(),
                path.display()
            ),
            None => doc.content.clone(),
        },
    }
}
