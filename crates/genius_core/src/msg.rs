#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the input text.
    InputChanged(String),
    /// User asked for the input to be sent to the inference endpoint.
    SubmitClicked,
    /// User asked for a local Markdown document built from the input.
    GenerateClicked,
    /// Engine finished a submission. `Ok(None)` means the reply carried no report text.
    SubmissionDone {
        request_id: crate::RequestId,
        result: Result<Option<String>, String>,
    },
    /// Shell finished building (and possibly saving) a document.
    DocumentReady {
        request_id: crate::RequestId,
        result: Result<crate::GeneratedDocument, String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
