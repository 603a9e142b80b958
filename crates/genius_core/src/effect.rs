use crate::RequestId;

/// Side effects requested by `update`; the shell executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Post the input to the inference endpoint.
    SubmitRepository {
        request_id: RequestId,
        github_link: String,
    },
    /// Build the Markdown download from the input.
    GenerateDocument { request_id: RequestId, input: String },
}
