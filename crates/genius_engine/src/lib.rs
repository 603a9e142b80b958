//! Codebase Genius engine: inference client, document blobs and effect execution.
mod client;
mod document;
mod engine;
mod persist;
mod types;

pub use client::{
    EndpointSettings, InferenceClient, ReqwestInferenceClient, DEFAULT_ENDPOINT, DEFAULT_MESSAGE,
};
pub use document::{MarkdownBlob, DOCUMENT_FILENAME, DOCUMENT_HEADING};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use persist::{ensure_download_dir, AtomicFileWriter, PersistError};
pub use types::{
    EngineEvent, FailureKind, InferRequest, InferResponse, RequestId, SubmitError,
};
