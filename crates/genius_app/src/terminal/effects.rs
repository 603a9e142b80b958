use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use genius_core::{Effect, GeneratedDocument, Msg};
use genius_engine::{
    EndpointSettings, EngineError, EngineEvent, EngineHandle, EventSink, InferenceClient,
    MarkdownBlob, ReqwestInferenceClient, SubmitError,
};
use genius_logging::{genius_error, genius_info, genius_warn};

use super::ShellEvent;

/// Forwards engine completions into the shell's event channel.
struct ShellSink {
    tx: mpsc::Sender<ShellEvent>,
}

impl EventSink for ShellSink {
    fn emit(&self, event: EngineEvent) {
        let msg = match event {
            EngineEvent::SubmissionCompleted { request_id, result } => Msg::SubmissionDone {
                request_id,
                result: result.map_err(|err| {
                    genius_warn!("Request {} failed ({}): {}", request_id, err.kind, err.message);
                    describe_failure(err)
                }),
            },
        };
        let _ = self.tx.send(ShellEvent::Msg(msg));
    }
}

/// Text shown after the error prefix. Non-2xx replies show their body
/// verbatim unless it is empty.
fn describe_failure(err: SubmitError) -> String {
    if err.message.is_empty() {
        err.kind.to_string()
    } else {
        err.message
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
    tx: mpsc::Sender<ShellEvent>,
    output_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(
        settings: EndpointSettings,
        output_dir: PathBuf,
        tx: mpsc::Sender<ShellEvent>,
    ) -> Result<Self, EngineError> {
        let client = ReqwestInferenceClient::new(settings)?;
        Self::with_client(Arc::new(client), output_dir, tx)
    }

    pub fn with_client(
        client: Arc<dyn InferenceClient>,
        output_dir: PathBuf,
        tx: mpsc::Sender<ShellEvent>,
    ) -> Result<Self, EngineError> {
        let sink = Arc::new(ShellSink { tx: tx.clone() });
        let engine = EngineHandle::with_client(client, sink)?;
        Ok(Self {
            engine,
            tx,
            output_dir,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitRepository {
                    request_id,
                    github_link,
                } => {
                    genius_info!(
                        "SubmitRepository request_id={} link_len={}",
                        request_id,
                        github_link.len()
                    );
                    self.engine.submit(request_id, github_link);
                }
                Effect::GenerateDocument { request_id, input } => {
                    let result = self.generate(&input);
                    let _ = self
                        .tx
                        .send(ShellEvent::Msg(Msg::DocumentReady { request_id, result }));
                }
            }
        }
    }

    fn generate(&self, input: &str) -> Result<GeneratedDocument, String> {
        let blob = MarkdownBlob::from_input(input);
        match blob.save(&self.output_dir) {
            Ok(path) => {
                genius_info!("Saved {} bytes to {:?}", blob.len(), path);
                Ok(GeneratedDocument {
                    filename: blob.filename,
                    content: blob.content,
                    location: Some(path),
                })
            }
            Err(err) => {
                genius_error!("Failed to save {}: {}", blob.filename, err);
                Err(err.to_string())
            }
        }
    }
}
