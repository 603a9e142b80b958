use std::sync::{mpsc, Arc};
use std::thread;

use genius_logging::genius_debug;

use crate::client::{EndpointSettings, InferenceClient, ReqwestInferenceClient};
use crate::{EngineEvent, RequestId, SubmitError};

/// Receives engine completions. Called from the engine's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Submit {
        request_id: RequestId,
        github_link: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] SubmitError),
}

/// Runs submissions on a background tokio runtime. Every submission is
/// independent; none are de-duplicated or cancelled.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: EndpointSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let client = ReqwestInferenceClient::new(settings)?;
        Self::with_client(Arc::new(client), sink)
    }

    pub fn with_client(
        client: Arc<dyn InferenceClient>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, sink.as_ref()).await;
                });
            }
        });

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, request_id: RequestId, github_link: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            request_id,
            github_link: github_link.into(),
        });
    }
}

async fn handle_command(client: &dyn InferenceClient, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Submit {
            request_id,
            github_link,
        } => {
            let result = client.submit(request_id, &github_link).await;
            genius_debug!("request_id={} completed ok={}", request_id, result.is_ok());
            sink.emit(EngineEvent::SubmissionCompleted { request_id, result });
        }
    }
}
