use std::time::Duration;

use genius_logging::{genius_debug, genius_warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::{FailureKind, InferRequest, InferResponse, RequestId, SubmitError};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/walker/infer";
pub const DEFAULT_MESSAGE: &str = "Process this GitHub repo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSettings {
    pub endpoint: String,
    pub message: String,
    /// Bearer token. The Authorization header is omitted when unset.
    pub token: Option<String>,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            token: None,
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

#[async_trait::async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends one submission and returns the first report text, if any.
    async fn submit(
        &self,
        request_id: RequestId,
        github_link: &str,
    ) -> Result<Option<String>, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestInferenceClient {
    settings: EndpointSettings,
    client: reqwest::Client,
}

impl ReqwestInferenceClient {
    pub fn new(settings: EndpointSettings) -> Result<Self, SubmitError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))?;
        if settings.token.is_none() {
            genius_warn!("No bearer token configured; set CODEBASE_GENIUS_TOKEN or `token` in genius.ron");
        }
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl InferenceClient for ReqwestInferenceClient {
    async fn submit(
        &self,
        request_id: RequestId,
        github_link: &str,
    ) -> Result<Option<String>, SubmitError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| SubmitError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let body = InferRequest {
            github_link: github_link.to_string(),
            message: self.settings.message.clone(),
        };

        let mut request = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&body);
        if let Some(token) = &self.settings.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        genius_debug!("request_id={} POST {}", request_id, self.settings.endpoint);
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            genius_warn!("request_id={} failed with {}", request_id, status);
            return Err(SubmitError::new(
                FailureKind::HttpStatus(status.as_u16()),
                text,
            ));
        }

        let reply: InferResponse = serde_json::from_str(&text)
            .map_err(|err| SubmitError::new(FailureKind::MalformedBody, err.to_string()))?;
        Ok(reply.first_response())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}
