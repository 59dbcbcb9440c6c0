//! HTTP client for the generation service.
//!
//! Two operations: upload a reference document (then poll until the service
//! reports it ready) and generate prose against that reference plus a
//! prompt. Transient failures on the generation call are retried with
//! exponential backoff; terminal upload states and malformed responses are
//! not.

use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part as MultipartPart};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use docsmith_shared::{AppConfig, DocsmithError, Result};

use crate::types::{
    Content, FileEnvelope, FileResource, FileState, GenerateRequest, GenerateResponse,
    GenerationConfig, Part,
};
use crate::{GeneratedText, Generator, ReferenceHandle};

/// User-Agent string for service requests.
const USER_AGENT: &str = concat!("docsmith/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Runtime configuration
// ---------------------------------------------------------------------------

/// Runtime client configuration — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct GenAiConfig {
    /// Service base URL (no trailing slash).
    pub base_url: String,
    /// Model identifier, e.g. `gemini-1.5-pro`.
    pub model: String,
    /// Interval between readiness polls.
    pub poll_interval: Duration,
    /// Overall deadline for the reference document to become ready.
    pub upload_deadline: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Attempts for transient generation failures (1 = no retry).
    pub retry_attempts: u32,
    /// Base delay for exponential backoff between attempts.
    pub retry_base_delay: Duration,
    /// Sampling temperature.
    pub temperature: f64,
    /// Output token cap per call.
    pub max_output_tokens: u32,
}

impl From<&AppConfig> for GenAiConfig {
    fn from(config: &AppConfig) -> Self {
        let genai = &config.genai;
        Self {
            base_url: genai.base_url.trim_end_matches('/').to_string(),
            model: genai.model.clone(),
            poll_interval: Duration::from_secs(genai.poll_interval_secs),
            upload_deadline: Duration::from_secs(genai.upload_deadline_secs),
            request_timeout: Duration::from_secs(genai.request_timeout_secs),
            retry_attempts: genai.retry_attempts.max(1),
            retry_base_delay: Duration::from_millis(genai.retry_base_delay_ms),
            temperature: genai.temperature,
            max_output_tokens: genai.max_output_tokens,
        }
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Generation-service client over HTTP.
pub struct GenAiClient {
    config: GenAiConfig,
    api_key: String,
    http: reqwest::Client,
}

/// One failed attempt, with a transiency verdict for the retry loop.
struct AttemptError {
    error: DocsmithError,
    transient: bool,
}

impl AttemptError {
    fn fatal(error: DocsmithError) -> Self {
        Self {
            error,
            transient: false,
        }
    }

    fn transport(context: &str, error: reqwest::Error) -> Self {
        let transient = error.is_timeout() || error.is_connect();
        Self {
            error: DocsmithError::Service(format!("{context}: {error}")),
            transient,
        }
    }

    fn status(context: &str, status: StatusCode, body: &str) -> Self {
        let transient =
            status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
        let body = body.trim();
        let detail = if body.is_empty() {
            String::new()
        } else {
            format!(": {}", body.chars().take(200).collect::<String>())
        };
        Self {
            error: DocsmithError::Service(format!("{context}: HTTP {status}{detail}")),
            transient,
        }
    }
}

impl GenAiClient {
    /// Create a new client. The key is sent per request, never logged.
    pub fn new(config: GenAiConfig, api_key: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DocsmithError::Service(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            api_key,
            http,
        })
    }

    /// Upload the reference document and block until the service reports it
    /// ready, polling on the configured interval.
    #[instrument(skip_all, fields(path = %path.display()))]
    async fn upload_and_poll(&self, path: &Path) -> Result<ReferenceHandle> {
        info!("uploading reference document");

        let bytes = tokio::fs::read(path).await.map_err(|e| DocsmithError::io(path, e))?;
        let mime = guess_mime(path);
        let display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("reference")
            .to_string();

        let metadata = serde_json::json!({ "file": { "display_name": display_name.as_str() } });
        let form = Form::new()
            .part(
                "metadata",
                MultipartPart::text(metadata.to_string())
                    .mime_str("application/json")
                    .map_err(|e| DocsmithError::Service(format!("upload metadata: {e}")))?,
            )
            .part(
                "file",
                MultipartPart::bytes(bytes)
                    .file_name(display_name)
                    .mime_str(mime)
                    .map_err(|e| DocsmithError::Service(format!("upload body: {e}")))?,
            );

        let response = self
            .http
            .post(format!("{}/upload/v1beta/files", self.config.base_url))
            .header("x-goog-api-key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| DocsmithError::Service(format!("upload request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError::status("upload", status, &body).error);
        }

        let envelope: FileEnvelope = response
            .json()
            .await
            .map_err(|e| DocsmithError::Service(format!("invalid upload response: {e}")))?;
        let mut file = envelope.file;

        debug!(name = %file.name, state = %file.state, "reference document uploaded");

        // Poll until the service reaches a terminal state, bounded by the
        // configured deadline.
        let deadline = Instant::now() + self.config.upload_deadline;
        while file.state == FileState::Processing {
            if Instant::now() >= deadline {
                return Err(DocsmithError::Service(format!(
                    "reference document not ready after {:?}",
                    self.config.upload_deadline
                )));
            }
            debug!(name = %file.name, "reference document still processing");
            tokio::time::sleep(self.config.poll_interval).await;
            file = self.get_file(&file.name).await?;
        }

        if file.state != FileState::Active {
            return Err(DocsmithError::Service(format!(
                "file processing failed: {}",
                file.state
            )));
        }

        info!(name = %file.name, "reference document ready");

        Ok(ReferenceHandle {
            name: file.name,
            uri: file.uri,
            mime_type: file.mime_type.unwrap_or_else(|| mime.to_string()),
        })
    }

    /// Fetch the current state of an uploaded file.
    async fn get_file(&self, name: &str) -> Result<FileResource> {
        let response = self
            .http
            .get(format!("{}/v1beta/{name}", self.config.base_url))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| DocsmithError::Service(format!("file status request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError::status("file status", status, &body).error);
        }

        response
            .json()
            .await
            .map_err(|e| DocsmithError::Service(format!("invalid file status response: {e}")))
    }

    /// One generation attempt, no retries.
    async fn generate_once(
        &self,
        handle: &ReferenceHandle,
        prompt: &str,
    ) -> std::result::Result<GeneratedText, AttemptError> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::FileData {
                        file_uri: handle.uri.clone(),
                        mime_type: handle.mime_type.clone(),
                    },
                    Part::Text(prompt.to_string()),
                ],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            },
        };

        let response = self
            .http
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.config.base_url, self.config.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AttemptError::transport("generate request", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttemptError::status("generate", status, &body));
        }

        let response: GenerateResponse = response.json().await.map_err(|e| {
            AttemptError::fatal(DocsmithError::Service(format!(
                "invalid generate response: {e}"
            )))
        })?;

        let Some(candidate) = response.candidates.first() else {
            return Err(AttemptError::fatal(DocsmithError::Service(
                "no candidates in generate response".into(),
            )));
        };

        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        let usage = response.usage_metadata.unwrap_or_default();

        Ok(GeneratedText {
            text,
            tokens_in: usage.prompt_token_count,
            tokens_out: usage.candidates_token_count,
        })
    }
}

#[async_trait::async_trait]
impl Generator for GenAiClient {
    async fn upload_reference(&self, path: &Path) -> Result<ReferenceHandle> {
        self.upload_and_poll(path).await
    }

    /// Generate prose for a prompt against the uploaded reference.
    ///
    /// Transient failures (timeouts, connection errors, HTTP 429/5xx) are
    /// retried with exponential backoff up to the configured attempt count.
    async fn generate(&self, handle: &ReferenceHandle, prompt: &str) -> Result<GeneratedText> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.generate_once(handle, prompt).await {
                Ok(generated) => return Ok(generated),
                Err(failure) if failure.transient && attempt < self.config.retry_attempts => {
                    let delay = self.config.retry_base_delay * 2u32.saturating_pow(attempt - 1);
                    warn!(
                        attempt,
                        error = %failure.error,
                        delay_ms = delay.as_millis() as u64,
                        "transient generation failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(failure) => return Err(failure.error),
            }
        }
    }
}

/// Content type for the reference upload, by extension.
fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") | Some("mdx") => "text/markdown",
        Some("html") | Some("htm") => "text/html",
        _ => "application/octet-stream",
    }
}
