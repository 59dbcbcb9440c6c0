//! Generation-service client for Docsmith.
//!
//! Wraps the external text-generation service behind the [`Generator`]
//! trait: upload a reference document once, then generate prose per prompt
//! against it. The concrete [`GenAiClient`] speaks a Gemini-style REST
//! surface; tests and the batch driver can substitute any other
//! implementation.

mod client;
mod types;

use std::path::Path;

use docsmith_shared::Result;

pub use client::{GenAiClient, GenAiConfig};
pub use types::FileState;

// ---------------------------------------------------------------------------
// Port
// ---------------------------------------------------------------------------

/// Handle to an uploaded, ready reference document.
#[derive(Debug, Clone)]
pub struct ReferenceHandle {
    /// Service-assigned resource name, e.g. `files/abc-123`.
    pub name: String,
    /// URI used to reference the document in generation requests.
    pub uri: String,
    /// Content type recorded at upload.
    pub mime_type: String,
}

/// Text returned by one generation call, with token accounting.
#[derive(Debug, Clone)]
pub struct GeneratedText {
    pub text: String,
    pub tokens_in: u64,
    pub tokens_out: u64,
}

/// The generation service as seen by the batch driver.
#[async_trait::async_trait]
pub trait Generator: Send + Sync {
    /// Upload a reference document and block until it is ready for use.
    async fn upload_reference(&self, path: &Path) -> Result<ReferenceHandle>;

    /// Generate prose for `prompt` against the uploaded reference.
    async fn generate(&self, handle: &ReferenceHandle, prompt: &str) -> Result<GeneratedText>;
}
