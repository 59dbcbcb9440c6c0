//! Wire types for the generation service REST surface.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// File upload / readiness
// ---------------------------------------------------------------------------

/// Envelope returned by the media-upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FileEnvelope {
    pub file: FileResource,
}

/// A file resource as reported by the service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileResource {
    /// Service-assigned resource name, e.g. `files/abc-123`.
    pub name: String,
    /// Dereferenceable URI used in generation requests.
    pub uri: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    pub state: FileState,
}

/// Processing state of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    Processing,
    Active,
    Failed,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for FileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "PROCESSING"),
            Self::Active => write!(f, "ACTIVE"),
            Self::Failed => write!(f, "FAILED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Generation request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(crate) struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum Part {
    FileData {
        #[serde(rename = "fileUri")]
        file_uri: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Text(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

// ---------------------------------------------------------------------------
// Generation response
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u64,
    #[serde(default)]
    pub candidates_token_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_envelope_deserializes() {
        let json = r#"{"file":{"name":"files/abc-123","uri":"https://svc.example/v1beta/files/abc-123","mimeType":"application/pdf","state":"PROCESSING"}}"#;
        let envelope: FileEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.file.name, "files/abc-123");
        assert_eq!(envelope.file.state, FileState::Processing);
    }

    #[test]
    fn unknown_file_state_is_tolerated() {
        let json = r#"{"name":"files/x","uri":"u","state":"SOMETHING_NEW"}"#;
        let file: FileResource = serde_json::from_str(json).unwrap();
        assert_eq!(file.state, FileState::Unknown);
    }

    #[test]
    fn generate_request_serializes_camel_case() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::FileData {
                        file_uri: "https://svc.example/files/abc".into(),
                        mime_type: "application/pdf".into(),
                    },
                    Part::Text("describe the element".into()),
                ],
            }],
            generation_config: GenerationConfig {
                temperature: 0.1,
                max_output_tokens: 2048,
            },
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""fileData""#));
        assert!(json.contains(r#""fileUri""#));
        assert!(json.contains(r#""maxOutputTokens":2048"#));
        assert!(json.contains(r#""text":"describe the element""#));
    }

    #[test]
    fn generate_response_deserializes() {
        let json = r###"{
            "candidates":[{"content":{"parts":[{"text":"## Definition\nBody"}]}}],
            "usageMetadata":{"promptTokenCount":120,"candidatesTokenCount":45}
        }"###;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates.len(), 1);
        let usage = response.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, 120);
        assert_eq!(usage.candidates_token_count, 45);
    }

    #[test]
    fn empty_response_deserializes_to_no_candidates() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
        assert!(response.usage_metadata.is_none());
    }
}
