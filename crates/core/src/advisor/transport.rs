use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.5-flash";

/// Trait abstraction over the text-generation backend.
///
/// The advisor only ever sends one prompt and reads back one block of
/// text, so the seam is a single method. Tests swap in a canned
/// implementation; production uses [`GoogleGenerativeTransport`].
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AdvisoryTransport: Send + Sync {
    /// Send the prompt and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, CoreError>;
}

/// Google Generative Language REST transport (`generateContent`).
pub struct GoogleGenerativeTransport {
    client: Client,
    api_key: String,
}

impl GoogleGenerativeTransport {
    pub fn new(api_key: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key: api_key.into(),
        }
    }
}

// ── Generative Language API request/response types ──────────────────

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AdvisoryTransport for GoogleGenerativeTransport {
    async fn generate(&self, prompt: &str) -> Result<String, CoreError> {
        let url = format!("{BASE_URL}/{MODEL}:generateContent?key={}", self.api_key);

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp: GenerateResponse = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "GenerativeLanguage".into(),
                message: format!("Failed to parse response: {e}"),
            })?;

        resp.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| CoreError::Api {
                provider: "GenerativeLanguage".into(),
                message: "Response contained no candidates".into(),
            })
    }
}
