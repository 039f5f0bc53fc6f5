use crate::{CompletionClient, CompletionError, CompletionRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::settings::GeminiSettings;
use std::env;
use zeroize::Zeroizing;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

pub struct GeminiClient {
    http: Client,
    api_key: Zeroizing<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Client using `GEMINI_API_KEY` from the environment.
    pub fn new(model: &str) -> Result<Self, CompletionError> {
        Self::from_settings(&GeminiSettings {
            model: model.to_string(),
            ..GeminiSettings::default()
        })
    }

    pub fn from_settings(settings: &GeminiSettings) -> Result<Self, CompletionError> {
        let api_key = match &settings.api_key {
            Some(key) if !key.trim().is_empty() => key.clone(),
            // Try environment variable as fallback
            _ => env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty())
                .ok_or(CompletionError::MissingApiKey { provider: "gemini" })?,
        };

        // No client timeout: a hung request keeps the turn waiting.
        Ok(Self {
            http: Client::builder().build()?,
            api_key: Zeroizing::new(api_key),
            model: settings.model.clone(),
            base_url: settings
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// The key travels in a header so it never shows up in URLs or errors.
    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn build_request(prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
fn extract_text(body: &str) -> Result<String, CompletionError> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;
    parsed
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .and_then(|c| c.parts.first())
        .and_then(|p| p.text.clone())
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| CompletionError::MalformedResponse("missing candidate text".into()))
}

#[async_trait]
impl CompletionClient for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let req = Self::build_request(&request.prompt);
        tracing::debug!(model = %self.model, "sending gemini request");
        let resp = self
            .http
            .post(self.endpoint())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&req)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.without_url()))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let body = body.trim();
            let body = if body.len() > 800 {
                let cut = (0..=800).rev().find(|i| body.is_char_boundary(*i)).unwrap_or(0);
                format!("{}...", &body[..cut])
            } else {
                body.to_string()
            };
            return Err(CompletionError::Status {
                provider: "gemini",
                status: status.as_u16(),
                body,
            });
        }
        let body = resp
            .text()
            .await
            .map_err(|e| CompletionError::Transport(e.without_url()))?;
        extract_text(&body)
    }
}
