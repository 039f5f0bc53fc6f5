//! Completion providers for Nova.
//!
//! Every provider answers one [`CompletionRequest`] per call. Providers report
//! failures as [`CompletionError`]; callers that want the degrade-instead-of-fail
//! behaviour use [`complete_or_fallback`].

pub mod canned;
pub mod gemini;
pub mod router;
pub mod translate;

pub use canned::CannedResponder;
pub use gemini::GeminiClient;
pub use router::ResponderRouter;
pub use translate::TranslationClient;

use async_trait::async_trait;

/// Reply used whenever a completion cannot be obtained.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";

/// Composed prompt text for a single turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("no API key configured for {provider}")]
    MissingApiKey { provider: &'static str },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A text-completion backend. Implementations issue at most one request per
/// call and never retry.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Provider identifier for logs
    fn name(&self) -> &'static str;

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

/// Run a completion, swallowing any failure into [`FALLBACK_REPLY`].
pub async fn complete_or_fallback(
    client: &dyn CompletionClient,
    request: &CompletionRequest,
) -> String {
    match client.complete(request).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(provider = client.name(), error = %e, "completion failed, using fallback");
            FALLBACK_REPLY.to_string()
        }
    }
}
