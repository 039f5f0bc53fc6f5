use crate::canned::CannedResponder;
use crate::gemini::GeminiClient;
use crate::{CompletionClient, CompletionError, CompletionRequest};
use async_trait::async_trait;
use shared::settings::{AppSettings, ResponderKind};

/// Routes every turn to the one responder chosen by configuration.
///
/// Unlike a fallback chain, a failed Gemini call is never retried against the
/// canned pool: the caller sees the error and degrades.
pub enum ResponderRouter {
    Gemini(GeminiClient),
    Canned(CannedResponder),
}

impl ResponderRouter {
    pub fn from_settings(settings: &AppSettings) -> Result<Self, CompletionError> {
        match settings.responder {
            ResponderKind::Gemini => Ok(Self::Gemini(GeminiClient::from_settings(&settings.gemini)?)),
            ResponderKind::Canned => Ok(Self::Canned(CannedResponder::new())),
        }
    }

    pub fn kind(&self) -> ResponderKind {
        match self {
            Self::Gemini(_) => ResponderKind::Gemini,
            Self::Canned(_) => ResponderKind::Canned,
        }
    }
}

#[async_trait]
impl CompletionClient for ResponderRouter {
    fn name(&self) -> &'static str {
        match self {
            Self::Gemini(client) => client.name(),
            Self::Canned(client) => client.name(),
        }
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        match self {
            Self::Gemini(client) => client.complete(request).await,
            Self::Canned(client) => client.complete(request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::settings::GeminiSettings;

    #[test]
    fn test_canned_selected_by_settings() {
        let settings = AppSettings {
            responder: ResponderKind::Canned,
            ..AppSettings::default()
        };
        let router = ResponderRouter::from_settings(&settings).unwrap();
        assert_eq!(router.kind(), ResponderKind::Canned);
        assert_eq!(router.name(), "canned");
    }

    #[test]
    fn test_gemini_selected_with_key() {
        let settings = AppSettings {
            responder: ResponderKind::Gemini,
            gemini: GeminiSettings {
                api_key: Some("k".into()),
                ..GeminiSettings::default()
            },
            ..AppSettings::default()
        };
        let router = ResponderRouter::from_settings(&settings).unwrap();
        assert_eq!(router.kind(), ResponderKind::Gemini);
    }

    #[tokio::test]
    async fn test_canned_route_never_fails() {
        let router = ResponderRouter::Canned(CannedResponder::new());
        let reply = router
            .complete(&CompletionRequest::new("User: anything at all"))
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }
}
