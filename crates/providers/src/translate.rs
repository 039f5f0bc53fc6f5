//! Optional post-processing: translate a reply through a LibreTranslate
//! compatible endpoint.

use parking_lot::Mutex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::settings::TranslationSettings;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

pub struct TranslationClient {
    http: Client,
    url: String,
    last_error: Mutex<Option<String>>,
}

impl TranslationClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
            last_error: Mutex::new(None),
        }
    }

    pub fn from_settings(settings: &TranslationSettings) -> Self {
        Self::new(settings.url.clone())
    }

    /// Error from the most recent call, if it failed.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    /// Translate `text` into `target`. `source` defaults to `auto`.
    ///
    /// Returns an empty string on any failure; the reason is kept in
    /// [`last_error`](Self::last_error).
    pub async fn translate(&self, text: &str, target: &str, source: Option<&str>) -> String {
        *self.last_error.lock() = None;
        match self.request(text, target, source.unwrap_or("auto")).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(error = %e, lang = target, "translation failed");
                *self.last_error.lock() = Some(e.to_string());
                String::new()
            }
        }
    }

    async fn request(&self, text: &str, target: &str, source: &str) -> anyhow::Result<String> {
        let body = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
        };
        let resp = self.http.post(&self.url).json(&body).send().await?;
        if !resp.status().is_success() {
            anyhow::bail!("Translation API error: {}", resp.status());
        }
        let parsed: TranslateResponse = resp.json().await?;
        Ok(parsed.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let json = serde_json::to_value(TranslateRequest {
            q: "hello",
            source: "auto",
            target: "es",
            format: "text",
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"q":"hello","source":"auto","target":"es","format":"text"}));
    }

    #[test]
    fn test_response_field_name() {
        let parsed: TranslateResponse = serde_json::from_str(r#"{"translatedText":"hola"}"#).unwrap();
        assert_eq!(parsed.translated_text, "hola");
    }

    #[tokio::test]
    async fn test_failure_returns_empty_and_records_error() {
        let client = TranslationClient::new("http://127.0.0.1:9/translate");
        assert_eq!(client.translate("hello", "es", None).await, "");
        assert!(client.last_error().is_some());
    }
}
