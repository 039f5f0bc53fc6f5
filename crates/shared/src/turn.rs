//! Conversation turns and the mood labels attached to them.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete mood label. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Neutral,
    Happy,
    Thinking,
    Excited,
    Focused,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::Thinking => "thinking",
            Mood::Excited => "excited",
            Mood::Focused => "focused",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Assistant,
}

/// Opaque turn identifier, strictly increasing within one conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(u64);

impl TurnId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Heuristic data carried by assistant turns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssistantMeta {
    pub mood: Mood,
    /// In `[0, 1]`.
    pub confidence: f64,
    pub duration_ms: u64,
}

/// One message in a conversation. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    text: String,
    origin: Origin,
    /// Display-only `HH:MM` stamp; ordering comes from `id`.
    timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    meta: Option<AssistantMeta>,
}

/// `HH:MM` in local time.
pub fn display_timestamp() -> String {
    Local::now().format("%H:%M").to_string()
}

impl Turn {
    pub fn user(id: TurnId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            origin: Origin::User,
            timestamp: display_timestamp(),
            meta: None,
        }
    }

    pub fn assistant(id: TurnId, text: impl Into<String>, meta: AssistantMeta) -> Self {
        Self {
            id,
            text: text.into(),
            origin: Origin::Assistant,
            timestamp: display_timestamp(),
            meta: Some(AssistantMeta {
                confidence: meta.confidence.clamp(0.0, 1.0),
                ..meta
            }),
        }
    }

    pub fn id(&self) -> TurnId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn is_user(&self) -> bool {
        self.origin == Origin::User
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn meta(&self) -> Option<&AssistantMeta> {
        self.meta.as_ref()
    }

    pub fn mood(&self) -> Option<Mood> {
        self.meta.map(|m| m.mood)
    }

    pub fn confidence(&self) -> Option<f64> {
        self.meta.map(|m| m.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mood::Thinking).unwrap(), "\"thinking\"");
        let mood: Mood = serde_json::from_str("\"focused\"").unwrap();
        assert_eq!(mood, Mood::Focused);
    }

    #[test]
    fn test_user_turn_has_no_meta() {
        let turn = Turn::user(TurnId::new(3), "hello");
        assert!(turn.is_user());
        assert_eq!(turn.mood(), None);
        assert_eq!(turn.timestamp().len(), 5);
    }

    #[test]
    fn test_assistant_confidence_clamped() {
        let turn = Turn::assistant(
            TurnId::new(1),
            "hi",
            AssistantMeta {
                mood: Mood::Happy,
                confidence: 1.4,
                duration_ms: 12,
            },
        );
        assert_eq!(turn.confidence(), Some(1.0));
        assert_eq!(turn.origin(), Origin::Assistant);
    }

    #[test]
    fn test_user_turn_json_omits_meta() {
        let json = serde_json::to_value(Turn::user(TurnId::new(7), "x")).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["origin"], "user");
        assert!(json.get("meta").is_none());
    }
}
