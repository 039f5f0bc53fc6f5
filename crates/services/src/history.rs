//! Saved conversation history.
//!
//! All saved conversations live in one versioned JSON document:
//! `{ "version": 1, "conversations": [...] }`. Documents written by a newer
//! or unknown format are refused rather than guessed at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::Turn;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const FORMAT_VERSION: u32 = 1;
const TITLE_LEN: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("history file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported history format version {found}")]
    UnsupportedVersion { found: u64 },
}

/// A saved conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedConversation {
    pub id: String,
    pub title: String,
    pub turns: Vec<Turn>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SavedConversation {
    fn new(turns: Vec<Turn>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title_for(&turns),
            turns,
            created_at: now,
            updated_at: now,
        }
    }

    fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self
                .turns
                .iter()
                .any(|t| t.text().to_lowercase().contains(query_lower))
    }
}

#[derive(Serialize, Deserialize)]
struct HistoryDocument {
    version: u32,
    conversations: Vec<SavedConversation>,
}

/// Title from the first user turn, else the first turn.
fn title_for(turns: &[Turn]) -> String {
    let source = turns
        .iter()
        .find(|t| t.is_user())
        .or_else(|| turns.first())
        .map(|t| t.text())
        .unwrap_or("New conversation");
    let mut title: String = source.chars().take(TITLE_LEN).collect::<String>().trim().to_string();
    if source.chars().count() > TITLE_LEN {
        title.push_str("...");
    }
    title
}

/// Plain-text transcript, one paragraph per turn.
pub fn export_text(conversation: &SavedConversation) -> String {
    conversation
        .turns
        .iter()
        .map(|t| format!("{}: {}", if t.is_user() { "You" } else { "Nova" }, t.text()))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Manages saved conversations with persistence and search
pub struct HistoryStore {
    path: PathBuf,
    conversations: Vec<SavedConversation>,
}

impl HistoryStore {
    /// `<config dir>/nova/conversations.json`, or `./conversations.json` when
    /// no config dir is known.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com.local", "Nova", "nova")
            .map(|p| p.config_dir().join("conversations.json"))
            .unwrap_or_else(|| PathBuf::from("./conversations.json"))
    }

    /// Load the document at `path`. A missing file is an empty history.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let conversations = match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), count = conversations.len(), "history loaded");
        Ok(Self {
            path,
            conversations,
        })
    }

    fn parse(content: &str) -> Result<Vec<SavedConversation>, HistoryError> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        // Bare arrays predate versioning.
        let found = value.get("version").and_then(|v| v.as_u64()).unwrap_or(0);
        if found != u64::from(FORMAT_VERSION) {
            return Err(HistoryError::UnsupportedVersion { found });
        }
        let doc: HistoryDocument = serde_json::from_value(value)?;
        Ok(doc.conversations)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[SavedConversation] {
        &self.conversations
    }

    pub fn get(&self, id: &str) -> Option<&SavedConversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    /// Save a snapshot of `turns` as a new entry. Empty conversations are
    /// not saved.
    pub fn save_conversation(&mut self, turns: &[Turn]) -> Result<Option<String>, HistoryError> {
        if turns.is_empty() {
            return Ok(None);
        }
        let conversation = SavedConversation::new(turns.to_vec());
        let id = conversation.id.clone();
        let mut conversations = self.conversations.clone();
        conversations.push(conversation);
        self.commit(conversations)?;
        tracing::info!(id = %id, turns = turns.len(), "conversation saved");
        Ok(Some(id))
    }

    pub fn delete(&mut self, id: &str) -> Result<bool, HistoryError> {
        let Some(pos) = self.conversations.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        let mut conversations = self.conversations.clone();
        conversations.remove(pos);
        self.commit(conversations)?;
        Ok(true)
    }

    /// Case-insensitive match over titles and turn text.
    pub fn search(&self, query: &str) -> Vec<&SavedConversation> {
        let query_lower = query.to_lowercase();
        self.conversations
            .iter()
            .filter(|c| c.matches(&query_lower))
            .collect()
    }

    /// Write `conversations` to disk, then adopt them. The in-memory list is
    /// left alone when the write fails.
    fn commit(&mut self, conversations: Vec<SavedConversation>) -> Result<(), HistoryError> {
        let doc = HistoryDocument {
            version: FORMAT_VERSION,
            conversations,
        };
        self.persist(&doc)?;
        self.conversations = doc.conversations;
        Ok(())
    }

    fn persist(&self, doc: &HistoryDocument) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(doc)?;
        // write-then-rename so a crash never leaves a truncated document
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AssistantMeta, Mood, TurnId};
    use tempfile::tempdir;

    fn sample(user_text: &str) -> Vec<Turn> {
        vec![
            Turn::assistant(
                TurnId::new(0),
                "Hey, I'm Nova",
                AssistantMeta {
                    mood: Mood::Excited,
                    confidence: 0.98,
                    duration_ms: 0,
                },
            ),
            Turn::user(TurnId::new(1), user_text),
        ]
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = HistoryStore::open(dir.path().join("none.json")).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_save_reload_delete() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("conversations.json");

        let turns = sample("tell me about rust");
        let mut store = HistoryStore::open(&path).unwrap();
        let id = store.save_conversation(&turns).unwrap().unwrap();
        assert_eq!(store.save_conversation(&[]).unwrap(), None);

        let mut reopened = HistoryStore::open(&path).unwrap();
        let saved = reopened.get(&id).unwrap();
        assert_eq!(saved.title, "tell me about rust");
        assert_eq!(saved.turns, turns);

        assert!(reopened.delete(&id).unwrap());
        assert!(!reopened.delete(&id).unwrap());
        assert!(HistoryStore::open(&path).unwrap().list().is_empty());
    }

    #[test]
    fn test_document_is_versioned() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("h.json");
        let mut store = HistoryStore::open(&path).unwrap();
        store.save_conversation(&sample("x")).unwrap();

        let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], 1);
        assert_eq!(raw["conversations"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_unversioned_and_future_documents() {
        let dir = tempdir().unwrap();
        let legacy = dir.path().join("legacy.json");
        fs::write(&legacy, "[]").unwrap();
        assert!(matches!(
            HistoryStore::open(&legacy),
            Err(HistoryError::UnsupportedVersion { found: 0 })
        ));

        let future = dir.path().join("future.json");
        fs::write(&future, r#"{"version":7,"conversations":[]}"#).unwrap();
        assert!(matches!(
            HistoryStore::open(&future),
            Err(HistoryError::UnsupportedVersion { found: 7 })
        ));
    }

    #[test]
    fn test_failed_write_leaves_list_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("h.json");
        let mut store = HistoryStore::open(&path).unwrap();
        let kept = store.save_conversation(&sample("keep me")).unwrap().unwrap();

        // a directory where the temp file goes makes every write fail
        fs::create_dir(path.with_extension("json.tmp")).unwrap();

        assert!(store.save_conversation(&sample("lost")).is_err());
        assert_eq!(store.list().len(), 1);
        assert!(store.search("lost").is_empty());

        assert!(store.delete(&kept).is_err());
        assert!(store.get(&kept).is_some());
        assert_eq!(HistoryStore::open(&path).unwrap().list().len(), 1);
    }

    #[test]
    fn test_search_title_and_text() {
        let dir = tempdir().unwrap();
        let mut store = HistoryStore::open(dir.path().join("h.json")).unwrap();
        store.save_conversation(&sample("Poems about the sea")).unwrap();
        store.save_conversation(&sample("debug my code")).unwrap();

        assert_eq!(store.search("POEMS").len(), 1);
        assert_eq!(store.search("nova").len(), 2);
        assert!(store.search("volcano").is_empty());
    }

    #[test]
    fn test_long_title_truncated() {
        let text = "a".repeat(80);
        assert_eq!(title_for(&sample(&text)), format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_export_text() {
        let conversation = SavedConversation::new(sample("hello"));
        assert_eq!(export_text(&conversation), "Nova: Hey, I'm Nova\n\nYou: hello");
    }
}
