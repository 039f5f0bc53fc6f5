//! Local services for Nova.

pub mod history;

pub use history::{export_text, HistoryError, HistoryStore, SavedConversation};
