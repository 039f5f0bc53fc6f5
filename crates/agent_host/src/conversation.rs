//! Append-only conversation log plus derived analytics.

use shared::{AssistantMeta, Mood, Turn, TurnId};
use std::collections::BTreeMap;

/// Ordered turns with monotonically allocated ids.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
    next_id: u64,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from restored turns. Id allocation resumes after the highest id.
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        let next_id = turns.iter().map(|t| t.id().get() + 1).max().unwrap_or(0);
        Self { turns, next_id }
    }

    fn allocate(&mut self) -> TurnId {
        let id = TurnId::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> Turn {
        let turn = Turn::user(self.allocate(), text);
        self.turns.push(turn.clone());
        turn
    }

    pub fn push_assistant(&mut self, text: impl Into<String>, meta: AssistantMeta) -> Turn {
        let turn = Turn::assistant(self.allocate(), text, meta);
        self.turns.push(turn.clone());
        turn
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Bulk reset. Ids keep increasing across a clear.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

/// Summary numbers for an analytics panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationAnalytics {
    pub total: usize,
    pub user: usize,
    pub assistant: usize,
    pub average_confidence: f64,
    pub mood_distribution: BTreeMap<Mood, usize>,
}

impl ConversationAnalytics {
    pub fn from_turns(turns: &[Turn]) -> Self {
        let user = turns.iter().filter(|t| t.is_user()).count();
        let assistant = turns.len() - user;

        let confidence_sum: f64 = turns.iter().filter_map(|t| t.confidence()).sum();
        let mut mood_distribution = BTreeMap::new();
        for mood in turns.iter().filter_map(|t| t.mood()) {
            *mood_distribution.entry(mood).or_insert(0) += 1;
        }

        Self {
            total: turns.len(),
            user,
            assistant,
            average_confidence: confidence_sum / assistant.max(1) as f64,
            mood_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(mood: Mood, confidence: f64) -> AssistantMeta {
        AssistantMeta {
            mood,
            confidence,
            duration_ms: 0,
        }
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut store = ConversationStore::new();
        let a = store.push_user("a");
        let b = store.push_assistant("b", meta(Mood::Happy, 0.9));
        store.clear();
        let c = store.push_user("c");

        assert!(a.id() < b.id());
        assert!(b.id() < c.id());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_from_turns_resumes_ids() {
        let turns = vec![
            Turn::user(TurnId::new(4), "x"),
            Turn::user(TurnId::new(9), "y"),
        ];
        let mut store = ConversationStore::from_turns(turns);
        assert_eq!(store.push_user("z").id(), TurnId::new(10));
    }

    #[test]
    fn test_analytics() {
        let mut store = ConversationStore::new();
        store.push_assistant("greeting", meta(Mood::Excited, 1.0));
        store.push_user("hello");
        store.push_assistant("hi", meta(Mood::Happy, 0.5));

        let stats = ConversationAnalytics::from_turns(store.turns());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.user, 1);
        assert_eq!(stats.assistant, 2);
        assert_eq!(stats.average_confidence, 0.75);
        assert_eq!(stats.mood_distribution.get(&Mood::Happy), Some(&1));
    }

    #[test]
    fn test_empty_analytics() {
        let stats = ConversationAnalytics::from_turns(&[]);
        assert_eq!(stats.average_confidence, 0.0);
        assert!(stats.mood_distribution.is_empty());
    }
}
