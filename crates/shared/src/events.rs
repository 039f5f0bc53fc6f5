//! Events emitted by the turn orchestrator for UI consumers.

use serde::{Deserialize, Serialize};

use crate::turn::{Mood, Turn};

/// Orchestrator lifecycle for a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Ready for a submission
    Idle,
    /// User turn being recorded and the request composed
    Submitting,
    /// Waiting on the completion client
    AwaitingCompletion,
    /// Completion arrived and was recorded
    Resolved,
    /// Completion failed; a fallback reply was recorded
    ErrorResolved,
}

impl TurnState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TurnState::Idle)
    }
}

/// Running counters derived from completed turns. Not authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub turns_processed: u64,
    /// Two-term blend `(previous + latest) / 2`, not a true mean.
    pub average_latency_ms: f64,
    pub knowledge_accessed: u64,
    /// 0..=100
    pub creativity_level: u8,
}

impl Default for StatsSnapshot {
    fn default() -> Self {
        Self {
            turns_processed: 0,
            average_latency_ms: 1200.0,
            knowledge_accessed: 0,
            creativity_level: 75,
        }
    }
}

/// Conversation events for real-time rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChatEvent {
    /// A turn was appended to the conversation
    TurnAppended(Turn),
    /// The active mood changed
    MoodChanged(Mood),
    /// The orchestrator moved to a new state
    StateChanged(TurnState),
    /// Stats were updated after a resolved turn
    StatsUpdated(StatsSnapshot),
    /// Voice listening flag toggled
    ListeningChanged(bool),
    /// Conversation was cleared or replaced
    Cleared,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::TurnId;

    #[test]
    fn test_default_stats() {
        let stats = StatsSnapshot::default();
        assert_eq!(stats.turns_processed, 0);
        assert_eq!(stats.average_latency_ms, 1200.0);
        assert_eq!(stats.creativity_level, 75);
    }

    #[test]
    fn test_event_serializes() {
        let event = ChatEvent::TurnAppended(Turn::user(TurnId::new(1), "hey"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["TurnAppended"]["text"], "hey");

        let json = serde_json::to_value(ChatEvent::MoodChanged(Mood::Excited)).unwrap();
        assert_eq!(json["MoodChanged"], "excited");
    }

    #[test]
    fn test_only_idle_is_idle() {
        assert!(TurnState::Idle.is_idle());
        assert!(!TurnState::AwaitingCompletion.is_idle());
    }
}
