//! Console rendering of orchestrator events.

use shared::{ChatEvent, Turn, TurnState};

/// One line of output for an event, or None when the event is not shown.
pub fn render(event: &ChatEvent) -> Option<String> {
    match event {
        ChatEvent::TurnAppended(turn) if !turn.is_user() => Some(render_reply(turn)),
        ChatEvent::TurnAppended(_) => None,
        ChatEvent::MoodChanged(mood) => Some(format!("  [mode: {}]", mood.as_str().to_uppercase())),
        ChatEvent::StateChanged(TurnState::AwaitingCompletion) => {
            Some("  Nova is typing...".to_string())
        }
        ChatEvent::StateChanged(_) => None,
        ChatEvent::StatsUpdated(_) => None,
        ChatEvent::ListeningChanged(true) => Some("  [voice: listening]".to_string()),
        ChatEvent::ListeningChanged(false) => Some("  [voice: off]".to_string()),
        ChatEvent::Cleared => Some("  [conversation cleared]".to_string()),
    }
}

fn render_reply(turn: &Turn) -> String {
    let mut out = format!("[{}] Nova: {}", turn.timestamp(), turn.text());
    if let Some(meta) = turn.meta() {
        out.push_str(&format!(
            "\n  Confidence: {}%",
            (meta.confidence * 100.0).round() as u32
        ));
        if meta.duration_ms > 0 {
            out.push_str(&format!(" | Processing: {}ms", meta.duration_ms));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AssistantMeta, Mood, TurnId};

    #[test]
    fn test_user_turns_not_echoed() {
        let event = ChatEvent::TurnAppended(Turn::user(TurnId::new(0), "hi"));
        assert!(render(&event).is_none());
    }

    #[test]
    fn test_reply_shows_confidence_and_processing() {
        let turn = Turn::assistant(
            TurnId::new(1),
            "hi back",
            AssistantMeta {
                mood: Mood::Happy,
                confidence: 0.92,
                duration_ms: 840,
            },
        );
        let line = render(&ChatEvent::TurnAppended(turn)).unwrap();
        assert!(line.contains("Nova: hi back"));
        assert!(line.contains("Confidence: 92% | Processing: 840ms"));
    }

    #[test]
    fn test_mood_line() {
        assert_eq!(
            render(&ChatEvent::MoodChanged(Mood::Excited)).unwrap(),
            "  [mode: EXCITED]"
        );
    }
}
