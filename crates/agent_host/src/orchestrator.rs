//! Turn orchestration: submission gate, heuristic, completion, bookkeeping.
//!
//! At most one turn is in flight. The gate is the orchestrator state itself,
//! checked and advanced inside a short critical section that is never held
//! across the completion `.await`.
//!
//! There is no timeout. A completion that never returns leaves the
//! orchestrator in [`TurnState::AwaitingCompletion`]; callers that need a
//! bound should wrap the client. Dropping a `submit` future mid-completion
//! reopens the gate; the user turn stays without a reply.

use crate::classifier::{classify, Classification};
use crate::conversation::ConversationStore;
use crate::prompts::{compose, GREETING};
use crate::stats::StatsAggregator;
use parking_lot::Mutex;
use providers::{CompletionClient, FALLBACK_REPLY};
use shared::{AssistantMeta, ChatEvent, Mood, StatsSnapshot, TraitStore, Turn, TurnState};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Confidence recorded on fallback replies.
const FALLBACK_CONFIDENCE: f64 = 0.5;
const GREETING_CONFIDENCE: f64 = 0.98;

/// What happened to a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Blank input; nothing recorded
    Rejected,
    /// Another turn was in flight; nothing recorded
    Ignored,
    /// The completion was recorded as the assistant turn
    Completed(Turn),
    /// The completion failed and the fallback reply was recorded
    Degraded(Turn),
}

impl SubmitOutcome {
    pub fn reply(&self) -> Option<&Turn> {
        match self {
            SubmitOutcome::Completed(turn) | SubmitOutcome::Degraded(turn) => Some(turn),
            _ => None,
        }
    }
}

struct Inner {
    state: TurnState,
    mood: Mood,
    listening: bool,
    conversation: ConversationStore,
    stats: StatsAggregator,
}

/// Reopens the gate if a submission is dropped while awaiting its completion.
struct InFlightGuard<'a> {
    orchestrator: &'a TurnOrchestrator,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut inner = self.orchestrator.inner.lock();
            tracing::debug!("submission dropped before completion");
            self.orchestrator.set_state(&mut inner, TurnState::Idle);
        }
    }
}

pub struct TurnOrchestrator {
    client: Arc<dyn CompletionClient>,
    traits: TraitStore,
    inner: Mutex<Inner>,
    /// Channel for UI observers
    event_sender: Option<mpsc::UnboundedSender<ChatEvent>>,
}

impl TurnOrchestrator {
    /// Orchestrator with an empty conversation. Call [`greet`](Self::greet) to
    /// open with the assistant greeting.
    pub fn new(client: Arc<dyn CompletionClient>, traits: TraitStore) -> Self {
        Self {
            client,
            traits,
            inner: Mutex::new(Inner {
                state: TurnState::Idle,
                mood: Mood::Neutral,
                listening: false,
                conversation: ConversationStore::new(),
                stats: StatsAggregator::new(),
            }),
            event_sender: None,
        }
    }

    pub fn with_events(mut self, event_sender: mpsc::UnboundedSender<ChatEvent>) -> Self {
        self.event_sender = Some(event_sender);
        self
    }

    pub fn with_stats(self, stats: StatsAggregator) -> Self {
        self.inner.lock().stats = stats;
        self
    }

    pub fn state(&self) -> TurnState {
        self.inner.lock().state
    }

    pub fn mood(&self) -> Mood {
        self.inner.lock().mood
    }

    pub fn is_listening(&self) -> bool {
        self.inner.lock().listening
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats.snapshot()
    }

    pub fn turns(&self) -> Vec<Turn> {
        self.inner.lock().conversation.turns().to_vec()
    }

    /// Trait handle shared with the control surface.
    pub fn traits(&self) -> &TraitStore {
        &self.traits
    }

    /// Append the opening greeting if the conversation is empty.
    pub fn greet(&self) -> Option<Turn> {
        let mut inner = self.inner.lock();
        if !inner.conversation.is_empty() {
            return None;
        }
        let turn = inner.conversation.push_assistant(
            GREETING,
            AssistantMeta {
                mood: Mood::Excited,
                confidence: GREETING_CONFIDENCE,
                duration_ms: 0,
            },
        );
        self.send_event(ChatEvent::TurnAppended(turn.clone()));
        self.set_mood(&mut inner, Mood::Excited);
        Some(turn)
    }

    /// Run one turn end to end.
    ///
    /// Surrounding whitespace is trimmed. Blank text and submissions made
    /// while a turn is in flight are ignored without touching the
    /// conversation.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("ignoring blank submission");
            return SubmitOutcome::Rejected;
        }

        let started = Instant::now();
        let (request, classification) = {
            let mut inner = self.inner.lock();
            if !inner.state.is_idle() {
                tracing::debug!(state = ?inner.state, "turn in flight, ignoring submission");
                return SubmitOutcome::Ignored;
            }
            self.set_state(&mut inner, TurnState::Submitting);

            let turn = inner.conversation.push_user(text);
            self.send_event(ChatEvent::TurnAppended(turn));
            self.set_mood(&mut inner, Mood::Thinking);

            // Later trait edits only affect later turns.
            let traits = self.traits.snapshot();
            let classification = classify(text, &traits);
            let request = compose(&traits, text);

            self.set_state(&mut inner, TurnState::AwaitingCompletion);
            (request, classification)
        };

        let mut guard = InFlightGuard {
            orchestrator: self,
            armed: true,
        };
        let result = self.client.complete(&request).await;
        guard.armed = false;
        let latency_ms = started.elapsed().as_millis() as u64;

        let mut inner = self.inner.lock();
        match result {
            Ok(reply) => self.resolve(&mut inner, reply, classification, latency_ms),
            Err(e) => {
                tracing::warn!(provider = self.client.name(), error = %e, "completion failed");
                self.resolve_with_fallback(&mut inner)
            }
        }
    }

    fn resolve(
        &self,
        inner: &mut Inner,
        reply: String,
        classification: Classification,
        latency_ms: u64,
    ) -> SubmitOutcome {
        self.set_state(inner, TurnState::Resolved);
        let turn = inner.conversation.push_assistant(
            reply,
            AssistantMeta {
                mood: classification.mood,
                confidence: classification.confidence,
                duration_ms: latency_ms,
            },
        );
        self.send_event(ChatEvent::TurnAppended(turn.clone()));

        let snapshot = inner.stats.record(latency_ms);
        self.send_event(ChatEvent::StatsUpdated(snapshot));

        self.set_mood(inner, classification.mood);
        self.set_state(inner, TurnState::Idle);
        tracing::debug!(
            turn = %turn.id(),
            mood = %classification.mood,
            rule = ?classification.rule,
            latency_ms,
            "turn resolved"
        );
        SubmitOutcome::Completed(turn)
    }

    fn resolve_with_fallback(&self, inner: &mut Inner) -> SubmitOutcome {
        self.set_state(inner, TurnState::ErrorResolved);
        let turn = inner.conversation.push_assistant(
            FALLBACK_REPLY,
            AssistantMeta {
                mood: Mood::Neutral,
                confidence: FALLBACK_CONFIDENCE,
                duration_ms: 0,
            },
        );
        self.send_event(ChatEvent::TurnAppended(turn.clone()));
        self.set_mood(inner, Mood::Neutral);
        self.set_state(inner, TurnState::Idle);
        SubmitOutcome::Degraded(turn)
    }

    /// Flip the voice flag. Turning it on puts Nova in the focused mood.
    pub fn toggle_listening(&self) -> bool {
        let mut inner = self.inner.lock();
        inner.listening = !inner.listening;
        let listening = inner.listening;
        self.send_event(ChatEvent::ListeningChanged(listening));
        if listening {
            self.set_mood(&mut inner, Mood::Focused);
        }
        listening
    }

    /// Clear the conversation and greet again. Ignored while a turn is in
    /// flight.
    pub fn reset(&self) -> bool {
        {
            let mut inner = self.inner.lock();
            if !inner.state.is_idle() {
                return false;
            }
            inner.conversation.clear();
            self.send_event(ChatEvent::Cleared);
        }
        self.greet();
        true
    }

    /// Replace the conversation with restored turns. Ignored while a turn is
    /// in flight.
    pub fn load(&self, turns: Vec<Turn>) -> bool {
        let mut inner = self.inner.lock();
        if !inner.state.is_idle() {
            return false;
        }
        let mood = turns.iter().rev().find_map(|t| t.mood()).unwrap_or(Mood::Neutral);
        inner.conversation = ConversationStore::from_turns(turns);
        self.send_event(ChatEvent::Cleared);
        for turn in inner.conversation.turns() {
            self.send_event(ChatEvent::TurnAppended(turn.clone()));
        }
        self.set_mood(&mut inner, mood);
        true
    }

    fn set_state(&self, inner: &mut Inner, state: TurnState) {
        inner.state = state;
        self.send_event(ChatEvent::StateChanged(state));
    }

    fn set_mood(&self, inner: &mut Inner, mood: Mood) {
        if inner.mood != mood {
            inner.mood = mood;
            self.send_event(ChatEvent::MoodChanged(mood));
        }
    }

    fn send_event(&self, event: ChatEvent) {
        if let Some(ref sender) = self.event_sender {
            // Ignore send errors (receiver may have dropped)
            let _ = sender.send(event);
        }
    }
}
