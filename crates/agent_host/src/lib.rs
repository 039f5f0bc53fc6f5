//! Agent Host - Nova's turn pipeline
//!
//! This crate provides:
//! - Keyword mood classification weighted by personality traits
//! - Prompt composition from traits and user text
//! - The turn orchestrator that drives a completion client
//! - Conversation and stats bookkeeping

pub mod classifier;
pub mod conversation;
pub mod orchestrator;
pub mod prompts;
pub mod stats;

pub use classifier::{classify, Classification, MoodRule};
pub use conversation::{ConversationAnalytics, ConversationStore};
pub use orchestrator::{SubmitOutcome, TurnOrchestrator};
pub use prompts::{compose, ASSISTANT_NAME, GREETING};
pub use stats::StatsAggregator;
