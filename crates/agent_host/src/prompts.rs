//! Prompt composition for Nova.
//!
//! The persona preamble embeds each trait as a rounded percentage, then the
//! user's text follows verbatim after a `User: ` marker.

use providers::CompletionRequest;
use shared::TraitSet;

pub const ASSISTANT_NAME: &str = "Nova";

/// Opening line for a fresh conversation.
pub const GREETING: &str = "Hey, I'm Nova, your intelligent companion! I'm emotionally aware, creative, and always learning. Ask me anything, challenge me with a hard problem, or let's just have a great conversation. What shall we explore today?";

pub fn compose(traits: &TraitSet, user_text: &str) -> CompletionRequest {
    let p = traits.as_percentages();
    CompletionRequest::new(format!(
        r#"You are {name}, an AI companion with an adjustable personality.
Personality settings:
- Creativity: {creativity}%
- Logic: {logic}%
- Empathy: {empathy}%
- Curiosity: {curiosity}%
- Confidence: {confidence}%

Respond in a style that reflects these personality percentages.

User: {user_text}"#,
        name = ASSISTANT_NAME,
        creativity = p.creativity,
        logic = p.logic,
        empathy = p.empathy,
        curiosity = p.curiosity,
        confidence = p.confidence,
    ))
}
