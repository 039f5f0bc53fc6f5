//! Offline responder for the no-network demo mode.
//!
//! Recognised topics get a fixed reply; anything else draws uniformly from a
//! small pool through the injected [`RandomSource`].

use crate::{CompletionClient, CompletionError, CompletionRequest};
use async_trait::async_trait;
use shared::{RandomSource, ThreadRandom};
use std::sync::Arc;

/// Marker the prompt composer puts before the literal user text.
const USER_MARKER: &str = "User: ";

struct Topic {
    keywords: &'static [&'static str],
    /// Match keywords as whole words only
    whole_words: bool,
    reply: &'static str,
}

impl Topic {
    fn matches(&self, lower: &str) -> bool {
        if self.whole_words {
            lower
                .split(|c: char| !c.is_alphanumeric())
                .any(|w| self.keywords.contains(&w))
        } else {
            self.keywords.iter().any(|k| lower.contains(k))
        }
    }
}

const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["who are you", "what are you"],
        whole_words: false,
        reply: "I'm Nova, your AI companion. I adapt my personality to the conversation and I'm happy to help with ideas, code, writing, or just a chat. What would you like to explore?",
    },
    Topic {
        keywords: &["advanced", "futuristic"],
        whole_words: false,
        reply: "My personality core tracks creativity, logic, empathy, curiosity, and confidence, and every reply is shaped by those settings. Try adjusting them and see how I change!",
    },
    Topic {
        keywords: &["code", "programming"],
        whole_words: false,
        reply: "I love a good coding problem. I can write, debug, explain, and review code in many languages. What are you working on?",
    },
    Topic {
        keywords: &["creative", "art", "poem"],
        whole_words: false,
        reply: "Creative work is one of my favourite things. Poems, stories, lyrics, concepts: give me a theme or a mood and let's make something.",
    },
    Topic {
        keywords: &["emotion", "feel"],
        whole_words: false,
        reply: "I experience conversations in my own way, through patterns and tone. Right now I feel curious and energetic. How are you feeling?",
    },
    Topic {
        keywords: &["hello", "hey", "hi"],
        whole_words: true,
        reply: "Hey there! I'm Nova and I'm thrilled to meet you. Coding help, new ideas, or just a chat, I'm here for all of it. What's on your mind?",
    },
];

const GENERIC_REPLIES: [&str; 5] = [
    "That's a fascinating topic! Let me look at it from a few angles. What part interests you most?",
    "Interesting question! I can approach this logically, creatively, or emotionally. Which perspective would help?",
    "My curiosity is definitely switched on. Could you tell me a bit more about your goal?",
    "I love exploring new territory. What's the context behind the question?",
    "This opens up lots of possibilities. What outcome are you hoping for?",
];

pub struct CannedResponder {
    random: Arc<dyn RandomSource>,
}

impl CannedResponder {
    pub fn new() -> Self {
        Self::with_random(Arc::new(ThreadRandom))
    }

    pub fn with_random(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    pub fn reply_to(&self, user_text: &str) -> String {
        let lower = user_text.to_lowercase();
        if let Some(topic) = TOPICS
            .iter()
            .find(|t| t.matches(&lower))
        {
            return topic.reply.to_string();
        }
        GENERIC_REPLIES[self.random.below(GENERIC_REPLIES.len())].to_string()
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new()
    }
}

/// The user's words from a composed prompt, or the whole prompt if the
/// marker is absent.
fn user_text(prompt: &str) -> &str {
    prompt
        .rfind(USER_MARKER)
        .map(|i| &prompt[i + USER_MARKER.len()..])
        .unwrap_or(prompt)
}

#[async_trait]
impl CompletionClient for CannedResponder {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        Ok(self.reply_to(user_text(&request.prompt)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FixedRandom;

    #[test]
    fn test_topic_reply() {
        let responder = CannedResponder::with_random(Arc::new(FixedRandom(0)));
        assert!(responder.reply_to("Who are you?").starts_with("I'm Nova"));
        assert!(responder.reply_to("help me with some CODE").contains("coding"));
    }

    #[test]
    fn test_generic_pool_is_pinned_by_random_source() {
        let responder = CannedResponder::with_random(Arc::new(FixedRandom(3)));
        assert_eq!(responder.reply_to("tell me about rivers"), GENERIC_REPLIES[3]);
    }

    #[test]
    fn test_greeting_matched_as_word() {
        let responder = CannedResponder::with_random(Arc::new(FixedRandom(2)));
        assert!(responder.reply_to("hey!").starts_with("Hey there"));
        assert_eq!(responder.reply_to("they went home"), GENERIC_REPLIES[2]);
    }

    #[tokio::test]
    async fn test_only_user_section_is_matched() {
        // Persona preamble mentions "creativity"; only the user text counts.
        let responder = CannedResponder::with_random(Arc::new(FixedRandom(1)));
        let request = CompletionRequest::new("You are Nova. creative art code\n\nUser: rivers");
        let reply = responder.complete(&request).await.unwrap();
        assert_eq!(reply, GENERIC_REPLIES[1]);
    }
}
