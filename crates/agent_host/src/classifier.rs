//! Keyword mood heuristic.
//!
//! Keyword sets are checked in a fixed order and the first match wins, so
//! text containing words from several sets resolves predictably.

use shared::{Mood, TraitSet};

/// Which branch produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodRule {
    /// A keyword set matched
    Keyword(Mood),
    /// Nothing matched; the generic-response path reports `Thinking`
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub mood: Mood,
    /// `min(1, traits.confidence + boost)`
    pub confidence: f64,
    pub rule: MoodRule,
}

struct KeywordRule {
    mood: Mood,
    /// Matched anywhere in the text
    keywords: &'static [&'static str],
    /// Matched only as whole words; short greetings hide inside other words
    words: &'static [&'static str],
    boost: fn(&TraitSet) -> f64,
}

impl KeywordRule {
    fn matches(&self, lower: &str) -> bool {
        self.keywords.iter().any(|k| lower.contains(k))
            || lower
                .split(|c: char| !c.is_alphanumeric())
                .any(|w| self.words.contains(&w))
    }
}

fn empathy_boost(t: &TraitSet) -> f64 {
    t.empathy() * 0.2
}

fn logic_boost(t: &TraitSet) -> f64 {
    t.logic() * 0.2
}

fn curiosity_boost(t: &TraitSet) -> f64 {
    t.curiosity() * 0.2
}

fn focus_boost(t: &TraitSet) -> f64 {
    t.logic() * 0.15
}

const RULES: [KeywordRule; 4] = [
    KeywordRule {
        mood: Mood::Happy,
        keywords: &["happy", "excited", "awesome"],
        words: &["hello", "hey", "hi"],
        boost: empathy_boost,
    },
    KeywordRule {
        mood: Mood::Thinking,
        keywords: &["think", "analyze", "complex"],
        words: &[],
        boost: logic_boost,
    },
    KeywordRule {
        mood: Mood::Excited,
        keywords: &["wow", "amazing", "incredible"],
        words: &[],
        boost: curiosity_boost,
    },
    KeywordRule {
        mood: Mood::Focused,
        keywords: &["code", "focus", "work"],
        words: &[],
        boost: focus_boost,
    },
];

pub fn classify(input: &str, traits: &TraitSet) -> Classification {
    let lower = input.to_lowercase();
    let base = traits.confidence();

    for rule in &RULES {
        if rule.matches(&lower) {
            return Classification {
                mood: rule.mood,
                confidence: (base + (rule.boost)(traits)).min(1.0),
                rule: MoodRule::Keyword(rule.mood),
            };
        }
    }

    Classification {
        mood: Mood::Thinking,
        confidence: base.min(1.0),
        rule: MoodRule::Fallback,
    }
}
