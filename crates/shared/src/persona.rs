//! Personality parameters that shape prompts and mood confidence.
//!
//! A [`TraitSet`] is always valid: every scalar is finite and inside
//! `[0.0, 1.0]`. Construction is the only place values are checked, so
//! readers never need to clamp.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TraitError {
    #[error("trait {name} is not a finite number")]
    NotFinite { name: &'static str },

    #[error("trait {name} = {value} is outside [0, 1]")]
    OutOfRange { name: &'static str, value: f64 },
}

/// The five personality scalars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTraits", into = "RawTraits")]
pub struct TraitSet {
    creativity: f64,
    logic: f64,
    empathy: f64,
    curiosity: f64,
    confidence: f64,
}

/// Per-trait rounded percentages, as shown on sliders and in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitPercentages {
    pub creativity: u8,
    pub logic: u8,
    pub empathy: u8,
    pub curiosity: u8,
    pub confidence: u8,
}

#[derive(Serialize, Deserialize)]
struct RawTraits {
    creativity: f64,
    logic: f64,
    empathy: f64,
    curiosity: f64,
    confidence: f64,
}

fn check(name: &'static str, value: f64) -> Result<f64, TraitError> {
    if !value.is_finite() {
        return Err(TraitError::NotFinite { name });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(TraitError::OutOfRange { name, value });
    }
    Ok(value)
}

fn percent(value: f64) -> u8 {
    (value * 100.0).round() as u8
}

impl TraitSet {
    pub fn new(
        creativity: f64,
        logic: f64,
        empathy: f64,
        curiosity: f64,
        confidence: f64,
    ) -> Result<Self, TraitError> {
        Ok(Self {
            creativity: check("creativity", creativity)?,
            logic: check("logic", logic)?,
            empathy: check("empathy", empathy)?,
            curiosity: check("curiosity", curiosity)?,
            confidence: check("confidence", confidence)?,
        })
    }

    /// Build from 0..=100 slider values. Anything above 100 is treated as 100.
    pub fn from_percentages(
        creativity: u8,
        logic: u8,
        empathy: u8,
        curiosity: u8,
        confidence: u8,
    ) -> Self {
        let norm = |p: u8| f64::from(p.min(100)) / 100.0;
        Self {
            creativity: norm(creativity),
            logic: norm(logic),
            empathy: norm(empathy),
            curiosity: norm(curiosity),
            confidence: norm(confidence),
        }
    }

    pub fn creativity(&self) -> f64 {
        self.creativity
    }

    pub fn logic(&self) -> f64 {
        self.logic
    }

    pub fn empathy(&self) -> f64 {
        self.empathy
    }

    pub fn curiosity(&self) -> f64 {
        self.curiosity
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn as_percentages(&self) -> TraitPercentages {
        TraitPercentages {
            creativity: percent(self.creativity),
            logic: percent(self.logic),
            empathy: percent(self.empathy),
            curiosity: percent(self.curiosity),
            confidence: percent(self.confidence),
        }
    }
}

impl Default for TraitSet {
    fn default() -> Self {
        Self {
            creativity: 0.8,
            logic: 0.9,
            empathy: 0.85,
            curiosity: 0.95,
            confidence: 0.75,
        }
    }
}

impl TryFrom<RawTraits> for TraitSet {
    type Error = TraitError;

    fn try_from(raw: RawTraits) -> Result<Self, Self::Error> {
        TraitSet::new(
            raw.creativity,
            raw.logic,
            raw.empathy,
            raw.curiosity,
            raw.confidence,
        )
    }
}

impl From<TraitSet> for RawTraits {
    fn from(t: TraitSet) -> Self {
        Self {
            creativity: t.creativity,
            logic: t.logic,
            empathy: t.empathy,
            curiosity: t.curiosity,
            confidence: t.confidence,
        }
    }
}

/// Shared handle to the user-controlled trait set.
///
/// The control surface replaces the whole set; the orchestrator only takes
/// snapshots. Cloning the handle shares the same underlying set.
#[derive(Debug, Clone, Default)]
pub struct TraitStore {
    inner: Arc<RwLock<TraitSet>>,
}

impl TraitStore {
    pub fn new(traits: TraitSet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(traits)),
        }
    }

    pub fn snapshot(&self) -> TraitSet {
        *self.inner.read()
    }

    pub fn replace(&self, traits: TraitSet) {
        *self.inner.write() = traits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_nan_and_out_of_range() {
        assert_eq!(
            TraitSet::new(f64::NAN, 0.5, 0.5, 0.5, 0.5),
            Err(TraitError::NotFinite { name: "creativity" })
        );
        assert!(matches!(
            TraitSet::new(0.5, 0.5, 0.5, 0.5, 1.2),
            Err(TraitError::OutOfRange {
                name: "confidence",
                ..
            })
        ));
        assert!(TraitSet::new(0.0, 1.0, 0.5, 0.5, 0.5).is_ok());
    }

    #[test]
    fn test_from_percentages_normalizes() {
        let traits = TraitSet::from_percentages(80, 90, 85, 95, 250);
        assert_eq!(traits.creativity(), 0.8);
        assert_eq!(traits.confidence(), 1.0);
    }

    #[test]
    fn test_percentages_round() {
        let traits = TraitSet::new(0.806, 0.904, 0.0, 1.0, 0.75).unwrap();
        let p = traits.as_percentages();
        assert_eq!(p.creativity, 81);
        assert_eq!(p.logic, 90);
        assert_eq!(p.empathy, 0);
        assert_eq!(p.curiosity, 100);
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = r#"{"creativity":2.0,"logic":0.5,"empathy":0.5,"curiosity":0.5,"confidence":0.5}"#;
        assert!(serde_json::from_str::<TraitSet>(bad).is_err());

        let json = serde_json::to_string(&TraitSet::default()).unwrap();
        let back: TraitSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TraitSet::default());
    }

    #[test]
    fn test_store_replaces_wholesale() {
        let store = TraitStore::default();
        let handle = store.clone();
        let before = store.snapshot();

        handle.replace(TraitSet::from_percentages(10, 20, 30, 40, 50));

        assert_eq!(before, TraitSet::default());
        assert_eq!(store.snapshot().logic(), 0.2);
    }
}
