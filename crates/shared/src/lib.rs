pub mod events;
pub mod persona;
pub mod random;
pub mod turn;

pub use events::{ChatEvent, StatsSnapshot, TurnState};
pub use persona::{TraitError, TraitSet, TraitStore};
pub use random::{FixedRandom, RandomSource, ThreadRandom};
pub use turn::{AssistantMeta, Mood, Origin, Turn, TurnId};

pub mod settings {
    use crate::persona::TraitSet;
    use serde::{Deserialize, Serialize};
    use std::path::PathBuf;

    /// Which completion path answers turns. Exactly one is active.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
    #[serde(rename_all = "lowercase")]
    pub enum ResponderKind {
        #[default]
        Gemini,
        /// Offline demo replies, no network
        Canned,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct GeminiSettings {
        pub model: String, // e.g., "gemini-1.5-flash"
        /// Falls back to GEMINI_API_KEY when unset
        #[serde(default)]
        pub api_key: Option<String>,
        /// Override for proxies and tests
        #[serde(default)]
        pub base_url: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct TranslationSettings {
        pub url: String,
        /// Target language code; None disables translation
        #[serde(default)]
        pub target_language: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AppSettings {
        #[serde(default)]
        pub responder: ResponderKind,
        #[serde(default)]
        pub gemini: GeminiSettings,
        #[serde(default)]
        pub translation: TranslationSettings,
        #[serde(default)]
        pub initial_traits: TraitSet,
        /// Defaults to the platform config dir
        #[serde(default)]
        pub history_path: Option<PathBuf>,
    }

    impl Default for GeminiSettings {
        fn default() -> Self {
            Self {
                model: "gemini-1.5-flash".into(),
                api_key: None,
                base_url: None,
            }
        }
    }

    impl Default for TranslationSettings {
        fn default() -> Self {
            Self {
                url: "https://libretranslate.de/translate".into(),
                target_language: None,
            }
        }
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                responder: ResponderKind::default(),
                gemini: GeminiSettings::default(),
                translation: TranslationSettings::default(),
                initial_traits: TraitSet::default(),
                history_path: None,
            }
        }
    }

}
