use shared::settings::AppSettings;
use shared::TraitSet;
use std::path::PathBuf;

/// Get the config file path
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com.local", "Nova", "nova")
        .map(|p| p.config_dir().join("settings.json"))
}

/// Load settings from disk or return defaults. The flag reports whether a
/// settings file was found.
pub fn load_settings_or_default() -> (AppSettings, bool) {
    if let Some(path) = config_path() {
        if let Ok(contents) = std::fs::read_to_string(&path) {
            match serde_json::from_str::<AppSettings>(&contents) {
                Ok(settings) => return (settings, true),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                }
            }
        }
    }
    (AppSettings::default(), false)
}

/// Parse `/traits 80 90 85 95 75` style arguments (percentages).
pub fn parse_traits(args: &str) -> Option<TraitSet> {
    let values: Vec<u8> = args
        .split_whitespace()
        .map(|v| v.trim_end_matches('%').parse::<u8>().ok().filter(|p| *p <= 100))
        .collect::<Option<Vec<_>>>()?;
    match values.as_slice() {
        [c, l, e, cu, co] => Some(TraitSet::from_percentages(*c, *l, *e, *cu, *co)),
        _ => None,
    }
}

/// Render a trait set the way the personality panel labels it.
pub fn describe_traits(traits: &TraitSet) -> String {
    let p = traits.as_percentages();
    format!(
        "creativity {}% | logic {}% | empathy {}% | curiosity {}% | confidence {}%",
        p.creativity, p.logic, p.empathy, p.curiosity, p.confidence
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_traits() {
        let traits = parse_traits("80 90% 85 95 75").unwrap();
        assert_eq!(traits, TraitSet::default());
    }

    #[test]
    fn test_parse_traits_rejects_bad_input() {
        assert!(parse_traits("80 90 85 95").is_none());
        assert!(parse_traits("80 90 85 95 101").is_none());
        assert!(parse_traits("a b c d e").is_none());
    }

    #[test]
    fn test_describe_traits() {
        assert_eq!(
            describe_traits(&TraitSet::default()),
            "creativity 80% | logic 90% | empathy 85% | curiosity 95% | confidence 75%"
        );
    }
}
