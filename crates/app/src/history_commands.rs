//! Console commands over saved conversations.

use agent_host::TurnOrchestrator;
use services::{export_text, HistoryStore};

/// Run a history command and return the lines to print, or None when
/// `command` is not a history command.
pub fn run(
    history: &mut HistoryStore,
    orchestrator: &TurnOrchestrator,
    command: &str,
    args: &str,
) -> Option<Vec<String>> {
    let lines = match command {
        "/save" => match history.save_conversation(&orchestrator.turns()) {
            Ok(Some(id)) => vec![format!("  saved as {id}")],
            Ok(None) => vec!["  nothing to save".to_string()],
            Err(e) => vec![format!("  could not save: {e}")],
        },
        "/history" => {
            let found = history.search(args);
            if found.is_empty() {
                return Some(vec!["  no saved conversations".to_string()]);
            }
            found
                .into_iter()
                .map(|c| {
                    format!(
                        "  {} {} ({} turns, {})",
                        c.id,
                        c.title,
                        c.turns.len(),
                        c.updated_at.format("%b %d")
                    )
                })
                .collect()
        }
        "/load" => match history.get(args) {
            Some(c) if orchestrator.load(c.turns.clone()) => {
                vec![format!("  loaded \"{}\"", c.title)]
            }
            Some(_) => vec!["  (wait for Nova to finish replying)".to_string()],
            None => vec![format!("  no saved conversation {args}")],
        },
        "/delete" => match history.delete(args) {
            Ok(true) => vec![format!("  deleted {args}")],
            Ok(false) => vec![format!("  no saved conversation {args}")],
            Err(e) => vec![format!("  could not delete: {e}")],
        },
        "/export" => match history.get(args) {
            Some(c) => vec![export_text(c)],
            None => vec![format!("  no saved conversation {args}")],
        },
        _ => return None,
    };
    Some(lines)
}
