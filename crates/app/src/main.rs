//! Nova console front end.
//!
//! Reads one message per line from stdin and prints replies as the
//! orchestrator emits events. Lines starting with `/` are in-band commands.

use agent_host::{ConversationAnalytics, SubmitOutcome, TurnOrchestrator};
use anyhow::{Context, Result};
use providers::{CannedResponder, CompletionClient, CompletionError, ResponderRouter, TranslationClient};
use services::HistoryStore;
use shared::settings::AppSettings;
use shared::{ChatEvent, TraitStore};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

mod history_commands;
mod render;
mod utils;

const HELP: &str = "commands: /traits <c l e cu co>  /voice  /stats  /save  /history [query]  /load <id>  /delete <id>  /export <id>  /clear  /quit";

fn build_client(settings: &AppSettings) -> Result<Arc<dyn CompletionClient>> {
    match ResponderRouter::from_settings(settings) {
        Ok(router) => Ok(Arc::new(router)),
        Err(CompletionError::MissingApiKey { provider }) => {
            tracing::warn!(provider, "no API key configured, using offline replies");
            Ok(Arc::new(CannedResponder::new()))
        }
        Err(e) => Err(e).context("failed to build completion client"),
    }
}

fn print_stats(orchestrator: &TurnOrchestrator) {
    let stats = orchestrator.stats();
    let analytics = ConversationAnalytics::from_turns(&orchestrator.turns());
    println!(
        "  Messages: {} | Avg Time: {}ms | Knowledge: {} | Creativity: {}%",
        stats.turns_processed,
        stats.average_latency_ms.round(),
        stats.knowledge_accessed,
        stats.creativity_level
    );
    println!(
        "  Turns: {} ({} you, {} Nova) | Avg confidence: {}%",
        analytics.total,
        analytics.user,
        analytics.assistant,
        (analytics.average_confidence * 100.0).round()
    );
    for (mood, count) in &analytics.mood_distribution {
        println!("    {mood}: {count}");
    }
}

async fn submit_in_background(
    orchestrator: Arc<TurnOrchestrator>,
    translator: Option<(Arc<TranslationClient>, String)>,
    text: String,
) {
    match orchestrator.submit(&text).await {
        SubmitOutcome::Ignored => println!("  (Nova is still replying; message dropped)"),
        SubmitOutcome::Rejected => {}
        SubmitOutcome::Completed(turn) | SubmitOutcome::Degraded(turn) => {
            if let Some((client, target)) = translator {
                let translated = client.translate(turn.text(), &target, None).await;
                if !translated.is_empty() {
                    println!("  [{target}] {translated}");
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let (settings, found) = utils::load_settings_or_default();
    if !found {
        tracing::info!("no settings file, using defaults");
    }

    let client = build_client(&settings)?;
    let traits = TraitStore::new(settings.initial_traits);
    let (tx, mut rx) = mpsc::unbounded_channel::<ChatEvent>();
    let orchestrator = Arc::new(TurnOrchestrator::new(client, traits.clone()).with_events(tx));

    let translator = settings.translation.target_language.clone().map(|target| {
        (
            Arc::new(TranslationClient::from_settings(&settings.translation)),
            target,
        )
    });

    let history_path = settings
        .history_path
        .clone()
        .unwrap_or_else(HistoryStore::default_path);
    let mut history = HistoryStore::open(&history_path)
        .with_context(|| format!("failed to open history at {}", history_path.display()))?;

    let renderer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Some(line) = render::render(&event) {
                println!("{line}");
            }
        }
    });

    println!("{HELP}");
    orchestrator.greet();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, args) = line.split_once(' ').unwrap_or((line, ""));
        match command {
            "/quit" | "/exit" => break,
            "/help" => println!("{HELP}"),
            "/voice" => {
                orchestrator.toggle_listening();
            }
            "/stats" => print_stats(&orchestrator),
            "/traits" if args.is_empty() => {
                println!("  {}", utils::describe_traits(&traits.snapshot()));
            }
            "/traits" => match utils::parse_traits(args) {
                Some(new_traits) => {
                    traits.replace(new_traits);
                    println!("  {}", utils::describe_traits(&new_traits));
                }
                None => println!("  usage: /traits <creativity> <logic> <empathy> <curiosity> <confidence> (0-100)"),
            },
            "/clear" => {
                if !orchestrator.reset() {
                    println!("  (wait for Nova to finish replying)");
                }
            }
            _ if command.starts_with('/') => {
                match history_commands::run(&mut history, &orchestrator, command, args) {
                    Some(lines) => lines.iter().for_each(|l| println!("{l}")),
                    None => println!("  unknown command {command}; {HELP}"),
                }
            }
            _ => {
                tokio::spawn(submit_in_background(
                    orchestrator.clone(),
                    translator.clone(),
                    line.to_string(),
                ));
            }
        }
    }

    // in-flight replies are abandoned on quit
    renderer.abort();
    Ok(())
}
