use anyhow::{Context, Result};
use dotenvy::dotenv;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use roundtable::core::Config;
use roundtable::database::{CredentialStore, Database};
use roundtable::features::participants::ParticipantRegistry;
use roundtable::features::providers::remote::build_http_client;
use roundtable::features::providers::{Credential, MockProvider, ProviderSwitch, RemoteSettings};
use roundtable::features::roundtable::{
    ChannelSink, Pacing, RejectReason, Roundtable, RoundtableEvent, Submission,
};

const HELP: &str = "\
Commands:
  <text>          start a discussion (or continue it)
  /stop           stop after the current speaker
  /auto on|off    toggle auto-continue
  /reset          clear the discussion
  /topic          submit a random topic
  /key <value>    save an API key (empty clears it, offline mode)
  /status         show engine state
  /help           show this help
  /quit           exit";

/// Print engine events as transcript lines
async fn render_events(mut events: UnboundedReceiver<RoundtableEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            RoundtableEvent::GenerationStarted { stop_visible } => {
                if stop_visible {
                    println!("   (auto-pilot running, /stop to halt)");
                }
            }
            RoundtableEvent::UserMessageAppended { content } => println!("You: {content}"),
            RoundtableEvent::SweepStarted { sweep } if sweep > 1 => {
                println!("-- round {sweep} --");
            }
            RoundtableEvent::SweepStarted { .. } => {}
            RoundtableEvent::TypingStarted { display_name, .. } => {
                println!("   {display_name} is typing...");
            }
            RoundtableEvent::MessageDelivered {
                display_name, text, ..
            } => println!("{display_name}: {text}"),
            RoundtableEvent::TurnFailed {
                display_name,
                message,
                ..
            } => println!("{display_name}: {message}"),
            RoundtableEvent::TypingStopped { .. } => {}
            RoundtableEvent::StopVisibilityChanged { visible } => {
                if visible {
                    println!("   (auto-pilot on, /stop to halt)");
                }
            }
            RoundtableEvent::SystemNotice { text } => println!("* {text}"),
            RoundtableEvent::GenerationFinished => println!("   (ready)"),
            RoundtableEvent::Cleared { marker } => println!("* {marker}"),
        }
    }
}

fn spawn_submission(roundtable: Arc<Roundtable>, content: Option<String>) {
    tokio::spawn(async move {
        let result = match content {
            Some(text) => roundtable.submit_user_message(&text).await,
            None => roundtable.submit_random_topic().await,
        };
        if let Submission::Rejected(RejectReason::Busy) = result {
            println!("* The table is still talking. Use /stop first.");
        }
    });
}

fn print_status(roundtable: &Roundtable, switch: &ProviderSwitch) {
    let names: Vec<&str> = roundtable
        .registry()
        .list()
        .iter()
        .map(|p| p.display_name.as_str())
        .collect();
    println!("Participants: {}", names.join(", "));
    println!("Provider: {}", switch.active());
    println!("Auto-continue: {}", roundtable.auto_continue());
    println!("Generating: {}", roundtable.is_generating());
    println!("History: {} turns", roundtable.history_len());
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Roundtable...");

    let database = Database::new(&config.database_path).await?;
    let credential_store = CredentialStore::new(database);
    let credential = Credential::new(credential_store.load().await?);
    if credential.is_set() {
        info!("🔑 Stored API credential found, live mode");
    } else {
        info!("📴 No API credential stored, offline mode");
    }

    let registry = Arc::new(match &config.roster_path {
        Some(path) => {
            let registry = ParticipantRegistry::load(path)?;
            info!("📄 Loaded roster from {path} ({} participants)", registry.len());
            registry
        }
        None => ParticipantRegistry::builtin(),
    });

    let client =
        build_http_client(config.request_timeout).context("Failed to build HTTP client")?;
    let switch = Arc::new(ProviderSwitch::new(
        credential.clone(),
        MockProvider::new(config.mock_latency),
        client,
        RemoteSettings {
            endpoint: config.endpoint.clone(),
            app_title: config.app_title.clone(),
            max_tokens: config.max_tokens,
        },
        registry.clone(),
    ));

    let (sink, events) = ChannelSink::channel();
    let roundtable = Arc::new(Roundtable::new(
        registry,
        switch.clone(),
        Arc::new(sink),
        Pacing::new(config.pacing.clone()),
    ));
    roundtable.set_auto_continue(config.auto_continue);

    let renderer = tokio::spawn(render_events(events));

    println!("Welcome to the roundtable. Type a topic, or /help.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "/quit" | "/exit" => break,
            "/help" => println!("{HELP}"),
            "/stop" => {
                if !roundtable.request_stop() {
                    println!("* Nothing to stop.");
                }
            }
            "/auto" => match argument {
                "on" => roundtable.set_auto_continue(true),
                "off" => roundtable.set_auto_continue(false),
                _ => println!("Usage: /auto on|off"),
            },
            "/reset" => {
                if !roundtable.reset() {
                    println!("* Cannot reset while the table is talking.");
                }
            }
            "/topic" => spawn_submission(roundtable.clone(), None),
            "/key" => match credential_store.save(argument).await {
                Ok(saved) => {
                    credential.set(saved);
                    println!("* Provider: {}", switch.active());
                }
                Err(e) => {
                    error!("Failed to save API credential: {e:#}");
                    println!("* Could not save the key.");
                }
            },
            "/status" => print_status(&roundtable, &switch),
            _ if command.starts_with('/') => println!("Unknown command {command}, try /help"),
            _ => spawn_submission(roundtable.clone(), Some(line.to_string())),
        }
    }

    if roundtable.request_stop() {
        warn!("Exiting with a discussion in progress");
    }
    renderer.abort();
    info!("Roundtable closed");
    Ok(())
}
