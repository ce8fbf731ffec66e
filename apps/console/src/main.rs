use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, load_settings_from, normalize_api_url, ConsoleSettings},
    ConsoleEvent, ConsoleSession, HttpSimulationBackend, RefreshOutcome, RosterCollection,
    SubmitOutcome, Tab,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{ConsoleCommand, HELP};

#[derive(Parser, Debug)]
#[command(name = "polaris-console", about = "Multi-agent crisis response simulation console")]
struct Args {
    /// Base URL of the simulation API, e.g. http://localhost:8000/api
    #[arg(long)]
    api_url: Option<String>,
    /// Settings file to use instead of ./console.toml
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one simulation and print the ranked reactions
    Simulate {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Print past simulations
    History,
    /// Print leader archetypes
    Leaders,
    /// Tabbed console reading commands from stdin (default)
    Interactive,
}

fn resolve_settings(args: &Args) -> Result<ConsoleSettings> {
    let mut settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    if let Some(api_url) = &args.api_url {
        settings.api_url = api_url.clone();
    }
    settings.api_url = normalize_api_url(&settings.api_url)?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(std::io::stderr)
        .init();
    info!(api_url = %settings.api_url, "console starting");

    let session = ConsoleSession::new(Arc::new(HttpSimulationBackend::new(
        settings.api_url.clone(),
    )));

    match args.command.unwrap_or(Command::Interactive) {
        Command::Simulate { text } => run_once(&session, &text.join(" ")).await,
        Command::History => {
            let outcome = session.roster().load_history().await;
            ensure_loaded(RosterCollection::History, outcome)?;
            session.navigation().select(Tab::History);
            println!("{}", render::render_view(&session.state().snapshot()));
            Ok(())
        }
        Command::Leaders => {
            let outcome = session.roster().load_leaders().await;
            ensure_loaded(RosterCollection::Leaders, outcome)?;
            session.navigation().select(Tab::Leaders);
            println!("{}", render::render_view(&session.state().snapshot()));
            Ok(())
        }
        Command::Interactive => run_interactive(&session).await,
    }
}

async fn run_once(session: &ConsoleSession, text: &str) -> Result<()> {
    session.lifecycle().edit_event_text(text);
    match session.lifecycle().submit_draft().await {
        SubmitOutcome::Completed { .. } => {
            if let Some(result) = &session.state().snapshot().results {
                println!("{}", render::render_results(result));
            }
            Ok(())
        }
        SubmitOutcome::Ignored => bail!("event description must not be blank"),
        SubmitOutcome::Suppressed => bail!("a simulation is already running"),
        SubmitOutcome::Failed(kind) => bail!("simulation failed ({})", kind.as_str()),
    }
}

/// One-shot listings fail instead of printing an empty collection.
fn ensure_loaded(collection: RosterCollection, outcome: RefreshOutcome) -> Result<()> {
    match outcome {
        RefreshOutcome::Replaced { .. } => Ok(()),
        RefreshOutcome::Retained => bail!("failed to load {}", collection.as_str()),
    }
}

async fn run_interactive(session: &ConsoleSession) -> Result<()> {
    session.mount().await;
    println!("Polaris - Multi-Agent Crisis Response Simulation");
    println!("{HELP}\n");
    println!("{}", render::render_view(&session.state().snapshot()));

    let mut events = session.subscribe_events();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match ConsoleCommand::parse(&line) {
                    ConsoleCommand::Quit => break,
                    ConsoleCommand::Empty => {}
                    ConsoleCommand::Help => println!("{HELP}"),
                    ConsoleCommand::Unknown(name) => println!("unknown command ':{name}' (try :help)"),
                    ConsoleCommand::Show => {
                        println!("{}", render::render_view(&session.state().snapshot()));
                    }
                    ConsoleCommand::SelectTab(tab) => {
                        session.navigation().select(tab);
                        println!("{}", render::render_view(&session.state().snapshot()));
                    }
                    ConsoleCommand::Refresh => {
                        let roster = session.roster().clone();
                        tokio::spawn(async move {
                            roster.mount().await;
                        });
                    }
                    ConsoleCommand::Submit(text) => {
                        let lifecycle = session.lifecycle().clone();
                        lifecycle.edit_event_text(text);
                        tokio::spawn(async move {
                            lifecycle.submit_draft().await;
                        });
                    }
                }
            }
            event = events.recv() => {
                let Ok(event) = event else { continue };
                if let Some(message) = describe_event(&event) {
                    println!("{message}");
                }
                if redraws(&event) {
                    println!("{}", render::render_view(&session.state().snapshot()));
                }
            }
        }
    }

    Ok(())
}

fn describe_event(event: &ConsoleEvent) -> Option<String> {
    match event {
        ConsoleEvent::SimulationStarted { .. } => Some("Running Simulation...".to_string()),
        ConsoleEvent::HistoryRefreshed { entries } => {
            Some(format!("history updated ({entries} runs)"))
        }
        ConsoleEvent::LeadersRefreshed { leaders } => {
            Some(format!("leaders updated ({leaders} profiles)"))
        }
        _ => None,
    }
}

fn redraws(event: &ConsoleEvent) -> bool {
    matches!(
        event,
        ConsoleEvent::SimulationCompleted { .. } | ConsoleEvent::SimulationFailed { .. }
    )
}
