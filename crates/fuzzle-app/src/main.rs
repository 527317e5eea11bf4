use std::sync::Arc;

use clap::Parser;
use fuzzle_config::Config;
use fuzzle_core::state::{AppState, ReadingSession};
use fuzzle_core::vocabulary::Vocabulary;
use fuzzle_lang_english::EnglishProcessor;
use fuzzle_speech::{ConsoleSpeechEngine, PlaybackSettings, PlaybackSynchronizer};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::controller::AppController;

mod cli;
mod commands;
mod controller;
mod events;
mod io;
mod profile;
mod render;

#[cfg(test)]
mod tests;

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so its values reach the config defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let root = profile::fuzzle_root();
    if let Err(e) = profile::init_user_config(&root) {
        tracing::warn!("Could not initialize profiles in {}: {}", root.display(), e);
    }
    let config = profile::load_user_profile(&root, &cli.profile)?;
    tracing::info!("Using profile '{}'", cli.profile);

    let processor = Arc::new(EnglishProcessor::with_config(&config.dictionary));

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Simplify { file } => {
            let text = commands::read_input(file.as_deref())?;
            println!("{}", commands::run_simplify(&processor, &text));
        }
        Commands::Syllables { words } => {
            println!("{}", commands::run_syllables(&words));
        }
        Commands::Define { word } => {
            println!("{}", commands::run_define(&processor, &word));
        }
        Commands::Vocab { file, limit } => {
            let text = commands::read_input(file.as_deref())?;
            println!("{}", commands::run_vocab(&processor, &config, &text, limit));
        }
        Commands::Read { file } => {
            let text = commands::read_input(file.as_deref())?;
            commands::run_read(&processor, &config, &text).await?;
        }
        Commands::NewProfile { name } => {
            let path = profile::add_profile_from_default(&root, &name)?;
            println!("Created profile '{}' at {}", name, path.display());
        }
        Commands::Interactive => {
            run_interactive(config, processor).await;
        }
    }

    Ok(())
}

async fn run_interactive(config: Config, processor: Arc<EnglishProcessor>) {
    let channel_capacity = config.channel_capacity;
    let engine = Arc::new(ConsoleSpeechEngine::from_config(&config.speech));
    let playback = PlaybackSynchronizer::new(engine, PlaybackSettings::from(&config.speech));

    let session = ReadingSession::new(Vocabulary::seeded());
    let state = Arc::new(AppState::new(config, session));

    let controller = AppController::new(state, channel_capacity);
    let mut tasks = controller.spawn_tasks(processor, playback.clone());
    let cancel = controller.cancel_token();

    println!("{}", io::HELP);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        _ = cancel.cancelled() => {
            tracing::info!("Session ended");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::warn!("A task exited early"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    playback.stop();
    controller.shutdown();

    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::debug!("Task ended with error during shutdown: {e}");
        }
    }
}
