use std::path::PathBuf;

use fuzzle_core::language::LanguageProcessor;
use fuzzle_core::state::AppState;
use fuzzle_types::{AppEvent, TextSource};

use super::EventContext;

/// New text replaces the session text and stops any reading in progress
pub async fn handle_text_input(
    state: &AppState,
    ctx: &EventContext,
    text: String,
    source: TextSource,
) -> anyhow::Result<()> {
    let normalized = ctx.processor.normalize(&text);
    tracing::debug!("Normalized {:?} input: {} chars", source, normalized.len());

    ctx.playback.stop();

    let display = {
        let mut session = state.session.write().await;
        session.set_text(normalized);
        session.display_text.clone()
    };

    ctx.app_to_ui_tx.send(AppEvent::ShowText(display)).await?;
    Ok(())
}

/// Read a text file into the session. Unreadable files are reported, not fatal.
pub async fn handle_load_file(
    state: &AppState,
    ctx: &EventContext,
    path: PathBuf,
) -> anyhow::Result<()> {
    match tokio::fs::read_to_string(&path).await {
        Ok(text) => {
            tracing::info!("Loaded {} ({} bytes)", path.display(), text.len());
            handle_text_input(state, ctx, text, TextSource::File).await
        }
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            ctx.status(format!("Could not read {}: {}", path.display(), e))
                .await
        }
    }
}
