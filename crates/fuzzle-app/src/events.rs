use std::sync::Arc;

use fuzzle_core::state::AppState;
use fuzzle_lang_english::EnglishProcessor;
use fuzzle_speech::PlaybackSynchronizer;
use fuzzle_types::{AppEvent, TextSource};
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

pub mod lookup;
pub mod playback;
pub mod simplify;
pub mod text_input;
pub mod vocabulary;

use lookup::handle_lookup;
use playback::{handle_start_reading, handle_stop_reading};
use simplify::{handle_restore, handle_simplify, handle_toggle_syllables};
use text_input::{handle_load_file, handle_text_input};
use vocabulary::{handle_add_word, handle_extract, handle_list, handle_remove_word};

/// Everything the handlers work with besides the shared state
pub struct EventContext {
    pub processor: Arc<EnglishProcessor>,
    pub playback: PlaybackSynchronizer,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
}

impl EventContext {
    pub async fn status(&self, message: impl Into<String>) -> anyhow::Result<()> {
        self.app_to_ui_tx.send(AppEvent::Status(message.into())).await?;
        Ok(())
    }
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    ctx: EventContext,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", std::mem::discriminant(&event));

        if matches!(event, AppEvent::Quit) {
            tracing::info!("Quit requested");
            ctx.playback.stop();
            cancel.cancel();
            break;
        }

        handle_events(&state, &ctx, event).await?;
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}

pub async fn handle_events(
    state: &AppState,
    ctx: &EventContext,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::TextInput(text) => {
            handle_text_input(state, ctx, text, TextSource::Manual).await?;
        }
        AppEvent::RawTextInput { text, source } => {
            tracing::debug!("Raw text from {:?}: {} chars", source, text.len());
            handle_text_input(state, ctx, text, source).await?;
        }
        AppEvent::LoadFile(path) => {
            handle_load_file(state, ctx, path).await?;
        }
        AppEvent::Simplify => {
            handle_simplify(state, ctx).await?;
        }
        AppEvent::RestoreOriginal => {
            handle_restore(state, ctx).await?;
        }
        AppEvent::ToggleSyllableMode => {
            handle_toggle_syllables(state, ctx).await?;
        }
        AppEvent::StartReading => {
            handle_start_reading(state, ctx).await?;
        }
        AppEvent::StopReading => {
            handle_stop_reading(ctx).await?;
        }
        AppEvent::ExtractVocabulary => {
            handle_extract(state, ctx).await?;
        }
        AppEvent::AddWord(new_word) => {
            handle_add_word(state, ctx, new_word).await?;
        }
        AppEvent::RemoveWord(id) => {
            handle_remove_word(state, ctx, id).await?;
        }
        AppEvent::ListVocabulary => {
            handle_list(state, ctx).await?;
        }
        AppEvent::LookupWord(word) => {
            handle_lookup(ctx, word).await?;
        }
        AppEvent::Quit => {}
        AppEvent::ShowText(_)
        | AppEvent::ShowDefinition { .. }
        | AppEvent::ShowVocabulary { .. }
        | AppEvent::PlaybackProgress { .. }
        | AppEvent::Status(_) => {
            // Render-side events, nothing to do here
        }
    }

    Ok(())
}
