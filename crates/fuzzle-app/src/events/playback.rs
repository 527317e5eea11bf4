use fuzzle_core::state::AppState;
use fuzzle_speech::PlaybackState;
use fuzzle_types::AppEvent;
use kanal::AsyncSender;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::EventContext;

pub async fn handle_start_reading(state: &AppState, ctx: &EventContext) -> anyhow::Result<()> {
    let text = state.session.read().await.display_text.clone();

    if text.trim().is_empty() {
        return ctx.status("Nothing to read").await;
    }
    if !ctx.playback.is_available() {
        return ctx.status("Speech is not available").await;
    }

    if ctx.playback.start(&text) {
        ctx.status("Reading aloud, :stop to stop").await?;
    }
    Ok(())
}

pub async fn handle_stop_reading(ctx: &EventContext) -> anyhow::Result<()> {
    ctx.playback.stop();
    Ok(())
}

/// Turn playback state changes into progress events for the renderer
pub async fn forward_progress(
    mut playback_rx: watch::Receiver<PlaybackState>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut last_index = playback_rx.borrow().current_index;

    loop {
        tokio::select! {
            changed = playback_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = cancel.cancelled() => break,
        }

        let (index, word) = {
            let state = playback_rx.borrow_and_update();
            (state.current_index, state.current_word().map(str::to_string))
        };

        if index == last_index {
            continue;
        }
        last_index = index;

        tracing::debug!("Playback progress: {:?}", index);
        app_to_ui_tx
            .send(AppEvent::PlaybackProgress { index, word })
            .await?;
    }

    Ok(())
}
