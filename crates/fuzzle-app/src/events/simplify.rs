use fuzzle_core::state::AppState;
use fuzzle_types::AppEvent;

use super::EventContext;

pub async fn handle_simplify(state: &AppState, ctx: &EventContext) -> anyhow::Result<()> {
    let display = {
        let mut session = state.session.write().await;
        session
            .simplify(ctx.processor.substitutions())
            .then(|| session.display_text.clone())
    };

    let Some(display) = display else {
        return ctx.status("Enter some text first").await;
    };

    // The spoken tokens no longer match the text
    ctx.playback.stop();
    ctx.app_to_ui_tx.send(AppEvent::ShowText(display)).await?;
    Ok(())
}

pub async fn handle_restore(state: &AppState, ctx: &EventContext) -> anyhow::Result<()> {
    let display = {
        let mut session = state.session.write().await;
        session.restore_original();
        session.display_text.clone()
    };

    ctx.playback.stop();
    ctx.app_to_ui_tx.send(AppEvent::ShowText(display)).await?;
    Ok(())
}

/// Flip syllable display and redraw. Playback is unaffected.
pub async fn handle_toggle_syllables(state: &AppState, ctx: &EventContext) -> anyhow::Result<()> {
    let enabled = {
        let mut config = state.config.write().await;
        config.reading.syllable_mode = !config.reading.syllable_mode;
        config.reading.syllable_mode
    };
    tracing::info!("Syllable mode {}", if enabled { "on" } else { "off" });

    let display = state.session.read().await.display_text.clone();

    ctx.status(format!("Syllable mode {}", if enabled { "ON" } else { "OFF" }))
        .await?;
    ctx.app_to_ui_tx.send(AppEvent::ShowText(display)).await?;
    Ok(())
}
