use fuzzle_core::state::AppState;
use fuzzle_core::vocabulary::ExtractOptions;
use fuzzle_types::{AppEvent, NewWord};

use super::EventContext;

/// Collect the difficult words of the displayed text
pub async fn handle_extract(state: &AppState, ctx: &EventContext) -> anyhow::Result<()> {
    let options = ExtractOptions::from(&state.config.read().await.vocabulary);

    let (added, total) = {
        let mut session = state.session.write().await;
        let text = session.display_text.clone();
        let added = session
            .vocabulary
            .collect_from(&text, ctx.processor.dictionary(), &options);
        (added, session.vocabulary.len())
    };

    tracing::info!("Collected {} new words ({} total)", added.len(), total);
    ctx.app_to_ui_tx
        .send(AppEvent::ShowVocabulary { added, total })
        .await?;
    Ok(())
}

pub async fn handle_add_word(
    state: &AppState,
    ctx: &EventContext,
    new_word: NewWord,
) -> anyhow::Result<()> {
    let result = {
        let mut session = state.session.write().await;
        let added = session.vocabulary.add(new_word).cloned();
        added.map(|item| (item, session.vocabulary.len()))
    };

    match result {
        Ok((item, total)) => {
            ctx.app_to_ui_tx
                .send(AppEvent::ShowVocabulary {
                    added: vec![item],
                    total,
                })
                .await?;
        }
        Err(e) => {
            tracing::debug!("Rejected new word: {}", e);
            ctx.status(format!("Could not add word: {e}")).await?;
        }
    }
    Ok(())
}

pub async fn handle_remove_word(
    state: &AppState,
    ctx: &EventContext,
    id: String,
) -> anyhow::Result<()> {
    let removed = state.session.write().await.vocabulary.remove(&id);

    match removed {
        Some(item) => ctx.status(format!("Removed \"{}\"", item.word)).await,
        None => ctx.status(format!("No vocabulary word with id {id}")).await,
    }
}

pub async fn handle_list(state: &AppState, ctx: &EventContext) -> anyhow::Result<()> {
    let items: Vec<_> = {
        let session = state.session.read().await;
        session.vocabulary.iter().cloned().collect()
    };
    let total = items.len();

    ctx.app_to_ui_tx
        .send(AppEvent::ShowVocabulary {
            added: items,
            total,
        })
        .await?;
    Ok(())
}
