use fuzzle_core::language::LanguageProcessor;
use fuzzle_types::AppEvent;

use super::EventContext;

pub async fn handle_lookup(ctx: &EventContext, word: String) -> anyhow::Result<()> {
    let record = ctx.processor.lookup(&word);
    tracing::debug!("Lookup '{}': {}", word, if record.is_some() { "hit" } else { "miss" });

    ctx.app_to_ui_tx
        .send(AppEvent::ShowDefinition {
            query: word,
            record,
        })
        .await?;
    Ok(())
}
