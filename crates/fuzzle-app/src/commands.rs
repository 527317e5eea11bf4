use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use fuzzle_config::Config;
use fuzzle_core::language::LanguageProcessor;
use fuzzle_core::syllable::segment;
use fuzzle_core::vocabulary::ExtractOptions;
use fuzzle_lang_english::EnglishProcessor;
use fuzzle_speech::{ConsoleSpeechEngine, PlaybackSettings, PlaybackSynchronizer};
use fuzzle_types::AppEvent;

use crate::render::{Renderer, format_definition, format_vocabulary};

/// Text of `file`, or all of stdin
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

pub fn run_simplify(processor: &EnglishProcessor, text: &str) -> String {
    processor.simplify(&processor.normalize(text))
}

pub fn run_syllables(words: &[String]) -> String {
    words
        .iter()
        .map(|word| format!("{word}: {}", segment(word)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run_define(processor: &EnglishProcessor, word: &str) -> String {
    match processor.lookup(word) {
        Some(record) => format_definition(&record),
        None => format!("No definition found for \"{word}\""),
    }
}

pub fn run_vocab(
    processor: &EnglishProcessor,
    config: &Config,
    text: &str,
    limit: Option<usize>,
) -> String {
    let mut options = ExtractOptions::from(&config.vocabulary);
    if let Some(limit) = limit {
        options.limit = limit;
    }

    let text = processor.normalize(text);
    let items = processor.extract_vocabulary(&text, &HashSet::new(), &options);
    format_vocabulary(&items, items.len())
}

/// Read `text` aloud through the console engine, printing each word's line
/// as it is spoken. Ctrl+C stops the reading.
pub async fn run_read(processor: &EnglishProcessor, config: &Config, text: &str) -> anyhow::Result<()> {
    let text = processor.normalize(text);
    let engine = Arc::new(ConsoleSpeechEngine::from_config(&config.speech));
    let playback = PlaybackSynchronizer::new(engine, PlaybackSettings::from(&config.speech));

    let mut renderer = Renderer::new();
    if let Some(output) = renderer.render(&AppEvent::ShowText(text.clone()), &config.reading) {
        println!("{output}");
    }

    let mut progress = playback.subscribe();
    if !playback.start(&text) {
        anyhow::bail!("Nothing to read, or speech is disabled");
    }

    loop {
        let state = progress.borrow_and_update().clone();
        let event = AppEvent::PlaybackProgress {
            index: state.current_index,
            word: state.current_word().map(str::to_string),
        };
        if let Some(output) = renderer.render(&event, &config.reading) {
            println!("{output}");
        }
        if !state.is_playing() {
            break;
        }

        tokio::select! {
            changed = progress.changed() => changed?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                playback.stop();
            }
        }
    }

    Ok(())
}
