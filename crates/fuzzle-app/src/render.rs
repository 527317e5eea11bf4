use std::sync::Arc;

use fuzzle_config::Config;
use fuzzle_config::reading::ReadingConfig;
use fuzzle_core::text::display_words;
use fuzzle_types::{AppEvent, DefinitionRecord, DisplayWord, VocabularyItem};
use kanal::AsyncReceiver;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Terminal view of the reading session
#[derive(Default)]
pub struct Renderer {
    text: String,
    highlighted: Option<usize>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output for one app event, `None` when there is nothing to show
    pub fn render(&mut self, event: &AppEvent, reading: &ReadingConfig) -> Option<String> {
        match event {
            AppEvent::ShowText(text) => {
                self.text = text.clone();
                self.highlighted = None;
                if text.trim().is_empty() {
                    return Some("(no text)".to_string());
                }
                Some(format_text(&self.words(reading), reading))
            }
            AppEvent::PlaybackProgress { index, word } => {
                self.highlighted = *index;
                match (index, word) {
                    (Some(index), Some(_)) => {
                        let words = self.words(reading);
                        let line = words.get(*index)?.line;
                        Some(format!(
                            "🔊 {}/{}  {}",
                            index + 1,
                            words.len(),
                            format_line(&words, line)
                        ))
                    }
                    _ => Some("⏹ Reading stopped".to_string()),
                }
            }
            AppEvent::ShowDefinition { query, record } => Some(match record {
                Some(record) => format_definition(record),
                None => format!("No definition found for \"{query}\""),
            }),
            AppEvent::ShowVocabulary { added, total } => {
                Some(format_vocabulary(added, *total))
            }
            AppEvent::Status(message) => Some(message.clone()),
            _ => None,
        }
    }

    fn words(&self, reading: &ReadingConfig) -> Vec<DisplayWord> {
        display_words(
            &self.text,
            reading.syllable_mode,
            reading.syllable_min_len,
            self.highlighted,
        )
    }
}

fn format_word(word: &DisplayWord) -> String {
    if word.highlighted {
        format!("[{}]", word.text)
    } else {
        word.text.clone()
    }
}

/// One text line with the highlighted word in brackets
pub fn format_line(words: &[DisplayWord], line: usize) -> String {
    words
        .iter()
        .filter(|w| w.line == line)
        .map(format_word)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_text(words: &[DisplayWord], reading: &ReadingConfig) -> String {
    let Some(last_line) = words.iter().map(|w| w.line).max() else {
        return String::new();
    };

    // Loose line height gets a blank line between text lines
    let separator = if reading.line_height > 1.5 { "\n\n" } else { "\n" };

    (0..=last_line)
        .map(|line| format_line(words, line))
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn format_definition(record: &DefinitionRecord) -> String {
    format!(
        "{} {} ({})  {}\n   {}\n   e.g. {}",
        record.emoji,
        record.word,
        record.phonetic,
        record.difficulty.badge(),
        record.definition,
        record.example
    )
}

pub fn format_vocabulary_item(item: &VocabularyItem) -> String {
    format!(
        "{} {} ({})  {}\n   {}\n   e.g. {}\n   id: {}",
        item.emoji,
        item.word,
        item.phonetic,
        item.difficulty.badge(),
        item.definition,
        item.example,
        item.id
    )
}

pub fn format_vocabulary(items: &[VocabularyItem], total: usize) -> String {
    let mut out = format!("📚 My vocabulary ({total} words)");
    if items.is_empty() {
        out.push_str("\n   no new words");
    }
    for item in items {
        out.push('\n');
        out.push_str(&format_vocabulary_item(item));
    }
    out
}

/// Print everything the app sends until shutdown
pub async fn render_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut renderer = Renderer::new();

    loop {
        let event = tokio::select! {
            event = app_to_ui_rx.recv() => event?,
            _ = cancel.cancelled() => break,
        };

        let reading = config.read().await.reading.clone();
        if let Some(output) = renderer.render(&event, &reading) {
            println!("{output}");
        }
    }

    tracing::info!("Render loop stopping");
    Ok(())
}
