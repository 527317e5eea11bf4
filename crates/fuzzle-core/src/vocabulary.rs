use std::collections::HashSet;

use fuzzle_types::{Difficulty, NewWord, VocabularyItem};
use uuid::Uuid;

use crate::dictionary::Dictionary;
use crate::error::VocabularyError;
use crate::syllable::segment;
use crate::text::{canonical_word, tokenize};

/// Emoji rotation for words missing from the dictionary
pub const PLACEHOLDER_EMOJI: [&str; 5] = ["📚", "🎯", "⭐", "🌟", "💡"];

pub const PLACEHOLDER_DEFINITION: &str = "A word that appears in the text";

const DEFAULT_EMOJI: &str = "📚";

#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Max items returned
    pub limit: usize,
    /// Tokens must be longer than this (in chars) to be candidates
    pub min_word_len: usize,
    /// Unknown tokens longer than this are rated hard, others medium
    pub hard_word_len: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            limit: 3,
            min_word_len: 6,
            hard_word_len: 8,
        }
    }
}

impl From<&fuzzle_config::vocabulary::VocabularyConfig> for ExtractOptions {
    fn from(config: &fuzzle_config::vocabulary::VocabularyConfig) -> Self {
        Self {
            limit: config.extract_limit,
            min_word_len: config.min_word_len,
            hard_word_len: config.hard_word_len,
        }
    }
}

/// Pick the first `limit` long words of `text` not yet in `existing_words`
pub fn extract(
    text: &str,
    existing_words: &HashSet<String>,
    dictionary: &Dictionary,
    limit: usize,
) -> Vec<VocabularyItem> {
    let options = ExtractOptions {
        limit,
        ..ExtractOptions::default()
    };
    extract_with(text, existing_words, dictionary, &options)
}

/// Build vocabulary items for the difficult words of `text`.
///
/// Candidates keep their left-to-right order. Dictionary hits copy the
/// entry; misses get a placeholder card. Pure apart from id generation.
pub fn extract_with(
    text: &str,
    existing_words: &HashSet<String>,
    dictionary: &Dictionary,
    options: &ExtractOptions,
) -> Vec<VocabularyItem> {
    let mut selected: HashSet<String> = HashSet::new();

    let candidates: Vec<(&str, String)> = tokenize(text)
        .into_iter()
        .filter(|token| token.chars().count() > options.min_word_len)
        .filter_map(|token| {
            let word = canonical_word(token);
            if word.is_empty() || existing_words.contains(&word) || !selected.insert(word.clone())
            {
                return None;
            }
            Some((token, word))
        })
        .take(options.limit)
        .collect();

    tracing::debug!("Vocabulary candidates: {}", candidates.len());

    candidates
        .into_iter()
        .enumerate()
        .map(|(position, (token, word))| {
            let phonetic = segment(&word);

            match dictionary.get(&word) {
                Some(entry) => VocabularyItem {
                    id: Uuid::new_v4().to_string(),
                    word,
                    phonetic,
                    definition: entry.definition.clone(),
                    example: entry.example.clone(),
                    emoji: entry.emoji.clone(),
                    difficulty: entry.difficulty,
                },
                None => {
                    let difficulty = if token.chars().count() > options.hard_word_len {
                        Difficulty::Hard
                    } else {
                        Difficulty::Medium
                    };

                    VocabularyItem {
                        id: Uuid::new_v4().to_string(),
                        example: format!("The word \"{word}\" is used in this context."),
                        word,
                        phonetic,
                        definition: PLACEHOLDER_DEFINITION.to_string(),
                        emoji: PLACEHOLDER_EMOJI[position % PLACEHOLDER_EMOJI.len()].to_string(),
                        difficulty,
                    }
                }
            }
        })
        .collect()
}

/// The reader's personal word list, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    items: Vec<VocabularyItem>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// First-run sample list
    pub fn seeded() -> Self {
        Self {
            items: vec![
                VocabularyItem {
                    id: "1".to_string(),
                    word: "magnificent".to_string(),
                    phonetic: "mag-NIF-i-sent".to_string(),
                    definition: "Very beautiful or impressive".to_string(),
                    example: "The sunset was magnificent with bright orange colors.".to_string(),
                    emoji: "🌅".to_string(),
                    difficulty: Difficulty::Hard,
                },
                VocabularyItem {
                    id: "2".to_string(),
                    word: "adventure".to_string(),
                    phonetic: "ad-VEN-cher".to_string(),
                    definition: "An exciting journey or experience".to_string(),
                    example: "Going camping was a real adventure for the kids.".to_string(),
                    emoji: "🏕️".to_string(),
                    difficulty: Difficulty::Medium,
                },
            ],
        }
    }

    /// Canonical words already collected
    pub fn words(&self) -> HashSet<String> {
        self.items.iter().map(|item| item.word.clone()).collect()
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.items.iter().any(|item| item.word == word)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VocabularyItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append extracted items, skipping words already present.
    /// Returns how many were added.
    pub fn merge(&mut self, items: Vec<VocabularyItem>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.contains_word(&item.word) {
                tracing::debug!("Skipping duplicate vocabulary word '{}'", item.word);
                continue;
            }
            self.items.push(item);
        }
        self.items.len() - before
    }

    /// Extract difficult words from `text` and keep the new ones
    pub fn collect_from(
        &mut self,
        text: &str,
        dictionary: &Dictionary,
        options: &ExtractOptions,
    ) -> Vec<VocabularyItem> {
        let items = extract_with(text, &self.words(), dictionary, options);
        self.merge(items.clone());
        items
    }

    /// Add a word typed in by the reader
    pub fn add(&mut self, new_word: NewWord) -> Result<&VocabularyItem, VocabularyError> {
        let entered = new_word.word.trim();
        let definition = new_word.definition.trim();

        if entered.is_empty() {
            return Err(VocabularyError::MissingField("word"));
        }
        if definition.is_empty() {
            return Err(VocabularyError::MissingField("definition"));
        }

        let word = canonical_word(entered);
        if word.is_empty() {
            return Err(VocabularyError::MissingField("word"));
        }
        if self.contains_word(&word) {
            return Err(VocabularyError::Duplicate(word));
        }

        let example = new_word
            .example
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Here's an example: \"{entered}\" is used in sentences."));

        let item = VocabularyItem {
            id: Uuid::new_v4().to_string(),
            phonetic: segment(&word),
            word,
            definition: definition.to_string(),
            example,
            emoji: new_word.emoji.unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
            difficulty: new_word.difficulty.unwrap_or_default(),
        };

        tracing::info!("Added vocabulary word '{}'", item.word);
        self.items.push(item);
        Ok(&self.items[self.items.len() - 1])
    }

    /// Remove by id
    pub fn remove(&mut self, id: &str) -> Option<VocabularyItem> {
        let position = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(position))
    }
}
