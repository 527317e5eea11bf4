use std::collections::HashSet;
use std::path::Path;

use fuzzle_config::dictionary::DictionaryConfig;
use fuzzle_core::dictionary::Dictionary;
use fuzzle_core::language::{LanguageProcessor, Token};
use fuzzle_core::lookup::lookup;
use fuzzle_core::preprocess::{DefaultPreprocessor, Preprocessor};
use fuzzle_core::simplify::{SubstitutionTable, simplify};
use fuzzle_core::text::canonical_word;
use fuzzle_core::vocabulary::{ExtractOptions, extract_with};
use fuzzle_types::{DefinitionRecord, VocabularyItem};

use crate::loader::{DictionaryLoader, SubstitutionLoader};

/// English language processor
pub struct EnglishProcessor {
    dictionary: Dictionary,
    substitutions: SubstitutionTable,
}

impl EnglishProcessor {
    /// Create a new English processor with the embedded tables only
    pub fn new() -> Self {
        Self::with_config(&DictionaryConfig::default())
    }

    /// Build from explicit tables
    pub fn with_tables(dictionary: Dictionary, substitutions: SubstitutionTable) -> Self {
        Self {
            dictionary,
            substitutions,
        }
    }

    /// Embedded tables plus the additional files named in `config`.
    /// A disabled dictionary yields an empty one; unreadable files are skipped.
    pub fn with_config(config: &DictionaryConfig) -> Self {
        let mut dict = if config.enabled {
            DictionaryLoader::load_embedded().unwrap_or_else(|e| {
                tracing::error!("Failed to load embedded dictionary: {}", e);
                tracing::warn!("Starting with empty dictionary");
                Dictionary::default()
            })
        } else {
            tracing::warn!("Dictionary disabled, using empty dictionary");
            Dictionary::default()
        };

        if config.enabled {
            for path in &config.additional_paths {
                match DictionaryLoader::load_from_file(Path::new(path)) {
                    Ok(additional) => {
                        tracing::info!("Merging additional dictionary from: {}", path);
                        dict = DictionaryLoader::merge(dict, additional);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load dictionary from {}: {}", path, e);
                    }
                }
            }
        }

        let mut substitutions = SubstitutionLoader::load_embedded().unwrap_or_else(|e| {
            tracing::error!("Failed to load embedded simplification rules: {}", e);
            SubstitutionTable::new()
        });

        for path in &config.substitution_paths {
            match SubstitutionLoader::load_from_file(Path::new(path)) {
                Ok(additional) => {
                    tracing::info!("Appending simplification rules from: {}", path);
                    substitutions.extend(additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load simplification rules from {}: {}", path, e);
                }
            }
        }

        Self::with_tables(dict, substitutions)
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn substitutions(&self) -> &SubstitutionTable {
        &self.substitutions
    }

    /// Swap complex words for the simpler ones of the substitution table
    pub fn simplify(&self, text: &str) -> String {
        simplify(text, &self.substitutions)
    }

    /// New vocabulary items for the difficult words of `text`
    pub fn extract_vocabulary(
        &self,
        text: &str,
        existing_words: &HashSet<String>,
        options: &ExtractOptions,
    ) -> Vec<VocabularyItem> {
        extract_with(text, existing_words, &self.dictionary, options)
    }
}

impl Default for EnglishProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageProcessor for EnglishProcessor {
    fn normalize(&self, text: &str) -> String {
        DefaultPreprocessor.process(text)
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        text.split_whitespace()
            .enumerate()
            .map(|(position, surface)| Token {
                surface: surface.to_string(),
                normalized: canonical_word(surface),
                position,
            })
            .collect()
    }

    fn lookup(&self, word: &str) -> Option<DefinitionRecord> {
        lookup(word, &self.dictionary)
    }
}
