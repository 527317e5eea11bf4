use std::env;

use serde::{Deserialize, Serialize};

fn default_extract_limit() -> usize {
    3
}

fn default_min_word_len() -> usize {
    6
}

fn default_hard_word_len() -> usize {
    8
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Max new words collected per extraction
    #[serde(default = "default_extract_limit")]
    pub extract_limit: usize,
    /// Tokens must be longer than this to count as difficult
    #[serde(default = "default_min_word_len")]
    pub min_word_len: usize,
    /// Unknown words longer than this are rated hard
    #[serde(default = "default_hard_word_len")]
    pub hard_word_len: usize,
}

impl VocabularyConfig {
    pub fn new() -> Self {
        let extract_limit = env::var("FUZZLE_EXTRACT_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_extract_limit);

        Self {
            extract_limit,
            ..Self::default()
        }
    }
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            extract_limit: default_extract_limit(),
            min_word_len: default_min_word_len(),
            hard_word_len: default_hard_word_len(),
        }
    }
}
