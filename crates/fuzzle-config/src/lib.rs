use std::env;

use serde::{Deserialize, Serialize};

use self::dictionary::DictionaryConfig;
use self::reading::ReadingConfig;
use self::speech::SpeechConfig;
use self::vocabulary::VocabularyConfig;

pub mod dictionary;
pub mod reading;
pub mod speech;
pub mod vocabulary;

fn default_channel_capacity() -> usize {
    64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub speech: SpeechConfig,
    pub vocabulary: VocabularyConfig,
    pub reading: ReadingConfig,
    pub dictionary: DictionaryConfig,

    /// Bound of the app <-> render channels
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let channel_capacity = env::var("FUZZLE_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_channel_capacity);

        Config {
            speech: SpeechConfig::new(),
            vocabulary: VocabularyConfig::new(),
            reading: ReadingConfig::default(),
            dictionary: DictionaryConfig::default(),

            channel_capacity,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speech: SpeechConfig::default(),
            vocabulary: VocabularyConfig::default(),
            reading: ReadingConfig::default(),
            dictionary: DictionaryConfig::default(),
            channel_capacity: default_channel_capacity(),
        }
    }
}
