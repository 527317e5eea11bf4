use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    TextInput(String),
    RawTextInput {
        text: String,
        source: TextSource,
    },
    LoadFile(PathBuf),
    Simplify,
    RestoreOriginal,
    ToggleSyllableMode,
    StartReading,
    StopReading,
    ExtractVocabulary,
    AddWord(NewWord),
    RemoveWord(String),
    LookupWord(String),
    ListVocabulary,
    ShowText(String),
    ShowDefinition {
        query: String,
        record: Option<DefinitionRecord>,
    },
    ShowVocabulary {
        added: Vec<VocabularyItem>,
        total: usize,
    },
    PlaybackProgress {
        index: Option<usize>,
        word: Option<String>,
    },
    Status(String),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Manual,
    File,
}

/// How hard a word is for the target reader
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse level from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Get color badge
    pub fn badge(&self) -> String {
        let dot = match self {
            Difficulty::Easy => "🟢",
            Difficulty::Medium => "🟡",
            Difficulty::Hard => "🔴",
        };
        format!("{} {}", dot, self.as_str())
    }
}

/// Dictionary record, keyed by lowercase word in the owning dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub definition: String,
    pub example: String,
    pub emoji: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyItem {
    pub id: String,
    /// Canonical form: lowercase, trailing punctuation stripped
    pub word: String,
    /// Syllable-segmented form of `word`
    pub phonetic: String,
    pub definition: String,
    pub example: String,
    pub emoji: String,
    pub difficulty: Difficulty,
}

/// Result of a single-word definition lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionRecord {
    pub word: String,
    pub phonetic: String,
    pub definition: String,
    pub example: String,
    pub emoji: String,
    pub difficulty: Difficulty,
}

/// User-entered vocabulary word, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWord {
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
}

/// One rendered word of the display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayWord {
    /// Position among all whitespace tokens of the text, shared with playback
    pub index: usize,
    pub line: usize,
    pub text: String,
    pub highlighted: bool,
}
