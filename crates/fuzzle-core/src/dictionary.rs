use std::collections::HashMap;

use fuzzle_types::DictionaryEntry;

use crate::error::LoadError;

/// Read-only word -> entry mapping, keyed by lowercase word
#[derive(Debug, Clone)]
pub struct Dictionary {
    name: String,
    entries: HashMap<String, DictionaryEntry>,
}

impl Dictionary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    /// Build from (word, entry) pairs; words are lowercased, later pairs win
    pub fn from_entries<I, S>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, DictionaryEntry)>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|(word, entry)| (word.as_ref().trim().to_lowercase(), entry))
            .collect();

        Self {
            name: name.into(),
            entries,
        }
    }

    /// Load from a JSON object of `word -> {definition, example, emoji, difficulty}`
    pub fn from_json(name: impl Into<String>, json_str: &str) -> Result<Self, LoadError> {
        let raw: HashMap<String, DictionaryEntry> = serde_json::from_str(json_str)?;

        if let Some(word) = raw.keys().find(|w| w.trim().is_empty()) {
            return Err(LoadError::InvalidFormat(format!(
                "empty headword {word:?}"
            )));
        }

        Ok(Self::from_entries(name, raw))
    }

    /// Exact lookup by canonical word
    pub fn get(&self, word: &str) -> Option<&DictionaryEntry> {
        self.entries.get(word)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another dictionary into this one.
    /// Entries of `other` override existing ones for the same word.
    pub fn merge(mut self, other: Dictionary) -> Self {
        let overridden = other
            .entries
            .keys()
            .filter(|w| self.entries.contains_key(*w))
            .count();

        self.entries.extend(other.entries);

        tracing::debug!(
            "Merged dictionary '{}' into '{}' ({} overridden)",
            other.name,
            self.name,
            overridden
        );

        self
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new("empty")
    }
}

#[cfg(test)]
mod tests {
    use fuzzle_types::Difficulty;

    use super::*;

    fn entry(definition: &str) -> DictionaryEntry {
        DictionaryEntry {
            definition: definition.to_string(),
            example: String::new(),
            emoji: "🧠".to_string(),
            difficulty: Difficulty::Medium,
        }
    }

    #[test]
    fn from_json_lowercases_headwords() {
        let json = r#"{
            "Cognitive": {
                "definition": "Related to thinking",
                "example": "Cognitive skills grow.",
                "emoji": "💭",
                "difficulty": "hard"
            }
        }"#;

        let dict = Dictionary::from_json("test", json).unwrap();

        let hit = dict.get("cognitive").unwrap();
        assert_eq!(hit.definition, "Related to thinking");
        assert_eq!(hit.difficulty, Difficulty::Hard);
        assert!(dict.get("Cognitive").is_none());
    }

    #[test]
    fn from_json_rejects_bad_input() {
        assert!(matches!(
            Dictionary::from_json("test", "[]"),
            Err(LoadError::ParseError(_))
        ));

        let blank = r#"{ " ": { "definition": "x", "example": "", "emoji": "", "difficulty": "easy" } }"#;
        assert!(matches!(
            Dictionary::from_json("test", blank),
            Err(LoadError::InvalidFormat(_))
        ));
    }

    #[test]
    fn merge_overrides_by_word() {
        let base = Dictionary::from_entries("base", [("alpha", entry("old")), ("beta", entry("b"))]);
        let extra = Dictionary::from_entries("extra", [("alpha", entry("new")), ("gamma", entry("g"))]);

        let merged = base.merge(extra);

        assert_eq!(merged.entry_count(), 3);
        assert_eq!(merged.get("alpha").unwrap().definition, "new");
        assert_eq!(merged.get("gamma").unwrap().definition, "g");
    }
}
