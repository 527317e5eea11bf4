use fuzzle_types::DefinitionRecord;

/// Text processing and lookup interface for language implementations
pub trait LanguageProcessor: Send + Sync {
    /// Normalize text (Unicode normalization, line endings, etc.)
    fn normalize(&self, text: &str) -> String;

    /// Break text into processable tokens
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Look up a single word as it appears in text
    fn lookup(&self, word: &str) -> Option<DefinitionRecord>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token as written, punctuation included
    pub surface: String,
    /// Canonical dictionary key
    pub normalized: String,
    /// Index among the whitespace tokens of the text
    pub position: usize,
}
