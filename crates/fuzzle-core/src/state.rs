use std::sync::Arc;

use fuzzle_config::Config;
use tokio::sync::RwLock;

use crate::simplify::{SubstitutionTable, simplify};
use crate::vocabulary::Vocabulary;

/// Text and word list the reader is currently working with
#[derive(Debug, Default)]
pub struct ReadingSession {
    /// Text as entered or loaded
    pub input_text: String,
    /// Text shown and read aloud, possibly simplified
    pub display_text: String,
    pub vocabulary: Vocabulary,
}

impl ReadingSession {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self {
            vocabulary,
            ..Self::default()
        }
    }

    /// Replace both the original and the displayed text
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.display_text = text.clone();
        self.input_text = text;
    }

    /// Show the simplified original. Blank input leaves the display alone.
    pub fn simplify(&mut self, table: &SubstitutionTable) -> bool {
        if self.input_text.trim().is_empty() {
            return false;
        }
        self.display_text = simplify(&self.input_text, table);
        true
    }

    pub fn restore_original(&mut self) {
        self.display_text = self.input_text.clone();
    }
}

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub session: RwLock<ReadingSession>,
}

impl AppState {
    pub fn new(config: Config, session: ReadingSession) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            session: RwLock::new(session),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default(), ReadingSession::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simplify_and_restore() {
        let table = SubstitutionTable::from_pairs([("various", "different")]).unwrap();
        let mut session = ReadingSession::default();

        assert!(!session.simplify(&table));

        session.set_text("Various tools help.");
        assert!(session.simplify(&table));
        assert_eq!(session.display_text, "different tools help.");
        assert_eq!(session.input_text, "Various tools help.");

        session.restore_original();
        assert_eq!(session.display_text, session.input_text);
    }

    #[tokio::test]
    async fn app_state_shares_config() {
        let state = AppState::default();
        state.config.write().await.reading.syllable_mode = true;

        let config = state.config.clone();
        assert!(config.read().await.reading.syllable_mode);
    }
}
