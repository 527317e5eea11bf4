use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    // Default preprocessor for pasted or loaded text
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Unicode normalization (NFKC) folds ligatures and full-width forms
        let text: String = text.nfkc().collect();

        // Keep line structure, drop carriage returns
        text.replace("\r\n", "\n").replace('\r', "\n")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_ligatures_and_line_endings() {
        let processed = DefaultPreprocessor.process("  e\u{FB03}cient\r\nreading\r ");
        assert_eq!(processed, "efficient\nreading");
    }

    #[test]
    fn blank_text_becomes_empty() {
        assert_eq!(DefaultPreprocessor.process(" \n\t "), "");
    }
}
