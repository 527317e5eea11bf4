use fuzzle_types::DisplayWord;

use crate::syllable::segment;

/// Punctuation dropped from the end of a token to form its canonical word
pub const TRAILING_PUNCTUATION: [char; 4] = ['.', ',', '!', '?'];

/// Whitespace-delimited tokens, punctuation included
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Lowercase form with trailing `. , ! ?` removed, used as dictionary and
/// vocabulary key
pub fn canonical_word(token: &str) -> String {
    token
        .trim()
        .trim_end_matches(TRAILING_PUNCTUATION)
        .to_lowercase()
}

/// Lay out a text word by word for rendering.
///
/// `index` counts tokens across all lines, so it lines up with the token
/// positions used by playback.
pub fn display_words(
    text: &str,
    syllable_mode: bool,
    syllable_min_len: usize,
    highlighted: Option<usize>,
) -> Vec<DisplayWord> {
    let mut words = Vec::new();
    let mut index = 0;

    for (line, content) in text.lines().enumerate() {
        for token in content.split_whitespace() {
            let text = if syllable_mode && token.chars().count() > syllable_min_len {
                segment(token)
            } else {
                token.to_string()
            };

            words.push(DisplayWord {
                index,
                line,
                text,
                highlighted: highlighted == Some(index),
            });
            index += 1;
        }
    }

    words
}
