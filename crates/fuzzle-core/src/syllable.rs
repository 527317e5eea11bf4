//! Heuristic syllable segmentation.
//!
//! This is a letter-pattern approximation, not dictionary-backed hyphenation:
//! silent letters and diphthongs are routinely mis-split. The exact output is
//! relied upon by vocabulary cards and the syllable display mode, so changes
//! here are behavior changes.

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Split a word into syllables joined with `-`.
///
/// A syllable closes after a vowel followed by a consonant. When the
/// consonant is itself followed by another consonant it stays with the
/// preceding vowel (`mag-ni-fi-cen-t`). Adjacent vowels never split.
pub fn segment(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut syllables: Vec<String> = Vec::new();
    let mut current = String::new();

    let mut i = 0;
    while i < chars.len() {
        current.push(chars[i]);

        if is_vowel(chars[i]) && i + 1 < chars.len() && !is_vowel(chars[i + 1]) {
            if i + 2 < chars.len() && !is_vowel(chars[i + 2]) {
                current.push(chars[i + 1]);
                i += 1;
            }
            syllables.push(std::mem::take(&mut current));
        }

        i += 1;
    }

    if !current.is_empty() {
        syllables.push(current);
    }

    syllables.join("-")
}

/// Display form of a whole text with long words split into syllables.
///
/// Tokens longer than `min_len` characters are segmented. Lines are kept;
/// tokens within a line are rejoined with single spaces.
pub fn syllabify_text(text: &str, min_len: usize) -> String {
    text.lines()
        .map(|line| {
            line.split_whitespace()
                .map(|token| {
                    if token.chars().count() > min_len {
                        segment(token)
                    } else {
                        token.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
