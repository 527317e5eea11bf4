use fuzzle_types::DefinitionRecord;

use crate::dictionary::Dictionary;
use crate::syllable::segment;
use crate::text::canonical_word;

/// Definition of a single word as it appears in text.
///
/// Case and trailing `. , ! ?` are ignored. A miss is `None`, never an error.
pub fn lookup(word: &str, dictionary: &Dictionary) -> Option<DefinitionRecord> {
    let word = canonical_word(word);
    let entry = dictionary.get(&word)?;

    Some(DefinitionRecord {
        phonetic: segment(&word),
        definition: entry.definition.clone(),
        example: entry.example.clone(),
        emoji: entry.emoji.clone(),
        difficulty: entry.difficulty,
        word,
    })
}
