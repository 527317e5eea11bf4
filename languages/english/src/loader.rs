use std::path::Path;

use fuzzle_core::dictionary::Dictionary;
use fuzzle_core::error::LoadError;
use fuzzle_core::simplify::SubstitutionTable;

pub struct DictionaryLoader;

impl DictionaryLoader {
    /// Load embedded dictionary data
    pub fn load_embedded() -> Result<Dictionary, LoadError> {
        let json = include_str!("../data/dictionary.json");
        tracing::info!("Loading embedded English dictionary...");
        let dict = Dictionary::from_json("embedded", json)?;
        tracing::info!("Loaded {} dictionary entries", dict.entry_count());
        Ok(dict)
    }

    /// Load dictionary from file path
    pub fn load_from_file(path: &Path) -> Result<Dictionary, LoadError> {
        tracing::info!("Loading dictionary from file: {}", path.display());
        let json = read_file(path)?;
        let dict = Dictionary::from_json(path.display().to_string(), &json)?;
        tracing::info!("Loaded {} dictionary entries from file", dict.entry_count());
        Ok(dict)
    }

    /// Merge two dictionaries (later entries override earlier ones by word)
    pub fn merge(base: Dictionary, additional: Dictionary) -> Dictionary {
        base.merge(additional)
    }
}

pub struct SubstitutionLoader;

impl SubstitutionLoader {
    /// Load the embedded simplification table
    pub fn load_embedded() -> Result<SubstitutionTable, LoadError> {
        let json = include_str!("../data/simplifications.json");
        let table = SubstitutionTable::from_json(json)?;
        tracing::info!("Loaded {} simplification rules", table.len());
        Ok(table)
    }

    pub fn load_from_file(path: &Path) -> Result<SubstitutionTable, LoadError> {
        tracing::info!("Loading simplification rules from file: {}", path.display());
        let json = read_file(path)?;
        SubstitutionTable::from_json(&json)
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_data_loads() {
        let dict = DictionaryLoader::load_embedded().unwrap();
        assert_eq!(dict.entry_count(), 12);
        assert!(dict.get("phonological").is_some());

        let table = SubstitutionLoader::load_embedded().unwrap();
        assert_eq!(table.len(), 21);
        assert_eq!(table.iter().next(), Some(("comprehension", "understanding")));
        assert_eq!(table.get("significantly"), Some("a lot"));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = DictionaryLoader::load_from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));

        let result = SubstitutionLoader::load_from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn file_dictionary_merges_over_embedded() {
        let path = std::env::temp_dir().join(format!("fuzzle-dict-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "cognitive": { "definition": "About thinking", "example": "", "emoji": "🤔", "difficulty": "medium" } }"#,
        )
        .unwrap();

        let base = DictionaryLoader::load_embedded().unwrap();
        let extra = DictionaryLoader::load_from_file(&path).unwrap();
        let merged = DictionaryLoader::merge(base, extra);
        std::fs::remove_file(&path).ok();

        assert_eq!(merged.entry_count(), 12);
        assert_eq!(merged.get("cognitive").unwrap().definition, "About thinking");
    }
}
