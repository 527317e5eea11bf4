use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Extra dictionary files merged over the embedded one, in order
    #[serde(default)]
    pub additional_paths: Vec<String>,
    /// Extra substitution tables appended after the embedded one
    #[serde(default)]
    pub substitution_paths: Vec<String>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            additional_paths: vec![],
            substitution_paths: vec![],
        }
    }
}
