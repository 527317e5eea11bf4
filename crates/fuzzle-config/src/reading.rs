use serde::{Deserialize, Serialize};

fn default_line_height() -> f32 {
    1.6
}

fn default_letter_spacing() -> f32 {
    0.05
}

fn default_font_size() -> u32 {
    18
}

fn default_syllable_min_len() -> usize {
    4
}

/// Display preferences for the reading surface
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ReadingConfig {
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    /// Letter spacing in em
    #[serde(default = "default_letter_spacing")]
    pub letter_spacing: f32,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub syllable_mode: bool,
    /// Words must be longer than this to be shown split into syllables
    #[serde(default = "default_syllable_min_len")]
    pub syllable_min_len: usize,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            line_height: default_line_height(),
            letter_spacing: default_letter_spacing(),
            font_size: default_font_size(),
            syllable_mode: false,
            syllable_min_len: default_syllable_min_len(),
        }
    }
}
