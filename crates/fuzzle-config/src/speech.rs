use std::env;

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_rate() -> f32 {
    0.6
}

fn default_pitch() -> f32 {
    1.1
}

fn default_volume() -> f32 {
    0.9
}

fn default_settle_delay_ms() -> u64 {
    400
}

fn default_ms_per_char() -> u64 {
    90
}

/// Narration settings, tuned for slow and clear word-by-word reading
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Speaking rate relative to the engine's normal speed
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    /// 0.0 - 1.0
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Pause between two words
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Console engine pacing at rate 1.0
    #[serde(default = "default_ms_per_char")]
    pub ms_per_char: u64,
}

impl SpeechConfig {
    pub fn new() -> Self {
        let rate = env::var("FUZZLE_SPEECH_RATE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_rate);

        let settle_delay_ms = env::var("FUZZLE_SETTLE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_settle_delay_ms);

        Self {
            rate,
            settle_delay_ms,
            ..Self::default()
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            rate: default_rate(),
            pitch: default_pitch(),
            volume: default_volume(),
            settle_delay_ms: default_settle_delay_ms(),
            ms_per_char: default_ms_per_char(),
        }
    }
}
