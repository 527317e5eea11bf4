mod console;
mod engine;
mod synchronizer;

pub use console::ConsoleSpeechEngine;
pub use engine::{SpeechEngine, SpeechError, Utterance, UtteranceEnd, UtteranceParams};
pub use synchronizer::{PlaybackSettings, PlaybackState, PlaybackStatus, PlaybackSynchronizer};
