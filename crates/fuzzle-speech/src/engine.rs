use fuzzle_config::speech::SpeechConfig;
use tokio::sync::oneshot;

/// Voice settings of a single utterance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtteranceParams {
    /// Relative to the engine's normal speed
    pub rate: f32,
    pub pitch: f32,
    /// 0.0 - 1.0
    pub volume: f32,
}

impl Default for UtteranceParams {
    fn default() -> Self {
        Self {
            rate: 0.6,
            pitch: 1.1,
            volume: 0.9,
        }
    }
}

impl From<&SpeechConfig> for UtteranceParams {
    fn from(config: &SpeechConfig) -> Self {
        Self {
            rate: config.rate,
            pitch: config.pitch,
            volume: config.volume.clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtteranceEnd {
    Finished,
    Cancelled,
}

/// Handle of a queued speak request
#[derive(Debug)]
pub struct Utterance {
    pub id: u64,
    finished: oneshot::Receiver<UtteranceEnd>,
}

impl Utterance {
    pub fn new(id: u64, finished: oneshot::Receiver<UtteranceEnd>) -> Self {
        Self { id, finished }
    }

    /// Wait for the engine's end notification.
    /// An engine dropping the notifier counts as a cancellation.
    pub async fn finished(self) -> UtteranceEnd {
        self.finished.await.unwrap_or(UtteranceEnd::Cancelled)
    }
}

/// Text-to-speech backend
pub trait SpeechEngine: Send + Sync {
    /// Whether the engine can speak at all on this platform
    fn is_available(&self) -> bool;

    /// Queue `text` for speaking; must not block
    fn speak(&self, text: &str, params: UtteranceParams) -> Result<Utterance, SpeechError>;

    /// Cancel every queued or in-flight utterance
    fn cancel_all(&self);
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech engine unavailable")]
    Unavailable,

    #[error("Speak request rejected: {0}")]
    Rejected(String),
}
