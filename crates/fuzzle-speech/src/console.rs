use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use fuzzle_config::speech::SpeechConfig;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::engine::{SpeechEngine, SpeechError, Utterance, UtteranceEnd, UtteranceParams};

/// Stand-in engine for terminals without a TTS backend.
///
/// Each utterance is logged and "lasts" `ms_per_char` per character, scaled
/// by the rate. Must be used from within a tokio runtime.
pub struct ConsoleSpeechEngine {
    available: bool,
    ms_per_char: u64,
    next_id: AtomicU64,
    cancel: Mutex<CancellationToken>,
}

impl ConsoleSpeechEngine {
    pub fn new(available: bool, ms_per_char: u64) -> Self {
        Self {
            available,
            ms_per_char,
            next_id: AtomicU64::new(1),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(config.enabled, config.ms_per_char)
    }

    fn duration_for(&self, text: &str, rate: f32) -> Duration {
        let chars = text.chars().count().max(1) as f64;
        let rate = f64::from(rate).max(0.1);
        Duration::from_millis((self.ms_per_char as f64 * chars / rate) as u64)
    }
}

impl SpeechEngine for ConsoleSpeechEngine {
    fn is_available(&self) -> bool {
        self.available
    }

    fn speak(&self, text: &str, params: UtteranceParams) -> Result<Utterance, SpeechError> {
        if !self.available {
            return Err(SpeechError::Unavailable);
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let duration = self.duration_for(text, params.rate);
        let cancel = self
            .cancel
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .child_token();
        let (tx, rx) = oneshot::channel();

        tracing::info!(
            target: "fuzzle::speech",
            id,
            rate = params.rate,
            pitch = params.pitch,
            volume = params.volume,
            "🔊 {}",
            text
        );

        tokio::spawn(async move {
            let end = tokio::select! {
                _ = cancel.cancelled() => UtteranceEnd::Cancelled,
                _ = tokio::time::sleep(duration) => UtteranceEnd::Finished,
            };
            tracing::trace!("Utterance {} ended: {:?}", id, end);
            let _ = tx.send(end);
        });

        Ok(Utterance::new(id, rx))
    }

    fn cancel_all(&self) {
        let mut cancel = self.cancel.lock().unwrap_or_else(|e| e.into_inner());
        cancel.cancel();
        *cancel = CancellationToken::new();
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn utterance_finishes_after_its_duration() {
        let engine = ConsoleSpeechEngine::new(true, 1);

        let utterance = engine.speak("hello", UtteranceParams::default()).unwrap();
        let end = timeout(Duration::from_secs(2), utterance.finished()).await.unwrap();

        assert_eq!(end, UtteranceEnd::Finished);
    }

    #[tokio::test]
    async fn cancel_all_ends_pending_utterances() {
        let engine = ConsoleSpeechEngine::new(true, 10_000);

        let first = engine.speak("slow", UtteranceParams::default()).unwrap();
        let second = engine.speak("slower", UtteranceParams::default()).unwrap();
        assert_ne!(first.id, second.id);

        engine.cancel_all();

        let first = timeout(Duration::from_secs(2), first.finished()).await.unwrap();
        let second = timeout(Duration::from_secs(2), second.finished()).await.unwrap();
        assert_eq!(first, UtteranceEnd::Cancelled);
        assert_eq!(second, UtteranceEnd::Cancelled);

        // Requests after a cancel are not cancelled with the old ones
        let third = engine.speak("go", UtteranceParams::default()).unwrap();
        assert!(
            timeout(Duration::from_millis(50), third.finished())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn unavailable_engine_rejects_requests() {
        let engine = ConsoleSpeechEngine::new(false, 1);

        assert!(!engine.is_available());
        assert!(matches!(
            engine.speak("hi", UtteranceParams::default()),
            Err(SpeechError::Unavailable)
        ));
    }

    #[test]
    fn slower_rate_means_longer_utterance() {
        let engine = ConsoleSpeechEngine::new(true, 100);

        assert_eq!(engine.duration_for("abcd", 1.0), Duration::from_millis(400));
        assert!(engine.duration_for("abcd", 0.5) > engine.duration_for("abcd", 1.0));
        assert_eq!(engine.duration_for("", 1.0), Duration::from_millis(100));
    }
}
