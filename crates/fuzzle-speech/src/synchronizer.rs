//! Word-by-word narration kept in step with the highlighted word.
//!
//! Every `start` opens a new run with its own generation number and
//! cancellation token. The narration task re-checks its generation under the
//! run lock before touching shared state or issuing a speak request, so a
//! late "finished" notification or timer from a stopped run does nothing.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use fuzzle_config::speech::SpeechConfig;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::engine::{SpeechEngine, UtteranceEnd, UtteranceParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Idle,
    Playing,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub tokens: Vec<String>,
    /// Word being spoken; `None` when nothing is highlighted
    pub current_index: Option<usize>,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_index
            .and_then(|i| self.tokens.get(i))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct PlaybackSettings {
    pub params: UtteranceParams,
    /// Pause after each word before the next one starts
    pub settle_delay: Duration,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            params: UtteranceParams::default(),
            settle_delay: Duration::from_millis(400),
        }
    }
}

impl From<&SpeechConfig> for PlaybackSettings {
    fn from(config: &SpeechConfig) -> Self {
        Self {
            params: UtteranceParams::from(config),
            settle_delay: Duration::from_millis(config.settle_delay_ms),
        }
    }
}

struct Run {
    generation: u64,
    cancel: CancellationToken,
}

struct Inner {
    engine: Arc<dyn SpeechEngine>,
    settings: PlaybackSettings,
    run: Mutex<Run>,
    state: watch::Sender<PlaybackState>,
}

impl Inner {
    fn lock_run(&self) -> MutexGuard<'_, Run> {
        self.run.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Invalidate the current run. Caller holds the run lock.
    fn halt(&self, run: &mut Run) {
        run.generation += 1;
        run.cancel.cancel();

        let was_playing = self.state.borrow().is_playing();
        if was_playing {
            self.engine.cancel_all();
        }
        self.reset();
    }

    fn reset(&self) {
        self.state.send_if_modified(|state| {
            if *state == PlaybackState::default() {
                return false;
            }
            *state = PlaybackState::default();
            true
        });
    }
}

/// Drives a [`SpeechEngine`] one word at a time
#[derive(Clone)]
pub struct PlaybackSynchronizer {
    inner: Arc<Inner>,
}

impl PlaybackSynchronizer {
    pub fn new(engine: Arc<dyn SpeechEngine>, settings: PlaybackSettings) -> Self {
        let (state, _) = watch::channel(PlaybackState::default());

        Self {
            inner: Arc::new(Inner {
                engine,
                settings,
                run: Mutex::new(Run {
                    generation: 0,
                    cancel: CancellationToken::new(),
                }),
                state,
            }),
        }
    }

    /// Start reading `text` aloud from the first word.
    ///
    /// Blank text or an unavailable engine is a no-op and returns `false`.
    /// A run already in progress is stopped first. Needs a tokio runtime.
    pub fn start(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            tracing::debug!("Playback not started: blank text");
            return false;
        }
        if !self.inner.engine.is_available() {
            tracing::debug!("Playback not started: speech engine unavailable");
            return false;
        }

        let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();

        let (generation, cancel) = {
            let mut run = self.inner.lock_run();
            self.inner.halt(&mut run);

            run.generation += 1;
            run.cancel = CancellationToken::new();

            self.inner.state.send_replace(PlaybackState {
                status: PlaybackStatus::Playing,
                tokens: tokens.clone(),
                current_index: Some(0),
            });

            (run.generation, run.cancel.clone())
        };

        tracing::info!("Playback started: {} words (run {})", tokens.len(), generation);
        tokio::spawn(narrate(self.inner.clone(), tokens, generation, cancel));
        true
    }

    /// Cancel speech and clear the highlight. Safe to call at any time.
    pub fn stop(&self) {
        let mut run = self.inner.lock_run();
        if self.inner.state.borrow().is_playing() {
            tracing::info!("Playback stopped (run {})", run.generation);
        }
        self.inner.halt(&mut run);
    }

    pub fn is_available(&self) -> bool {
        self.inner.engine.is_available()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PlaybackState {
        self.inner.state.borrow().clone()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.inner.state.borrow().status
    }

    pub fn current_index(&self) -> Option<usize> {
        self.inner.state.borrow().current_index
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.inner.state.subscribe()
    }

    /// Wait until the synchronizer is idle
    pub async fn idle(&self) {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close here
        let _ = rx.wait_for(|state| !state.is_playing()).await;
    }
}

async fn narrate(
    inner: Arc<Inner>,
    tokens: Vec<String>,
    generation: u64,
    cancel: CancellationToken,
) {
    for (index, token) in tokens.iter().enumerate() {
        let utterance = {
            let run = inner.lock_run();
            if run.generation != generation {
                return;
            }

            inner.state.send_modify(|state| state.current_index = Some(index));

            match inner.engine.speak(token, inner.settings.params) {
                Ok(utterance) => utterance,
                Err(e) => {
                    tracing::warn!("Speak request for word {} failed: {}", index, e);
                    inner.reset();
                    return;
                }
            }
        };

        tracing::debug!("Speaking word {} '{}' (utterance {})", index, token, utterance.id);

        let end = tokio::select! {
            end = utterance.finished() => end,
            _ = cancel.cancelled() => return,
        };

        if end == UtteranceEnd::Cancelled {
            let run = inner.lock_run();
            if run.generation == generation {
                tracing::debug!("Utterance cancelled by the engine, ending run {}", generation);
                inner.reset();
            }
            return;
        }

        tokio::select! {
            _ = tokio::time::sleep(inner.settings.settle_delay) => {}
            _ = cancel.cancelled() => return,
        }
    }

    let run = inner.lock_run();
    if run.generation == generation {
        tracing::info!("Playback finished (run {})", generation);
        inner.reset();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Instant;

    use tokio::sync::oneshot;
    use tokio::time::{sleep, timeout};

    use super::*;
    use crate::engine::{SpeechError, Utterance};

    /// Engine whose utterances end only when the test says so
    #[derive(Default)]
    struct ScriptedEngine {
        unavailable: bool,
        reject: AtomicBool,
        /// Keep pending notifiers on cancel, to deliver them late
        late_notifications: bool,
        spoken: Mutex<Vec<(String, UtteranceParams)>>,
        pending: Mutex<VecDeque<oneshot::Sender<UtteranceEnd>>>,
        active: AtomicUsize,
        max_active: AtomicUsize,
        cancels: AtomicUsize,
    }

    impl ScriptedEngine {
        fn spoken_words(&self) -> Vec<String> {
            self.spoken.lock().unwrap().iter().map(|(w, _)| w.clone()).collect()
        }

        fn spoken_count(&self) -> usize {
            self.spoken.lock().unwrap().len()
        }

        fn finish_next(&self) {
            if let Some(tx) = self.pending.lock().unwrap().pop_front() {
                self.release();
                let _ = tx.send(UtteranceEnd::Finished);
            }
        }

        fn release(&self) {
            let _ = self
                .active
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        }
    }

    impl SpeechEngine for ScriptedEngine {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        fn speak(&self, text: &str, params: UtteranceParams) -> Result<Utterance, SpeechError> {
            if self.reject.load(Ordering::SeqCst) {
                return Err(SpeechError::Rejected("scripted".to_string()));
            }

            let (tx, rx) = oneshot::channel();
            let mut spoken = self.spoken.lock().unwrap();
            spoken.push((text.to_string(), params));
            self.pending.lock().unwrap().push_back(tx);

            let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(active, Ordering::SeqCst);

            Ok(Utterance::new(spoken.len() as u64, rx))
        }

        fn cancel_all(&self) {
            self.cancels.fetch_add(1, Ordering::SeqCst);
            if self.late_notifications {
                self.active.store(0, Ordering::SeqCst);
                return;
            }
            for tx in self.pending.lock().unwrap().drain(..) {
                self.release();
                let _ = tx.send(UtteranceEnd::Cancelled);
            }
        }
    }

    fn settings(settle_ms: u64) -> PlaybackSettings {
        PlaybackSettings {
            params: UtteranceParams::default(),
            settle_delay: Duration::from_millis(settle_ms),
        }
    }

    fn synchronizer(engine: &Arc<ScriptedEngine>, settle_ms: u64) -> PlaybackSynchronizer {
        PlaybackSynchronizer::new(engine.clone(), settings(settle_ms))
    }

    async fn wait_until(mut condition: impl FnMut() -> bool) {
        timeout(Duration::from_secs(2), async {
            while !condition() {
                sleep(Duration::from_millis(1)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn reads_every_word_then_goes_idle() {
        let engine = Arc::new(ScriptedEngine::default());
        let sync = synchronizer(&engine, 5);

        assert!(sync.start("Reading  is\nfun"));
        assert_eq!(sync.status(), PlaybackStatus::Playing);
        assert_eq!(sync.current_index(), Some(0));

        for expected in 1..=3 {
            wait_until(|| engine.spoken_count() == expected).await;
            assert_eq!(sync.current_index(), Some(expected - 1));
            engine.finish_next();
        }

        wait_until(|| sync.status() == PlaybackStatus::Idle).await;
        assert_eq!(sync.current_index(), None);
        assert_eq!(engine.spoken_words(), vec!["Reading", "is", "fun"]);
        assert_eq!(engine.max_active.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn advances_only_after_finish_and_settle_delay() {
        let engine = Arc::new(ScriptedEngine::default());
        let sync = synchronizer(&engine, 60);

        sync.start("one two");
        wait_until(|| engine.spoken_count() == 1).await;

        sleep(Duration::from_millis(30)).await;
        assert_eq!(engine.spoken_count(), 1);
        assert_eq!(sync.current_index(), Some(0));

        let finished_at = Instant::now();
        engine.finish_next();
        wait_until(|| engine.spoken_count() == 2).await;

        assert!(finished_at.elapsed() >= Duration::from_millis(60));
        assert_eq!(sync.state().current_word(), Some("two"));
    }

    #[tokio::test]
    async fn uses_configured_voice() {
        let engine = Arc::new(ScriptedEngine::default());
        let sync = synchronizer(&engine, 5);

        sync.start("hello");
        wait_until(|| engine.spoken_count() == 1).await;

        let (_, params) = engine.spoken.lock().unwrap()[0].clone();
        assert_eq!(params.rate, 0.6);
        assert_eq!(params.pitch, 1.1);
        assert_eq!(params.volume, 0.9);
    }

    #[tokio::test]
    async fn stop_before_finish_resets_immediately() {
        let engine = Arc::new(ScriptedEngine::default());
        let sync = synchronizer(&engine, 5);

        sync.start("one two three");
        wait_until(|| engine.spoken_count() == 1).await;

        sync.stop();
        assert_eq!(sync.status(), PlaybackStatus::Idle);
        assert_eq!(sync.current_index(), None);
        assert_eq!(engine.cancels.load(Ordering::SeqCst), 1);

        sleep(Duration::from_millis(30)).await;
        assert_eq!(engine.spoken_count(), 1);
        assert_eq!(sync.status(), PlaybackStatus::Idle);
    }

    #[tokio::test]
    async fn late_finish_after_stop_is_ignored() {
        let engine = Arc::new(ScriptedEngine {
            late_notifications: true,
            ..ScriptedEngine::default()
        });
        let sync = synchronizer(&engine, 1);

        sync.start("one two three");
        wait_until(|| engine.spoken_count() == 1).await;
        sync.stop();

        // Notification for the stopped run arrives after stop()
        engine.finish_next();
        sleep(Duration::from_millis(30)).await;

        assert_eq!(engine.spoken_count(), 1);
        assert_eq!(sync.status(), PlaybackStatus::Idle);
        assert_eq!(sync.current_index(), None);
    }

    #[tokio::test]
    async fn restart_never_overlaps_utterances() {
        let engine = Arc::new(ScriptedEngine::default());
        let sync = synchronizer(&engine, 1);

        sync.start("one two");
        wait_until(|| engine.spoken_count() == 1).await;

        sync.start("three four");
        assert_eq!(sync.current_index(), Some(0));
        wait_until(|| engine.spoken_count() == 2).await;

        engine.finish_next();
        wait_until(|| engine.spoken_count() == 3).await;
        engine.finish_next();
        wait_until(|| sync.status() == PlaybackStatus::Idle).await;

        assert_eq!(engine.spoken_words(), vec!["one", "three", "four"]);
        assert_eq!(engine.max_active.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn back_to_back_starts_drop_the_first_text() {
        let engine = Arc::new(ScriptedEngine::default());
        let sync = synchronizer(&engine, 1);

        assert!(sync.start("a b"));
        assert!(sync.start("c d"));
        assert_eq!(sync.current_index(), Some(0));

        wait_until(|| engine.spoken_count() == 1).await;
        engine.finish_next();
        wait_until(|| engine.spoken_count() == 2).await;
        engine.finish_next();
        wait_until(|| sync.status() == PlaybackStatus::Idle).await;

        sleep(Duration::from_millis(10)).await;
        assert_eq!(engine.spoken_words(), vec!["c", "d"]);
        assert_eq!(engine.max_active.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn blank_text_or_unavailable_engine_is_a_no_op() {
        let engine = Arc::new(ScriptedEngine::default());
        let sync = synchronizer(&engine, 1);
        assert!(!sync.start("   \n\t"));

        let offline = Arc::new(ScriptedEngine {
            unavailable: true,
            ..ScriptedEngine::default()
        });
        let offline_sync = synchronizer(&offline, 1);
        assert!(!offline_sync.start("hello there"));

        sleep(Duration::from_millis(10)).await;
        assert_eq!(engine.spoken_count() + offline.spoken_count(), 0);
        assert_eq!(sync.state(), PlaybackState::default());
        assert_eq!(offline_sync.state(), PlaybackState::default());
    }

    #[tokio::test]
    async fn stop_when_idle_is_harmless() {
        let engine = Arc::new(ScriptedEngine::default());
        let sync = synchronizer(&engine, 1);

        sync.stop();
        sync.stop();

        assert_eq!(sync.status(), PlaybackStatus::Idle);
        assert_eq!(engine.cancels.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejected_speak_ends_the_run() {
        let engine = Arc::new(ScriptedEngine::default());
        engine.reject.store(true, Ordering::SeqCst);
        let sync = synchronizer(&engine, 1);

        assert!(sync.start("hello"));
        wait_until(|| sync.status() == PlaybackStatus::Idle).await;
        assert_eq!(sync.current_index(), None);
    }

    #[tokio::test]
    async fn subscribers_see_progress() {
        let engine = Arc::new(ScriptedEngine::default());
        let sync = synchronizer(&engine, 1);
        let mut rx = sync.subscribe();

        sync.start("alpha beta");
        wait_until(|| engine.spoken_count() == 1).await;
        engine.finish_next();

        let state = timeout(
            Duration::from_secs(2),
            rx.wait_for(|s| s.current_index == Some(1)),
        )
        .await
        .unwrap()
        .unwrap()
        .clone();
        assert_eq!(state.current_word(), Some("beta"));

        wait_until(|| engine.spoken_count() == 2).await;
        engine.finish_next();
        timeout(Duration::from_secs(2), sync.idle()).await.unwrap();
    }
}
