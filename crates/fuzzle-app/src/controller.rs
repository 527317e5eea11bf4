use std::sync::Arc;

use fuzzle_core::state::AppState;
use fuzzle_lang_english::EnglishProcessor;
use fuzzle_speech::PlaybackSynchronizer;
use fuzzle_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::playback::forward_progress;
use crate::events::{EventContext, event_loop};
use crate::io::input_io;
use crate::render::render_loop;

/// Upper bound for either channel, whatever the profile asks for
pub const MAX_CHANNEL_CAPACITY: usize = 4096;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_CHANNEL_CAPACITY);
        Self {
            // Progress events arrive once per spoken word
            app_to_ui: kanal::bounded_async(capacity.saturating_mul(4).min(MAX_CHANNEL_CAPACITY)),
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, channel_capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(channel_capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender for events into the app, as typed by the reader
    pub fn input_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    /// Receiver of everything the app wants shown
    pub fn output_receiver(&self) -> AsyncReceiver<AppEvent> {
        self.channels.app_to_ui.1.clone()
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// Event loop and playback progress forwarding
    pub fn spawn_core_tasks(
        &self,
        tasks: &mut JoinSet<anyhow::Result<()>>,
        processor: Arc<EnglishProcessor>,
        playback: PlaybackSynchronizer,
    ) {
        tasks.spawn(forward_progress(
            playback.subscribe(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        let ctx = EventContext {
            processor,
            playback,
            app_to_ui_tx: self.channels.app_to_ui.0.clone(),
        };

        // The event loop cancels the root token on quit
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            ctx,
            self.cancel_token.clone(),
        ));
    }

    /// Everything an interactive terminal session needs
    pub fn spawn_tasks(
        &self,
        processor: Arc<EnglishProcessor>,
        playback: PlaybackSynchronizer,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        self.spawn_core_tasks(&mut tasks, processor, playback);

        // Render loop
        tasks.spawn(render_loop(
            self.output_receiver(),
            self.state.config.clone(),
            self.cancel_token.child_token(),
        ));

        // Stdin input
        tasks.spawn(input_io(
            self.input_sender(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
