use std::sync::Arc;

use flume::Sender;
use tracing::{debug, info, trace, warn};

use crate::audio::{
    commands::{AudioCommand, PlayIntent, SessionMessage},
    enums::RepeatMode,
    error::AudioError,
    state::PlaybackState,
    track::Track,
    traits::{OutputListener, OutputNotice, OutputResource, SubscriptionId},
};

/// Volume restored by unmute when the remembered level is zero.
pub const FALLBACK_UNMUTE_VOLUME: f32 = 0.5;

/// Observable view of the session, published after every message.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub current_track: Option<Track>,
    pub state: PlaybackState,
    pub is_playing: bool,
    pub position_seconds: f64,
    pub duration_seconds: f64,
    pub volume: f32,
    pub is_muted: bool,
    pub is_shuffled: bool,
    pub repeat_mode: RepeatMode,
}

impl PlaybackSnapshot {
    pub fn new(volume: f32) -> Self {
        Self {
            current_track: None,
            state: PlaybackState::Empty,
            is_playing: false,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            volume: clamp_volume(volume),
            is_muted: false,
            is_shuffled: false,
            repeat_mode: RepeatMode::Off,
        }
    }

    /// Volume the listener actually hears.
    pub fn effective_volume(&self) -> f32 {
        if self.is_muted { 0.0 } else { self.volume }
    }

    /// Played fraction in `[0, 1]`, 0 while the duration is unknown.
    pub fn progress_ratio(&self) -> f64 {
        if self.duration_seconds > 0.0 {
            (self.position_seconds / self.duration_seconds).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self::new(0.75)
    }
}

fn clamp_volume(level: f32) -> f32 {
    if level.is_nan() {
        0.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

/// Owns the "now playing" slot and the one output it drives.
///
/// Every load bumps `generation`. Notices and play results carry the
/// generation they were issued under and are dropped once it is no longer
/// current. `request` orders transport requests within one generation so a
/// pause issued after a pending play is not undone when that play settles.
/// `pending` holds the request id of the newest play still in flight; at most
/// one play is issued while it is set.
pub struct PlaybackSession<O: OutputResource> {
    output: Arc<O>,
    tx: Sender<SessionMessage>,
    generation: u64,
    request: u64,
    pending: Option<u64>,
    subscription: Option<SubscriptionId>,
    remembered_volume: f32,
    snapshot: PlaybackSnapshot,
}

impl<O: OutputResource> PlaybackSession<O> {
    pub fn new(output: Arc<O>, tx: Sender<SessionMessage>, volume: f32) -> Self {
        let snapshot = PlaybackSnapshot::new(volume);
        output.set_volume(snapshot.volume);

        Self {
            output,
            tx,
            generation: 0,
            request: 0,
            pending: None,
            subscription: None,
            remembered_volume: snapshot.volume,
            snapshot,
        }
    }

    pub fn snapshot(&self) -> &PlaybackSnapshot {
        &self.snapshot
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply one message. Returns `false` once the session has shut down.
    pub fn handle_message(&mut self, msg: SessionMessage) -> bool {
        match msg {
            SessionMessage::Command(cmd) => return self.handle_command(cmd),
            SessionMessage::Notice { generation, notice } => self.on_notice(generation, notice),
            SessionMessage::Settled {
                generation,
                request,
                intent,
                result,
            } => self.on_settled(generation, request, intent, result),
        }
        true
    }

    pub fn handle_command(&mut self, cmd: AudioCommand) -> bool {
        match cmd {
            AudioCommand::Load(track) => self.load(track),
            AudioCommand::TogglePlay => self.toggle_play(),
            AudioCommand::SeekTo(secs) => self.seek_to(secs),
            AudioCommand::SetVolume(level) => self.set_volume(level),
            AudioCommand::ToggleMute => self.toggle_mute(),
            AudioCommand::ToggleShuffle => self.toggle_shuffle(),
            AudioCommand::ToggleRepeat => self.toggle_repeat(),
            AudioCommand::SkipNext => self.skip_next(),
            AudioCommand::SkipPrevious => self.skip_previous(),
            AudioCommand::Shutdown => {
                self.shutdown();
                return false;
            }
        }
        true
    }

    pub fn load(&mut self, track: Track) {
        self.generation += 1;

        if let Some(id) = self.subscription.take() {
            self.output.unsubscribe(id);
        }
        let listener = OutputListener::new(self.generation, self.tx.clone());
        self.subscription = Some(self.output.subscribe(listener));

        info!(
            id = track.id,
            title = track.title.as_str(),
            generation = self.generation,
            "session_load"
        );

        self.output.set_source(track.audio_source());
        self.output.load();

        self.snapshot.current_track = Some(track);
        self.snapshot.state = PlaybackState::Loading;
        self.snapshot.is_playing = false;
        self.snapshot.position_seconds = 0.0;
        self.snapshot.duration_seconds = 0.0;

        self.request_play(PlayIntent::Start);
    }

    pub fn toggle_play(&mut self) {
        if self.snapshot.current_track.is_none() {
            debug!("toggle_play_without_track");
            return;
        }

        if self.snapshot.is_playing {
            self.cancel_requests();
            self.output.pause();
            self.snapshot.is_playing = false;
            self.snapshot.state = PlaybackState::Paused;
        } else if let Some(request) = self.pending {
            debug!(request, state = ?self.snapshot.state, "play_already_pending");
        } else {
            self.request_play(PlayIntent::Resume);
        }
    }

    pub fn seek_to(&mut self, secs: f64) {
        if self.snapshot.current_track.is_none() {
            debug!(secs, "seek_without_track");
            return;
        }

        let position = self.clamp_position(secs);
        self.output.seek(position);
        self.snapshot.position_seconds = position;
    }

    pub fn set_volume(&mut self, level: f32) {
        let volume = clamp_volume(level);
        self.output.set_volume(volume);
        self.snapshot.volume = volume;

        if volume > 0.0 && self.snapshot.is_muted {
            self.snapshot.is_muted = false;
        }
    }

    pub fn toggle_mute(&mut self) {
        if self.snapshot.is_muted {
            let restore = if self.remembered_volume > 0.0 {
                self.remembered_volume
            } else {
                FALLBACK_UNMUTE_VOLUME
            };
            self.output.set_volume(restore);
            self.snapshot.volume = restore;
            self.snapshot.is_muted = false;
        } else {
            self.remembered_volume = self.snapshot.volume;
            self.output.set_volume(0.0);
            self.snapshot.is_muted = true;
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.snapshot.is_shuffled = !self.snapshot.is_shuffled;
    }

    pub fn toggle_repeat(&mut self) {
        self.snapshot.repeat_mode = self.snapshot.repeat_mode.next();
    }

    // No queue exists, so both skips rewind the current track.
    pub fn skip_next(&mut self) {
        self.rewind();
    }

    pub fn skip_previous(&mut self) {
        self.rewind();
    }

    pub fn shutdown(&mut self) {
        info!(generation = self.generation, "session_shutdown");
        if let Some(id) = self.subscription.take() {
            self.output.unsubscribe(id);
        }
        self.cancel_requests();
        self.output.pause();
        self.output.shutdown();
        self.snapshot.is_playing = false;
    }

    fn rewind(&mut self) {
        if self.snapshot.current_track.is_none() {
            return;
        }
        self.output.seek(0.0);
        self.snapshot.position_seconds = 0.0;
    }

    fn clamp_position(&self, secs: f64) -> f64 {
        if !secs.is_finite() {
            return 0.0;
        }
        let position = secs.max(0.0);
        if self.snapshot.duration_seconds > 0.0 {
            position.min(self.snapshot.duration_seconds)
        } else {
            position
        }
    }

    /// Invalidate every transport request issued so far.
    fn cancel_requests(&mut self) {
        self.request += 1;
        self.pending = None;
    }

    fn request_play(&mut self, intent: PlayIntent) {
        self.request += 1;
        self.pending = Some(self.request);

        let output = self.output.clone();
        let tx = self.tx.clone();
        let generation = self.generation;
        let request = self.request;

        tokio::spawn(async move {
            let result = output.play().await;
            let _ = tx.send(SessionMessage::Settled {
                generation,
                request,
                intent,
                result,
            });
        });
    }

    fn on_settled(
        &mut self,
        generation: u64,
        request: u64,
        intent: PlayIntent,
        result: Result<(), AudioError>,
    ) {
        if generation != self.generation {
            trace!(generation, current = self.generation, "stale_play_result");
            return;
        }

        if request != self.request {
            trace!(request, current = self.request, "superseded_play_result");
            // A newer play owns the sink now; only a pause may override it.
            if result.is_ok() && self.pending.is_none() && !self.snapshot.is_playing {
                self.output.pause();
            }
            return;
        }

        self.pending = None;

        match result {
            Ok(()) => {
                self.snapshot.is_playing = true;
                self.snapshot.state = PlaybackState::Playing;
            }
            Err(e) => {
                let id = self.snapshot.current_track.as_ref().map(|t| t.id);
                warn!(?id, ?intent, error = %e, "playback_failed");
                self.snapshot.is_playing = false;
                self.snapshot.state = match intent {
                    PlayIntent::Restart => PlaybackState::Ended,
                    PlayIntent::Start | PlayIntent::Resume => PlaybackState::Paused,
                };
            }
        }
    }

    fn on_notice(&mut self, generation: u64, notice: OutputNotice) {
        if generation != self.generation {
            trace!(generation, current = self.generation, ?notice, "stale_notice");
            return;
        }

        match notice {
            OutputNotice::PositionAdvanced(secs) => {
                self.snapshot.position_seconds = self.clamp_position(secs);
            }
            OutputNotice::DurationKnown(secs) => {
                self.snapshot.duration_seconds = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
                self.snapshot.position_seconds = self.clamp_position(self.snapshot.position_seconds);
            }
            OutputNotice::Paused => {
                if self.snapshot.is_playing {
                    self.cancel_requests();
                    self.snapshot.is_playing = false;
                    self.snapshot.state = PlaybackState::Paused;
                }
            }
            OutputNotice::Ended => self.on_ended(),
        }
    }

    fn on_ended(&mut self) {
        self.snapshot.position_seconds = 0.0;

        if self.snapshot.repeat_mode == RepeatMode::One {
            debug!(generation = self.generation, "track_ended_repeat_one");
            self.output.seek(0.0);
            self.request_play(PlayIntent::Restart);
        } else {
            debug!(generation = self.generation, "track_ended");
            self.cancel_requests();
            self.snapshot.is_playing = false;
            self.snapshot.state = PlaybackState::Ended;
        }
    }
}
