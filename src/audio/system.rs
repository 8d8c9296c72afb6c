use std::sync::Arc;

use flume::{Receiver, Sender};
use tokio::{sync::watch, task::JoinHandle};
use tracing::{info, warn};

use crate::audio::{
    commands::{AudioCommand, SessionMessage},
    session::{PlaybackSession, PlaybackSnapshot},
    track::Track,
    traits::OutputResource,
};

/// Runs a [`PlaybackSession`] on its own task. All state changes happen there;
/// callers talk to it through a [`PlayerHandle`].
pub struct AudioSystem<O: OutputResource> {
    session: PlaybackSession<O>,
    rx: Receiver<SessionMessage>,
    snapshot_tx: watch::Sender<PlaybackSnapshot>,
}

impl<O: OutputResource> AudioSystem<O> {
    pub fn new(output: Arc<O>, volume: f32) -> (Self, PlayerHandle) {
        let (tx, rx) = flume::unbounded();
        let session = PlaybackSession::new(output, tx.clone(), volume);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot().clone());

        let system = Self {
            session,
            rx,
            snapshot_tx,
        };
        let handle = PlayerHandle {
            tx,
            snapshot: snapshot_rx,
        };

        (system, handle)
    }

    /// Build the system and start it on the current runtime.
    pub fn spawn(output: Arc<O>, volume: f32) -> (PlayerHandle, JoinHandle<()>) {
        let (system, handle) = Self::new(output, volume);
        let join = tokio::spawn(system.run());
        (handle, join)
    }

    pub async fn run(mut self) {
        info!("audio_system_started");

        while let Ok(msg) = self.rx.recv_async().await {
            let running = self.session.handle_message(msg);

            let snapshot = self.session.snapshot();
            self.snapshot_tx.send_if_modified(|current| {
                if *current != *snapshot {
                    *current = snapshot.clone();
                    true
                } else {
                    false
                }
            });

            if !running {
                break;
            }
        }

        info!("audio_system_stopped");
    }
}

/// Cloneable entry point handed to presentation code.
#[derive(Clone)]
pub struct PlayerHandle {
    tx: Sender<SessionMessage>,
    snapshot: watch::Receiver<PlaybackSnapshot>,
}

impl PlayerHandle {
    pub fn load(&self, track: Track) {
        self.send(AudioCommand::Load(track));
    }

    pub fn toggle_play(&self) {
        self.send(AudioCommand::TogglePlay);
    }

    pub fn seek_to(&self, secs: f64) {
        self.send(AudioCommand::SeekTo(secs));
    }

    pub fn set_volume(&self, level: f32) {
        self.send(AudioCommand::SetVolume(level));
    }

    pub fn toggle_mute(&self) {
        self.send(AudioCommand::ToggleMute);
    }

    pub fn toggle_shuffle(&self) {
        self.send(AudioCommand::ToggleShuffle);
    }

    pub fn toggle_repeat(&self) {
        self.send(AudioCommand::ToggleRepeat);
    }

    pub fn skip_next(&self) {
        self.send(AudioCommand::SkipNext);
    }

    pub fn skip_previous(&self) {
        self.send(AudioCommand::SkipPrevious);
    }

    pub fn shutdown(&self) {
        self.send(AudioCommand::Shutdown);
    }

    /// Latest published state.
    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.snapshot.borrow().clone()
    }

    /// A receiver that wakes on every state change.
    pub fn subscribe(&self) -> watch::Receiver<PlaybackSnapshot> {
        self.snapshot.clone()
    }

    fn send(&self, cmd: AudioCommand) {
        if let Err(e) = self.tx.send(cmd.into()) {
            warn!(message = ?e.into_inner(), "audio_system_closed");
        }
    }
}
