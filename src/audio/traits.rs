use async_trait::async_trait;
use flume::Sender;

use crate::audio::{commands::SessionMessage, error::AudioError};

/// Handle returned by [`OutputResource::subscribe`], used to detach a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Asynchronous status reports from the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputNotice {
    PositionAdvanced(f64),
    DurationKnown(f64),
    /// Playback stopped without the session asking, e.g. an OS media key or
    /// a device that suspends itself. Optional: outputs whose device never
    /// pauses on its own (such as [`RodioOutput`](crate::audio::output::RodioOutput))
    /// do not send it.
    Paused,
    Ended,
}

/// Forwards output notices to the session, stamped with the generation of the
/// load that registered it.
#[derive(Debug, Clone)]
pub struct OutputListener {
    generation: u64,
    tx: Sender<SessionMessage>,
}

impl OutputListener {
    pub fn new(generation: u64, tx: Sender<SessionMessage>) -> Self {
        Self { generation, tx }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn notify(&self, notice: OutputNotice) {
        let _ = self.tx.send(SessionMessage::Notice {
            generation: self.generation,
            notice,
        });
    }
}

/// The single audio device the session drives.
///
/// Only `play` can fail, and it does so asynchronously: a missing reference,
/// a network or decode failure, or a device refusing to start all surface as
/// an `Err` from the returned future.
#[async_trait]
pub trait OutputResource: Send + Sync + 'static {
    fn set_source(&self, source: &str);
    fn load(&self);
    async fn play(&self) -> Result<(), AudioError>;
    fn pause(&self);
    fn seek(&self, position_secs: f64);
    fn set_volume(&self, volume: f32);
    fn subscribe(&self, listener: OutputListener) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);

    /// Release the device. Called once when the session is torn down.
    fn shutdown(&self) {}
}
