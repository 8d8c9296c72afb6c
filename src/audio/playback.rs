use std::sync::Arc;
use std::thread;
use std::time::Duration;

use flume::Sender;
use rodio::{OutputStreamBuilder, Sink, Source};
use tracing::{debug, error};

use crate::audio::error::AudioError;

/// Thin wrapper over the rodio sink.
///
/// The device stream lives on its own thread for as long as the engine does;
/// only the sink is shared with async code.
pub struct PlaybackEngine {
    sink: Arc<Sink>,
    close_tx: Sender<()>,
}

impl PlaybackEngine {
    pub fn new() -> Result<Self, AudioError> {
        let (ready_tx, ready_rx) = flume::bounded::<Result<Arc<Sink>, AudioError>>(1);
        let (close_tx, close_rx) = flume::bounded::<()>(1);

        thread::Builder::new()
            .name("playbar-output".to_string())
            .spawn(move || {
                let mut stream = match OutputStreamBuilder::open_default_stream() {
                    Ok(stream) => stream,
                    Err(e) => {
                        error!(error = %e, "output_device_open_failed");
                        let _ = ready_tx.send(Err(AudioError::DeviceError(e.to_string())));
                        return;
                    }
                };
                // rodio prints to stderr when the stream drops, which corrupts the TUI.
                stream.log_on_drop(false);

                let sink = Arc::new(Sink::connect_new(stream.mixer()));
                let _ = ready_tx.send(Ok(sink));

                let _ = close_rx.recv();
                debug!("output_device_closed");
            })
            .map_err(|e| AudioError::DeviceError(e.to_string()))?;

        let sink = ready_rx
            .recv()
            .map_err(|_| AudioError::DeviceError("output thread exited".to_string()))??;

        Ok(Self { sink, close_tx })
    }

    pub fn play_source<S>(&self, source: S)
    where
        S: Source + Send + 'static,
    {
        self.sink.append(source);
    }

    pub fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume);
    }

    pub fn pause(&self) {
        self.sink.pause();
    }

    pub fn play(&self) {
        self.sink.play();
    }

    /// Drop queued audio and leave the sink paused.
    pub fn clear(&self) {
        self.sink.clear();
    }

    pub fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }

    pub fn is_empty(&self) -> bool {
        self.sink.empty()
    }

    pub fn get_pos(&self) -> Duration {
        self.sink.get_pos()
    }

    pub fn try_seek(&self, pos: Duration) -> Result<(), rodio::source::SeekError> {
        self.sink.try_seek(pos)
    }

    /// Stop playback and release the device thread.
    pub fn close(&self) {
        self.sink.stop();
        let _ = self.close_tx.send(());
    }
}
