use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{
    Arc, Mutex, RwLock,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, Source};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::audio::{
    error::AudioError,
    playback::PlaybackEngine,
    progress::TrackProgress,
    traits::{OutputListener, OutputNotice, OutputResource, SubscriptionId},
};

type Listeners = Arc<RwLock<HashMap<SubscriptionId, OutputListener>>>;

/// [`OutputResource`] backed by the default audio device.
///
/// Remote references are downloaded whole with `reqwest`, anything else is
/// read from disk. The decoded bytes stay cached so a drained track can be
/// played again from the start. Seeks that arrive while nothing is queued are
/// applied once the track is appended.
pub struct RodioOutput {
    engine: Arc<PlaybackEngine>,
    http: reqwest::Client,
    progress: Arc<TrackProgress>,
    source: RwLock<String>,
    cached: Mutex<Option<(String, Arc<[u8]>)>>,
    // Held across fetch, decode and append so concurrent plays queue one copy.
    append_lock: tokio::sync::Mutex<()>,
    listeners: Listeners,
    next_subscription: AtomicU64,
    playing: Arc<AtomicBool>,
    monitor: Mutex<Option<JoinHandle<()>>>,
}

impl RodioOutput {
    /// Open the device and start the position monitor on the current runtime.
    pub fn new(http: reqwest::Client, position_interval: Duration) -> Result<Self, AudioError> {
        let output = Self {
            engine: Arc::new(PlaybackEngine::new()?),
            http,
            progress: Arc::new(TrackProgress::new()),
            source: RwLock::new(String::new()),
            cached: Mutex::new(None),
            append_lock: tokio::sync::Mutex::new(()),
            listeners: Arc::new(RwLock::new(HashMap::new())),
            next_subscription: AtomicU64::new(0),
            playing: Arc::new(AtomicBool::new(false)),
            monitor: Mutex::new(None),
        };

        output.start_monitor(position_interval);
        Ok(output)
    }

    fn start_monitor(&self, interval: Duration) {
        let engine = self.engine.clone();
        let progress = self.progress.clone();
        let listeners = self.listeners.clone();
        let playing = self.playing.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;

                if !playing.load(Ordering::Relaxed) {
                    continue;
                }

                let pos = engine.get_pos();
                progress.set_current_position(pos);
                notify_all(&listeners, OutputNotice::PositionAdvanced(pos.as_secs_f64()));

                if engine.is_empty() {
                    playing.store(false, Ordering::Relaxed);
                    debug!("output_drained");
                    notify_all(&listeners, OutputNotice::Ended);
                }
            }
        });

        if let Ok(mut guard) = self.monitor.lock() {
            *guard = Some(task);
        }
    }

    fn notify(&self, notice: OutputNotice) {
        notify_all(&self.listeners, notice);
    }

    fn cached_bytes(&self, source: &str) -> Option<Arc<[u8]>> {
        let guard = self.cached.lock().ok()?;
        match guard.as_ref() {
            Some((cached_source, bytes)) if cached_source == source => Some(bytes.clone()),
            _ => None,
        }
    }

    async fn fetch(&self, source: &str) -> Result<Arc<[u8]>, AudioError> {
        if let Some(bytes) = self.cached_bytes(source) {
            debug!(source, "output_cache_hit");
            return Ok(bytes);
        }

        let start = std::time::Instant::now();
        let bytes: Vec<u8> = if source.starts_with("http://") || source.starts_with("https://") {
            let response = self
                .http
                .get(source)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| AudioError::StreamError(e.to_string()))?;
            response
                .bytes()
                .await
                .map_err(|e| AudioError::StreamError(e.to_string()))?
                .to_vec()
        } else {
            let path = source.strip_prefix("file://").unwrap_or(source);
            tokio::fs::read(path)
                .await
                .map_err(|e| AudioError::StreamError(format!("{path}: {e}")))?
        };

        info!(
            source,
            bytes = bytes.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "output_source_fetched"
        );

        let bytes: Arc<[u8]> = bytes.into();
        if let Ok(mut guard) = self.cached.lock() {
            *guard = Some((source.to_string(), bytes.clone()));
        }
        Ok(bytes)
    }
}

fn notify_all(listeners: &Listeners, notice: OutputNotice) {
    if let Ok(guard) = listeners.read() {
        for listener in guard.values() {
            listener.notify(notice);
        }
    }
}

#[async_trait]
impl OutputResource for RodioOutput {
    fn set_source(&self, source: &str) {
        if let Ok(mut guard) = self.source.write() {
            *guard = source.to_string();
        }
    }

    fn load(&self) {
        let generation = self.progress.reset();
        self.playing.store(false, Ordering::Relaxed);
        self.engine.clear();
        debug!(generation, "output_load");
    }

    async fn play(&self) -> Result<(), AudioError> {
        let source = self
            .source
            .read()
            .map(|s| s.clone())
            .unwrap_or_default();
        if source.trim().is_empty() {
            return Err(AudioError::MissingSource);
        }

        let generation = self.progress.get_generation();
        let _append = self.append_lock.lock().await;
        if self.progress.get_generation() != generation {
            return Err(AudioError::Superseded);
        }

        if self.engine.is_empty() {
            let bytes = self.fetch(&source).await?;
            let decoder = tokio::task::spawn_blocking(move || Decoder::new(Cursor::new(bytes)))
                .await
                .map_err(|e| AudioError::DecodingError(e.to_string()))?
                .map_err(|e| AudioError::DecodingError(e.to_string()))?;

            if self.progress.get_generation() != generation {
                return Err(AudioError::Superseded);
            }

            if let Some(total) = decoder.total_duration() {
                self.progress.set_total_duration(total);
                self.notify(OutputNotice::DurationKnown(total.as_secs_f64()));
            }

            self.engine.play_source(decoder);

            if let Some(pos) = self.progress.take_deferred_seek() {
                match self.engine.try_seek(pos) {
                    Ok(()) => debug!(secs = pos.as_secs_f64(), "output_deferred_seek"),
                    Err(e) => warn!(error = %e, "output_deferred_seek_failed"),
                }
            }
        }

        self.engine.play();
        if self.engine.is_paused() {
            return Err(AudioError::Rejected("sink stayed paused".to_string()));
        }
        self.playing.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn pause(&self) {
        self.engine.pause();
        self.playing.store(false, Ordering::Relaxed);
        let (position_ms, duration_ms) = self.progress.get_progress();
        debug!(position_ms, duration_ms, "output_paused");
    }

    fn seek(&self, position_secs: f64) {
        let pos = Duration::from_secs_f64(position_secs.max(0.0));
        if self.engine.is_empty() {
            self.progress.defer_seek(pos);
            return;
        }
        match self.engine.try_seek(pos) {
            Ok(()) => self.progress.set_current_position(pos),
            Err(e) => warn!(error = %e, secs = position_secs, "output_seek_failed"),
        }
    }

    fn set_volume(&self, volume: f32) {
        self.engine.set_volume(volume);
    }

    fn subscribe(&self, listener: OutputListener) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed) + 1);
        debug!(id = id.0, generation = listener.generation(), "output_subscribed");
        if let Ok(mut guard) = self.listeners.write() {
            guard.insert(id, listener);
        }
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut guard) = self.listeners.write() {
            guard.remove(&id);
        }
    }

    fn shutdown(&self) {
        self.playing.store(false, Ordering::Relaxed);
        if let Ok(mut guard) = self.monitor.lock()
            && let Some(task) = guard.take()
        {
            task.abort();
        }
        self.engine.close();
        info!("output_released");
    }
}
