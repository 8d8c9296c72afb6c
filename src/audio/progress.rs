use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const NO_SEEK: u64 = u64::MAX;

/// Position and length of whatever the output currently holds, plus a load
/// counter so in-flight fetches can tell they were superseded.
#[derive(Debug)]
pub struct TrackProgress {
    current_position_millis: AtomicU64,
    total_duration_millis: AtomicU64,
    generation: AtomicU64,
    deferred_seek_millis: AtomicU64,
}

impl Default for TrackProgress {
    fn default() -> Self {
        Self {
            current_position_millis: AtomicU64::new(0),
            total_duration_millis: AtomicU64::new(0),
            generation: AtomicU64::new(0),
            deferred_seek_millis: AtomicU64::new(NO_SEEK),
        }
    }
}

impl TrackProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_current_position(&self, position: Duration) {
        self.current_position_millis
            .store(position.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn set_total_duration(&self, duration: Duration) {
        self.total_duration_millis
            .store(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// `(position, duration)` in milliseconds.
    pub fn get_progress(&self) -> (u64, u64) {
        (
            self.current_position_millis.load(Ordering::Relaxed),
            self.total_duration_millis.load(Ordering::Relaxed),
        )
    }

    pub fn get_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Remember a seek that arrived while nothing was queued. The latest one
    /// wins and is applied once the track is appended.
    pub fn defer_seek(&self, position: Duration) {
        let millis = (position.as_millis() as u64).min(NO_SEEK - 1);
        self.deferred_seek_millis.store(millis, Ordering::Relaxed);
        self.set_current_position(position);
    }

    pub fn take_deferred_seek(&self) -> Option<Duration> {
        match self.deferred_seek_millis.swap(NO_SEEK, Ordering::Relaxed) {
            NO_SEEK => None,
            millis => Some(Duration::from_millis(millis)),
        }
    }

    /// Forget the current track and invalidate anything started for it.
    pub fn reset(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_current_position(Duration::ZERO);
        self.set_total_duration(Duration::ZERO);
        self.deferred_seek_millis.store(NO_SEEK, Ordering::Relaxed);
        generation
    }
}
