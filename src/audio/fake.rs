//! In-memory output used by the session and system tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::audio::{
    error::AudioError,
    traits::{OutputListener, OutputNotice, OutputResource, SubscriptionId},
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    SetSource(String),
    Load,
    Play,
    Pause,
    Seek(f64),
    SetVolume(f32),
    Shutdown,
}

enum Outcome {
    Fail(AudioError),
    Hold(oneshot::Receiver<Result<(), AudioError>>),
}

#[derive(Default)]
struct FakeState {
    source: String,
    volume: f32,
    calls: Vec<Call>,
    listeners: HashMap<SubscriptionId, OutputListener>,
    retired: Vec<OutputListener>,
    next_id: u64,
    outcomes: VecDeque<Outcome>,
}

#[derive(Default)]
pub(crate) struct FakeOutput {
    state: Mutex<FakeState>,
}

impl FakeOutput {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The next `play` waits until the returned sender resolves it.
    pub(crate) fn hold_next_play(&self) -> oneshot::Sender<Result<(), AudioError>> {
        let (tx, rx) = oneshot::channel();
        self.state.lock().unwrap().outcomes.push_back(Outcome::Hold(rx));
        tx
    }

    pub(crate) fn fail_next_play(&self, err: AudioError) {
        self.state
            .lock()
            .unwrap()
            .outcomes
            .push_back(Outcome::Fail(err));
    }

    /// Deliver a notice to every live listener.
    pub(crate) fn emit(&self, notice: OutputNotice) {
        let listeners: Vec<_> = self.state.lock().unwrap().listeners.values().cloned().collect();
        for l in listeners {
            l.notify(notice);
        }
    }

    /// Deliver a notice through listeners that were already unsubscribed,
    /// like a late event from a replaced track.
    pub(crate) fn emit_retired(&self, notice: OutputNotice) {
        let retired = self.state.lock().unwrap().retired.clone();
        for l in retired {
            l.notify(notice);
        }
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn play_count(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::Play).count()
    }

    pub(crate) fn volume(&self) -> f32 {
        self.state.lock().unwrap().volume
    }

    pub(crate) fn source(&self) -> String {
        self.state.lock().unwrap().source.clone()
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.state.lock().unwrap().listeners.len()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl OutputResource for FakeOutput {
    fn set_source(&self, source: &str) {
        let mut state = self.state.lock().unwrap();
        state.source = source.to_string();
        state.calls.push(Call::SetSource(source.to_string()));
    }

    fn load(&self) {
        self.record(Call::Load);
    }

    async fn play(&self) -> Result<(), AudioError> {
        let (source, outcome) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::Play);
            (state.source.clone(), state.outcomes.pop_front())
        };

        if source.is_empty() {
            return Err(AudioError::MissingSource);
        }

        match outcome {
            None => Ok(()),
            Some(Outcome::Fail(err)) => Err(err),
            Some(Outcome::Hold(rx)) => rx.await.unwrap_or(Err(AudioError::Superseded)),
        }
    }

    fn pause(&self) {
        self.record(Call::Pause);
    }

    fn seek(&self, position_secs: f64) {
        self.record(Call::Seek(position_secs));
    }

    fn set_volume(&self, volume: f32) {
        let mut state = self.state.lock().unwrap();
        state.volume = volume;
        state.calls.push(Call::SetVolume(volume));
    }

    fn subscribe(&self, listener: OutputListener) -> SubscriptionId {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = SubscriptionId(state.next_id);
        state.listeners.insert(id, listener);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let mut state = self.state.lock().unwrap();
        if let Some(l) = state.listeners.remove(&id) {
            state.retired.push(l);
        }
    }

    fn shutdown(&self) {
        self.record(Call::Shutdown);
    }
}
