use crate::audio::{error::AudioError, traits::OutputNotice, track::Track};

/// Transport intent sent from presentation code to the session.
#[derive(Debug, Clone)]
pub enum AudioCommand {
    Load(Track),
    TogglePlay,
    SeekTo(f64),
    SetVolume(f32),
    ToggleMute,
    ToggleShuffle,
    ToggleRepeat,
    SkipNext,
    SkipPrevious,
    Shutdown,
}

/// Why a play request was issued; decides the state a rejection falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIntent {
    Start,
    Resume,
    Restart,
}

/// Everything the session task consumes, in arrival order.
#[derive(Debug, Clone)]
pub enum SessionMessage {
    Command(AudioCommand),
    Notice {
        generation: u64,
        notice: OutputNotice,
    },
    Settled {
        generation: u64,
        request: u64,
        intent: PlayIntent,
        result: Result<(), AudioError>,
    },
}

impl From<AudioCommand> for SessionMessage {
    fn from(cmd: AudioCommand) -> Self {
        SessionMessage::Command(cmd)
    }
}
