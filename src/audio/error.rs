use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("Track has no playable audio reference")]
    MissingSource,

    #[error("Audio output device error: {0}")]
    DeviceError(String),

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("Playback rejected: {0}")]
    Rejected(String),

    #[error("Playback request was superseded by a newer load")]
    Superseded,
}
