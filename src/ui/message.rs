#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Quit,

    // Transport
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    SeekForward,
    SeekBackward,
    SeekToFraction(f64),
    VolumeUp,
    VolumeDown,
    SetVolumeFraction(f64),
    ToggleMute,
    ToggleShuffle,
    ToggleRepeat,
    ToggleLike,

    // Track list
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,
    OpenSelected,

    // Browsing
    NextShelf,
    PreviousShelf,
    Back,
}
