/// Where the session sits in its transport lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing has ever been loaded.
    #[default]
    Empty,
    /// A track was loaded and its start request has not settled yet.
    Loading,
    Playing,
    Paused,
    /// The track ran to its end and was not restarted.
    Ended,
}
