use serde::Deserialize;

/// A playable catalog entry, as served by the songs endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub artist_name: String,
    #[serde(default)]
    pub album_name: Option<String>,
    pub duration_seconds: u32,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub play_count: Option<u32>,
}

impl Track {
    /// The reference handed to the output; empty when the catalog has none.
    pub fn audio_source(&self) -> &str {
        self.audio_url.as_deref().unwrap_or("")
    }
}
