use serde::Deserialize;

use crate::audio::track::Track;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub followers_count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub artist_name: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

/// Artist detail: the artist plus every song and album credited to them.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistWithSongs {
    pub artist: Artist,
    pub songs: Vec<Track>,
    #[serde(default)]
    pub albums: Vec<Album>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumWithSongs {
    pub album: Album,
    pub songs: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistWithSongs {
    pub playlist: Playlist,
    pub songs: Vec<Track>,
}
