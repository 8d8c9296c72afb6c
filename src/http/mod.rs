mod error;
mod models;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::{audio::track::Track, config::ApiSettings};

pub use error::ApiError;
pub use models::{Album, AlbumWithSongs, Artist, ArtistWithSongs, Playlist, PlaylistWithSongs};

/// Largest page the songs endpoint returns.
pub const MAX_SONGS_LIMIT: u32 = 100;
/// Largest page the trending endpoint returns.
pub const MAX_TRENDING_LIMIT: u32 = 50;
/// Largest page the artist, album and playlist listings return.
pub const MAX_COLLECTION_LIMIT: u32 = 100;

/// Client for the catalog's JSON endpoints.
#[derive(Clone)]
pub struct ApiService {
    client: Client,
    base: Url,
}

impl ApiService {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Self::with_client(client, &settings.base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, ApiError> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        Ok(Self { client, base })
    }

    /// The underlying client, shared with the audio output for downloads.
    pub fn client(&self) -> &Client {
        &self.client
    }

    #[instrument(skip(self))]
    pub async fn fetch_songs(
        &self,
        limit: u32,
        offset: u32,
        search: Option<&str>,
    ) -> Result<Vec<Track>, ApiError> {
        let url = list_url(&self.base, "songs", limit.min(MAX_SONGS_LIMIT), offset, search)?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_song(&self, id: i64) -> Result<Track, ApiError> {
        let mut url = endpoint(&self.base, &["api", "songs"])?;
        url.query_pairs_mut().append_pair("id", &id.to_string());
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_trending(&self, limit: u32) -> Result<Vec<Track>, ApiError> {
        let mut url = endpoint(&self.base, &["api", "songs", "trending"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.min(MAX_TRENDING_LIMIT).to_string());
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_artists(
        &self,
        limit: u32,
        offset: u32,
        search: Option<&str>,
    ) -> Result<Vec<Artist>, ApiError> {
        let url = list_url(&self.base, "artists", limit.min(MAX_COLLECTION_LIMIT), offset, search)?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_artist(&self, id: i64) -> Result<ArtistWithSongs, ApiError> {
        let url = endpoint(&self.base, &["api", "artists", &id.to_string()])?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_albums(
        &self,
        limit: u32,
        offset: u32,
        search: Option<&str>,
    ) -> Result<Vec<Album>, ApiError> {
        let url = list_url(&self.base, "albums", limit.min(MAX_COLLECTION_LIMIT), offset, search)?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_playlists(
        &self,
        limit: u32,
        offset: u32,
        search: Option<&str>,
    ) -> Result<Vec<Playlist>, ApiError> {
        let url = list_url(
            &self.base,
            "playlists",
            limit.min(MAX_COLLECTION_LIMIT),
            offset,
            search,
        )?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_album(&self, id: i64) -> Result<AlbumWithSongs, ApiError> {
        let url = endpoint(&self.base, &["api", "albums", &id.to_string()])?;
        self.get_json(url).await
    }

    #[instrument(skip(self))]
    pub async fn fetch_playlist(&self, id: i64) -> Result<PlaylistWithSongs, ApiError> {
        let url = endpoint(&self.base, &["api", "playlists", &id.to_string()])?;
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "api_request");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status.as_u16(), &body));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// `/api/{collection}?limit=..&offset=..[&search=..]`. Callers cap `limit`.
fn list_url(
    base: &Url,
    collection: &str,
    limit: u32,
    offset: u32,
    search: Option<&str>,
) -> Result<Url, ApiError> {
    let mut url = endpoint(base, &["api", collection])?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query.append_pair("search", term);
        }
    }
    Ok(url)
}
