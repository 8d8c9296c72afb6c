use crate::{
    audio::track::Track,
    http::{Album, ApiError, ApiService, Artist, MAX_TRENDING_LIMIT, Playlist},
};

/// Top-level catalog views, cycled with Tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Shelf {
    #[default]
    Songs,
    Trending,
    Artists,
    Albums,
    Playlists,
}

impl Shelf {
    pub const ALL: [Shelf; 5] = [
        Shelf::Songs,
        Shelf::Trending,
        Shelf::Artists,
        Shelf::Albums,
        Shelf::Playlists,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shelf::Songs => "Songs",
            Shelf::Trending => "Trending",
            Shelf::Artists => "Artists",
            Shelf::Albums => "Albums",
            Shelf::Playlists => "Playlists",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Shelf::Songs => Shelf::Trending,
            Shelf::Trending => Shelf::Artists,
            Shelf::Artists => Shelf::Albums,
            Shelf::Albums => Shelf::Playlists,
            Shelf::Playlists => Shelf::Songs,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Shelf::Songs => Shelf::Playlists,
            Shelf::Trending => Shelf::Songs,
            Shelf::Artists => Shelf::Trending,
            Shelf::Albums => Shelf::Artists,
            Shelf::Playlists => Shelf::Albums,
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    pub async fn fetch(self, api: &ApiService, limit: u32) -> Result<Listing, ApiError> {
        Ok(match self {
            Shelf::Songs => Listing::Tracks(api.fetch_songs(limit, 0, None).await?),
            Shelf::Trending => {
                Listing::Tracks(api.fetch_trending(limit.min(MAX_TRENDING_LIMIT)).await?)
            }
            Shelf::Artists => Listing::Artists(api.fetch_artists(limit, 0, None).await?),
            Shelf::Albums => Listing::Albums(api.fetch_albums(limit, 0, None).await?),
            Shelf::Playlists => Listing::Playlists(api.fetch_playlists(limit, 0, None).await?),
        })
    }
}

/// Rows currently shown in the list pane.
#[derive(Debug, Clone)]
pub enum Listing {
    Tracks(Vec<Track>),
    Artists(Vec<Artist>),
    Albums(Vec<Album>),
    Playlists(Vec<Playlist>),
}

impl Default for Listing {
    fn default() -> Self {
        Listing::Tracks(Vec::new())
    }
}

impl Listing {
    pub fn len(&self) -> usize {
        match self {
            Listing::Tracks(items) => items.len(),
            Listing::Artists(items) => items.len(),
            Listing::Albums(items) => items.len(),
            Listing::Playlists(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Placeholder text for an empty listing.
    pub fn empty_label(&self) -> &'static str {
        match self {
            Listing::Tracks(_) => "No tracks",
            Listing::Artists(_) => "No artists",
            Listing::Albums(_) => "No albums",
            Listing::Playlists(_) => "No playlists",
        }
    }

    pub fn get(&self, index: usize) -> Option<Selection<'_>> {
        match self {
            Listing::Tracks(items) => items.get(index).map(Selection::Track),
            Listing::Artists(items) => items.get(index).map(|a| {
                Selection::Collection(Collection::Artist {
                    id: a.id,
                    name: a.name.clone(),
                })
            }),
            Listing::Albums(items) => items.get(index).map(|a| {
                Selection::Collection(Collection::Album {
                    id: a.id,
                    title: a.title.clone(),
                })
            }),
            Listing::Playlists(items) => items.get(index).map(|p| {
                Selection::Collection(Collection::Playlist {
                    id: p.id,
                    name: p.name.clone(),
                })
            }),
        }
    }
}

/// What Enter acts on: a song plays, a collection opens its songs.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<'a> {
    Track(&'a Track),
    Collection(Collection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    Artist { id: i64, name: String },
    Album { id: i64, title: String },
    Playlist { id: i64, name: String },
}

impl Collection {
    pub fn title(&self) -> String {
        match self {
            Collection::Artist { name, .. } => format!("Artist: {name}"),
            Collection::Album { title, .. } => format!("Album: {title}"),
            Collection::Playlist { name, .. } => format!("Playlist: {name}"),
        }
    }

    pub async fn fetch_songs(&self, api: &ApiService) -> Result<Vec<Track>, ApiError> {
        Ok(match self {
            Collection::Artist { id, .. } => api.fetch_artist(*id).await?.songs,
            Collection::Album { id, .. } => api.fetch_album(*id).await?.songs,
            Collection::Playlist { id, .. } => api.fetch_playlist(*id).await?.songs,
        })
    }
}
