use crate::{audio::track::Track, ui::library::Listing};

/// Results of background catalog requests, delivered to the UI loop.
#[derive(Debug, Clone)]
pub enum Event {
    ListingFetched { title: String, listing: Listing },
    TrackFetched(Track),
    FetchError(String),
}
