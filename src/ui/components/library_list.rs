use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::{
    audio::track::Track,
    http::{Album, Artist, Playlist},
    ui::{components::progress::format_time, library::Listing, util::get_active_track_icon},
    util::colors,
};

/// The list pane: songs with play markers and likes, or collection rows.
pub struct LibraryList<'a> {
    listing: &'a Listing,
    current_id: Option<i64>,
    is_playing: bool,
    liked: &'a HashSet<i64>,
}

impl<'a> LibraryList<'a> {
    pub fn new(
        listing: &'a Listing,
        current_id: Option<i64>,
        is_playing: bool,
        liked: &'a HashSet<i64>,
    ) -> Self {
        Self {
            listing,
            current_id,
            is_playing,
            liked,
        }
    }

    fn track_item(&self, track: &'a Track) -> ListItem<'a> {
        let is_current = Some(track.id) == self.current_id;
        let prefix = if is_current {
            format!("{} ", get_active_track_icon(self.is_playing))
        } else {
            "  ".to_string()
        };
        let heart = if self.liked.contains(&track.id) { " \u{f004}" } else { "" };

        let item = ListItem::new(Line::from(vec![
            Span::raw(prefix),
            Span::raw(track.title.as_str()),
            Span::raw(" - "),
            Span::raw(track.artist_name.as_str()),
            Span::raw(heart).fg(colors::ACCENT),
            Span::raw(format!("  {}", format_time(track.duration_seconds as f64)))
                .fg(colors::NEUTRAL),
        ]));

        if is_current {
            item.style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            item
        }
    }
}

fn artist_item(artist: &Artist) -> ListItem<'_> {
    ListItem::new(Line::from(vec![
        Span::raw("  "),
        Span::raw(artist.name.as_str()),
        Span::raw(format!("  {} followers", artist.followers_count)).fg(colors::NEUTRAL),
    ]))
}

fn album_item(album: &Album) -> ListItem<'_> {
    let year = album
        .release_year
        .map(|y| format!("  ({y})"))
        .unwrap_or_default();
    ListItem::new(Line::from(vec![
        Span::raw("  "),
        Span::raw(album.title.as_str()),
        Span::raw(" - "),
        Span::raw(album.artist_name.as_str()),
        Span::raw(year).fg(colors::NEUTRAL),
    ]))
}

fn playlist_item(playlist: &Playlist) -> ListItem<'_> {
    let mut spans = vec![Span::raw("  "), Span::raw(playlist.name.as_str())];
    if let Some(description) = playlist.description.as_deref().filter(|d| !d.is_empty()) {
        spans.push(Span::raw(format!("  {description}")).fg(colors::NEUTRAL));
    }
    ListItem::new(Line::from(spans))
}

impl StatefulWidget for LibraryList<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ListState) {
        if self.listing.is_empty() {
            Line::from(self.listing.empty_label().fg(colors::NEUTRAL)).render(area, buf);
            return;
        }

        let items: Vec<ListItem> = match self.listing {
            Listing::Tracks(tracks) => tracks.iter().map(|t| self.track_item(t)).collect(),
            Listing::Artists(artists) => artists.iter().map(artist_item).collect(),
            Listing::Albums(albums) => albums.iter().map(album_item).collect(),
            Listing::Playlists(playlists) => playlists.iter().map(playlist_item).collect(),
        };

        let list = List::new(items)
            .highlight_style(Style::default().bg(colors::NEUTRAL).add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        if state.selected().is_none() {
            state.select(Some(0));
        }

        StatefulWidget::render(list, area, buf, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(listing: &Listing) -> String {
        let area = Rect::new(0, 0, 60, 4);
        let mut buf = Buffer::empty(area);
        let liked = HashSet::new();
        let mut state = ListState::default();
        LibraryList::new(listing, None, false, &liked).render(area, &mut buf, &mut state);

        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn album_rows_show_artist_and_year() {
        let listing = Listing::Albums(vec![Album {
            id: 1,
            title: "Discovery".to_string(),
            artist_name: "Daft Punk".to_string(),
            release_year: Some(2001),
            cover_image_url: None,
        }]);

        let text = rendered(&listing);
        assert!(text.contains("Discovery - Daft Punk  (2001)"));
    }

    #[test]
    fn empty_listing_shows_its_placeholder() {
        let text = rendered(&Listing::Artists(Vec::new()));
        assert!(text.starts_with("No artists"));
    }
}
