use ratatui::crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tracing::{error, info};

use crate::{
    event::events::Event,
    ui::{
        app::App,
        components::player::{PlayerLayout, fraction_at},
        input::InputHandler,
        message::AppMessage,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await
            && Self::handle_event(app, evt, tui)?
        {
            should_render = true;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt);
            should_render = true;
        }

        Ok(should_render)
    }

    pub fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => app.request_catalog(),
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key),
            TerminalEvent::Mouse(mouse) => Self::handle_mouse_event(app, mouse),
            TerminalEvent::Tick => return Ok(app.has_focus),
            TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    pub fn handle_action(app: &mut App, evt: Event) {
        match evt {
            Event::ListingFetched { title, listing } => {
                info!(title = %title, count = listing.len(), "listing_fetched");
                app.set_listing(title, listing);
            }
            Event::TrackFetched(track) => {
                info!(id = track.id, title = %track.title, "startup_track_fetched");
                app.player.load(track);
            }
            Event::FetchError(e) => {
                error!(error = %e, "catalog_fetch_failed");
                app.status = Some(e);
            }
        }
    }

    fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if let Some(msg) = InputHandler::handle_key(evt) {
            app.update(msg);
        }
    }

    fn handle_mouse_event(app: &mut App, evt: MouseEvent) {
        let msg = match evt.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Self::gauge_click(app.player_area, evt.column, evt.row)
            }
            MouseEventKind::ScrollUp => Some(AppMessage::VolumeUp),
            MouseEventKind::ScrollDown => Some(AppMessage::VolumeDown),
            _ => None,
        };

        if let Some(msg) = msg {
            app.update(msg);
        }
    }

    fn gauge_click(player_area: ratatui::layout::Rect, column: u16, row: u16) -> Option<AppMessage> {
        let layout = PlayerLayout::split(player_area);
        if let Some(fraction) = fraction_at(layout.progress, column, row) {
            return Some(AppMessage::SeekToFraction(fraction));
        }
        fraction_at(layout.volume, column, row).map(AppMessage::SetVolumeFraction)
    }
}
