use std::{collections::HashSet, sync::Arc, time::Duration};

use flume::{Receiver, Sender};
use ratatui::{Frame, layout::Rect, widgets::ListState};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    audio::{output::RodioOutput, system::{AudioSystem, PlayerHandle}},
    config::Settings,
    event::events::Event,
    http::ApiService,
    util::task::TaskManager,
};

use super::{
    layout::AppLayout,
    library::{Listing, Selection, Shelf},
    message::AppMessage,
    tui::Tui,
    util::handler::EventHandler,
};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(2);

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub api: ApiService,
    pub player: PlayerHandle,
    player_task: Option<JoinHandle<()>>,
    pub settings: Settings,
    pub shelf: Shelf,
    /// Heading of the list pane: the shelf name or the opened collection.
    pub title: String,
    pub listing: Listing,
    pub list_state: ListState,
    /// Liked songs. Kept in memory only.
    pub liked: HashSet<i64>,
    pub status: Option<String>,
    pub task_manager: TaskManager,
    /// Where the player bar was last drawn, for mouse hit-testing.
    pub player_area: Rect,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub async fn new(settings: Settings) -> color_eyre::Result<Self> {
        let api = ApiService::new(&settings.api)?;
        let output = RodioOutput::new(
            api.client().clone(),
            Duration::from_millis(settings.audio.position_interval_ms),
        )?;
        let (player, join) = AudioSystem::spawn(Arc::new(output), settings.audio.volume);

        Ok(Self::with_player(settings, api, player, Some(join)))
    }

    pub fn with_player(
        settings: Settings,
        api: ApiService,
        player: PlayerHandle,
        player_task: Option<JoinHandle<()>>,
    ) -> Self {
        let (event_tx, event_rx) = flume::unbounded();

        Self {
            event_rx,
            event_tx,
            api,
            player,
            player_task,
            settings,
            shelf: Shelf::default(),
            title: Shelf::default().as_str().to_string(),
            listing: Listing::default(),
            list_state: ListState::default(),
            liked: HashSet::new(),
            status: None,
            task_manager: TaskManager::new(),
            player_area: Rect::default(),
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new()?
            .tick_rate(Duration::from_millis(self.settings.ui.tick_rate_ms))
            .mouse(self.settings.ui.mouse);
        tui.enter()?;

        while !self.should_quit {
            tui.draw(|f| self.ui(f))?;
            EventHandler::handle_events(self, &mut tui).await?;
        }

        tui.exit()?;
        self.shutdown().await;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        if self.has_focus {
            let area = frame.area();
            AppLayout::new(self).render(frame, area);
        }
    }

    /// Fetch the current shelf and, when configured, the startup song.
    pub fn request_catalog(&mut self) {
        self.request_shelf();

        if let Some(id) = self.settings.ui.startup_song_id {
            let api = self.api.clone();
            let tx = self.event_tx.clone();
            self.task_manager.spawn("fetch_startup_song", async move {
                let evt = match api.fetch_song(id).await {
                    Ok(track) => Event::TrackFetched(track),
                    Err(e) => Event::FetchError(format!("song {id}: {e}")),
                };
                let _ = tx.send(evt);
            });
        }
    }

    /// Switch to `shelf` and fetch its rows. A browse request still in
    /// flight is dropped.
    pub fn open_shelf(&mut self, shelf: Shelf) {
        debug!(shelf = shelf.as_str(), "open_shelf");
        self.shelf = shelf;
        self.request_shelf();
    }

    fn request_shelf(&mut self) {
        let api = self.api.clone();
        let tx = self.event_tx.clone();
        let shelf = self.shelf;
        let limit = self.settings.ui.list_limit;

        self.title = shelf.as_str().to_string();
        self.list_state.select(None);
        self.task_manager.spawn("browse", async move {
            let evt = match shelf.fetch(&api, limit).await {
                Ok(listing) => Event::ListingFetched {
                    title: shelf.as_str().to_string(),
                    listing,
                },
                Err(e) => Event::FetchError(format!("{}: {e}", shelf.as_str())),
            };
            let _ = tx.send(evt);
        });
    }

    pub fn set_listing(&mut self, title: String, listing: Listing) {
        self.title = title;
        self.listing = listing;
        self.status = None;
        let selected = match self.list_state.selected() {
            _ if self.listing.is_empty() => None,
            Some(i) => Some(i.min(self.listing.len() - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }

    fn open_selected(&mut self) {
        let selected = self.list_state.selected().and_then(|i| self.listing.get(i));
        match selected {
            Some(Selection::Track(track)) => {
                debug!(id = track.id, "play_selected");
                self.player.load(track.clone());
            }
            Some(Selection::Collection(collection)) => {
                debug!(?collection, "open_collection");
                let api = self.api.clone();
                let tx = self.event_tx.clone();
                self.list_state.select(None);
                self.task_manager.spawn("browse", async move {
                    let evt = match collection.fetch_songs(&api).await {
                        Ok(songs) => Event::ListingFetched {
                            title: collection.title(),
                            listing: Listing::Tracks(songs),
                        },
                        Err(e) => Event::FetchError(format!("{}: {e}", collection.title())),
                    };
                    let _ = tx.send(evt);
                });
            }
            None => debug!("open_selected_without_selection"),
        }
    }

    pub fn update(&mut self, msg: AppMessage) {
        let snapshot = self.player.snapshot();
        let audio = &self.settings.audio;

        match msg {
            AppMessage::Quit => self.should_quit = true,
            AppMessage::TogglePlayPause => self.player.toggle_play(),
            AppMessage::NextTrack => self.player.skip_next(),
            AppMessage::PreviousTrack => self.player.skip_previous(),
            AppMessage::SeekForward => self
                .player
                .seek_to(snapshot.position_seconds + audio.seek_step_secs as f64),
            AppMessage::SeekBackward => self
                .player
                .seek_to(snapshot.position_seconds - audio.seek_step_secs as f64),
            AppMessage::SeekToFraction(fraction) => {
                if snapshot.duration_seconds > 0.0 {
                    self.player
                        .seek_to(fraction.clamp(0.0, 1.0) * snapshot.duration_seconds);
                }
            }
            AppMessage::VolumeUp => self
                .player
                .set_volume(snapshot.effective_volume() + audio.volume_step),
            AppMessage::VolumeDown => self
                .player
                .set_volume(snapshot.effective_volume() - audio.volume_step),
            AppMessage::SetVolumeFraction(fraction) => {
                self.player.set_volume(fraction.clamp(0.0, 1.0) as f32)
            }
            AppMessage::ToggleMute => self.player.toggle_mute(),
            AppMessage::ToggleShuffle => self.player.toggle_shuffle(),
            AppMessage::ToggleRepeat => self.player.toggle_repeat(),
            AppMessage::ToggleLike => {
                if let Some(track) = &snapshot.current_track
                    && !self.liked.remove(&track.id)
                {
                    self.liked.insert(track.id);
                }
            }
            AppMessage::SelectNext => self.list_state.select_next(),
            AppMessage::SelectPrevious => self.list_state.select_previous(),
            AppMessage::SelectFirst => self.list_state.select_first(),
            AppMessage::SelectLast => self.list_state.select_last(),
            AppMessage::OpenSelected => self.open_selected(),
            AppMessage::NextShelf => self.open_shelf(self.shelf.next()),
            AppMessage::PreviousShelf => self.open_shelf(self.shelf.prev()),
            AppMessage::Back => self.open_shelf(self.shelf),
        }
    }

    /// Stop background work and wait for the audio task to release the device.
    pub async fn shutdown(&mut self) {
        self.task_manager.abort_all();
        self.player.shutdown();

        if let Some(join) = self.player_task.take() {
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, join).await {
                Ok(Ok(())) => info!("player_stopped"),
                Ok(Err(e)) => warn!(error = %e, "player_task_failed"),
                Err(_) => warn!("player_shutdown_timed_out"),
            }
        }
    }
}

#[cfg(test)]
mod tests;
