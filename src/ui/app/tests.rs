use std::sync::Arc;

use super::*;
use crate::{
    audio::{
        fake::FakeOutput, session::PlaybackSnapshot, state::PlaybackState, track::Track,
        traits::OutputNotice,
    },
    http::Album,
    ui::util::handler::EventHandler,
};

fn track(id: i64) -> Track {
    Track {
        id,
        title: format!("Song {id}"),
        artist_name: "Artist".to_string(),
        album_name: None,
        duration_seconds: 200,
        cover_image_url: None,
        audio_url: Some(format!("https://cdn.example/{id}.mp3")),
        play_count: Some(0),
    }
}

fn app() -> (App, Arc<FakeOutput>) {
    let output = Arc::new(FakeOutput::new());
    let (player, join) = AudioSystem::spawn(output.clone(), 0.75);
    let api = ApiService::with_client(reqwest::Client::new(), "http://localhost:3000").unwrap();
    (
        App::with_player(Settings::default(), api, player, Some(join)),
        output,
    )
}

async fn wait_until(app: &App, pred: impl FnMut(&PlaybackSnapshot) -> bool) -> PlaybackSnapshot {
    let mut rx = app.player.subscribe();
    let snap = tokio::time::timeout(Duration::from_secs(2), rx.wait_for(pred))
        .await
        .expect("snapshot condition not reached")
        .expect("audio system stopped");
    snap.clone()
}

fn songs(tracks: Vec<Track>) -> Listing {
    Listing::Tracks(tracks)
}

#[tokio::test]
async fn open_selected_loads_the_highlighted_track() {
    let (mut app, output) = app();
    app.set_listing("Songs".to_string(), songs(vec![track(1), track(2), track(3)]));
    assert_eq!(app.list_state.selected(), Some(0));

    app.update(AppMessage::SelectNext);
    app.update(AppMessage::OpenSelected);

    let snap = wait_until(&app, |s| s.state == PlaybackState::Playing).await;
    assert_eq!(snap.current_track.map(|t| t.id), Some(2));
    assert_eq!(output.source(), "https://cdn.example/2.mp3");
}

#[tokio::test]
async fn seek_keys_move_by_the_configured_step() {
    let (mut app, output) = app();
    app.player.load(track(1));
    wait_until(&app, |s| s.is_playing).await;
    output.emit(OutputNotice::DurationKnown(200.0));
    output.emit(OutputNotice::PositionAdvanced(20.0));
    wait_until(&app, |s| s.position_seconds == 20.0).await;

    app.update(AppMessage::SeekForward);
    wait_until(&app, |s| s.position_seconds == 25.0).await;

    app.update(AppMessage::SeekBackward);
    app.update(AppMessage::SeekBackward);
    // Both presses read the same published position.
    wait_until(&app, |s| s.position_seconds == 20.0).await;
}

#[tokio::test]
async fn gauge_fractions_map_to_seek_and_volume() {
    let (mut app, output) = app();
    app.player.load(track(1));
    wait_until(&app, |s| s.is_playing).await;

    // Unknown duration: nothing to seek into.
    app.update(AppMessage::SeekToFraction(0.5));

    output.emit(OutputNotice::DurationKnown(200.0));
    wait_until(&app, |s| s.duration_seconds == 200.0).await;

    app.update(AppMessage::SeekToFraction(0.25));
    let snap = wait_until(&app, |s| s.position_seconds > 0.0).await;
    assert_eq!(snap.position_seconds, 50.0);

    app.update(AppMessage::SetVolumeFraction(1.4));
    let snap = wait_until(&app, |s| s.volume == 1.0).await;
    assert!(!snap.is_muted);
}

#[tokio::test]
async fn volume_up_while_muted_unmutes_from_silence() {
    let (mut app, _output) = app();
    app.update(AppMessage::ToggleMute);
    wait_until(&app, |s| s.is_muted).await;

    app.update(AppMessage::VolumeUp);
    let snap = wait_until(&app, |s| !s.is_muted).await;
    assert!((snap.volume - 0.05).abs() < 1e-6);
}

#[tokio::test]
async fn like_toggles_the_current_track_only() {
    let (mut app, _output) = app();

    app.update(AppMessage::ToggleLike);
    assert!(app.liked.is_empty());

    app.player.load(track(7));
    wait_until(&app, |s| s.current_track.is_some()).await;

    app.update(AppMessage::ToggleLike);
    assert!(app.liked.contains(&7));
    app.update(AppMessage::ToggleLike);
    assert!(app.liked.is_empty());
}

#[tokio::test]
async fn set_listing_keeps_selection_in_range() {
    let (mut app, _output) = app();
    app.set_listing("Songs".to_string(), songs(vec![track(1), track(2), track(3)]));
    app.list_state.select(Some(2));

    app.set_listing("Songs".to_string(), songs(vec![track(4)]));
    assert_eq!(app.list_state.selected(), Some(0));

    app.set_listing("Songs".to_string(), songs(Vec::new()));
    assert_eq!(app.list_state.selected(), None);

    // Nothing selected, nothing loaded.
    app.update(AppMessage::OpenSelected);
    assert!(app.player.snapshot().current_track.is_none());
}

#[tokio::test]
async fn shelf_keys_cycle_and_reset_the_selection() {
    let (mut app, _output) = app();
    app.set_listing("Songs".to_string(), songs(vec![track(1), track(2)]));
    app.list_state.select(Some(1));

    app.update(AppMessage::NextShelf);
    assert_eq!(app.shelf, Shelf::Trending);
    assert_eq!(app.title, "Trending");
    assert_eq!(app.list_state.selected(), None);

    app.update(AppMessage::PreviousShelf);
    app.update(AppMessage::PreviousShelf);
    assert_eq!(app.shelf, Shelf::Playlists);

    app.update(AppMessage::Back);
    assert_eq!(app.shelf, Shelf::Playlists);
    assert_eq!(app.title, "Playlists");
    app.task_manager.abort_all();
}

#[tokio::test]
async fn opening_a_collection_fetches_instead_of_playing() {
    let (mut app, _output) = app();
    app.set_listing(
        "Albums".to_string(),
        Listing::Albums(vec![Album {
            id: 3,
            title: "Europop".to_string(),
            artist_name: "Eiffel 65".to_string(),
            release_year: Some(1999),
            cover_image_url: None,
        }]),
    );

    app.update(AppMessage::OpenSelected);
    assert_eq!(app.list_state.selected(), None);
    assert!(app.player.snapshot().current_track.is_none());
    app.task_manager.abort_all();
}

#[tokio::test]
async fn fetched_listing_replaces_rows_and_clears_status() {
    let (mut app, output) = app();
    app.status = Some("Albums: connection refused".to_string());

    EventHandler::handle_action(
        &mut app,
        Event::ListingFetched {
            title: "Album: Europop".to_string(),
            listing: songs(vec![track(8), track(9)]),
        },
    );
    assert_eq!(app.title, "Album: Europop");
    assert_eq!(app.listing.len(), 2);
    assert!(app.status.is_none());

    app.update(AppMessage::SelectLast);
    app.update(AppMessage::OpenSelected);
    let snap = wait_until(&app, |s| s.state == PlaybackState::Playing).await;
    assert_eq!(snap.current_track.map(|t| t.id), Some(9));
    assert_eq!(output.source(), "https://cdn.example/9.mp3");

    EventHandler::handle_action(&mut app, Event::FetchError("Artists: timeout".to_string()));
    assert_eq!(app.status.as_deref(), Some("Artists: timeout"));
    assert_eq!(app.listing.len(), 2);
}

#[tokio::test]
async fn quit_then_shutdown_releases_the_output() {
    let (mut app, output) = app();
    app.player.load(track(1));
    wait_until(&app, |s| s.is_playing).await;

    app.update(AppMessage::Quit);
    assert!(app.should_quit);

    app.shutdown().await;
    assert_eq!(output.listener_count(), 0);
    assert!(output.calls().contains(&crate::audio::fake::Call::Shutdown));
}
