use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    symbols::{self, border},
    text::ToSpan,
    widgets::{Block, Borders, Widget},
};

use crate::{audio::session::PlaybackSnapshot, ui::components::gauge::CustomGauge, util::colors};

pub struct ProgressWidget<'a> {
    snapshot: &'a PlaybackSnapshot,
}

impl<'a> ProgressWidget<'a> {
    pub fn new(snapshot: &'a PlaybackSnapshot) -> Self {
        Self { snapshot }
    }

    fn track_info(&self) -> String {
        let Some(track) = &self.snapshot.current_track else {
            return "No track".to_string();
        };
        let mut info = format!("{} · {}", track.title, track.artist_name);
        if let Some(album) = &track.album_name {
            info = format!("{info} · {album}");
        }
        info
    }
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let duration_info = format!(
            "{} / {}",
            format_time(self.snapshot.position_seconds),
            format_time(self.snapshot.duration_seconds)
        );

        let gauge = CustomGauge::default()
            .block(
                Block::default()
                    .title_top(self.track_info())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_set(border::Set {
                        top_right: symbols::line::ROUNDED.horizontal_down,
                        bottom_right: symbols::line::ROUNDED.horizontal_up,
                        ..symbols::border::ROUNDED
                    }),
            )
            .ratio(self.snapshot.progress_ratio())
            .label(duration_info.to_span().fg(colors::TEXT))
            .filled_style(Style::default().fg(colors::PRIMARY).bg(colors::SECONDARY))
            .remaining_style(Style::default().fg(colors::BACKGROUND).bg(colors::BACKGROUND))
            .use_unicode(true);

        gauge.render(area, buf);
    }
}

/// `m:ss`, with `0:00` for zero, negative or non-finite input.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
