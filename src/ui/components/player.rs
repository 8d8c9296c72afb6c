use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Margin, Position, Rect},
    widgets::Widget,
};

use crate::{
    audio::session::PlaybackSnapshot,
    ui::components::{
        controls::{PlayerControlsWidget, VolumeWidget},
        progress::ProgressWidget,
    },
};

pub const PLAYER_HEIGHT: u16 = 3;
const CONTROLS_WIDTH: u16 = 20;
const VOLUME_WIDTH: u16 = 14;

/// Where each part of the player bar lands. Shared by rendering and mouse
/// hit-testing so both agree on the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLayout {
    pub progress: Rect,
    pub controls: Rect,
    pub volume: Rect,
}

impl PlayerLayout {
    pub fn split(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(CONTROLS_WIDTH),
                Constraint::Length(VOLUME_WIDTH),
            ])
            .split(area);

        Self {
            progress: chunks[0],
            controls: chunks[1],
            volume: chunks[2],
        }
    }
}

/// Horizontal position of a click inside a bordered gauge, as a fraction of
/// its fill width. `None` when the click misses the fill area.
pub fn fraction_at(area: Rect, column: u16, row: u16) -> Option<f64> {
    let inner = area.inner(Margin::new(1, 1));
    if inner.is_empty() || !inner.contains(Position::new(column, row)) {
        return None;
    }
    let span = inner.width.saturating_sub(1).max(1) as f64;
    Some(((column - inner.x) as f64 / span).clamp(0.0, 1.0))
}

pub struct PlayerWidget<'a> {
    snapshot: &'a PlaybackSnapshot,
    liked: bool,
}

impl<'a> PlayerWidget<'a> {
    pub fn new(snapshot: &'a PlaybackSnapshot, liked: bool) -> Self {
        Self { snapshot, liked }
    }
}

impl Widget for PlayerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = PlayerLayout::split(area);
        let s = self.snapshot;

        ProgressWidget::new(s).render(layout.progress, buf);
        PlayerControlsWidget::new(s.repeat_mode, s.is_shuffled, s.is_playing, self.liked)
            .render(layout.controls, buf);
        VolumeWidget::new(s.effective_volume(), s.is_muted).render(layout.volume, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_keeps_fixed_widths_on_the_right() {
        let layout = PlayerLayout::split(Rect::new(0, 20, 100, PLAYER_HEIGHT));
        assert_eq!(layout.progress, Rect::new(0, 20, 66, 3));
        assert_eq!(layout.controls, Rect::new(66, 20, 20, 3));
        assert_eq!(layout.volume, Rect::new(86, 20, 14, 3));
    }

    #[test]
    fn fraction_spans_the_inner_width() {
        let gauge = Rect::new(10, 5, 12, 3);
        // Inner fill runs over columns 11..=20 on row 6.
        assert_eq!(fraction_at(gauge, 11, 6), Some(0.0));
        assert_eq!(fraction_at(gauge, 20, 6), Some(1.0));
        let mid = fraction_at(gauge, 15, 6).unwrap();
        assert!((mid - 4.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn clicks_on_the_border_miss() {
        let gauge = Rect::new(10, 5, 12, 3);
        assert_eq!(fraction_at(gauge, 10, 6), None);
        assert_eq!(fraction_at(gauge, 15, 5), None);
        assert_eq!(fraction_at(gauge, 21, 6), None);
        assert_eq!(fraction_at(Rect::new(0, 0, 2, 2), 0, 0), None);
    }
}
