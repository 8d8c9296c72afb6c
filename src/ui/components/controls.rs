use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    symbols::{self, border},
    text::{Line, Span, ToSpan},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{audio::enums::RepeatMode, ui::components::gauge::CustomGauge, util::colors};

const HEART: &str = "\u{f004}";
const HEART_OUTLINE: &str = "\u{f08a}";
const PREVIOUS: &str = "\u{f048}";
const NEXT: &str = "\u{f051}";
const PLAY: &str = "\u{f04b}";
const PAUSE: &str = "\u{f04c}";
const REPEAT_OFF: &str = "\u{f0457}";
const REPEAT_ONE: &str = "\u{f0458}";
const REPEAT_ALL: &str = "\u{f0456}";
const SHUFFLE_ON: &str = "\u{f049d}";
const SHUFFLE_OFF: &str = "\u{f049e}";
const VOLUME_ON: &str = "\u{f057e}";
const VOLUME_MUTED: &str = "\u{f075f}";

/// Like, shuffle, previous, play/pause, next and repeat indicators.
pub struct PlayerControlsWidget {
    repeat_mode: RepeatMode,
    is_shuffled: bool,
    is_playing: bool,
    liked: bool,
}

impl PlayerControlsWidget {
    pub fn new(repeat_mode: RepeatMode, is_shuffled: bool, is_playing: bool, liked: bool) -> Self {
        Self {
            repeat_mode,
            is_shuffled,
            is_playing,
            liked,
        }
    }

    fn line(&self) -> Line<'static> {
        let heart = if self.liked {
            HEART.fg(colors::ACCENT)
        } else {
            HEART_OUTLINE.fg(colors::NEUTRAL)
        };
        let shuffle = if self.is_shuffled {
            SHUFFLE_ON.fg(colors::PRIMARY)
        } else {
            SHUFFLE_OFF.fg(colors::NEUTRAL)
        };
        let play = if self.is_playing { PAUSE } else { PLAY };
        let repeat = match self.repeat_mode {
            RepeatMode::Off => REPEAT_OFF.fg(colors::NEUTRAL),
            RepeatMode::All => REPEAT_ALL.fg(colors::PRIMARY),
            RepeatMode::One => REPEAT_ONE.fg(colors::PRIMARY),
        };

        let spans: Vec<Span> = vec![
            heart,
            shuffle,
            PREVIOUS.fg(colors::TEXT),
            play.fg(colors::TEXT).bold(),
            NEXT.fg(colors::TEXT),
            repeat,
        ];

        let mut line = Line::default();
        for (i, span) in spans.into_iter().enumerate() {
            if i > 0 {
                line.push_span("  ");
            }
            line.push_span(span);
        }
        line
    }
}

impl Widget for PlayerControlsWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_set(border::Set {
                top_left: symbols::line::ROUNDED.horizontal_down,
                top_right: symbols::line::ROUNDED.horizontal_down,
                bottom_left: symbols::line::ROUNDED.horizontal_up,
                bottom_right: symbols::line::ROUNDED.horizontal_up,
                ..symbols::border::ROUNDED
            });

        Paragraph::new(self.line())
            .block(block)
            .centered()
            .render(area, buf);
    }
}

/// Effective volume as a gauge; a muted player shows an empty bar.
pub struct VolumeWidget {
    volume: f32,
    is_muted: bool,
}

impl VolumeWidget {
    pub fn new(volume: f32, is_muted: bool) -> Self {
        Self { volume, is_muted }
    }
}

impl Widget for VolumeWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let icon = if self.is_muted { VOLUME_MUTED } else { VOLUME_ON };
        let percent = (self.volume * 100.0).round() as u8;
        let label = format!("{icon} {percent}%");

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::Set {
                top_left: symbols::line::ROUNDED.horizontal_down,
                bottom_left: symbols::line::ROUNDED.horizontal_up,
                ..symbols::border::ROUNDED
            });

        CustomGauge::default()
            .block(block)
            .ratio(self.volume as f64)
            .label(label.to_span().fg(colors::TEXT))
            .filled_style(Style::new().fg(colors::PRIMARY).bg(colors::NEUTRAL))
            .remaining_style(Style::new().fg(colors::NEUTRAL).bg(colors::NEUTRAL))
            .render(area, buf);
    }
}
