use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    symbols::{self, border},
    text::Line,
    widgets::{Block, Borders, Tabs},
};

use crate::{
    ui::{
        app::App,
        components::{
            library_list::LibraryList,
            player::{PLAYER_HEIGHT, PlayerWidget},
        },
        library::Shelf,
    },
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        f.buffer_mut()
            .set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(PLAYER_HEIGHT)])
            .split(area);

        let list_area = chunks[0];
        let player_area = chunks[1];
        self.app.player_area = player_area;

        let snapshot = self.app.player.snapshot();

        let mut list_block = Block::new()
            .borders(Borders::LEFT | Borders::TOP | Borders::RIGHT)
            .border_set(border::Set {
                bottom_left: symbols::line::ROUNDED.vertical_right,
                bottom_right: symbols::line::ROUNDED.vertical_left,
                ..symbols::border::ROUNDED
            })
            .title_top(Line::from(" playbar ").centered())
            .title_top(Line::from(format!(" {} ", self.app.title)).left_aligned())
            .title_alignment(Alignment::Center);
        if let Some(status) = &self.app.status {
            list_block = list_block.title_bottom(Line::from(status.as_str().fg(colors::ACCENT)));
        }

        let list_inner = list_block.inner(list_area);
        f.render_widget(list_block, list_area);

        let [tabs_area, rows_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(list_inner);

        let tabs = Tabs::new(Shelf::ALL.iter().map(|s| s.as_str()))
            .select(self.app.shelf.index())
            .style(Style::new().fg(colors::NEUTRAL))
            .highlight_style(Style::new().fg(colors::PRIMARY).add_modifier(Modifier::BOLD));
        f.render_widget(tabs, tabs_area);

        let current_id = snapshot.current_track.as_ref().map(|t| t.id);
        f.render_stateful_widget(
            LibraryList::new(
                &self.app.listing,
                current_id,
                snapshot.is_playing,
                &self.app.liked,
            ),
            rows_area,
            &mut self.app.list_state,
        );

        let liked = current_id.is_some_and(|id| self.app.liked.contains(&id));
        f.render_widget(PlayerWidget::new(&snapshot, liked), player_area);
    }
}
