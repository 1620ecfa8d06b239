use foldris_engine::{CollapseFrame, GameState};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block as BlockWidget, Clear, Paragraph, Widget},
};

use crate::ui::widgets::{BoardDisplay, color, style};

/// Full-screen projection of one snapshot: playfield, next-piece preview,
/// score, status popup, and key help.
///
/// `frame` selects which clear-animation frame to show; outside a collapse
/// it has no effect.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    state: &'a GameState,
    frame: CollapseFrame,
}

impl<'a> GameDisplay<'a> {
    pub fn new(state: &'a GameState, frame: CollapseFrame) -> Self {
        Self { state, frame }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if !self.state.is_live() {
            Style::new().fg(color::RED)
        } else if self.state.is_paused() {
            Style::new().fg(color::YELLOW)
        } else {
            Style::new().fg(color::WHITE)
        };

        let primary = self.state.primary_board_at(self.frame);
        let preview = self.state.preview_board();

        let board_display = BoardDisplay::new(&primary).block(
            BlockWidget::bordered()
                .title(Line::from("FOLDRIS").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let preview_display = BoardDisplay::new(&preview).block(
            BlockWidget::bordered()
                .title(Line::from("NEXT").centered())
                .border_style(border_style)
                .style(style::DEFAULT),
        );
        let score_display = Paragraph::new(self.state.scores().to_string())
            .centered()
            .block(
                BlockWidget::bordered()
                    .title(Line::from("SCORE").centered())
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );

        let help_text = if !self.state.is_live() {
            "Controls: Q (Quit)"
        } else if self.state.is_paused() {
            "Controls: Enter (Resume) | Q (Quit)"
        } else {
            "Controls: ← → (Move) | ↑ (Rotate) | Space (Drop) | Enter (Pause) | Q (Quit)"
        };
        let help_text = Text::from(help_text)
            .style(Style::default().fg(color::GRAY))
            .centered();

        let board_width = board_display.width();
        let board_height = board_display.height();
        let preview_width = preview_display.width();
        let preview_height = preview_display.height();

        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let [board_column, side_column] = Layout::horizontal([
            Constraint::Length(board_width),
            Constraint::Length(preview_width),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);

        let [board_area] =
            Layout::vertical([Constraint::Length(board_height)]).areas(board_column);
        let [preview_area, score_area] = Layout::vertical([
            Constraint::Length(preview_height),
            Constraint::Length(3),
        ])
        .spacing(1)
        .areas(side_column);

        board_display.render(board_area, buf);
        preview_display.render(preview_area, buf);
        score_display.render(score_area, buf);
        help_text.render(help_area, buf);

        let popup = if !self.state.is_live() {
            Some(("GAME OVER!!", Style::new().fg(color::WHITE).bg(color::RED)))
        } else if self.state.is_paused() {
            Some(("PAUSED", Style::new().fg(color::BLACK).bg(color::YELLOW)))
        } else {
            None
        };

        if let Some((text, popup_style)) = popup {
            let block = BlockWidget::new().style(popup_style);
            let text = Text::styled(text, popup_style).centered();
            let popup_area =
                board_area.centered(Constraint::Length(board_width), Constraint::Length(3));
            let inner = block.inner(popup_area);
            Clear.render(popup_area, buf);
            block.render(popup_area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}
