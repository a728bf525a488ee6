use crate::app::state::AppState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

pub struct Transcript<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
}

impl Widget for Transcript<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let mut lines = Vec::new();
        for (role, text) in self.state.host.transcript() {
            let style = if role == "user" {
                theme.transcript_user
            } else {
                theme.transcript_assistant
            };
            lines.push(Line::from(Span::styled(role.to_uppercase(), style)));
            lines.push(Line::from(Span::styled(text, theme.transcript_assistant)));
            lines.push(Line::default());
        }

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::NONE).style(theme.page))
            .wrap(Wrap { trim: true })
            .scroll((self.state.host.scroll(), 0))
            .render(area, buf);
    }
}
