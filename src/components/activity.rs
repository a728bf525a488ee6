use crate::app::state::AppState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Widget},
};

/// Most recent engine activity, newest on top.
pub struct Activity<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
}

impl Widget for Activity<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let items: Vec<ListItem> = self
            .state
            .activity
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        entry.timestamp.format("%H:%M:%S ").to_string(),
                        theme.timestamp,
                    ),
                    Span::raw(entry.message.as_str()),
                ]))
            })
            .collect();

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled("ACTIVITY", theme.header_item),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(Span::styled(
                format!(" {} ", self.state.store_label),
                theme.dimmed,
            )))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border)
            .style(theme.page);

        List::new(items).block(block).render(area, buf);
    }
}
