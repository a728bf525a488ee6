use crate::app::state::AppState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let theme = self.theme;
        let cache = state.engine.cache();

        let bound = state.engine.active_element() == Some(state.host.input());
        let binding = if bound {
            Span::styled(
                format!(" bound {} ", state.host.input()),
                theme.header_active,
            )
        } else {
            Span::styled(" unbound ", theme.header_warn)
        };

        let panel = if state.engine.overlay().is_visible() {
            Span::styled(" suggesting ", theme.header_active)
        } else {
            Span::styled(" idle ", theme.header_item)
        };

        let spans = vec![
            Span::styled(" PROMPTPAL ", theme.header_logo),
            Span::raw(" "),
            Span::styled(format!(" trigger {} ", cache.trigger()), theme.header_item),
            Span::raw(" "),
            Span::styled(
                format!(" {} snippets ", cache.snippets().len()),
                theme.header_item,
            ),
            Span::raw(" "),
            Span::styled(
                format!(" composer: {} ", state.host.shape().label()),
                theme.header_item,
            ),
            Span::raw(" "),
            binding,
            Span::raw(" "),
            panel,
        ];

        Paragraph::new(Line::from(spans))
            .style(theme.header)
            .render(area, buf);
    }
}
