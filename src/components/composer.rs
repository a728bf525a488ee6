use crate::app::state::AppState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

const CARET: &str = "▏";

/// The host's input element as the page draws it.
pub struct Composer<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
}

impl Widget for Composer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let theme = self.theme;
        let bound = state.engine.active_element() == Some(state.host.input());

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    format!("MESSAGE · {}", state.host.shape().label()),
                    if bound {
                        theme.header_active
                    } else {
                        theme.header_item
                    },
                ),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(Span::styled(
                format!(" {} ", state.host.input()),
                theme.dimmed,
            )))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if bound {
                theme.border_focus
            } else {
                theme.border
            })
            .style(theme.composer_text);

        let inner_height = block.inner(area).height as usize;
        let lines = state.host.lines();
        let last = lines.len().saturating_sub(1);
        let skip = lines.len().saturating_sub(inner_height.max(1));

        let text: Vec<Line> = lines
            .into_iter()
            .enumerate()
            .skip(skip)
            .map(|(i, line)| {
                if i == last {
                    Line::from(vec![Span::raw(line), Span::styled(CARET, theme.caret)])
                } else {
                    Line::from(line)
                }
            })
            .collect();

        Paragraph::new(text).block(block).render(area, buf);
    }
}
