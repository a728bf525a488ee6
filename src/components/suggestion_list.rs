use crate::components::helpers::{draw_drop_shadow, ellipsize};
use crate::engine::overlay::SuggestionOverlay;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

/// Terminal rendering of the engine's suggestion panel. The overlay decides
/// visibility, placement, highlight and scroll window; this only paints them.
pub struct SuggestionList<'a> {
    pub overlay: &'a SuggestionOverlay,
    pub theme: &'a Theme,
    pub terminal_area: Rect,
}

impl Widget for SuggestionList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.overlay.is_visible() || area.width < 3 || area.height < 3 {
            return;
        }
        let theme = self.theme;

        draw_drop_shadow(buf, area, self.terminal_area, theme.shadow);
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.panel_border)
            .style(theme.panel);
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let first = self.overlay.scroll_top();
        let window = self.overlay.visible_row_count();
        let rows = self.overlay.rows().iter().enumerate().skip(first).take(window);

        for (y, (index, snippet)) in (inner.y..inner.bottom()).zip(rows) {
            let selected = self.overlay.selected_index() == Some(index);
            let line = if selected {
                let hint = self.overlay.hint();
                let hint_width = hint.chars().count() + 1;
                if hint_width + 4 <= width {
                    let text = ellipsize(snippet, width - hint_width - 1);
                    let pad = width.saturating_sub(text.chars().count() + hint_width + 1);
                    Line::from(vec![
                        Span::styled(format!(" {text}"), theme.panel_row_selected),
                        Span::styled(" ".repeat(pad), theme.panel_row_selected),
                        Span::styled(format!("{hint} "), theme.panel_hint),
                    ])
                } else {
                    let w = width.saturating_sub(1);
                    Line::from(Span::styled(
                        format!(" {:<w$}", ellipsize(snippet, w)),
                        theme.panel_row_selected,
                    ))
                }
            } else {
                Line::from(Span::styled(
                    format!(" {}", ellipsize(snippet, width.saturating_sub(1))),
                    theme.panel_row,
                ))
            };
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}
