use crate::app::state::AppState;
use crate::theme::Theme;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

const KEYS: &[(&str, &str)] = &[
    ("↑↓", "select"),
    ("⏎", "insert"),
    ("⇥", "insert + line"),
    ("esc", "dismiss"),
    ("^R", "re-render"),
    ("^E", "shape"),
    ("^T", "theme"),
    ("^Q", "quit"),
];

pub struct Footer<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;

        let status_span = match &state.status_message {
            Some(msg) => Span::styled(format!("  {msg}  "), theme.status_info),
            None => Span::styled(
                format!("  {} chars  ", state.host.model().chars().count()),
                theme.footer_segment_val,
            ),
        };

        let mut spans = vec![status_span, Span::raw(" ")];
        let available_width = area.width.saturating_sub(2) as usize;
        let mut current_width: usize = spans.iter().map(Span::width).sum();

        for (key, label) in KEYS {
            let key = Span::styled(format!(" {key} "), theme.footer_segment_key);
            let label = Span::styled(format!(" {label} "), theme.footer);
            let width = key.width() + label.width();
            if current_width + width > available_width {
                break;
            }
            current_width += width;
            spans.push(key);
            spans.push(label);
        }

        Paragraph::new(Line::from(spans))
            .style(theme.footer)
            .render(area, buf);
    }
}
