use crate::domain::dom::Rect as DomRect;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

pub fn draw_drop_shadow(buf: &mut Buffer, area: Rect, terminal_area: Rect, style: Style) {
    let shadow_area = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width,
        height: area.height,
    };

    let shadow_area = shadow_area.intersection(terminal_area);

    for y in shadow_area.top()..shadow_area.bottom() {
        for x in shadow_area.left()..shadow_area.right() {
            let cell = &mut buf[(x, y)];
            cell.set_style(style);
            cell.set_symbol(" ");
        }
    }
}

/// Snaps a document box onto whole terminal cells inside `bounds`.
pub fn cell_rect(rect: DomRect, bounds: Rect) -> Rect {
    let clamp = |v: f64| v.round().clamp(0.0, f64::from(u16::MAX)) as u16;
    Rect {
        x: clamp(rect.x),
        y: clamp(rect.y),
        width: clamp(rect.width),
        height: clamp(rect.height),
    }
    .intersection(bounds)
}

/// One display line, cut to `width` columns with a trailing ellipsis.
pub fn ellipsize(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect();
    if flat.chars().count() <= width {
        return flat;
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = flat.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
