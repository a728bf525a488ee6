use super::palette::Palette;
use ratatui::style::Color;

pub const DARK: Palette = Palette {
    page: Color::Rgb(33, 33, 33),
    page_alt: Color::Rgb(47, 47, 47),
    text: Color::Rgb(236, 236, 236),
    subtext: Color::Rgb(155, 155, 155),
    border: Color::Rgb(70, 70, 70),
    accent: Color::Rgb(16, 163, 127),
    warn: Color::Rgb(234, 179, 8),
    panel: Color::Rgb(44, 44, 44),
    panel_border: Color::Rgb(90, 90, 90),
    panel_text: Color::Rgb(244, 244, 244),
    row_selected: Color::Rgb(54, 54, 54),
    hint: Color::Rgb(207, 207, 207),
    shadow: Color::Rgb(15, 15, 15),
};
