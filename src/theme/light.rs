use super::palette::Palette;
use ratatui::style::Color;

pub const LIGHT: Palette = Palette {
    page: Color::Rgb(247, 247, 248),
    page_alt: Color::Rgb(236, 236, 241),
    text: Color::Rgb(52, 53, 65),
    subtext: Color::Rgb(110, 110, 128),
    border: Color::Rgb(197, 197, 210),
    accent: Color::Rgb(16, 163, 127),
    warn: Color::Rgb(202, 138, 4),
    panel: Color::Rgb(255, 255, 255),
    panel_border: Color::Rgb(204, 204, 204),
    panel_text: Color::Rgb(51, 51, 51),
    row_selected: Color::Rgb(233, 242, 255),
    hint: Color::Rgb(111, 111, 111),
    shadow: Color::Rgb(200, 200, 205),
};
