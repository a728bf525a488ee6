use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod dark;
pub mod light;
pub mod palette;

pub use palette::{dim_color, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub page: Style,
    pub border: Style,
    pub border_focus: Style,
    pub dimmed: Style,

    pub transcript_user: Style,
    pub transcript_assistant: Style,
    pub composer_text: Style,
    pub caret: Style,

    pub panel: Style,
    pub panel_border: Style,
    pub panel_row: Style,
    pub panel_row_selected: Style,
    pub panel_hint: Style,
    pub shadow: Style,

    pub header_logo: Style,
    pub header_item: Style,
    pub header_active: Style,
    pub header_warn: Style,
    pub header: Style,

    pub footer_segment_key: Style,
    pub footer_segment_val: Style,
    pub footer: Style,
    pub timestamp: Style,
    pub status_info: Style,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    Light,
    #[default]
    Dark,
}

impl PaletteType {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaletteType::Light => "Light",
            PaletteType::Dark => "Dark",
        }
    }
}

impl Theme {
    #[must_use]
    pub fn from_palette_type(t: PaletteType) -> Self {
        match t {
            PaletteType::Light => Self::from_palette(&light::LIGHT),
            PaletteType::Dark => Self::from_palette(&dark::DARK),
        }
    }

    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            page: Style::default().bg(p.page).fg(p.text),
            border: Style::default().fg(p.border),
            border_focus: Style::default().fg(p.accent),
            dimmed: Style::default().fg(p.subtext).add_modifier(Modifier::DIM),

            transcript_user: Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
            transcript_assistant: Style::default().fg(p.text),
            composer_text: Style::default().bg(p.page_alt).fg(p.text),
            caret: Style::default()
                .fg(p.accent)
                .add_modifier(Modifier::SLOW_BLINK),

            panel: Style::default().bg(p.panel).fg(p.panel_text),
            panel_border: Style::default().bg(p.panel).fg(p.panel_border),
            panel_row: Style::default().bg(p.panel).fg(p.panel_text),
            panel_row_selected: Style::default()
                .bg(p.row_selected)
                .fg(p.panel_text)
                .add_modifier(Modifier::BOLD),
            panel_hint: Style::default()
                .bg(p.row_selected)
                .fg(p.hint)
                .add_modifier(Modifier::ITALIC),
            shadow: Style::default().bg(p.shadow),

            header_logo: Style::default()
                .bg(p.accent)
                .fg(p.page)
                .add_modifier(Modifier::BOLD),
            header_item: Style::default().bg(p.page_alt).fg(p.text),
            header_active: Style::default()
                .bg(p.accent)
                .fg(p.page)
                .add_modifier(Modifier::BOLD),
            header_warn: Style::default()
                .bg(p.warn)
                .fg(p.page)
                .add_modifier(Modifier::BOLD),
            header: Style::default().bg(p.page).fg(p.text),

            footer_segment_key: Style::default()
                .bg(p.page_alt)
                .fg(p.accent)
                .add_modifier(Modifier::BOLD),
            footer_segment_val: Style::default().bg(p.page).fg(p.text),
            footer: Style::default().bg(dim_color(p.page_alt, 0.9)).fg(p.subtext),
            timestamp: Style::default().fg(p.subtext).add_modifier(Modifier::DIM),
            status_info: Style::default()
                .bg(p.accent)
                .fg(p.page)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette_type(PaletteType::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_selected_row_uses_overlay_colors() {
        let light = Theme::from_palette_type(PaletteType::Light);
        assert_eq!(light.panel.bg, Some(Color::Rgb(255, 255, 255)));
        assert_eq!(light.panel_row_selected.bg, Some(Color::Rgb(233, 242, 255)));

        let dark = Theme::from_palette_type(PaletteType::Dark);
        assert_eq!(dark.panel.bg, Some(Color::Rgb(44, 44, 44)));
        assert_eq!(dark.panel_hint.fg, Some(Color::Rgb(207, 207, 207)));
    }

    #[test]
    fn test_dim_color_scales_rgb_only() {
        assert_eq!(dim_color(Color::Rgb(100, 200, 50), 0.5), Color::Rgb(50, 100, 25));
        assert_eq!(dim_color(Color::Reset, 0.5), Color::Reset);
    }
}
