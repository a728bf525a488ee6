use ratatui::style::Color;

/// Colors for one scheme. Panel entries follow the overlay's stylesheet;
/// page entries dress the simulated host around it.
pub struct Palette {
    pub page: Color,
    pub page_alt: Color,
    pub text: Color,
    pub subtext: Color,
    pub border: Color,
    pub accent: Color,
    pub warn: Color,
    pub panel: Color,
    pub panel_border: Color,
    pub panel_text: Color,
    pub row_selected: Color,
    pub hint: Color,
    pub shadow: Color,
}

/// Scale an `Rgb` color's channels by `factor` (0.0 = black, 1.0 = unchanged).
pub fn dim_color(c: Color, factor: f32) -> Color {
    if let Color::Rgb(r, g, b) = c {
        Color::Rgb(
            (f32::from(r) * factor) as u8,
            (f32::from(g) * factor) as u8,
            (f32::from(b) * factor) as u8,
        )
    } else {
        c
    }
}
