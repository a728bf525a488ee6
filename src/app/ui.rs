use crate::app::state::AppState;
use crate::components::{
    activity::Activity, composer::Composer, footer::Footer, header::Header, helpers::cell_rect,
    suggestion_list::SuggestionList, transcript::Transcript,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Block,
    Frame,
};

pub const COMPOSER_HEIGHT: u16 = 5;
pub const ACTIVITY_WIDTH: u16 = 36;
/// Below this width the activity column is dropped.
const ACTIVITY_MIN_TERMINAL_WIDTH: u16 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub transcript: Rect,
    pub composer: Rect,
    pub activity: Rect,
    pub footer: Rect,
}

pub fn get_layout(area: Rect) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area);

    let activity_width = if area.width >= ACTIVITY_MIN_TERMINAL_WIDTH {
        ACTIVITY_WIDTH
    } else {
        0
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(activity_width)])
        .split(main[1]);

    let page = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(COMPOSER_HEIGHT)])
        .split(columns[0]);

    AppLayout {
        header: main[0],
        transcript: page[0],
        composer: page[1],
        activity: columns[1],
        footer: main[2],
    }
}

pub fn draw(f: &mut Frame, app_state: &AppState) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let theme = &app_state.theme;
    let layout = get_layout(area);

    f.render_widget(Block::default().style(theme.page), area);
    f.render_widget(
        Header {
            state: app_state,
            theme,
        },
        layout.header,
    );
    f.render_widget(
        Transcript {
            state: app_state,
            theme,
        },
        layout.transcript,
    );
    f.render_widget(
        Composer {
            state: app_state,
            theme,
        },
        layout.composer,
    );
    if layout.activity.width > 0 {
        f.render_widget(
            Activity {
                state: app_state,
                theme,
            },
            layout.activity,
        );
    }
    f.render_widget(
        Footer {
            state: app_state,
            theme,
        },
        layout.footer,
    );

    // --- Suggestion panel, on top of everything ---
    if let Some(placement) = app_state.engine.overlay().placement() {
        let panel_area = cell_rect(placement.rect, area);
        f.render_widget(
            SuggestionList {
                overlay: app_state.engine.overlay(),
                theme,
                terminal_area: area,
            },
            panel_area,
        );
    }
}
