use crate::app::config::AppConfig;
use crate::app::host::HostPage;
use crate::domain::snippets::StoreSnapshot;
use crate::engine::Engine;
use crate::theme::{PaletteType, Theme};
use chrono::{DateTime, Local};
use ratatui::layout::Rect;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const ACTIVITY_LIMIT: usize = 50;
pub const STATUS_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub status_clear_time: Option<Instant>,
    pub activity: VecDeque<ActivityEntry>,

    // --- Page and the engine injected into it ---
    pub host: HostPage,
    pub engine: Engine,
    pub store_label: String,

    // --- Presentation ---
    pub palette_type: PaletteType,
    pub theme: Theme,
    pub area: Rect,
}

impl AppState {
    #[must_use]
    pub fn new(config: &AppConfig, snapshot: &StoreSnapshot) -> Self {
        let mut host = HostPage::new(config.shape, &config.host_input_id);
        let mut engine = Engine::new(config.engine_config(), snapshot);
        engine.start(&mut host.document);
        host.document.take_mutations();

        let store_label = config
            .store_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(no store)".to_string());

        let mut state = Self {
            should_quit: false,
            status_message: None,
            status_clear_time: None,
            activity: VecDeque::new(),
            host,
            engine,
            store_label,
            palette_type: config.theme,
            theme: Theme::from_palette_type(config.theme),
            area: Rect::default(),
        };
        state.log(format!(
            "{} snippets loaded, trigger {}",
            state.engine.cache().snippets().len(),
            state.engine.cache().trigger()
        ));
        state
    }

    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "activity");
        self.activity.push_front(ActivityEntry {
            timestamp: Local::now(),
            message,
        });
        self.activity.truncate(ACTIVITY_LIMIT);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_clear_time = Some(Instant::now() + STATUS_TTL);
    }

    pub fn expire_status(&mut self, now: Instant) {
        if self.status_clear_time.is_some_and(|t| now >= t) {
            self.status_message = None;
            self.status_clear_time = None;
        }
    }

    pub fn set_palette(&mut self, palette_type: PaletteType) {
        self.palette_type = palette_type;
        self.theme = Theme::from_palette_type(palette_type);
    }

    /// Recomputes the page layout for a terminal of `area` and mirrors it
    /// into the host document.
    pub fn relayout(&mut self, area: Rect) {
        self.area = area;
        let layout = crate::app::ui::get_layout(area);
        self.host.layout(area, layout.transcript, layout.composer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    fn snapshot() -> StoreSnapshot {
        StoreSnapshot {
            snippets: Some(Value::Array(vec![Value::String("A".into())])),
            trigger_symbol: None,
        }
    }

    #[test]
    fn test_new_binds_the_composer() {
        let state = AppState::new(&AppConfig::default(), &snapshot());
        assert_eq!(state.engine.active_element(), Some(state.host.input()));
        assert_eq!(state.activity.len(), 1);
        assert!(state.activity[0].message.contains("1 snippets"));
    }

    #[test]
    fn test_activity_is_capped_newest_first() {
        let mut state = AppState::new(&AppConfig::default(), &snapshot());
        for i in 0..(ACTIVITY_LIMIT + 10) {
            state.log(format!("event {i}"));
        }
        assert_eq!(state.activity.len(), ACTIVITY_LIMIT);
        assert_eq!(
            state.activity[0].message,
            format!("event {}", ACTIVITY_LIMIT + 9)
        );
    }

    #[test]
    fn test_status_expires() {
        let mut state = AppState::new(&AppConfig::default(), &snapshot());
        state.set_status("hello");
        state.expire_status(Instant::now());
        assert!(state.status_message.is_some());
        state.expire_status(Instant::now() + STATUS_TTL + Duration::from_millis(1));
        assert!(state.status_message.is_none());
    }
}
