use crate::app::host::HostShape;
use crate::engine::binder::DEFAULT_HOST_INPUT_ID;
use crate::engine::overlay::{PanelMetrics, DEFAULT_COMMIT_HINT};
use crate::engine::EngineConfig;
use crate::infrastructure::file_store::STORE_FILE;
use crate::theme::PaletteType;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE: &str = "config.toml";

/// Panel geometry in terminal cells: one row per snippet, a border above and
/// below, flush against the composer.
pub const TERMINAL_PANEL: PanelMetrics = PanelMetrics {
    min_width: 24.0,
    max_width: 72.0,
    width_ratio: 0.6,
    row_height: 1.0,
    chrome: 2.0,
    margin: 0.0,
    max_height: 10.0,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: PaletteType,
    pub shape: HostShape,
    pub store_path: Option<PathBuf>,
    pub host_input_id: String,
    pub commit_hint: String,
    pub panel: PanelOverrides,
}

/// Per-field tweaks layered over [`TERMINAL_PANEL`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOverrides {
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub width_ratio: Option<f64>,
    pub max_height: Option<f64>,
    pub margin: Option<f64>,
}

impl PanelOverrides {
    #[must_use]
    pub fn apply(&self, base: PanelMetrics) -> PanelMetrics {
        PanelMetrics {
            min_width: self.min_width.unwrap_or(base.min_width),
            max_width: self.max_width.unwrap_or(base.max_width),
            width_ratio: self.width_ratio.unwrap_or(base.width_ratio),
            max_height: self.max_height.unwrap_or(base.max_height),
            margin: self.margin.unwrap_or(base.margin),
            ..base
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            theme: PaletteType::default(),
            shape: HostShape::default(),
            store_path: None,
            host_input_id: DEFAULT_HOST_INPUT_ID.to_string(),
            commit_hint: DEFAULT_COMMIT_HINT.to_string(),
            panel: PanelOverrides::default(),
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("promptpal");
        path
    })
}

impl AppConfig {
    /// Reads `~/.config/promptpal/config.toml`, falling back to defaults
    /// when it is missing or unreadable.
    pub fn load() -> Self {
        if let Some(path) = config_dir().map(|dir| dir.join(CONFIG_FILE)) {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(content) => match Self::from_toml(&content) {
                        Ok(config) => return config,
                        Err(err) => {
                            tracing::warn!(path = %path.display(), %err, "invalid config, using defaults");
                        }
                    },
                    Err(err) => {
                        tracing::warn!(path = %path.display(), %err, "cannot read config");
                    }
                }
            }
        }
        Self::default()
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Explicit `store_path`, else `snippets.toml` next to the config.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_path
            .clone()
            .or_else(|| config_dir().map(|dir| dir.join(STORE_FILE)))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            host_input_id: self.host_input_id.clone(),
            panel: self.panel.apply(TERMINAL_PANEL),
            commit_hint: self.commit_hint.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.engine_config().panel, TERMINAL_PANEL);
    }

    #[test]
    fn test_partial_overrides() {
        let config = AppConfig::from_toml(
            "theme = \"light\"\nshape = \"plain\"\nstore_path = \"/tmp/s.toml\"\n\n[panel]\nmax_height = 6.0\n",
        )
        .unwrap();
        assert_eq!(config.theme, PaletteType::Light);
        assert_eq!(config.shape, HostShape::Plain);
        assert_eq!(config.store_path(), Some(PathBuf::from("/tmp/s.toml")));
        let panel = config.engine_config().panel;
        assert!((panel.max_height - 6.0).abs() < f64::EPSILON);
        assert!((panel.min_width - TERMINAL_PANEL.min_width).abs() < f64::EPSILON);
        assert!((panel.row_height - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.host_input_id, DEFAULT_HOST_INPUT_ID);
    }

    #[test]
    fn test_rejects_unknown_theme() {
        assert!(AppConfig::from_toml("theme = \"solarized\"").is_err());
    }

    #[test]
    fn test_engine_config_carries_overrides() {
        let config = AppConfig {
            host_input_id: "composer".into(),
            commit_hint: "⇥".into(),
            ..AppConfig::default()
        };
        let engine = config.engine_config();
        assert_eq!(engine.host_input_id, "composer");
        assert_eq!(engine.commit_hint, "⇥");
        assert_eq!(engine.panel, TERMINAL_PANEL);
    }
}
