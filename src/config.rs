use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fully resolved rendering options. The library never reads configuration
/// from the environment; callers pass these in (the CLI loads them from a
/// JSON/JSON5 file).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Base (ceiling) font size for label fitting.
    pub base_font_size: f32,
    /// Margin added on every side of the normalized viewport.
    pub margin: f32,
    /// Force the heuristic text-metrics provider even when a system font is
    /// available. Keeps output identical across machines.
    pub fast_text_metrics: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            base_font_size: 14.0,
            margin: 20.0,
            fast_text_metrics: false,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderOptions,
    pub theme: Theme,
}

/// Loads configuration from a JSON/JSON5 file, or defaults when no path is
/// given. Absent fields keep their default values.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = std::fs::read_to_string(path)?;
    let config = json5::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_constants() {
        let options = RenderOptions::default();
        assert_eq!(options.base_font_size, 14.0);
        assert_eq!(options.margin, 20.0);
        assert!(!options.fast_text_metrics);
    }

    #[test]
    fn partial_config_keeps_defaults_for_absent_fields() {
        let config: Config = json5::from_str(r#"{ render: { margin: 32 } }"#).unwrap();
        assert_eq!(config.render.margin, 32.0);
        assert_eq!(config.render.base_font_size, 14.0);
        assert!(!config.render.fast_text_metrics);
    }
}
