use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Values the assembler substitutes for unset document fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentDefaults {
    pub width: f32,
    pub height: f32,
    pub xmlns: String,
    pub font_size: f32,
    pub fill: String,
    pub font_family: String,
    pub text_anchor: String,
    pub dominant_baseline: String,
    /// Multi-line tspan step as a multiple of the font size.
    pub line_height: f32,
    /// Fallback for unsafe background values at the boundary.
    pub background_fallback: String,
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 200.0,
            xmlns: "http://www.w3.org/2000/svg".to_string(),
            font_size: 40.0,
            fill: "black".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            text_anchor: "middle".to_string(),
            dominant_baseline: "middle".to_string(),
            line_height: 1.2,
            background_fallback: "transparent".to_string(),
        }
    }
}

/// Clamps applied at the query boundary, never inside the assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Limits {
    pub font_size_min: f32,
    pub font_size_max: f32,
    pub max_dimension: f32,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            font_size_min: 8.0,
            font_size_max: 300.0,
            max_dimension: 4000.0,
        }
    }
}

/// Knobs for the auto-sized badge mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeConfig {
    pub min_width: f32,
    /// Padding on each side as a multiple of the font size.
    pub padding_factor: f32,
    /// Per-character advance estimate, as a multiple of the font size,
    /// used when no system font matches.
    pub fallback_char_factor: f32,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            min_width: 100.0,
            padding_factor: 0.6,
            fallback_char_factor: 0.6,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub defaults: DocumentDefaults,
    pub limits: Limits,
    pub badge: BadgeConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    font_size: Option<f32>,
    fill: Option<String>,
    font_family: Option<String>,
    text_anchor: Option<String>,
    dominant_baseline: Option<String>,
    line_height: Option<f32>,
    background_fallback: Option<String>,
    font_size_min: Option<f32>,
    font_size_max: Option<f32>,
    max_dimension: Option<f32>,
    badge_min_width: Option<f32>,
    badge_padding_factor: Option<f32>,
}

/// Loads a flat JSON file of per-field overrides. No path means the
/// built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(v) = parsed.width {
        config.defaults.width = v;
    }
    if let Some(v) = parsed.height {
        config.defaults.height = v;
    }
    if let Some(v) = parsed.font_size {
        config.defaults.font_size = v;
    }
    if let Some(v) = parsed.fill {
        config.defaults.fill = v;
    }
    if let Some(v) = parsed.font_family {
        config.defaults.font_family = v;
    }
    if let Some(v) = parsed.text_anchor {
        config.defaults.text_anchor = v;
    }
    if let Some(v) = parsed.dominant_baseline {
        config.defaults.dominant_baseline = v;
    }
    if let Some(v) = parsed.line_height {
        config.defaults.line_height = v;
    }
    if let Some(v) = parsed.background_fallback {
        config.defaults.background_fallback = v;
    }
    if let Some(v) = parsed.font_size_min {
        config.limits.font_size_min = v;
    }
    if let Some(v) = parsed.font_size_max {
        config.limits.font_size_max = v;
    }
    if let Some(v) = parsed.max_dimension {
        config.limits.max_dimension = v;
    }
    if let Some(v) = parsed.badge_min_width {
        config.badge.min_width = v;
    }
    if let Some(v) = parsed.badge_padding_factor {
        config.badge.padding_factor = v;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.defaults.width, 400.0);
        assert_eq!(config.defaults.height, 200.0);
        assert_eq!(config.defaults.font_size, 40.0);
        assert_eq!(config.defaults.fill, "black");
        assert_eq!(config.limits.font_size_max, 300.0);
    }

    #[test]
    fn overrides_merge_over_defaults() {
        let dir = std::env::temp_dir().join("svgplate-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r##"{"fill": "#336699", "fontSizeMax": 120}"##).unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.defaults.fill, "#336699");
        assert_eq!(config.limits.font_size_max, 120.0);
        // untouched fields keep their defaults
        assert_eq!(config.defaults.font_family, "Arial, sans-serif");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = std::env::temp_dir().join("svgplate-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Parse(_))
        ));
    }
}
