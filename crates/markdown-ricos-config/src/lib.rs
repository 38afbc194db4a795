use markdown_ricos_engine::ConvertError;
use markdown_ricos_engine::style::{
    Alignment, Color, DividerWidth, ImageSize, LineStyle, Style, TextAlignment,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub style: StyleSection,
}

/// `[style]` overrides. Unset fields keep the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleSection {
    pub text_color: Option<String>,
    pub heading_color: Option<String>,
    pub text_alignment: Option<TextAlignment>,
    pub image_width: Option<u32>,
    pub image_height: Option<u32>,
    pub image_alignment: Option<Alignment>,
    pub divider_line_style: Option<LineStyle>,
    pub divider_width: Option<DividerWidth>,
    pub divider_alignment: Option<Alignment>,
    pub hosted_media_markers: Option<Vec<String>>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let config_path = Self::expand_path(config_path).unwrap_or_else(|| config_path.into());
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-ricos");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The default style with this file's overrides applied.
    pub fn style(&self) -> Result<Style, ConfigError> {
        let section = &self.style;
        let mut style = Style::default();

        if let Some(color) = &section.text_color {
            style.text_color = parse_color("text_color", color)?;
        }
        if let Some(color) = &section.heading_color {
            style.heading_color = parse_color("heading_color", color)?;
        }
        if let Some(alignment) = section.text_alignment {
            style.text_alignment = alignment;
        }
        style.image_size = ImageSize {
            width: section.image_width.unwrap_or(style.image_size.width),
            height: section.image_height.unwrap_or(style.image_size.height),
        };
        if let Some(alignment) = section.image_alignment {
            style.image_alignment = alignment;
        }
        if let Some(line_style) = section.divider_line_style {
            style.divider.line_style = line_style;
        }
        if let Some(width) = section.divider_width {
            style.divider.width = width;
        }
        if let Some(alignment) = section.divider_alignment {
            style.divider.alignment = alignment;
        }
        if let Some(markers) = &section.hosted_media_markers {
            style.hosted_media_markers = markers.clone();
        }

        style.validate().map_err(|err| match err {
            ConvertError::InvalidStyle { field, value } => ConfigError::InvalidValue {
                field: field.to_string(),
                value,
            },
            other => ConfigError::InvalidValue {
                field: "style".to_string(),
                value: other.to_string(),
            },
        })?;
        Ok(style)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    fn parse(content: &str) -> Config {
        toml::from_str(content).unwrap()
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/markdown-ricos/config.toml"));
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = parse("");
        assert_eq!(config.style().unwrap(), Style::default());
    }

    #[test]
    fn test_style_overrides() {
        let config = parse(
            r##"
[style]
text_color = "#333333"
heading_color = "#ff0000"
text_alignment = "CENTER"
image_width = 1024
image_alignment = "LEFT"
divider_line_style = "DASHED"
divider_width = "SMALL"
hosted_media_markers = ["cdn.example.com/media/"]
"##,
        );
        let style = config.style().unwrap();

        assert_eq!(style.text_color, Color::rgb(0x33, 0x33, 0x33));
        assert_eq!(style.heading_color, Color::rgb(0xFF, 0x00, 0x00));
        assert_eq!(style.text_alignment, TextAlignment::Center);
        assert_eq!(style.image_size.width, 1024);
        assert_eq!(style.image_size.height, ImageSize::FALLBACK.height);
        assert_eq!(style.image_alignment, Alignment::Left);
        assert_eq!(style.divider.line_style, LineStyle::Dashed);
        assert_eq!(style.divider.width, DividerWidth::Small);
        assert_eq!(style.divider.alignment, Alignment::Center);
        assert_eq!(style.hosted_media_markers, vec!["cdn.example.com/media/"]);
    }

    #[test]
    fn test_invalid_color() {
        let config = parse("[style]\ntext_color = \"black\"\n");
        let err = config.style().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, ref value }
                if field == "text_color" && value == "black"
        ));
    }

    #[test]
    fn test_zero_image_size_is_invalid() {
        let config = parse("[style]\nimage_height = 0\n");

        assert!(matches!(
            config.style().unwrap_err(),
            ConfigError::InvalidValue { ref field, .. } if field == "image_size"
        ));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[style]\nheading_color = \"#123456\"\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            config.style().unwrap().heading_color,
            Color::rgb(0x12, 0x34, 0x56)
        );
    }

    #[test]
    fn test_load_malformed_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[style]\nunknown_field = 1\n").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
    }

    #[test]
    fn test_load_path_with_env_var() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "").unwrap();
        unsafe {
            env::set_var("MARKDOWN_RICOS_TEST_DIR", temp_dir.path());
        }

        let loaded = Config::load_from_path("$MARKDOWN_RICOS_TEST_DIR/config.toml").unwrap();

        assert!(loaded.is_some());

        unsafe {
            env::remove_var("MARKDOWN_RICOS_TEST_DIR");
        }
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }
}
