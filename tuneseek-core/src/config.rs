use crate::error::{CoreError, Result};
use crate::media::MediaType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Upper bound the search endpoint accepts for `limit`
pub const MAX_PAGE_SIZE: u32 = 200;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TuneseekConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote catalog endpoints and request shaping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_search_url")]
    pub search_url: String,
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,
    /// Results requested per search or load-more call
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Tracks requested for an artist details panel
    #[serde(default = "default_artist_track_limit")]
    pub artist_track_limit: u32,
    #[serde(default)]
    pub default_media_type: MediaType,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_search_url() -> String {
    "https://itunes.apple.com/search".into()
}

fn default_lookup_url() -> String {
    "https://itunes.apple.com/lookup".into()
}

const fn default_page_size() -> u32 {
    20
}

const fn default_artist_track_limit() -> u32 {
    10
}

const fn default_request_timeout_secs() -> u64 {
    10
}

const fn default_max_retries() -> u32 {
    3
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            lookup_url: default_lookup_url(),
            page_size: default_page_size(),
            artist_track_limit: default_artist_track_limit(),
            default_media_type: MediaType::default(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Distance below the viewport at which card artwork starts loading
    #[serde(default = "default_lazy_load_margin")]
    pub lazy_load_margin_px: f64,
    #[serde(default = "default_initial_skeletons")]
    pub initial_skeletons: usize,
    #[serde(default = "default_load_more_skeletons")]
    pub load_more_skeletons: usize,
}

const fn default_lazy_load_margin() -> f64 {
    100.0
}

const fn default_initial_skeletons() -> usize {
    8
}

const fn default_load_more_skeletons() -> usize {
    4
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            lazy_load_margin_px: default_lazy_load_margin(),
            initial_skeletons: default_initial_skeletons(),
            load_more_skeletons: default_load_more_skeletons(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_volume")]
    pub volume: f64,
}

const fn default_volume() -> f64 {
    0.7
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: default_volume(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enabled: bool,
}

impl TuneseekConfig {
    /// Get the configuration directory path (~/.config/tuneseek/)
    #[must_use]
    pub fn config_dir() -> PathBuf {
        crate::paths::config_dir()
    }

    /// Get the config file path (~/.config/tuneseek/config.toml)
    #[must_use]
    pub fn config_path() -> PathBuf {
        crate::paths::config_path()
    }

    /// Load config from the default path, writing the template on first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, written, parsed or validated.
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_at(&Self::config_path())
    }

    /// Load config from `path`, writing the template there if it does not exist.
    ///
    /// A freshly created file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read, written, parsed or validated.
    pub fn load_or_create_at(path: &Path) -> Result<Self> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, build_config_template())?;
            info!("Wrote config template to {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParseError` on TOML syntax errors and `ConfigInvalid` on out-of-range values.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is within the range the app can use.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        let catalog = &self.catalog;
        if catalog.page_size == 0 || catalog.page_size > MAX_PAGE_SIZE {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "catalog.page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                    catalog.page_size
                ),
            });
        }
        if catalog.artist_track_limit == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "catalog.artist_track_limit must be at least 1".into(),
            });
        }
        if catalog.search_url.trim().is_empty() || catalog.lookup_url.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "catalog.search_url and catalog.lookup_url must not be empty".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(CoreError::ConfigInvalid {
                message: format!("audio.volume must be within 0.0..=1.0, got {}", self.audio.volume),
            });
        }
        if self.ui.lazy_load_margin_px < 0.0 {
            return Err(CoreError::ConfigInvalid {
                message: "ui.lazy_load_margin_px must not be negative".into(),
            });
        }
        Ok(())
    }
}

/// Config file written on first run
#[must_use]
pub fn build_config_template() -> String {
    CONFIG_TEMPLATE.to_string()
}

const CONFIG_TEMPLATE: &str = r#"# Tuneseek Configuration
# ~/.config/tuneseek/config.toml

[catalog]
search_url = "https://itunes.apple.com/search"
lookup_url = "https://itunes.apple.com/lookup"
# Results per page (1-200)
page_size = 20
# Tracks shown in an artist's details panel
artist_track_limit = 10
# Filter selected at startup: "song", "album", "musicArtist"
default_media_type = "song"
request_timeout_secs = 10
max_retries = 3

[ui]
# Start loading card artwork this many pixels before it scrolls into view
lazy_load_margin_px = 100
initial_skeletons = 8
load_more_skeletons = 4

[audio]
# Preview volume (0.0 - 1.0)
volume = 0.7

[logging]
# Also write logs to ~/.config/tuneseek/tuneseek.log
enabled = false
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = TuneseekConfig::from_toml(&build_config_template()).unwrap();
        assert_eq!(config.catalog.page_size, 20);
        assert_eq!(config.catalog.artist_track_limit, 10);
        assert_eq!(config.catalog.default_media_type, MediaType::Song);
        assert_eq!(config.catalog.search_url, "https://itunes.apple.com/search");
        assert!((config.audio.volume - 0.7).abs() < f64::EPSILON);
        assert!((config.ui.lazy_load_margin_px - 100.0).abs() < f64::EPSILON);
        assert!(!config.logging.enabled);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = TuneseekConfig::from_toml("").unwrap();
        assert_eq!(config.catalog.page_size, 20);
        assert_eq!(config.ui.initial_skeletons, 8);
        assert_eq!(config.ui.load_more_skeletons, 4);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = TuneseekConfig::from_toml(
            r#"
            [catalog]
            page_size = 50
            default_media_type = "album"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.page_size, 50);
        assert_eq!(config.catalog.default_media_type, MediaType::Album);
        assert_eq!(config.catalog.max_retries, 3);
        assert_eq!(config.catalog.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_rejects_page_size_out_of_range() {
        for bad in ["page_size = 0", "page_size = 201"] {
            let err = TuneseekConfig::from_toml(&format!("[catalog]\n{bad}")).unwrap_err();
            assert!(matches!(err, CoreError::ConfigInvalid { .. }), "{bad}");
        }
    }

    #[test]
    fn test_rejects_volume_out_of_range() {
        let err = TuneseekConfig::from_toml("[audio]\nvolume = 1.5").unwrap_err();
        assert!(matches!(err, CoreError::ConfigInvalid { .. }));
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = TuneseekConfig::from_toml("[catalog\npage_size = 20").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParseError(_)));
    }

    #[test]
    fn test_load_or_create_writes_template() {
        let dir = std::env::temp_dir().join(format!("tuneseek-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_dir_all(&dir);

        let created = TuneseekConfig::load_or_create_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.catalog.page_size, 20);

        fs::write(&path, "[catalog]\npage_size = 30\n").unwrap();
        let loaded = TuneseekConfig::load_or_create_at(&path).unwrap();
        assert_eq!(loaded.catalog.page_size, 30);

        let _ = fs::remove_dir_all(&dir);
    }
}
