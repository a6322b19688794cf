// SPDX-License-Identifier: MPL-2.0
//! This module loads the application's configuration from a `settings.toml`
//! file. The file is edited by hand; the app only reads it.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[gallery]` - Rotation period, transition length, rendition cache size
//! - `[source]` - Trending endpoint, API key, optional limit, request timeout
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()` with explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Set `GIF_GALLERY_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use gif_gallery::config::{self, Config};
//!
//! let (config, warning) = config::load();
//! if let Some(key) = warning {
//!     eprintln!("settings.toml ignored: {key}");
//! }
//! println!("fetching {:?} records", config.source.limit());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Environment variable holding the API key; overrides the config file.
pub const ENV_API_KEY: &str = "GIF_GALLERY_API_KEY";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Featured-image rotation and display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GalleryConfig {
    /// Milliseconds between two automatic rotations.
    #[serde(
        default = "default_rotation_interval_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub rotation_interval_ms: Option<u64>,

    /// Fade-in length when the featured record changes (0 disables it).
    #[serde(
        default = "default_transition_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub transition_ms: Option<u64>,

    /// Number of downloaded renditions kept in memory.
    #[serde(
        default = "default_cache_capacity",
        skip_serializing_if = "Option::is_none"
    )]
    pub cache_capacity: Option<usize>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            rotation_interval_ms: default_rotation_interval_ms(),
            transition_ms: default_transition_ms(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl GalleryConfig {
    /// Rotation period, clamped to the supported range.
    #[must_use]
    pub fn rotation_interval(&self) -> Duration {
        let ms = self
            .rotation_interval_ms
            .unwrap_or(DEFAULT_ROTATION_INTERVAL_MS)
            .clamp(MIN_ROTATION_INTERVAL_MS, MAX_ROTATION_INTERVAL_MS);
        Duration::from_millis(ms)
    }

    /// Fade-in length, clamped to the supported range.
    #[must_use]
    pub fn transition(&self) -> Duration {
        let ms = self
            .transition_ms
            .unwrap_or(DEFAULT_TRANSITION_MS)
            .min(MAX_TRANSITION_MS);
        Duration::from_millis(ms)
    }

    /// Rendition cache capacity, clamped to the supported range.
    #[must_use]
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
            .unwrap_or(DEFAULT_CACHE_CAPACITY)
            .clamp(MIN_CACHE_CAPACITY, MAX_CACHE_CAPACITY)
    }
}

/// Trending-images API settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceConfig {
    /// Trending endpoint URL, without query string.
    #[serde(default = "default_endpoint", skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// API key sent as the `api_key` query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Optional `limit` query parameter. Not sent when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Request timeout in seconds.
    #[serde(
        default = "default_request_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_timeout_secs: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            limit: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SourceConfig {
    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Limit clamped to `1..=MAX_LIMIT`, or `None` when not configured.
    #[must_use]
    pub fn limit(&self) -> Option<u32> {
        self.limit.map(|limit| limit.clamp(1, MAX_LIMIT))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .max(1),
        )
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gallery: GalleryConfig,

    #[serde(default)]
    pub source: SourceConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_rotation_interval_ms() -> Option<u64> {
    Some(DEFAULT_ROTATION_INTERVAL_MS)
}

fn default_transition_ms() -> Option<u64> {
    Some(DEFAULT_TRANSITION_MS)
}

fn default_cache_capacity() -> Option<usize> {
    Some(DEFAULT_CACHE_CAPACITY)
}

fn default_endpoint() -> Option<String> {
    Some(DEFAULT_ENDPOINT.to_string())
}

fn default_request_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// API Key Resolution
// =============================================================================

/// Picks the API key: CLI flag, then `GIF_GALLERY_API_KEY`, then the config file.
/// Blank values are treated as absent.
pub fn resolve_api_key(cli_key: Option<String>, config: &Config) -> Option<String> {
    let env_key = std::env::var(ENV_API_KEY).ok();
    [cli_key, env_key, config.source.api_key.clone()]
        .into_iter()
        .flatten()
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring {}: {}", path.display(), err);
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves configuration to a specific path.
///
/// The app itself never writes settings; this is for seeding a
/// `settings.toml` from tooling and tests.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
                theme_mode: ThemeMode::Light,
            },
            gallery: GalleryConfig {
                rotation_interval_ms: Some(5000),
                transition_ms: Some(0),
                cache_capacity: Some(64),
            },
            source: SourceConfig {
                endpoint: Some("https://example.test/trending".to_string()),
                api_key: Some("secret".to_string()),
                limit: Some(5),
                request_timeout_secs: Some(3),
            },
        };
        let temp_dir = tempdir().expect("temp dir");
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);

        save_to_path(&config, &path).expect("save config");
        let loaded = load_from_path(&path).expect("load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("temp dir");
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[source]\napi_key = \"abc\"\n").expect("write config");

        let loaded = load_from_path(&path).expect("load config");

        assert_eq!(loaded.source.api_key.as_deref(), Some("abc"));
        assert_eq!(loaded.source.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(loaded.source.limit(), None);
        assert_eq!(
            loaded.gallery.rotation_interval(),
            Duration::from_millis(DEFAULT_ROTATION_INTERVAL_MS)
        );
        assert_eq!(loaded.general.theme_mode, ThemeMode::System);
    }

    #[test]
    fn theme_mode_is_case_insensitive() {
        let config: Config = toml::from_str("[general]\ntheme_mode = \"DARK\"\n").unwrap();
        assert_eq!(config.general.theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn invalid_theme_mode_is_rejected() {
        let result = toml::from_str::<Config>("[general]\ntheme_mode = \"sepia\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn malformed_file_returns_defaults_with_warning() {
        let temp_dir = tempdir().expect("temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[gallery\nnot toml").unwrap();

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn absent_file_returns_defaults_without_warning() {
        let temp_dir = tempdir().expect("temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));

        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn rotation_interval_is_clamped() {
        let fast = GalleryConfig {
            rotation_interval_ms: Some(1),
            ..GalleryConfig::default()
        };
        let slow = GalleryConfig {
            rotation_interval_ms: Some(10_000_000),
            ..GalleryConfig::default()
        };

        assert_eq!(
            fast.rotation_interval(),
            Duration::from_millis(MIN_ROTATION_INTERVAL_MS)
        );
        assert_eq!(
            slow.rotation_interval(),
            Duration::from_millis(MAX_ROTATION_INTERVAL_MS)
        );
    }

    #[test]
    fn limit_is_clamped_to_api_range() {
        let source = SourceConfig {
            limit: Some(500),
            ..SourceConfig::default()
        };
        assert_eq!(source.limit(), Some(MAX_LIMIT));

        let zero = SourceConfig {
            limit: Some(0),
            ..SourceConfig::default()
        };
        assert_eq!(zero.limit(), Some(1));
    }

    #[test]
    fn api_key_prefers_cli_then_env_then_config() {
        let _lock = ENV_MUTEX.lock().unwrap();
        let mut config = Config::default();
        config.source.api_key = Some("from-config".into());

        std::env::remove_var(ENV_API_KEY);
        assert_eq!(
            resolve_api_key(None, &config).as_deref(),
            Some("from-config")
        );

        std::env::set_var(ENV_API_KEY, "from-env");
        assert_eq!(resolve_api_key(None, &config).as_deref(), Some("from-env"));
        assert_eq!(
            resolve_api_key(Some("from-cli".into()), &config).as_deref(),
            Some("from-cli")
        );

        std::env::remove_var(ENV_API_KEY);
    }

    #[test]
    fn blank_api_keys_are_ignored() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_API_KEY);
        let mut config = Config::default();
        config.source.api_key = Some("   ".into());

        assert_eq!(resolve_api_key(Some(String::new()), &config), None);
    }
}
