//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.oophub/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HubConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_topic: Option<String>,
    pub content_file: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RenderConfig {
    pub syntax_theme: Option<String>,
    pub diagram_charset: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SYNTAX_THEME: &str = "base16-ocean.dark";
pub const DEFAULT_DIAGRAM_CHARSET: &str = "unicode";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Topic to open on startup. `None` = the content file's own default.
    pub start_topic: Option<String>,
    /// External content file. `None` = bundled content.
    pub content_file: Option<PathBuf>,
    pub syntax_theme: String,
    pub diagram_charset: String,
    pub log_level: String,
}

impl ResolvedConfig {
    /// The configured log level; unrecognised names fall back to `info`.
    pub fn log_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }
}

/// Values supplied on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub topic: Option<String>,
    pub content: Option<PathBuf>,
    pub theme: Option<String>,
    pub ascii: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.oophub/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".oophub"))
}

/// Returns the path to `~/.oophub/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.oophub/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `HubConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<HubConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(HubConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(HubConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<HubConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: HubConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Java OOP Learning Hub configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_topic = "intro"              # any topic key, or "glossary"
# content_file = "my-course.toml"    # Path relative to ~/.oophub/ (or absolute)
# log_level = "info"                 # "error", "warn", "info", "debug", "trace"

# [render]
# syntax_theme = "base16-ocean.dark" # any syntect default theme
# diagram_charset = "unicode"        # "unicode" or "ascii"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &HubConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Start topic: CLI → env → config → content default
    let start_topic = cli
        .topic
        .clone()
        .or_else(|| std::env::var("OOPHUB_TOPIC").ok())
        .or_else(|| config.general.start_topic.clone());

    // Content file: CLI → env → config (relative to ~/.oophub/) → bundled
    let content_file = cli
        .content
        .clone()
        .or_else(|| std::env::var("OOPHUB_CONTENT").ok().map(PathBuf::from))
        .or_else(|| {
            config
                .general
                .content_file
                .as_deref()
                .map(resolve_content_path)
        });

    // Syntax theme: CLI → env → config → default
    let syntax_theme = cli
        .theme
        .clone()
        .or_else(|| std::env::var("OOPHUB_THEME").ok())
        .or_else(|| config.render.syntax_theme.clone())
        .unwrap_or_else(|| DEFAULT_SYNTAX_THEME.to_string());

    // Diagram charset: --ascii flag → config → default
    let diagram_charset = if cli.ascii {
        "ascii".to_string()
    } else {
        config
            .render
            .diagram_charset
            .clone()
            .unwrap_or_else(|| DEFAULT_DIAGRAM_CHARSET.to_string())
    };

    ResolvedConfig {
        start_topic,
        content_file,
        syntax_theme,
        diagram_charset,
        log_level: config
            .general
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
    }
}

/// Relative content paths are looked up under `~/.oophub/`.
fn resolve_content_path(file: &str) -> PathBuf {
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return path;
    }
    match config_dir() {
        Some(dir) => dir.join(path),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = HubConfig::default();
        assert!(config.general.start_topic.is_none());
        assert!(config.render.syntax_theme.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&HubConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.diagram_charset, DEFAULT_DIAGRAM_CHARSET);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_log_filter_parses_level_names() {
        let mut resolved = resolve(&HubConfig::default(), &CliOverrides::default());
        assert_eq!(resolved.log_filter(), LevelFilter::Info);
        resolved.log_level = "DEBUG".to_string();
        assert_eq!(resolved.log_filter(), LevelFilter::Debug);
        resolved.log_level = "off".to_string();
        assert_eq!(resolved.log_filter(), LevelFilter::Off);
        resolved.log_level = "chatty".to_string();
        assert_eq!(resolved.log_filter(), LevelFilter::Info);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = HubConfig {
            general: GeneralConfig {
                start_topic: Some("inheritance".to_string()),
                content_file: Some("/tmp/course.toml".to_string()),
                log_level: Some("debug".to_string()),
            },
            render: RenderConfig {
                syntax_theme: None,
                diagram_charset: Some("ascii".to_string()),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.content_file, Some(PathBuf::from("/tmp/course.toml")));
        assert_eq!(resolved.diagram_charset, "ascii");
        assert_eq!(resolved.log_level, "debug");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = HubConfig {
            general: GeneralConfig {
                start_topic: Some("intro".to_string()),
                ..Default::default()
            },
            render: RenderConfig {
                syntax_theme: Some("InspiredGitHub".to_string()),
                diagram_charset: Some("unicode".to_string()),
            },
        };
        let cli = CliOverrides {
            topic: Some("glossary".to_string()),
            content: None,
            theme: Some("Solarized (dark)".to_string()),
            ascii: true,
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.start_topic.as_deref(), Some("glossary"));
        assert_eq!(resolved.syntax_theme, "Solarized (dark)");
        assert_eq!(resolved.diagram_charset, "ascii");
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[render]
diagram_charset = "ascii"
"#;
        let config: HubConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.render.diagram_charset.as_deref(), Some("ascii"));
        assert!(config.render.syntax_theme.is_none());
        assert!(config.general.start_topic.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[general]
start_topic = "polymorphism"
content_file = "course.toml"
log_level = "warn"

[render]
syntax_theme = "InspiredGitHub"
diagram_charset = "unicode"
"#;
        let config: HubConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.start_topic.as_deref(), Some("polymorphism"));
        assert_eq!(config.general.content_file.as_deref(), Some("course.toml"));
        assert_eq!(config.render.syntax_theme.as_deref(), Some("InspiredGitHub"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join(format!("oophub-config-{}.toml", std::process::id()));
        fs::write(&path, "[general\nstart_topic = ").unwrap();
        let result = load_config_from(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_absolute_content_path_kept() {
        assert_eq!(
            resolve_content_path("/srv/course.toml"),
            PathBuf::from("/srv/course.toml")
        );
    }
}
