//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.vtui/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;

use crate::core::catalog::{self, CatalogEntry};
use crate::core::scroll::ScrollStrategy;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct VtuiConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub keys: KeysConfig,
    #[serde(default)]
    pub categories: Vec<CatalogEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub scroll_strategy: Option<ScrollStrategy>,
    pub click_pulse_ms: Option<u64>,
    pub idle_poll_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KeysConfig {
    pub quit: Option<String>,
    pub navigate_next: Option<String>,
    pub navigate_prev: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_CLICK_PULSE_MS: u64 = 500;
pub const DEFAULT_IDLE_POLL_MS: u64 = 16;
pub const DEFAULT_QUIT_KEY: char = 'q';
pub const DEFAULT_NEXT_KEY: char = 'j';
pub const DEFAULT_PREV_KEY: char = 'k';

/// Characters that already carry a fixed meaning (Activate).
const RESERVED_KEYS: &[char] = &[' ', '\t', '\n', '\r'];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Character bindings for the rebindable logical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub quit: char,
    pub navigate_next: char,
    pub navigate_prev: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: DEFAULT_QUIT_KEY,
            navigate_next: DEFAULT_NEXT_KEY,
            navigate_prev: DEFAULT_PREV_KEY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub scroll_strategy: ScrollStrategy,
    pub click_pulse: Duration,
    pub idle_poll: Duration,
    pub keys: KeyBindings,
    pub categories: Vec<CatalogEntry>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            scroll_strategy: ScrollStrategy::default(),
            click_pulse: Duration::from_millis(DEFAULT_CLICK_PULSE_MS),
            idle_poll: Duration::from_millis(DEFAULT_IDLE_POLL_MS),
            keys: KeyBindings::default(),
            categories: catalog::default_catalog(),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.vtui/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".vtui").join("config.toml"))
}

/// Load config from an explicit path, or from `~/.vtui/config.toml`.
///
/// An explicit path must exist. The default location is generated with a
/// commented-out template when missing, and `VtuiConfig::default()` is
/// returned. A malformed file returns `ConfigError::Parse`.
pub fn load_config(explicit: Option<&Path>) -> Result<VtuiConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(VtuiConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(VtuiConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<VtuiConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: VtuiConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# vtui Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# scroll_strategy = "clamp"    # "clamp" or "center" (env VTUI_SCROLL_STRATEGY)
# click_pulse_ms = 500         # Button click feedback duration
# idle_poll_ms = 16            # Sleep when no key is pending (0 = busy poll)

# [keys]
# quit = "q"
# navigate_next = "j"          # Down arrow always works too
# navigate_prev = "k"          # Up arrow always works too

# Category list entries, in display order. Groups are headers.
# [[categories]]
# label = "Menu"
# group = true

# [[categories]]
# label = "All discussions"
# payload = "all_discussion"
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
///
/// `cli_scroll` is from the `--scroll` flag (None = not specified).
pub fn resolve(
    config: &VtuiConfig,
    cli_scroll: Option<ScrollStrategy>,
) -> Result<ResolvedConfig, ConfigError> {
    let env_scroll = std::env::var("VTUI_SCROLL_STRATEGY").ok();
    resolve_layers(config, env_scroll.as_deref(), cli_scroll)
}

fn resolve_layers(
    config: &VtuiConfig,
    env_scroll: Option<&str>,
    cli_scroll: Option<ScrollStrategy>,
) -> Result<ResolvedConfig, ConfigError> {
    // Scroll strategy: CLI → env → config → default
    let env_scroll = env_scroll.and_then(|raw| match ScrollStrategy::from_str(raw, true) {
        Ok(strategy) => Some(strategy),
        Err(_) => {
            warn!("Ignoring unknown VTUI_SCROLL_STRATEGY value: {raw}");
            None
        }
    });
    let scroll_strategy = cli_scroll
        .or(env_scroll)
        .or(config.general.scroll_strategy)
        .unwrap_or_default();

    let keys = resolve_keys(&config.keys)?;

    let categories = if config.categories.is_empty() {
        catalog::default_catalog()
    } else {
        config.categories.clone()
    };
    catalog::validate(&categories).map_err(ConfigError::Invalid)?;

    Ok(ResolvedConfig {
        scroll_strategy,
        click_pulse: Duration::from_millis(
            config
                .general
                .click_pulse_ms
                .unwrap_or(DEFAULT_CLICK_PULSE_MS),
        ),
        idle_poll: Duration::from_millis(
            config.general.idle_poll_ms.unwrap_or(DEFAULT_IDLE_POLL_MS),
        ),
        keys,
        categories,
    })
}

fn resolve_keys(keys: &KeysConfig) -> Result<KeyBindings, ConfigError> {
    let defaults = KeyBindings::default();
    let bindings = KeyBindings {
        quit: parse_key("quit", keys.quit.as_deref(), defaults.quit)?,
        navigate_next: parse_key(
            "navigate_next",
            keys.navigate_next.as_deref(),
            defaults.navigate_next,
        )?,
        navigate_prev: parse_key(
            "navigate_prev",
            keys.navigate_prev.as_deref(),
            defaults.navigate_prev,
        )?,
    };

    if bindings.quit == bindings.navigate_next
        || bindings.quit == bindings.navigate_prev
        || bindings.navigate_next == bindings.navigate_prev
    {
        return Err(ConfigError::Invalid(format!(
            "key bindings must be distinct: {bindings:?}"
        )));
    }
    Ok(bindings)
}

fn parse_key(name: &str, raw: Option<&str>, default: char) -> Result<char, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !RESERVED_KEYS.contains(&c) => Ok(c),
        (Some(c), None) => Err(ConfigError::Invalid(format!(
            "key '{name}' cannot be bound to reserved key {c:?}"
        ))),
        _ => Err(ConfigError::Invalid(format!(
            "key '{name}' must be a single character, got {raw:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = VtuiConfig::default();
        assert!(config.categories.is_empty());
        assert!(config.general.scroll_strategy.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = VtuiConfig::default();
        let resolved = resolve_layers(&config, None, None).unwrap();
        assert_eq!(resolved.scroll_strategy, ScrollStrategy::Clamp);
        assert_eq!(resolved.click_pulse, Duration::from_millis(500));
        assert_eq!(resolved.keys, KeyBindings::default());
        assert_eq!(resolved.categories, catalog::default_catalog());
    }

    #[test]
    fn test_override_hierarchy() {
        let config = VtuiConfig {
            general: GeneralConfig {
                scroll_strategy: Some(ScrollStrategy::Center),
                ..Default::default()
            },
            ..Default::default()
        };

        let from_file = resolve_layers(&config, None, None).unwrap();
        assert_eq!(from_file.scroll_strategy, ScrollStrategy::Center);

        let from_env = resolve_layers(&config, Some("CLAMP"), None).unwrap();
        assert_eq!(from_env.scroll_strategy, ScrollStrategy::Clamp);

        let from_cli =
            resolve_layers(&config, Some("clamp"), Some(ScrollStrategy::Center)).unwrap();
        assert_eq!(from_cli.scroll_strategy, ScrollStrategy::Center);
    }

    #[test]
    fn test_unknown_env_value_is_ignored() {
        let config = VtuiConfig::default();
        let resolved = resolve_layers(&config, Some("sideways"), None).unwrap();
        assert_eq!(resolved.scroll_strategy, ScrollStrategy::Clamp);
    }

    #[test]
    fn test_toml_full_file() {
        let toml_str = r#"
[general]
scroll_strategy = "center"
click_pulse_ms = 250
idle_poll_ms = 0

[keys]
quit = "x"
navigate_next = "n"
navigate_prev = "p"

[[categories]]
label = "Main"
group = true

[[categories]]
label = "A"
payload = "a"

[[categories]]
label = "B"
"#;
        let config: VtuiConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve_layers(&config, None, None).unwrap();
        assert_eq!(resolved.scroll_strategy, ScrollStrategy::Center);
        assert_eq!(resolved.click_pulse, Duration::from_millis(250));
        assert_eq!(resolved.idle_poll, Duration::ZERO);
        assert_eq!(resolved.keys.quit, 'x');
        assert_eq!(resolved.categories.len(), 3);
        assert_eq!(resolved.categories[2].payload(), Some("B"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[keys]
quit = "e"
"#;
        let config: VtuiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.keys.quit.as_deref(), Some("e"));
        assert!(config.general.click_pulse_ms.is_none());
        let resolved = resolve_layers(&config, None, None).unwrap();
        assert_eq!(resolved.keys.navigate_next, 'j');
    }

    #[test]
    fn test_key_bindings_must_be_distinct() {
        let config = VtuiConfig {
            keys: KeysConfig {
                quit: Some("j".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = resolve_layers(&config, None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_key_binding_rejects_reserved_and_long_values() {
        assert!(parse_key("quit", Some(" "), 'q').is_err());
        assert!(parse_key("quit", Some("qq"), 'q').is_err());
        assert!(parse_key("quit", Some(""), 'q').is_err());
        assert_eq!(parse_key("quit", None, 'q').unwrap(), 'q');
    }

    #[test]
    fn test_invalid_catalog_is_rejected() {
        let config = VtuiConfig {
            categories: vec![CatalogEntry::item("", "empty")],
            ..Default::default()
        };
        let err = resolve_layers(&config, None, None).unwrap_err();
        assert!(err.to_string().contains("empty label"));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = std::env::temp_dir().join(format!("vtui-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        fs::write(&path, "[general]\nclick_pulse_ms = 10\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.general.click_pulse_ms, Some(10));

        let missing = load_config(Some(&dir.join("missing.toml")));
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        fs::write(&path, "[general\n").unwrap();
        assert!(matches!(load_config(Some(&path)), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}
