//! Configuration for Telegram API credentials and monitored channels
//!
//! Loads configuration from config.yml file; environment variables take
//! precedence over file values (the `${VAR}` form in YAML is resolved
//! against the environment).

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default constants (fallback if config.yml not found)
pub const SESSION_NAME: &str = "channel_session";
pub const LOCK_FILE: &str = "channel_session.lock";
pub const DEFAULT_WINDOW_DAYS: i64 = 7;
pub const DEFAULT_MESSAGE_LIMIT: usize = 500;
pub const DEFAULT_SNAPSHOT_DIR: &str = "snapshots";
pub const DEFAULT_OUTPUT_DIR: &str = "reports";

/// Monitored channel reference
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEntity {
    /// Channel by numeric ID
    Id(i64),
    /// Channel by public username (without @)
    Username(String),
}

impl ChannelEntity {
    pub fn id(id: i64) -> Self {
        ChannelEntity::Id(id)
    }

    pub fn username(name: &str) -> Self {
        let name = name.strip_prefix('@').unwrap_or(name);
        ChannelEntity::Username(name.to_string())
    }
}

/// YAML config structures
#[derive(Debug, Deserialize)]
struct YamlConfig {
    telegram: Option<TelegramConfig>,
    channels: Option<HashMap<String, ChannelConfig>>,
    report: Option<ReportConfig>,
}

#[derive(Debug, Deserialize)]
struct TelegramConfig {
    #[serde(default, deserialize_with = "deserialize_string_or_number")]
    api_id: Option<String>,
    api_hash: Option<String>,
    session_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelConfig {
    id: Option<i64>,
    username: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ReportConfig {
    window_days: Option<i64>,
    message_limit: Option<usize>,
    flat_tolerance: Option<f64>,
    snapshot_dir: Option<String>,
    output_dir: Option<String>,
}

/// Deserialize a value that can be either a string or a number
fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_yaml::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {:?}",
            other
        ))),
    }
}

/// Main configuration struct
#[derive(Debug, Clone)]
pub struct Config {
    pub api_id: i32,
    pub api_hash: String,
    pub session_name: String,
    pub lock_file: String,
    pub channels: HashMap<String, ChannelEntity>,
    pub window_days: i64,
    pub message_limit: usize,
    pub flat_tolerance: f64,
    pub snapshot_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Load configuration from config.yml or use defaults.
    pub fn new() -> Self {
        Self::load_from_file("config.yml")
            .or_else(|_| Self::load_from_file("../config.yml"))
            .unwrap_or_else(|_| Self::defaults())
    }

    /// Resolve a value: prefer env var if config value looks like ${VAR}
    fn resolve_env_string(value: Option<String>, env_key: &str) -> String {
        if let Some(ref v) = value {
            if v.starts_with("${") && v.ends_with('}') {
                let var_name = &v[2..v.len() - 1];
                if let Ok(env_val) = std::env::var(var_name) {
                    return env_val;
                }
            }
        }
        if let Ok(env_val) = std::env::var(env_key) {
            return env_val;
        }
        value.unwrap_or_default()
    }

    /// Resolve an integer value from string config or env var
    fn resolve_env_i32(value: Option<String>, env_key: &str) -> i32 {
        if let Some(ref v) = value {
            if v.starts_with("${") && v.ends_with('}') {
                let var_name = &v[2..v.len() - 1];
                if let Ok(env_val) = std::env::var(var_name) {
                    if let Ok(parsed) = env_val.parse::<i32>() {
                        return parsed;
                    }
                }
            }
            if let Ok(parsed) = v.parse::<i32>() {
                return parsed;
            }
        }
        if let Ok(env_val) = std::env::var(env_key) {
            if let Ok(parsed) = env_val.parse::<i32>() {
                return parsed;
            }
        }
        0
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let yaml: YamlConfig = serde_yaml::from_str(&content)?;

        let telegram = yaml.telegram;
        let api_id = Self::resolve_env_i32(
            telegram.as_ref().and_then(|t| t.api_id.clone()),
            "TELEGRAM_API_ID",
        );
        let api_hash = Self::resolve_env_string(
            telegram.as_ref().and_then(|t| t.api_hash.clone()),
            "TELEGRAM_API_HASH",
        );
        let session_name = telegram
            .as_ref()
            .and_then(|t| t.session_name.clone())
            .unwrap_or_else(|| SESSION_NAME.to_string());

        let mut channels = HashMap::new();
        if let Some(configured) = yaml.channels {
            for (name, entry) in configured {
                let entity = match (entry.id, entry.username) {
                    (Some(id), _) => ChannelEntity::Id(id),
                    (None, Some(username)) => ChannelEntity::username(&username),
                    (None, None) => continue,
                };
                channels.insert(name, entity);
            }
        }

        let report = yaml.report;
        let window_days = report
            .as_ref()
            .and_then(|r| r.window_days)
            .unwrap_or(DEFAULT_WINDOW_DAYS);
        let message_limit = report
            .as_ref()
            .and_then(|r| r.message_limit)
            .unwrap_or(DEFAULT_MESSAGE_LIMIT);
        let flat_tolerance = report
            .as_ref()
            .and_then(|r| r.flat_tolerance)
            .unwrap_or(crate::analytics::growth::FLAT_TOLERANCE);
        let snapshot_dir = report
            .as_ref()
            .and_then(|r| r.snapshot_dir.clone())
            .unwrap_or_else(|| DEFAULT_SNAPSHOT_DIR.to_string());
        let output_dir = report
            .as_ref()
            .and_then(|r| r.output_dir.clone())
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

        Ok(Self {
            api_id,
            api_hash,
            lock_file: format!("{}.lock", session_name),
            session_name,
            channels,
            window_days,
            message_limit,
            flat_tolerance,
            snapshot_dir: PathBuf::from(snapshot_dir),
            output_dir: PathBuf::from(output_dir),
        })
    }

    fn defaults() -> Self {
        Self {
            api_id: Self::resolve_env_i32(None, "TELEGRAM_API_ID"),
            api_hash: Self::resolve_env_string(None, "TELEGRAM_API_HASH"),
            session_name: SESSION_NAME.to_string(),
            lock_file: LOCK_FILE.to_string(),
            channels: HashMap::new(),
            window_days: DEFAULT_WINDOW_DAYS,
            message_limit: DEFAULT_MESSAGE_LIMIT,
            flat_tolerance: crate::analytics::growth::FLAT_TOLERANCE,
            snapshot_dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Look up a channel by config alias, falling back to treating the
    /// name as a public username.
    pub fn resolve_channel(&self, name: &str) -> ChannelEntity {
        self.channels
            .get(name)
            .cloned()
            .unwrap_or_else(|| ChannelEntity::username(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_when_no_config_file() {
        let config = Config::defaults();
        assert_eq!(config.session_name, SESSION_NAME);
        assert_eq!(config.window_days, DEFAULT_WINDOW_DAYS);
        assert_eq!(config.message_limit, DEFAULT_MESSAGE_LIMIT);
        assert!(config.channels.is_empty());
    }

    #[test]
    fn loads_channels_from_yaml() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
telegram:
  api_id: 12345
  api_hash: "abcdef"
channels:
  daily_news:
    id: -1001234567890
  tech_blog:
    username: "@techblog"
report:
  window_days: 14
  message_limit: 200
"#
        )
        .expect("write yaml");

        let config = Config::load_from_file(file.path()).expect("load config");

        assert_eq!(config.api_id, 12345);
        assert_eq!(config.api_hash, "abcdef");
        assert_eq!(config.window_days, 14);
        assert_eq!(config.message_limit, 200);
        assert_eq!(
            config.channels.get("daily_news"),
            Some(&ChannelEntity::Id(-1001234567890))
        );
        assert_eq!(
            config.channels.get("tech_blog"),
            Some(&ChannelEntity::Username("techblog".to_string()))
        );
    }

    #[test]
    fn channel_entity_strips_at_prefix() {
        assert_eq!(
            ChannelEntity::username("@channel"),
            ChannelEntity::Username("channel".to_string())
        );
        assert_eq!(
            ChannelEntity::username("channel"),
            ChannelEntity::Username("channel".to_string())
        );
    }

    #[test]
    fn resolve_channel_falls_back_to_username() {
        let config = Config::defaults();
        assert_eq!(
            config.resolve_channel("somewhere"),
            ChannelEntity::Username("somewhere".to_string())
        );
    }

    #[test]
    fn resolve_channel_prefers_configured_alias() {
        let mut config = Config::defaults();
        config
            .channels
            .insert("news".to_string(), ChannelEntity::Id(42));
        assert_eq!(config.resolve_channel("news"), ChannelEntity::Id(42));
    }

    #[test]
    fn resolve_env_i32_parses_plain_number() {
        assert_eq!(
            Config::resolve_env_i32(Some("999".to_string()), "UNSET_TEST_VAR"),
            999
        );
    }

    #[test]
    fn resolve_env_string_keeps_literal_value() {
        assert_eq!(
            Config::resolve_env_string(Some("literal".to_string()), "UNSET_TEST_VAR"),
            "literal"
        );
    }

    #[test]
    fn resolve_env_string_expands_placeholder() {
        std::env::set_var("CA_TEST_PLACEHOLDER", "expanded");
        let value =
            Config::resolve_env_string(Some("${CA_TEST_PLACEHOLDER}".to_string()), "UNSET_VAR");
        assert_eq!(value, "expanded");
        std::env::remove_var("CA_TEST_PLACEHOLDER");
    }

    #[test]
    fn channel_without_id_or_username_is_skipped() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
channels:
  broken: {{}}
"#
        )
        .expect("write yaml");

        let config = Config::load_from_file(file.path()).expect("load config");
        assert!(config.channels.is_empty());
    }

    #[test]
    fn lock_file_follows_session_name() {
        let mut file = NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
telegram:
  session_name: "custom_session"
"#
        )
        .expect("write yaml");

        let config = Config::load_from_file(file.path()).expect("load config");
        assert_eq!(config.session_name, "custom_session");
        assert_eq!(config.lock_file, "custom_session.lock");
    }
}
