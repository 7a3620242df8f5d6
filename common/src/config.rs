use config::{Config, ConfigError};
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "config/predictor.toml";
pub const DEFAULT_ARTIFACT_PATH: &str = "models/cancellation_model.json";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    #[serde(default = "default_artifact_path")]
    pub artifact_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// Initial state of the debug toggle on a freshly rendered form.
    #[serde(default)]
    pub debug_mode: bool,
    #[serde(default = "default_page_title")]
    pub page_title: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            page_title: default_page_title(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_artifact_path() -> String {
    DEFAULT_ARTIFACT_PATH.to_string()
}

fn default_page_title() -> String {
    "Hotel Reservation Cancellation Predictor".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Layers the optional TOML file at `path` under `APP__`-prefixed
    /// environment variables (e.g. `APP__SERVER__PORT=9000`).
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"));

        let config = builder.build()?;

        let settings: Settings = config.try_deserialize()?;

        debug!(
            artifact = %settings.model.artifact_path,
            port = settings.server.port,
            "Parsed settings"
        );

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::new("config/does-not-exist").unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8501);
        assert_eq!(settings.model.artifact_path, DEFAULT_ARTIFACT_PATH);
        assert!(!settings.ui.debug_mode);
        assert_eq!(settings.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = std::env::temp_dir().join(format!("predictor-settings-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("predictor.toml");
        std::fs::write(
            &file,
            "[server]\nport = 9100\n\n[ui]\ndebug_mode = true\n\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();

        let settings = Settings::new(file.to_str().unwrap()).unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert!(settings.ui.debug_mode);
        assert_eq!(settings.logging.format, LogFormat::Json);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
