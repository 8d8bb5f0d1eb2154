use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Окно антидребезга по умолчанию (мс)
pub const DEFAULT_DEBOUNCE_WINDOW_MS: u64 = 3000;

/// Максимально допустимое окно антидребезга (мс)
pub const MAX_DEBOUNCE_WINDOW_MS: u64 = 600_000;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub debounce: DebounceConfig,
    pub display: DisplayConfig,
    pub daemon: DaemonConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub target: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DebounceConfig {
    pub window_ms: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Имя дисплея X11 (`:0`), по умолчанию берётся из $DISPLAY
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub pid_file: Option<PathBuf>,
    pub working_directory: PathBuf,
}

/// Куда направлять логи
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Console,
    Journald,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            target: "auto".to_string(),
        }
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            window_ms: DEFAULT_DEBOUNCE_WINDOW_MS,
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            pid_file: None,
            working_directory: PathBuf::from("/"),
        }
    }
}

impl DebounceConfig {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }
}

impl LoggingConfig {
    /// Определяет приёмник логов с учётом режима запуска
    pub fn resolve_target(&self, daemonized: bool) -> LogTarget {
        match self.target.as_str() {
            "console" => LogTarget::Console,
            "journald" => LogTarget::Journald,
            _ if daemonized => LogTarget::Journald,
            _ => LogTarget::Console,
        }
    }

    /// Директива для EnvFilter: внешние крейты только warn
    pub fn filter_directive(&self) -> String {
        format!("warn,{}={}", env!("CARGO_CRATE_NAME"), self.level)
    }
}

impl Config {
    /// Загрузка без валидации: её делает вызывающий после параметров командной строки
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("AUTORANDR_LAUNCHER_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.target.as_str() {
            "auto" | "console" | "journald" => {}
            _ => anyhow::bail!("Неверный приёмник логов: {}", self.logging.target),
        }

        if self.debounce.window_ms > MAX_DEBOUNCE_WINDOW_MS {
            anyhow::bail!(
                "debounce.window_ms должно быть не больше {}",
                MAX_DEBOUNCE_WINDOW_MS
            );
        }

        if let Some(name) = &self.display.name {
            if name.trim().is_empty() {
                anyhow::bail!("display.name не может быть пустым");
            }
        }

        if let Some(pid_file) = &self.daemon.pid_file {
            if pid_file.is_relative() {
                anyhow::bail!("daemon.pid_file должен быть абсолютным путём: {:?}", pid_file);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce.window(), Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.target = "syslog".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.debounce.window_ms = MAX_DEBOUNCE_WINDOW_MS + 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.daemon.pid_file = Some(PathBuf::from("run/launcher.pid"));
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.name = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_window_is_allowed() {
        let mut config = Config::default();
        config.debounce.window_ms = 0;
        assert!(config.validate().is_ok());
        assert_eq!(config.debounce.window(), Duration::ZERO);
    }

    #[test]
    fn test_resolve_target() {
        let mut logging = LoggingConfig::default();
        assert_eq!(logging.resolve_target(false), LogTarget::Console);
        assert_eq!(logging.resolve_target(true), LogTarget::Journald);

        logging.target = "console".to_string();
        assert_eq!(logging.resolve_target(true), LogTarget::Console);

        logging.target = "journald".to_string();
        assert_eq!(logging.resolve_target(false), LogTarget::Journald);
    }

    #[test]
    fn test_filter_directive() {
        let logging = LoggingConfig {
            level: "debug".to_string(),
            target: "auto".to_string(),
        };
        assert_eq!(
            logging.filter_directive(),
            format!("warn,{}=debug", env!("CARGO_CRATE_NAME"))
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load("/nonexistent/autorandr-launcher.toml").unwrap();
        assert_eq!(config.debounce.window_ms, DEFAULT_DEBOUNCE_WINDOW_MS);
        assert_eq!(config.logging.level, "warn");
        assert!(config.display.name.is_none());
    }
}
