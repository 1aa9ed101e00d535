//! # 配置管理器
//!
//! 读取 TOML 配置文件，再用环境变量覆盖部署相关的值

use std::env;
use std::path::{Path, PathBuf};

use super::{AppConfig, Platform};
use crate::error::{ChirpyError, Result};
use crate::logging::{LogComponent, LogStage};
use crate::{ldebug, linfo, lwarn};

/// 环境变量查找函数，测试中可以替换为固定映射
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// 环境变量到配置项的映射
const ENV_DB_URL: &str = "DB_URL";
const ENV_JWT_SECRET: &str = "JWT_SECRET_KEY";
const ENV_POLKA_KEY: &str = "POLKA_KEY";
const ENV_PLATFORM: &str = "PLATFORM";
const ENV_PORT: &str = "PORT";

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 按默认规则定位配置文件并加载
    ///
    /// 优先使用 `CHIRPY_CONFIG_PATH`，否则为 `config/config.{RUST_ENV}.toml`。
    pub fn new() -> Result<Self> {
        let config_file = env::var("CHIRPY_CONFIG_PATH").unwrap_or_else(|_| {
            let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
            format!("config/config.{env}.toml")
        });
        Self::load(&config_file, &|key: &str| env::var(key).ok())
    }

    /// 从指定文件加载配置，文件不存在时使用默认值
    pub fn load(config_path: impl AsRef<Path>, lookup: EnvLookup<'_>) -> Result<Self> {
        let config_path = config_path.as_ref();

        let (mut config, source) = if config_path.exists() {
            (
                Self::load_config_file(config_path)?,
                Some(config_path.to_path_buf()),
            )
        } else {
            lwarn!(
                "system",
                LogStage::Startup,
                LogComponent::Config,
                "config_file_missing",
                &format!(
                    "配置文件不存在，使用默认配置: {}",
                    config_path.display()
                )
            );
            (AppConfig::default(), None)
        };

        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate()?;

        linfo!(
            "system",
            LogStage::Startup,
            LogComponent::Config,
            "config_loaded",
            &format!(
                "配置加载完成: platform={}, listen={}",
                config.auth.platform,
                config.server.listen_addr()
            )
        );

        Ok(Self { config, source })
    }

    /// 加载配置文件
    fn load_config_file(path: &Path) -> Result<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChirpyError::config_with_source(format!("读取配置文件失败: {}", path.display()), e)
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(config: &mut AppConfig, lookup: EnvLookup<'_>) -> Result<()> {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(url) = read(ENV_DB_URL) {
            config.database.url = url;
            Self::log_override(ENV_DB_URL, "database.url");
        }
        if let Some(secret) = read(ENV_JWT_SECRET) {
            config.auth.jwt_secret = secret;
            Self::log_override(ENV_JWT_SECRET, "auth.jwt_secret");
        }
        if let Some(key) = read(ENV_POLKA_KEY) {
            config.auth.polka_key = key;
            Self::log_override(ENV_POLKA_KEY, "auth.polka_key");
        }
        if let Some(platform) = read(ENV_PLATFORM) {
            config.auth.platform = Platform::parse(&platform);
            Self::log_override(ENV_PLATFORM, "auth.platform");
        }
        if let Some(port) = read(ENV_PORT) {
            config.server.port = port.parse().map_err(|e| {
                ChirpyError::config_with_source(format!("无效的端口号: {port}"), e)
            })?;
            Self::log_override(ENV_PORT, "server.port");
        }

        Ok(())
    }

    fn log_override(env_key: &str, path: &str) {
        ldebug!(
            "system",
            LogStage::Startup,
            LogComponent::Config,
            "env_override",
            &format!("环境变量 {env_key} 覆盖配置项 {path}")
        );
    }

    /// 获取当前配置
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 取出配置
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// 配置来源文件，使用默认值时为 `None`
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "from-file".to_string();

        let lookup = lookup_from(&[
            ("DB_URL", "sqlite::memory:"),
            ("JWT_SECRET_KEY", "from-env"),
            ("POLKA_KEY", "polka"),
            ("PLATFORM", "dev"),
            ("PORT", "9999"),
        ]);
        ConfigManager::apply_env_overrides(&mut config, &lookup).unwrap();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.auth.jwt_secret, "from-env");
        assert_eq!(config.auth.polka_key, "polka");
        assert_eq!(config.auth.platform, Platform::Dev);
        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "from-file".to_string();

        let lookup = lookup_from(&[("JWT_SECRET_KEY", "")]);
        ConfigManager::apply_env_overrides(&mut config, &lookup).unwrap();
        assert_eq!(config.auth.jwt_secret, "from-file");
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let mut config = AppConfig::default();
        let lookup = lookup_from(&[("PORT", "not-a-port")]);
        let err = ConfigManager::apply_env_overrides(&mut config, &lookup).unwrap_err();
        assert!(matches!(err, ChirpyError::Config { .. }));
    }

    #[test]
    fn test_load_from_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [database]
            url = "sqlite::memory:"

            [auth]
            jwt_secret = "file-secret"
            polka_key = "file-polka"
            platform = "dev"
            "#
        )
        .unwrap();

        let lookup = lookup_from(&[("PLATFORM", "production")]);
        let manager = ConfigManager::load(file.path(), &lookup).unwrap();

        assert_eq!(manager.source(), Some(file.path()));
        assert_eq!(manager.config().auth.jwt_secret, "file-secret");
        assert_eq!(manager.config().auth.platform, Platform::Production);
    }

    #[test]
    fn test_missing_file_uses_defaults_and_env() {
        let lookup = lookup_from(&[("JWT_SECRET_KEY", "s"), ("POLKA_KEY", "p")]);
        let manager = ConfigManager::load("/nonexistent/chirpy.toml", &lookup).unwrap();

        assert!(manager.source().is_none());
        assert_eq!(manager.config().auth.platform, Platform::Production);
        assert_eq!(manager.into_config().server.port, 8080);
    }

    #[test]
    fn test_missing_secret_fails_validation() {
        let lookup = lookup_from(&[("POLKA_KEY", "p")]);
        let err = ConfigManager::load("/nonexistent/chirpy.toml", &lookup).unwrap_err();
        assert!(matches!(err, ChirpyError::Config { .. }));
    }
}
