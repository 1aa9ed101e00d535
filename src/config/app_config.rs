//! # 应用配置结构定义

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ensure_config;
use crate::error::Result;

/// 应用主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP 服务器配置
    pub server: ServerConfig,
    /// 数据库配置
    pub database: super::DatabaseConfig,
    /// 认证配置
    pub auth: AuthConfig,
    /// 日志级别，`RUST_LOG` 优先
    pub log_level: Option<String>,
}

/// HTTP 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub bind_address: String,
    /// 监听端口
    pub port: u16,
    /// `/app` 静态文件目录
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: "./servfiles/app".to_string(),
        }
    }
}

impl ServerConfig {
    /// 监听地址字符串，例如 `0.0.0.0:8080`
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

/// 运行平台，只有 `dev` 允许破坏性的重置操作
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Dev,
    #[default]
    #[serde(other)]
    Production,
}

impl Platform {
    /// 从环境变量值解析，除 `dev` 之外一律视为生产环境
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.trim() == "dev" {
            Self::Dev
        } else {
            Self::Production
        }
    }

    #[must_use]
    pub const fn is_dev(self) -> bool {
        matches!(self, Self::Dev)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dev => f.write_str("dev"),
            Self::Production => f.write_str("production"),
        }
    }
}

/// 认证配置
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 访问令牌 HMAC 签名密钥
    pub jwt_secret: String,
    /// Polka webhook 预共享密钥
    pub polka_key: String,
    /// 运行平台
    pub platform: Platform,
}

// 手写 Debug，避免密钥出现在日志里
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"***")
            .field("polka_key", &"***")
            .field("platform", &self.platform)
            .finish()
    }
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        ensure_config!(!self.database.url.is_empty(), "数据库URL不能为空");
        ensure_config!(
            self.database.max_connections > 0,
            "数据库最大连接数必须大于0"
        );
        ensure_config!(
            !self.auth.jwt_secret.is_empty(),
            "JWT签名密钥不能为空 (auth.jwt_secret / JWT_SECRET_KEY)"
        );
        ensure_config!(
            !self.auth.polka_key.is_empty(),
            "Polka webhook 密钥不能为空 (auth.polka_key / POLKA_KEY)"
        );
        Ok(())
    }
}
