//! # 数据库配置

use crate::error::{ChirpyError, Result};
use crate::linfo;
use crate::logging::{LogComponent, LogStage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 数据库URL
    pub url: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 连接超时时间（秒）
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/chirpy.db?mode=rwc".to_string(),
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    /// 确保数据库路径存在（仅对SQLite文件数据库）
    pub fn ensure_database_path(&self) -> Result<()> {
        let Some(path_str) = self.sqlite_file_path() else {
            return Ok(());
        };
        let db_path = Path::new(path_str);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ChirpyError::config_with_source(
                        format!("无法创建数据库目录: {}", parent.display()),
                        e,
                    )
                })?;

                linfo!(
                    "system",
                    LogStage::Startup,
                    LogComponent::Database,
                    "create_db_dir",
                    &format!("创建数据库目录: {}", parent.display())
                );
            }
        }

        Ok(())
    }

    /// 检查是否为内存数据库
    #[must_use]
    pub fn is_memory_database(&self) -> bool {
        self.url.contains(":memory:")
    }

    /// SQLite 文件路径（去掉 scheme 与查询参数）
    fn sqlite_file_path(&self) -> Option<&str> {
        if self.is_memory_database() {
            return None;
        }
        let rest = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))?;
        Some(rest.split('?').next().unwrap_or(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path_parsing() {
        let config = DatabaseConfig {
            url: "sqlite://./data/chirpy.db?mode=rwc".to_string(),
            ..Default::default()
        };
        assert_eq!(config.sqlite_file_path(), Some("./data/chirpy.db"));

        let memory = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        };
        assert!(memory.is_memory_database());
        assert_eq!(memory.sqlite_file_path(), None);

        let postgres = DatabaseConfig {
            url: "postgres://localhost/chirpy".to_string(),
            ..Default::default()
        };
        assert_eq!(postgres.sqlite_file_path(), None);
    }

    #[test]
    fn test_ensure_database_path_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db_file = dir.path().join("nested").join("chirpy.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}?mode=rwc", db_file.display()),
            ..Default::default()
        };

        config.ensure_database_path().unwrap();
        assert!(db_file.parent().unwrap().exists());
    }
}
