//! # 错误类型定义

use axum::http::StatusCode;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use super::ErrorCategory;
use super::auth::AuthError;

/// 对外隐藏内部细节时使用的统一提示
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// 应用主要错误类型
#[derive(Debug, Error)]
pub enum ChirpyError {
    /// 请求参数错误
    #[error("{message}")]
    Validation { message: String },

    /// 凭证缺失、无效或已过期
    #[error("{message}")]
    Unauthorized {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 已认证但无权执行该操作
    #[error("{message}")]
    Forbidden { message: String },

    /// 资源不存在
    #[error("{resource_type} not found: {identifier}")]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    /// 资源冲突（例如邮箱已被注册）
    #[error("{message}")]
    Conflict { message: String },

    /// 数据库相关错误
    #[error("数据库错误: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 系统内部错误（哈希、签名、随机源等）
    #[error("内部错误: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 配置相关错误
    #[error("配置错误: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// IO相关错误
    #[error("IO错误: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl ChirpyError {
    /// 将错误转换为HTTP状态码和错误代码
    #[must_use]
    pub const fn to_http_response_parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND"),
            Self::Conflict { .. } => (StatusCode::CONFLICT, "RESOURCE_CONFLICT"),
            Self::Database { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Config { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Self::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }

    /// 错误分类，用于决定日志级别
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        if self.to_http_response_parts().0.is_server_error() {
            ErrorCategory::Server
        } else {
            ErrorCategory::Client
        }
    }

    /// 可以安全返回给客户端的错误信息
    ///
    /// 服务端错误统一返回固定提示，不泄露哈希、令牌或密钥。
    #[must_use]
    pub fn public_message(&self) -> String {
        match self.category() {
            ErrorCategory::Server => GENERIC_ERROR_MESSAGE.to_string(),
            ErrorCategory::Client => self.to_string(),
        }
    }

    /// 创建参数错误
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// 创建未认证错误
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的未认证错误，来源只写日志
    pub fn unauthorized_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Unauthorized {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建权限错误
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// 创建资源未找到错误
    pub fn not_found<R: Into<String>, I: ToString>(resource_type: R, identifier: I) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.to_string(),
        }
    }

    /// 创建资源冲突错误
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// 创建带来源的数据库错误
    pub fn database_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Database {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建带来源的内部错误
    pub fn internal_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建配置错误
    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的配置错误
    pub fn config_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

// 认证错误转换：凭证问题统一为 401，超长密码为 400，其余为内部错误
impl From<AuthError> for ChirpyError {
    fn from(err: AuthError) -> Self {
        if let AuthError::PasswordTooLong { max } = err {
            return Self::validation(format!("Password must be at most {max} bytes"));
        }
        if err.is_credential_failure() {
            Self::unauthorized_with_source("Unauthorized", err)
        } else {
            Self::internal_with_source("认证组件失败", err)
        }
    }
}

impl From<DbErr> for ChirpyError {
    fn from(err: DbErr) -> Self {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            return Self::conflict("Resource already exists");
        }
        Self::database_with_source("数据库操作失败", err)
    }
}

impl From<std::io::Error> for ChirpyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: "IO操作失败".to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for ChirpyError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("配置文件解析失败", err)
    }
}

impl From<tokio::task::JoinError> for ChirpyError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal_with_source("后台任务执行失败", err)
    }
}
