//! # API 响应结构
//!
//! 错误统一返回 `{"error": "..."}`。`ChirpyError` 到 HTTP 响应的转换只在这里发生。

use axum::Json;
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use entity::{chirps, users};
use serde::Serialize;
use std::error::Error as StdError;
use uuid::Uuid;

use crate::auth::LoginOutput;
use crate::error::{ChirpyError, ErrorCategory};
use crate::logging::{LogComponent, LogStage};
use crate::{ldebug, lerror};

/// # 标准错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 展开错误链，用于日志
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl IntoResponse for ChirpyError {
    fn into_response(self) -> Response {
        let (status, code) = self.to_http_response_parts();
        let detail = error_chain(&self);

        match self.category() {
            ErrorCategory::Server => lerror!(
                "-",
                LogStage::Request,
                LogComponent::Handler,
                code,
                &format!("{status}: {detail}")
            ),
            ErrorCategory::Client => ldebug!(
                "-",
                LogStage::Request,
                LogComponent::Handler,
                code,
                &format!("{status}: {detail}")
            ),
        }

        (
            status,
            Json(ErrorResponse {
                error: self.public_message(),
            }),
        )
            .into_response()
    }
}

/// 用户响应，不包含密码哈希
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub email: String,
    pub is_chirpy_red: bool,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        Self {
            id: user.id,
            created_at: user.created_at,
            updated_at: user.updated_at,
            email: user.email,
            is_chirpy_red: user.is_chirpy_red,
        }
    }
}

/// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub token: String,
    pub refresh_token: String,
}

impl From<LoginOutput> for LoginResponse {
    fn from(output: LoginOutput) -> Self {
        Self {
            user: output.user.into(),
            token: output.access_token,
            refresh_token: output.refresh_token,
        }
    }
}

/// 刷新响应
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Chirp 响应
#[derive(Debug, Serialize)]
pub struct ChirpResponse {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub body: String,
    pub user_id: Uuid,
}

impl From<chirps::Model> for ChirpResponse {
    fn from(chirp: chirps::Model) -> Self {
        Self {
            id: chirp.id,
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body,
            user_id: chirp.user_id,
        }
    }
}
