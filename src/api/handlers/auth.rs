//! # 会话处理器
//!
//! 登录、刷新访问令牌、撤销刷新令牌

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::api::extract::{BearerToken, JsonBody};
use crate::api::middleware::RequestId;
use crate::api::response::{LoginResponse, TokenResponse};
use crate::api::server::AppState;
use crate::error::ChirpyError;

/// 登录请求
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// 登录
pub async fn login(
    State(state): State<AppState>,
    request_id: RequestId,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ChirpyError> {
    let output = state
        .sessions
        .login(request.email.trim(), &request.password, &request_id)
        .await?;
    Ok(Json(LoginResponse::from(output)))
}

/// 用刷新令牌换取新的访问令牌
pub async fn refresh(
    State(state): State<AppState>,
    request_id: RequestId,
    BearerToken(refresh_token): BearerToken,
) -> Result<impl IntoResponse, ChirpyError> {
    let token = state.sessions.refresh(&refresh_token, &request_id).await?;
    Ok(Json(TokenResponse { token }))
}

/// 撤销刷新令牌
pub async fn revoke(
    State(state): State<AppState>,
    request_id: RequestId,
    BearerToken(refresh_token): BearerToken,
) -> Result<impl IntoResponse, ChirpyError> {
    state.sessions.revoke(&refresh_token, &request_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
