//! # 用户处理器

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::api::extract::{AuthenticatedUser, JsonBody};
use crate::api::middleware::RequestId;
use crate::api::response::UserResponse;
use crate::api::server::AppState;
use crate::error::ChirpyError;

/// 注册与修改凭证共用的请求体
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// 注册用户
pub async fn register(
    State(state): State<AppState>,
    request_id: RequestId,
    JsonBody(request): JsonBody<CredentialsRequest>,
) -> Result<impl IntoResponse, ChirpyError> {
    let user = state
        .users
        .register(&request.email, &request.password, &request_id)
        .await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// 修改当前用户的邮箱和密码
pub async fn update_credentials(
    State(state): State<AppState>,
    request_id: RequestId,
    AuthenticatedUser(caller): AuthenticatedUser,
    JsonBody(request): JsonBody<CredentialsRequest>,
) -> Result<impl IntoResponse, ChirpyError> {
    let user = state
        .users
        .update_credentials(caller, &request.email, &request.password, &request_id)
        .await?;
    Ok(Json(UserResponse::from(user)))
}
