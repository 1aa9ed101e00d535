//! # 请求提取器
//!
//! 认证失败、JSON 解析失败都转换为 `ChirpyError`，保证错误响应格式统一。

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::middleware::RequestId;
use super::server::AppState;
use crate::auth::AuthHeaderParser;
use crate::error::ChirpyError;
use crate::logging::{LogComponent, LogStage};
use crate::lwarn;

fn request_id_of(parts: &Parts) -> String {
    parts
        .extensions
        .get::<RequestId>()
        .map_or_else(|| "-".to_string(), ToString::to_string)
}

/// 通过 Bearer 访问令牌认证的调用者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Uuid);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ChirpyError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let request_id = request_id_of(parts);
        state
            .authenticator
            .authenticate(&parts.headers, &request_id)
            .map(Self)
    }
}

/// 原样取出的 Bearer 凭证，用于刷新和撤销接口（凭证是刷新令牌而不是 JWT）
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = ChirpyError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match AuthHeaderParser::extract_bearer(&parts.headers) {
            Ok(token) => Ok(Self(token.to_string())),
            Err(err) => {
                lwarn!(
                    request_id_of(parts),
                    LogStage::Authentication,
                    LogComponent::Auth,
                    "bearer_missing",
                    &format!("{err}")
                );
                Err(err.into())
            }
        }
    }
}

/// JSON 请求体，解析失败返回 400
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ChirpyError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(&rejection)),
        }
    }
}

fn json_rejection(rejection: &JsonRejection) -> ChirpyError {
    ChirpyError::validation(format!("Invalid request body: {}", rejection.body_text()))
}

/// 解析路径中的 UUID，格式错误返回 400
pub fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, ChirpyError> {
    raw.parse()
        .map_err(|_| ChirpyError::validation(format!("Invalid {what} id")))
}
