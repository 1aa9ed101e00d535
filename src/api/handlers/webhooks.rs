//! # Polka webhook 处理器

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::RequestId;
use crate::api::server::AppState;
use crate::error::ChirpyError;
use crate::ldebug;
use crate::logging::{LogComponent, LogStage};

/// 唯一处理的事件
pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// webhook 请求体
#[derive(Debug, Deserialize)]
pub struct PolkaWebhook {
    pub event: String,
    #[serde(default)]
    pub data: Option<PolkaWebhookData>,
}

#[derive(Debug, Deserialize)]
pub struct PolkaWebhookData {
    pub user_id: Uuid,
}

/// 处理 Polka 事件
pub async fn polka_webhook(
    State(state): State<AppState>,
    request_id: RequestId,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ChirpyError> {
    // 先校验密钥，再解析请求体
    state
        .authenticator
        .authenticate_api_key(&headers, &state.config.auth.polka_key, &request_id)?;

    let webhook: PolkaWebhook = serde_json::from_slice(&body)
        .map_err(|e| ChirpyError::validation(format!("Invalid request body: {e}")))?;

    if webhook.event != USER_UPGRADED_EVENT {
        ldebug!(
            request_id,
            LogStage::Request,
            LogComponent::Handler,
            "webhook_ignored",
            &format!("event={}", webhook.event)
        );
        return Ok(StatusCode::NO_CONTENT);
    }

    let data = webhook
        .data
        .ok_or_else(|| ChirpyError::validation("Missing webhook data"))?;
    state.users.upgrade_to_red(data.user_id, &request_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
