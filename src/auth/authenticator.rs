//! # 请求认证
//!
//! 把 `Authorization` 头解析为调用者身份。任何失败都对外表现为 401，
//! 具体原因只写日志。

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::auth::header_parser::AuthHeaderParser;
use crate::auth::jwt::TokenCodec;
use crate::error::{AuthError, ChirpyError, Result};
use crate::logging::{LogComponent, LogStage};
use crate::{ldebug, lwarn};

/// 请求认证器
#[derive(Debug, Clone)]
pub struct RequestAuthenticator {
    codec: TokenCodec,
}

impl RequestAuthenticator {
    #[must_use]
    pub const fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    /// 访问令牌编解码器
    #[must_use]
    pub const fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// 校验 Bearer 访问令牌并返回用户ID
    pub fn authenticate(&self, headers: &HeaderMap, request_id: &str) -> Result<Uuid> {
        let outcome = AuthHeaderParser::extract_bearer(headers)
            .and_then(|token| self.codec.verify(token));

        match outcome {
            Ok(user_id) => {
                ldebug!(
                    request_id,
                    LogStage::Authentication,
                    LogComponent::Auth,
                    "bearer_ok",
                    &format!("user_id={user_id}")
                );
                Ok(user_id)
            }
            Err(err) => Err(Self::reject(request_id, "bearer_rejected", err)),
        }
    }

    /// 校验 webhook 的 `ApiKey` 凭证
    pub fn authenticate_api_key(
        &self,
        headers: &HeaderMap,
        expected_key: &str,
        request_id: &str,
    ) -> Result<()> {
        match AuthHeaderParser::extract_api_key(headers) {
            Ok(key) if key == expected_key => Ok(()),
            Ok(_) => Err(Self::reject(
                request_id,
                "api_key_rejected",
                AuthError::InvalidToken("api key does not match".to_string()),
            )),
            Err(err) => Err(Self::reject(request_id, "api_key_rejected", err)),
        }
    }

    fn reject(request_id: &str, operation: &str, err: AuthError) -> ChirpyError {
        lwarn!(
            request_id,
            LogStage::Authentication,
            LogComponent::Auth,
            operation,
            &format!("认证失败: {err}")
        );
        // 凭证类错误映射为 401，其余（理论上不会出现）映射为 500
        err.into()
    }
}
