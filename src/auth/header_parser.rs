//! # 认证头解析
//!
//! 从 `Authorization` 头中取出凭证，支持两种方案：
//! - `Authorization: Bearer <token>`，访问令牌或刷新令牌
//! - `Authorization: ApiKey <key>`，Polka webhook 的预共享密钥

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

use crate::error::AuthError;

/// Bearer 方案前缀，大小写敏感
pub const BEARER_PREFIX: &str = "Bearer ";

/// API 密钥方案前缀，大小写敏感
pub const API_KEY_PREFIX: &str = "ApiKey ";

/// 认证头解析器
pub struct AuthHeaderParser;

impl AuthHeaderParser {
    /// 提取 Bearer 令牌
    pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
        Self::extract_with_prefix(headers, BEARER_PREFIX)
    }

    /// 提取 API 密钥
    pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, AuthError> {
        Self::extract_with_prefix(headers, API_KEY_PREFIX)
    }

    fn extract_with_prefix<'a>(
        headers: &'a HeaderMap,
        prefix: &'static str,
    ) -> Result<&'a str, AuthError> {
        let value = headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingCredential("Authorization header"))?
            .to_str()
            .map_err(|_| AuthError::MissingCredential("non-ASCII Authorization header"))?;

        match value.strip_prefix(prefix) {
            Some(credential) if !credential.is_empty() => Ok(credential),
            Some(_) => Err(AuthError::MissingCredential("empty credential")),
            None => Err(AuthError::MissingCredential("unsupported authorization scheme")),
        }
    }
}
