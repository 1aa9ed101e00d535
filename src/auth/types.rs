//! # 认证类型定义
//!
//! 定义认证相关的数据结构和常量

use chrono::{Duration, NaiveDateTime, Utc};
use entity::refresh_tokens;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 访问令牌签发者
pub const TOKEN_ISSUER: &str = "chirpy";

/// 访问令牌有效期
pub const ACCESS_TOKEN_TTL: Duration = Duration::hours(1);

/// 刷新令牌有效期
pub const REFRESH_TOKEN_TTL: Duration = Duration::days(60);

/// bcrypt 默认成本
pub const DEFAULT_HASH_COST: u32 = 12;

/// bcrypt 只使用密码的前 72 个字节，更长的密码直接拒绝
pub const MAX_PASSWORD_BYTES: usize = 72;

/// JWT 载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// 签发者
    pub iss: String,
    /// 用户ID
    pub sub: String,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
}

impl JwtClaims {
    /// 创建新的 JWT 载荷
    #[must_use]
    pub fn new(subject: Uuid, ttl: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            iss: TOKEN_ISSUER.to_string(),
            sub: subject.to_string(),
            iat: now,
            exp: now + ttl.num_seconds(),
        }
    }

    /// 检查 JWT 是否过期，`now >= exp` 即视为过期
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// 获取用户ID
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        self.sub.parse()
    }
}

/// 刷新令牌状态
///
/// `Active` 只能转移到 `Expired` 或 `Revoked`，后两者都是终态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTokenState {
    Active,
    Expired,
    Revoked,
}

impl RefreshTokenState {
    /// 根据存储的记录和当前时间计算状态
    ///
    /// 撤销优先于过期。
    #[must_use]
    pub fn of(record: &refresh_tokens::Model, now: NaiveDateTime) -> Self {
        if record.revoked_at.is_some() {
            Self::Revoked
        } else if now >= record.expires_at {
            Self::Expired
        } else {
            Self::Active
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::Revoked => "revoked",
        }
    }
}
