//! # 密码哈希
//!
//! bcrypt 加盐哈希与校验。两者都是 CPU 密集操作，异步上下文中应通过
//! `hash_blocking` / `verify_blocking` 放到阻塞线程池执行。

use crate::auth::types::{DEFAULT_HASH_COST, MAX_PASSWORD_BYTES};
use crate::error::{AuthError, Result};

/// 密码哈希器
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    /// 使用默认成本 12 创建
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cost: DEFAULT_HASH_COST,
        }
    }

    /// 指定成本，测试中使用较低的成本
    #[must_use]
    pub const fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }

    /// 计算密码哈希，每次调用都使用新的随机盐
    ///
    /// 超过 72 字节的密码返回 `PasswordTooLong`，不做截断。
    pub fn hash(&self, password: &str) -> std::result::Result<String, AuthError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(AuthError::PasswordTooLong {
                max: MAX_PASSWORD_BYTES,
            });
        }
        Ok(bcrypt::non_truncating_hash(password, self.cost)?)
    }

    /// 校验密码
    ///
    /// 密码错误返回 `Ok(false)`；只有哈希本身格式错误时才返回错误。
    /// 超长密码不可能有对应的哈希，直接视为不匹配。
    pub fn verify(&self, hash: &str, password: &str) -> std::result::Result<bool, AuthError> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Ok(false);
        }
        Ok(bcrypt::non_truncating_verify(password, hash)?)
    }

    /// 在阻塞线程池上计算哈希
    pub async fn hash_blocking(&self, password: String) -> Result<String> {
        let hasher = *self;
        let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;
        Ok(hashed)
    }

    /// 在阻塞线程池上校验密码
    pub async fn verify_blocking(&self, hash: String, password: String) -> Result<bool> {
        let hasher = *self;
        let matched =
            tokio::task::spawn_blocking(move || hasher.verify(&hash, &password)).await??;
        Ok(matched)
    }
}
