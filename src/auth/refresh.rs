//! # 刷新令牌生成

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::AuthError;

/// 刷新令牌随机字节数
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// 刷新令牌生成器
///
/// 令牌是操作系统随机源产生的 32 字节，十六进制编码为 64 个字符。
/// 唯一性由存储层主键保证，这里不做查重。
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshTokenIssuer;

impl RefreshTokenIssuer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// 生成新的刷新令牌
    pub fn generate(&self) -> Result<String, AuthError> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng.try_fill_bytes(&mut bytes)?;
        Ok(hex::encode(bytes))
    }
}
