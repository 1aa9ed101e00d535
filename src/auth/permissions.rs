//! # 操作授权
//!
//! 已认证调用者针对具体操作的检查。失败统一为 403，
//! 与 401（身份未知）和 404（资源不存在）区分开。

use uuid::Uuid;

use crate::config::Platform;
use crate::error::{ChirpyError, Result};
use crate::logging::{LogComponent, LogStage};
use crate::lwarn;

/// 授权检查
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationGate {
    platform: Platform,
}

impl AuthorizationGate {
    #[must_use]
    pub const fn new(platform: Platform) -> Self {
        Self { platform }
    }

    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// 调用者必须是资源所有者
    pub fn ensure_owner(&self, caller: Uuid, owner: Uuid, request_id: &str) -> Result<()> {
        if caller == owner {
            return Ok(());
        }
        lwarn!(
            request_id,
            LogStage::Authorization,
            LogComponent::Auth,
            "ownership_denied",
            &format!("caller={caller} owner={owner}")
        );
        Err(ChirpyError::forbidden("You are not the owner of this resource"))
    }

    /// 破坏性管理操作只允许在 dev 平台执行
    pub fn ensure_dev_platform(&self, request_id: &str) -> Result<()> {
        if self.platform.is_dev() {
            return Ok(());
        }
        lwarn!(
            request_id,
            LogStage::Authorization,
            LogComponent::Auth,
            "platform_denied",
            &format!("platform={}", self.platform)
        );
        Err(ChirpyError::forbidden("Forbidden outside the dev platform"))
    }
}
