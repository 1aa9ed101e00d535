//! # 用户服务
//!
//! 注册、修改凭证、Chirpy Red 升级和开发环境重置。

use entity::users;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::PasswordHasher;
use crate::auth::types::MAX_PASSWORD_BYTES;
use crate::ensure_valid;
use crate::error::{ChirpyError, Result};
use crate::logging::{LogComponent, LogStage};
use crate::store::CredentialStore;
use crate::{linfo, lwarn};

/// 用户服务
pub struct UserService {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
}

impl UserService {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// 注册新用户，邮箱重复时返回 409
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        request_id: &str,
    ) -> Result<users::Model> {
        let email = email.trim();
        ensure_valid!(!email.is_empty(), "Email is required");
        ensure_valid!(!password.is_empty(), "Password is required");
        ensure_valid!(
            password.len() <= MAX_PASSWORD_BYTES,
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        );

        let hashed = self.hasher.hash_blocking(password.to_string()).await?;
        let user = self.store.create_user(email, &hashed).await?;

        linfo!(
            request_id,
            LogStage::Request,
            LogComponent::Handler,
            "user_registered",
            &format!("user_id={}", user.id)
        );
        Ok(user)
    }

    /// 修改调用者自己的邮箱和密码
    pub async fn update_credentials(
        &self,
        caller: Uuid,
        email: &str,
        password: &str,
        request_id: &str,
    ) -> Result<users::Model> {
        let email = email.trim();
        ensure_valid!(!email.is_empty(), "Email is required");
        ensure_valid!(!password.is_empty(), "Password is required");
        ensure_valid!(
            password.len() <= MAX_PASSWORD_BYTES,
            "Password must be at most {} bytes",
            MAX_PASSWORD_BYTES
        );

        let hashed = self.hasher.hash_blocking(password.to_string()).await?;
        let user = self
            .store
            .update_user_credentials(caller, email, &hashed)
            .await?;

        linfo!(
            request_id,
            LogStage::Request,
            LogComponent::Handler,
            "user_credentials_updated",
            &format!("user_id={}", user.id)
        );
        Ok(user)
    }

    /// 升级为 Chirpy Red
    pub async fn upgrade_to_red(&self, user_id: Uuid, request_id: &str) -> Result<users::Model> {
        let Some(user) = self.store.upgrade_user(user_id).await? else {
            lwarn!(
                request_id,
                LogStage::Request,
                LogComponent::Handler,
                "upgrade_unknown_user",
                &format!("user_id={user_id}")
            );
            return Err(ChirpyError::not_found("User", user_id));
        };

        linfo!(
            request_id,
            LogStage::Request,
            LogComponent::Handler,
            "user_upgraded",
            &format!("user_id={user_id}")
        );
        Ok(user)
    }

    /// 删除所有用户，调用方负责平台检查
    pub async fn delete_all(&self, request_id: &str) -> Result<u64> {
        let deleted = self.store.delete_all_users().await?;
        lwarn!(
            request_id,
            LogStage::Request,
            LogComponent::Handler,
            "users_reset",
            &format!("删除全部用户: {deleted}")
        );
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DatabaseStore;
    use crate::testing::{TEST_HASH_COST, create_test_db};

    async fn service() -> UserService {
        let db = create_test_db().await.unwrap();
        UserService::new(
            Arc::new(DatabaseStore::new(Arc::new(db))),
            PasswordHasher::with_cost(TEST_HASH_COST),
        )
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service().await;
        let user = service.register(" a@b.com ", "pw", "req").await.unwrap();

        assert_eq!(user.email, "a@b.com");
        assert_ne!(user.hashed_password, "pw");
        assert!(
            PasswordHasher::default()
                .verify(&user.hashed_password, "pw")
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_register_validation_and_conflict() {
        let service = service().await;
        assert!(matches!(
            service.register("", "pw", "req").await.unwrap_err(),
            ChirpyError::Validation { .. }
        ));
        assert!(matches!(
            service.register("a@b.com", "", "req").await.unwrap_err(),
            ChirpyError::Validation { .. }
        ));

        service.register("a@b.com", "pw", "req").await.unwrap();
        assert!(matches!(
            service.register("a@b.com", "pw", "req").await.unwrap_err(),
            ChirpyError::Conflict { .. }
        ));
    }

    #[tokio::test]
    async fn test_long_password_is_rejected() {
        let service = service().await;
        let prefix = "A".repeat(MAX_PASSWORD_BYTES);

        let err = service
            .register("a@b.com", &format!("{prefix}x"), "req")
            .await
            .unwrap_err();
        assert!(matches!(err, ChirpyError::Validation { .. }));
        assert_eq!(err.public_message(), "Password must be at most 72 bytes");

        let user = service.register("a@b.com", &prefix, "req").await.unwrap();
        assert!(matches!(
            service
                .update_credentials(user.id, "a@b.com", &format!("{prefix}y"), "req")
                .await
                .unwrap_err(),
            ChirpyError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_update_credentials() {
        let service = service().await;
        let user = service.register("a@b.com", "pw", "req").await.unwrap();

        let updated = service
            .update_credentials(user.id, "c@d.com", "pw2", "req")
            .await
            .unwrap();
        assert_eq!(updated.id, user.id);
        assert_eq!(updated.email, "c@d.com");
        assert!(
            PasswordHasher::default()
                .verify(&updated.hashed_password, "pw2")
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_upgrade_to_red() {
        let service = service().await;
        let user = service.register("a@b.com", "pw", "req").await.unwrap();

        assert!(service.upgrade_to_red(user.id, "req").await.unwrap().is_chirpy_red);
        assert!(matches!(
            service.upgrade_to_red(Uuid::new_v4(), "req").await.unwrap_err(),
            ChirpyError::NotFound { .. }
        ));
    }
}
