//! # 会话管理
//!
//! 登录、刷新和撤销三个操作。刷新令牌的状态保存在 `CredentialStore` 中，
//! 本模块不持有任何可变共享状态。

use chrono::Utc;
use entity::users;
use std::sync::Arc;

use crate::auth::jwt::TokenCodec;
use crate::auth::password::PasswordHasher;
use crate::auth::refresh::RefreshTokenIssuer;
use crate::auth::types::{ACCESS_TOKEN_TTL, REFRESH_TOKEN_TTL, RefreshTokenState};
use crate::error::{ChirpyError, Result};
use crate::logging::{LogComponent, LogStage};
use crate::store::CredentialStore;
use crate::{linfo, lwarn};

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub user: users::Model,
    pub access_token: String,
    pub refresh_token: String,
}

/// 会话管理器
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    hasher: PasswordHasher,
    codec: TokenCodec,
    issuer: RefreshTokenIssuer,
}

impl SessionManager {
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: PasswordHasher,
        codec: TokenCodec,
        issuer: RefreshTokenIssuer,
    ) -> Self {
        Self {
            store,
            hasher,
            codec,
            issuer,
        }
    }

    /// 邮箱密码登录，成功时返回访问令牌和新的刷新令牌
    ///
    /// 邮箱不存在返回 404，密码错误返回 401。
    pub async fn login(&self, email: &str, password: &str, request_id: &str) -> Result<LoginOutput> {
        let user = self
            .store
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| ChirpyError::not_found("User", email))?;

        let matched = self
            .hasher
            .verify_blocking(user.hashed_password.clone(), password.to_string())
            .await?;
        if !matched {
            lwarn!(
                request_id,
                LogStage::Authentication,
                LogComponent::Session,
                "login_failed",
                &format!("密码错误: user_id={}", user.id)
            );
            return Err(ChirpyError::unauthorized("Incorrect email or password"));
        }

        let access_token = self.codec.issue(user.id, ACCESS_TOKEN_TTL)?;
        let refresh_token = self.issuer.generate()?;
        let expires_at = Utc::now().naive_utc() + REFRESH_TOKEN_TTL;

        // 持久化失败（包括主键冲突）一律按内部错误处理，不返回任何令牌
        self.store
            .create_refresh_token(&refresh_token, user.id, expires_at)
            .await
            .map_err(|e| ChirpyError::internal_with_source("保存刷新令牌失败", e))?;

        linfo!(
            request_id,
            LogStage::Authentication,
            LogComponent::Session,
            "login_ok",
            &format!("user_id={}", user.id)
        );

        Ok(LoginOutput {
            user,
            access_token,
            refresh_token,
        })
    }

    /// 用刷新令牌换取新的访问令牌，刷新令牌本身不轮换也不延期
    ///
    /// 不存在、已过期、已撤销对调用者一律表现为 401。
    pub async fn refresh(&self, refresh_token: &str, request_id: &str) -> Result<String> {
        let Some(record) = self.store.find_refresh_token(refresh_token).await? else {
            lwarn!(
                request_id,
                LogStage::Authentication,
                LogComponent::Session,
                "refresh_rejected",
                "刷新令牌不存在"
            );
            return Err(ChirpyError::unauthorized("Unauthorized"));
        };

        let state = RefreshTokenState::of(&record, Utc::now().naive_utc());
        if !state.is_active() {
            lwarn!(
                request_id,
                LogStage::Authentication,
                LogComponent::Session,
                "refresh_rejected",
                &format!("刷新令牌状态为 {}: user_id={}", state.as_str(), record.user_id)
            );
            return Err(ChirpyError::unauthorized("Unauthorized"));
        }

        Ok(self.codec.issue(record.user_id, ACCESS_TOKEN_TTL)?)
    }

    /// 撤销刷新令牌，重复撤销或令牌不存在都视为成功
    pub async fn revoke(&self, refresh_token: &str, request_id: &str) -> Result<()> {
        self.store.revoke_refresh_token(refresh_token).await?;
        linfo!(
            request_id,
            LogStage::Authentication,
            LogComponent::Session,
            "refresh_revoked",
            "刷新令牌已撤销"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DatabaseStore;
    use crate::testing::{TEST_HASH_COST, create_test_db};
    use chrono::Duration;

    struct Fixture {
        store: Arc<DatabaseStore>,
        sessions: SessionManager,
        codec: TokenCodec,
    }

    async fn fixture() -> Fixture {
        let db = create_test_db().await.unwrap();
        let store = Arc::new(DatabaseStore::new(Arc::new(db)));
        let codec = TokenCodec::new(b"session-secret");
        let sessions = SessionManager::new(
            store.clone(),
            PasswordHasher::with_cost(TEST_HASH_COST),
            codec.clone(),
            RefreshTokenIssuer::new(),
        );
        Fixture {
            store,
            sessions,
            codec,
        }
    }

    async fn register(fixture: &Fixture, email: &str, password: &str) -> users::Model {
        let hash = PasswordHasher::with_cost(TEST_HASH_COST)
            .hash(password)
            .unwrap();
        fixture.store.create_user(email, &hash).await.unwrap()
    }

    #[tokio::test]
    async fn test_login_success() {
        let fixture = fixture().await;
        let user = register(&fixture, "a@b.com", "pw").await;

        let output = fixture.sessions.login("a@b.com", "pw", "req").await.unwrap();
        assert_eq!(output.user.id, user.id);
        assert_eq!(fixture.codec.verify(&output.access_token).unwrap(), user.id);
        assert_eq!(output.refresh_token.len(), 64);

        let record = fixture
            .store
            .find_refresh_token(&output.refresh_token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.user_id, user.id);
        assert!(record.revoked_at.is_none());
        let lifetime = record.expires_at - record.created_at;
        assert!((lifetime - REFRESH_TOKEN_TTL).num_seconds().abs() <= 1);
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_not_found() {
        let fixture = fixture().await;
        let err = fixture
            .sessions
            .login("nobody@b.com", "pw", "req")
            .await
            .unwrap_err();
        assert!(matches!(err, ChirpyError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let fixture = fixture().await;
        register(&fixture, "a@b.com", "pw").await;

        let err = fixture
            .sessions
            .login("a@b.com", "wrong", "req")
            .await
            .unwrap_err();
        assert!(matches!(err, ChirpyError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_refresh_then_revoke() {
        let fixture = fixture().await;
        let user = register(&fixture, "a@b.com", "pw").await;
        let output = fixture.sessions.login("a@b.com", "pw", "req").await.unwrap();

        let access = fixture
            .sessions
            .refresh(&output.refresh_token, "req")
            .await
            .unwrap();
        assert_eq!(fixture.codec.verify(&access).unwrap(), user.id);

        fixture
            .sessions
            .revoke(&output.refresh_token, "req")
            .await
            .unwrap();
        // 重复撤销仍然成功
        fixture
            .sessions
            .revoke(&output.refresh_token, "req")
            .await
            .unwrap();

        let err = fixture
            .sessions
            .refresh(&output.refresh_token, "req")
            .await
            .unwrap_err();
        assert!(matches!(err, ChirpyError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_refresh_expired_and_unknown() {
        let fixture = fixture().await;
        let user = register(&fixture, "a@b.com", "pw").await;
        let past = Utc::now().naive_utc() - Duration::days(1);
        fixture
            .store
            .create_refresh_token("expired-token", user.id, past)
            .await
            .unwrap();

        for token in ["expired-token", "unknown-token"] {
            let err = fixture.sessions.refresh(token, "req").await.unwrap_err();
            assert!(matches!(err, ChirpyError::Unauthorized { .. }));
            assert_eq!(err.public_message(), "Unauthorized");
        }
    }

    #[tokio::test]
    async fn test_login_issues_distinct_refresh_tokens() {
        let fixture = fixture().await;
        register(&fixture, "a@b.com", "pw").await;

        let first = fixture.sessions.login("a@b.com", "pw", "req").await.unwrap();
        let second = fixture.sessions.login("a@b.com", "pw", "req").await.unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);

        fixture
            .sessions
            .revoke(&first.refresh_token, "req")
            .await
            .unwrap();
        assert!(
            fixture
                .sessions
                .refresh(&second.refresh_token, "req")
                .await
                .is_ok()
        );
    }
}
