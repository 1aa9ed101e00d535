//! # Chirp 服务

use entity::chirps;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::AuthorizationGate;
use crate::ensure_valid;
use crate::error::{ChirpyError, Result};
use crate::linfo;
use crate::logging::{LogComponent, LogStage};
use crate::store::{ChirpStore, SortOrder};

/// Chirp 最大字符数
pub const MAX_CHIRP_LENGTH: usize = 140;

/// 需要屏蔽的词（小写）
const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

const CENSORED: &str = "****";

/// 屏蔽敏感词
///
/// 按单个空格切分，只替换完整单词且不区分大小写；带标点的单词保持原样。
#[must_use]
pub fn censor(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                CENSORED
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Chirp 服务
pub struct ChirpService {
    store: Arc<dyn ChirpStore>,
    gate: AuthorizationGate,
}

impl ChirpService {
    #[must_use]
    pub fn new(store: Arc<dyn ChirpStore>, gate: AuthorizationGate) -> Self {
        Self { store, gate }
    }

    /// 发布 chirp
    pub async fn create(&self, caller: Uuid, body: &str, request_id: &str) -> Result<chirps::Model> {
        ensure_valid!(
            body.chars().count() <= MAX_CHIRP_LENGTH,
            "Chirp is too long"
        );

        let chirp = self.store.create_chirp(caller, &censor(body)).await?;
        linfo!(
            request_id,
            LogStage::Request,
            LogComponent::Handler,
            "chirp_created",
            &format!("chirp_id={} user_id={caller}", chirp.id)
        );
        Ok(chirp)
    }

    /// 列出 chirp
    pub async fn list(&self, author_id: Option<Uuid>, order: SortOrder) -> Result<Vec<chirps::Model>> {
        self.store.list_chirps(author_id, order).await
    }

    /// 获取单个 chirp
    pub async fn get(&self, id: Uuid) -> Result<chirps::Model> {
        self.store
            .find_chirp(id)
            .await?
            .ok_or_else(|| ChirpyError::not_found("Chirp", id))
    }

    /// 删除 chirp，只有作者本人可以删除
    ///
    /// 资源不存在时无论调用者是谁都返回 404。
    pub async fn delete(&self, caller: Uuid, id: Uuid, request_id: &str) -> Result<()> {
        let chirp = self.get(id).await?;
        self.gate.ensure_owner(caller, chirp.user_id, request_id)?;
        self.store.delete_chirp(id).await?;

        linfo!(
            request_id,
            LogStage::Request,
            LogComponent::Handler,
            "chirp_deleted",
            &format!("chirp_id={id}")
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Platform;
    use crate::store::{CredentialStore, DatabaseStore};
    use crate::testing::create_test_db;

    async fn setup() -> (ChirpService, Arc<DatabaseStore>) {
        let db = create_test_db().await.unwrap();
        let store = Arc::new(DatabaseStore::new(Arc::new(db)));
        let service = ChirpService::new(store.clone(), AuthorizationGate::new(Platform::Production));
        (service, store)
    }

    #[test]
    fn test_censor() {
        assert_eq!(
            censor("This is a kerfuffle opinion I need to share with the world"),
            "This is a **** opinion I need to share with the world"
        );
        assert_eq!(censor("Sharbert FORNAX"), "**** ****");
        assert_eq!(censor("kerfuffle! stays"), "kerfuffle! stays");
        assert_eq!(censor("double  space"), "double  space");
    }

    #[tokio::test]
    async fn test_create_enforces_length() {
        let (service, store) = setup().await;
        let user = store.create_user("a@b.com", "hash").await.unwrap();

        let exact = "a".repeat(MAX_CHIRP_LENGTH);
        assert!(service.create(user.id, &exact, "req").await.is_ok());

        let too_long = "a".repeat(MAX_CHIRP_LENGTH + 1);
        let err = service.create(user.id, &too_long, "req").await.unwrap_err();
        assert_eq!(err.public_message(), "Chirp is too long");

        // 按字符计数，而不是字节
        let multibyte = "é".repeat(MAX_CHIRP_LENGTH);
        assert!(service.create(user.id, &multibyte, "req").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_censors_body() {
        let (service, store) = setup().await;
        let user = store.create_user("a@b.com", "hash").await.unwrap();
        let chirp = service.create(user.id, "what a Fornax day", "req").await.unwrap();
        assert_eq!(chirp.body, "what a **** day");
        assert_eq!(chirp.user_id, user.id);
    }

    #[tokio::test]
    async fn test_delete_ownership() {
        let (service, store) = setup().await;
        let alice = store.create_user("alice@b.com", "hash").await.unwrap();
        let bob = store.create_user("bob@b.com", "hash").await.unwrap();
        let chirp = service.create(alice.id, "mine", "req").await.unwrap();

        let err = service.delete(bob.id, chirp.id, "req").await.unwrap_err();
        assert!(matches!(err, ChirpyError::Forbidden { .. }));

        let err = service.delete(bob.id, Uuid::new_v4(), "req").await.unwrap_err();
        assert!(matches!(err, ChirpyError::NotFound { .. }));

        service.delete(alice.id, chirp.id, "req").await.unwrap();
        assert!(matches!(
            service.get(chirp.id).await.unwrap_err(),
            ChirpyError::NotFound { .. }
        ));
    }
}
