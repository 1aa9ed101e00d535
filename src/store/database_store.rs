//! # Sea-ORM 存储实现

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use entity::{chirps, refresh_tokens, users};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{ChirpStore, CredentialStore, SortOrder};
use crate::error::{ChirpyError, Result};
use crate::ldebug;
use crate::logging::{LogComponent, LogStage};

/// 基于数据库连接的存储
#[derive(Debug, Clone)]
pub struct DatabaseStore {
    db: Arc<DatabaseConnection>,
}

impl DatabaseStore {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[async_trait]
impl CredentialStore for DatabaseStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&*self.db)
            .await?;
        Ok(user)
    }

    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<users::Model> {
        let now = now();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            hashed_password: Set(hashed_password.to_string()),
            is_chirpy_red: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(user.insert(&*self.db).await?)
    }

    async fn update_user_credentials(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<users::Model> {
        let user = users::Entity::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ChirpyError::not_found("User", id))?;

        let mut user: users::ActiveModel = user.into();
        user.email = Set(email.to_string());
        user.hashed_password = Set(hashed_password.to_string());
        user.updated_at = Set(now());
        Ok(user.update(&*self.db).await?)
    }

    async fn upgrade_user(&self, id: Uuid) -> Result<Option<users::Model>> {
        let Some(user) = users::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut user: users::ActiveModel = user.into();
        user.is_chirpy_red = Set(true);
        user.updated_at = Set(now());
        Ok(Some(user.update(&*self.db).await?))
    }

    async fn delete_all_users(&self) -> Result<u64> {
        let result = users::Entity::delete_many().exec(&*self.db).await?;
        ldebug!(
            "system",
            LogStage::Db,
            LogComponent::Database,
            "delete_all_users",
            &format!("删除用户 {} 条", result.rows_affected)
        );
        Ok(result.rows_affected)
    }

    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: NaiveDateTime,
    ) -> Result<()> {
        let now = now();
        let row = refresh_tokens::ActiveModel {
            token: Set(token.to_string()),
            user_id: Set(user_id),
            expires_at: Set(expires_at),
            revoked_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        refresh_tokens::Entity::insert(row)
            .exec_without_returning(&*self.db)
            .await?;
        Ok(())
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<refresh_tokens::Model>> {
        Ok(refresh_tokens::Entity::find_by_id(token.to_string())
            .one(&*self.db)
            .await?)
    }

    async fn revoke_refresh_token(&self, token: &str) -> Result<()> {
        let now = now();
        let update = refresh_tokens::ActiveModel {
            revoked_at: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        };

        // 只更新尚未撤销的行，重复撤销保持第一次的时间戳
        let result = refresh_tokens::Entity::update_many()
            .filter(refresh_tokens::Column::Token.eq(token))
            .filter(refresh_tokens::Column::RevokedAt.is_null())
            .set(update)
            .exec(&*self.db)
            .await?;

        ldebug!(
            "system",
            LogStage::Db,
            LogComponent::Database,
            "revoke_refresh_token",
            &format!("rows_affected={}", result.rows_affected)
        );
        Ok(())
    }
}

#[async_trait]
impl ChirpStore for DatabaseStore {
    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<chirps::Model> {
        let now = now();
        let chirp = chirps::ActiveModel {
            id: Set(Uuid::new_v4()),
            body: Set(body.to_string()),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(chirp.insert(&*self.db).await?)
    }

    async fn list_chirps(
        &self,
        author_id: Option<Uuid>,
        order: SortOrder,
    ) -> Result<Vec<chirps::Model>> {
        let mut query = chirps::Entity::find();
        if let Some(author_id) = author_id {
            query = query.filter(chirps::Column::UserId.eq(author_id));
        }
        let query = match order {
            SortOrder::Asc => query.order_by_asc(chirps::Column::CreatedAt),
            SortOrder::Desc => query.order_by_desc(chirps::Column::CreatedAt),
        };
        Ok(query.all(&*self.db).await?)
    }

    async fn find_chirp(&self, id: Uuid) -> Result<Option<chirps::Model>> {
        Ok(chirps::Entity::find_by_id(id).one(&*self.db).await?)
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<()> {
        chirps::Entity::delete_by_id(id).exec(&*self.db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_test_db;
    use chrono::Duration;

    async fn store() -> DatabaseStore {
        DatabaseStore::new(Arc::new(create_test_db().await.unwrap()))
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let store = store().await;
        let user = store.create_user("a@b.com", "hash").await.unwrap();
        assert!(!user.is_chirpy_red);

        let found = store.find_user_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(store.find_user_by_email("x@y.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = store().await;
        store.create_user("a@b.com", "hash").await.unwrap();
        let err = store.create_user("a@b.com", "hash2").await.unwrap_err();
        assert!(matches!(err, ChirpyError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_and_upgrade_user() {
        let store = store().await;
        let user = store.create_user("a@b.com", "hash").await.unwrap();

        let updated = store
            .update_user_credentials(user.id, "new@b.com", "hash2")
            .await
            .unwrap();
        assert_eq!(updated.email, "new@b.com");
        assert_eq!(updated.hashed_password, "hash2");

        let upgraded = store.upgrade_user(user.id).await.unwrap().unwrap();
        assert!(upgraded.is_chirpy_red);
        assert!(store.upgrade_user(Uuid::new_v4()).await.unwrap().is_none());

        let err = store
            .update_user_credentials(Uuid::new_v4(), "z@b.com", "h")
            .await
            .unwrap_err();
        assert!(matches!(err, ChirpyError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let store = store().await;
        let user = store.create_user("a@b.com", "hash").await.unwrap();
        let expires_at = now() + Duration::days(60);
        store
            .create_refresh_token("tok", user.id, expires_at)
            .await
            .unwrap();

        store.revoke_refresh_token("tok").await.unwrap();
        let first = store.find_refresh_token("tok").await.unwrap().unwrap();
        let revoked_at = first.revoked_at.unwrap();

        store.revoke_refresh_token("tok").await.unwrap();
        store.revoke_refresh_token("missing").await.unwrap();
        let second = store.find_refresh_token("tok").await.unwrap().unwrap();
        assert_eq!(second.revoked_at, Some(revoked_at));
    }

    #[tokio::test]
    async fn test_delete_all_users_cascades() {
        let store = store().await;
        let user = store.create_user("a@b.com", "hash").await.unwrap();
        store
            .create_refresh_token("tok", user.id, now() + Duration::days(1))
            .await
            .unwrap();
        store.create_chirp(user.id, "hello").await.unwrap();

        assert_eq!(store.delete_all_users().await.unwrap(), 1);
        assert!(store.find_refresh_token("tok").await.unwrap().is_none());
        assert!(
            store
                .list_chirps(None, SortOrder::Asc)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_list_chirps_filter_and_order() {
        let store = store().await;
        let alice = store.create_user("alice@b.com", "hash").await.unwrap();
        let bob = store.create_user("bob@b.com", "hash").await.unwrap();

        let first = store.create_chirp(alice.id, "first").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.create_chirp(bob.id, "second").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let third = store.create_chirp(alice.id, "third").await.unwrap();

        let all = store.list_chirps(None, SortOrder::Asc).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, first.id);

        let alice_desc = store
            .list_chirps(Some(alice.id), SortOrder::Desc)
            .await
            .unwrap();
        let ids: Vec<_> = alice_desc.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![third.id, first.id]);

        store.delete_chirp(first.id).await.unwrap();
        assert!(store.find_chirp(first.id).await.unwrap().is_none());
    }
}
