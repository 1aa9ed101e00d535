//! # 实体定义测试

use crate::{chirps, refresh_tokens, users};
use chrono::Utc;
use sea_orm::Set;
use sea_orm::prelude::Uuid;

#[test]
fn test_user_active_model() {
    let id = Uuid::new_v4();
    let user = users::ActiveModel {
        id: Set(id),
        email: Set("a@b.com".to_string()),
        hashed_password: Set("$2b$12$hash".to_string()),
        is_chirpy_red: Set(false),
        ..Default::default()
    };

    assert_eq!(user.id.as_ref(), &id);
    assert_eq!(user.email.as_ref(), "a@b.com");
    assert_eq!(user.is_chirpy_red.as_ref(), &false);
}

#[test]
fn test_user_serialization_hides_password_hash() {
    let now = Utc::now().naive_utc();
    let user = users::Model {
        id: Uuid::new_v4(),
        email: "a@b.com".to_string(),
        hashed_password: "$2b$12$secret".to_string(),
        is_chirpy_red: true,
        created_at: now,
        updated_at: now,
    };

    let json = serde_json::to_string(&user).unwrap();
    assert!(!json.contains("hashed_password"));
    assert!(!json.contains("secret"));
    assert!(json.contains("\"is_chirpy_red\":true"));
}

#[test]
fn test_refresh_token_and_chirp_models() {
    let owner = Uuid::new_v4();
    let token = refresh_tokens::ActiveModel {
        token: Set("ab".repeat(32)),
        user_id: Set(owner),
        revoked_at: Set(None),
        ..Default::default()
    };
    assert_eq!(token.token.as_ref().len(), 64);
    assert_eq!(token.revoked_at.as_ref(), &None);

    let chirp = chirps::ActiveModel {
        id: Set(Uuid::new_v4()),
        body: Set("hello".to_string()),
        user_id: Set(owner),
        ..Default::default()
    };
    assert_eq!(chirp.user_id.as_ref(), &owner);
}
