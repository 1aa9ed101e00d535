//! # 测试辅助函数
//!
//! 提供通用的测试工具和辅助函数

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::sync::{Arc, Once};

use crate::app::AppContext;
use crate::auth::PasswordHasher;
use crate::config::{AppConfig, Platform};

static INIT: Once = Once::new();

/// 测试使用的 bcrypt 成本，bcrypt 允许的最小值
pub const TEST_HASH_COST: u32 = 4;

/// 测试签名密钥
pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// 测试 webhook 密钥
pub const TEST_POLKA_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";

/// 初始化测试环境
pub fn init_test_env() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug,sqlx=warn,sea_orm=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// 创建内存数据库连接并运行迁移
///
/// 每个连接都有自己的内存库，所以连接池固定为一个连接。
pub async fn create_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// 测试配置
#[must_use]
pub fn test_config(platform: Platform) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.url = "sqlite::memory:".to_string();
    config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    config.auth.polka_key = TEST_POLKA_KEY.to_string();
    config.auth.platform = platform;
    config
}

/// 基于内存数据库的应用上下文
pub async fn create_test_context(platform: Platform) -> Result<Arc<AppContext>, DbErr> {
    init_test_env();
    let db = create_test_db().await?;
    Ok(Arc::new(AppContext::with_hasher(
        Arc::new(test_config(platform)),
        Arc::new(db),
        PasswordHasher::with_cost(TEST_HASH_COST),
    )))
}
