//! 应用上下文（DI 容器）
//!
//! 统一持有跨模块共享的服务实例，启动时构建一次，便于在测试中注入替身实现。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sea_orm::DatabaseConnection;

use crate::api::services::{ChirpService, UserService};
use crate::auth::{
    AuthorizationGate, PasswordHasher, RefreshTokenIssuer, RequestAuthenticator, SessionManager,
    TokenCodec,
};
use crate::config::AppConfig;
use crate::store::DatabaseStore;

/// 应用上下文
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub db: Arc<DatabaseConnection>,
    pub sessions: SessionManager,
    pub authenticator: RequestAuthenticator,
    pub gate: AuthorizationGate,
    pub users: UserService,
    pub chirps: ChirpService,
    file_server_hits: AtomicU64,
}

impl AppContext {
    /// 使用默认密码哈希成本构建
    #[must_use]
    pub fn new(config: Arc<AppConfig>, db: Arc<DatabaseConnection>) -> Self {
        Self::with_hasher(config, db, PasswordHasher::new())
    }

    /// 指定密码哈希器构建
    #[must_use]
    pub fn with_hasher(
        config: Arc<AppConfig>,
        db: Arc<DatabaseConnection>,
        hasher: PasswordHasher,
    ) -> Self {
        let store = Arc::new(DatabaseStore::new(Arc::clone(&db)));
        let codec = TokenCodec::new(config.auth.jwt_secret.as_bytes());
        let gate = AuthorizationGate::new(config.auth.platform);

        Self {
            sessions: SessionManager::new(
                store.clone(),
                hasher,
                codec.clone(),
                RefreshTokenIssuer::new(),
            ),
            authenticator: RequestAuthenticator::new(codec),
            gate,
            users: UserService::new(store.clone(), hasher),
            chirps: ChirpService::new(store, gate),
            file_server_hits: AtomicU64::new(0),
            config,
            db,
        }
    }

    /// 记录一次静态文件访问
    pub fn record_file_server_hit(&self) {
        self.file_server_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// 静态文件访问次数
    #[must_use]
    pub fn file_server_hits(&self) -> u64 {
        self.file_server_hits.load(Ordering::Relaxed)
    }

    /// 清零访问计数
    pub fn reset_file_server_hits(&self) {
        self.file_server_hits.store(0, Ordering::Relaxed);
    }
}
