//! # Chirpy
//!
//! 短消息社交后端：用户账户、密码登录，以及访问令牌 + 刷新令牌的会话模型

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod store;
pub mod testing;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ChirpyError, Result};
