//! # HTTP 处理器

pub mod admin;
pub mod auth;
pub mod chirps;
pub mod system;
pub mod users;
pub mod webhooks;
