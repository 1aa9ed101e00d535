//! # HTTP 接口模块
//!
//! axum 路由、处理器、中间件和统一的错误响应

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod services;

pub use server::{AppState, create_router, serve};
