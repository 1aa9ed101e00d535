//! # 认证授权模块
//!
//! 密码哈希、访问令牌、刷新令牌、会话生命周期以及请求认证和操作授权。

pub mod authenticator;
pub mod header_parser;
pub mod jwt;
pub mod password;
pub mod permissions;
pub mod refresh;
pub mod session;
pub mod types;

pub use authenticator::RequestAuthenticator;
pub use header_parser::AuthHeaderParser;
pub use jwt::TokenCodec;
pub use password::PasswordHasher;
pub use permissions::AuthorizationGate;
pub use refresh::RefreshTokenIssuer;
pub use session::{LoginOutput, SessionManager};
pub use types::{ACCESS_TOKEN_TTL, JwtClaims, REFRESH_TOKEN_TTL, RefreshTokenState};
