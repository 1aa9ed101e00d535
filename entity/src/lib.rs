//! # Entity 模块
//!
//! 包含所有 Sea-ORM 实体定义

pub mod chirps;
pub mod refresh_tokens;
pub mod users;

pub use chirps::Entity as Chirps;
pub use refresh_tokens::Entity as RefreshTokens;
pub use users::Entity as Users;

#[cfg(test)]
mod tests;
