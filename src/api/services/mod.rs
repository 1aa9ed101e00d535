//! # 业务服务层
//!
//! 封装业务逻辑，HTTP handler 只负责解析请求和组装响应。

pub mod chirps;
pub mod users;

pub use chirps::ChirpService;
pub use users::UserService;
