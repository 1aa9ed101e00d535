//! # 测试框架模块
//!
//! 单元测试和 `tests/` 下的集成测试共用的内存数据库与上下文构建工具

pub mod helpers;

pub use helpers::*;
