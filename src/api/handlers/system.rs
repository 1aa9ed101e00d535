//! # 系统处理器

/// 就绪检查
pub async fn readiness() -> &'static str {
    "OK"
}
