//! # 静态文件访问计数

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::api::server::AppState;

/// 每个经过 `/app` 的请求计数一次
pub async fn count_file_server_hits(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    state.record_file_server_hit();
    next.run(request).await
}
