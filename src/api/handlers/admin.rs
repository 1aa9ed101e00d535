//! # 管理处理器
//!
//! 访问计数页面和开发环境重置

use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::api::middleware::RequestId;
use crate::api::server::AppState;
use crate::error::ChirpyError;

/// 访问计数页面
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>\n  <body>\n    <h1>Welcome, Chirpy Admin</h1>\n    <p>Chirpy has been visited {} times!</p>\n  </body>\n</html>\n",
        state.file_server_hits()
    ))
}

/// 清零访问计数并删除所有用户，仅 dev 平台可用
pub async fn reset(
    State(state): State<AppState>,
    request_id: RequestId,
) -> Result<impl IntoResponse, ChirpyError> {
    state.gate.ensure_dev_platform(&request_id)?;

    state.reset_file_server_hits();
    state.users.delete_all(&request_id).await?;

    Ok("Metrics and Database Reset: Successful")
}
