//! # Chirp 处理器

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::api::extract::{AuthenticatedUser, JsonBody, parse_uuid};
use crate::api::middleware::RequestId;
use crate::api::response::ChirpResponse;
use crate::api::server::AppState;
use crate::error::ChirpyError;
use crate::store::SortOrder;

/// 发布请求
#[derive(Debug, Deserialize)]
pub struct CreateChirpRequest {
    #[serde(default)]
    pub body: String,
}

/// 列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListChirpsQuery {
    pub author_id: Option<String>,
    pub sort: Option<String>,
}

/// 发布 chirp
pub async fn create_chirp(
    State(state): State<AppState>,
    request_id: RequestId,
    AuthenticatedUser(caller): AuthenticatedUser,
    JsonBody(request): JsonBody<CreateChirpRequest>,
) -> Result<impl IntoResponse, ChirpyError> {
    let chirp = state
        .chirps
        .create(caller, &request.body, &request_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ChirpResponse::from(chirp))))
}

/// 列出 chirp
pub async fn list_chirps(
    State(state): State<AppState>,
    Query(query): Query<ListChirpsQuery>,
) -> Result<impl IntoResponse, ChirpyError> {
    let author_id = query
        .author_id
        .as_deref()
        .map(|raw| parse_uuid(raw, "author"))
        .transpose()?;
    let order = match query.sort.as_deref() {
        None | Some("asc") => SortOrder::Asc,
        Some("desc") => SortOrder::Desc,
        Some(other) => {
            return Err(ChirpyError::validation(format!(
                "Invalid sort order: {other}"
            )));
        }
    };

    let chirps = state.chirps.list(author_id, order).await?;
    Ok(Json(
        chirps
            .into_iter()
            .map(ChirpResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// 获取单个 chirp
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> Result<impl IntoResponse, ChirpyError> {
    let id = parse_uuid(&chirp_id, "chirp")?;
    let chirp = state.chirps.get(id).await?;
    Ok(Json(ChirpResponse::from(chirp)))
}

/// 删除 chirp
pub async fn delete_chirp(
    State(state): State<AppState>,
    request_id: RequestId,
    AuthenticatedUser(caller): AuthenticatedUser,
    Path(chirp_id): Path<String>,
) -> Result<impl IntoResponse, ChirpyError> {
    let id = parse_uuid(&chirp_id, "chirp")?;
    state.chirps.delete(caller, id, &request_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
