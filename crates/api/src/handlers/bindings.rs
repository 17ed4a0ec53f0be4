use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use commands::ops;

use super::error_status;
use crate::AppState;

#[derive(serde::Deserialize)]
pub struct BindWatchDto {
    pub imei: String,
}

pub async fn bind(
    Path(aid): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<BindWatchDto>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let relation = ops::bind_device(&state.executor, aid, &payload.imei)
        .await
        .map_err(error_status)?;
    Ok((StatusCode::CREATED, Json(json!({ "relation": relation }))))
}

pub async fn watch_ids(
    Path(aid): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<i64>>, StatusCode> {
    let ids = ops::watch_ids_for_app(&state.executor, aid)
        .await
        .map_err(error_status)?;
    Ok(Json(ids))
}

pub async fn unbind(
    Path((aid, did)): Path<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<StatusCode, StatusCode> {
    ops::unbind_device(&state.executor, aid, did)
        .await
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}
