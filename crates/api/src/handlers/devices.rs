use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use commands::ops;

use super::error_status;
use crate::AppState;

#[derive(serde::Deserialize)]
pub struct RegisterWatchDto {
    pub imei: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterWatchDto>,
) -> Result<StatusCode, StatusCode> {
    ops::register_watch(&state.executor, &payload.imei)
        .await
        .map_err(error_status)?;
    Ok(StatusCode::CREATED)
}

pub async fn app_ids(
    Path(did): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<i64>>, StatusCode> {
    let ids = ops::app_ids_for_device(&state.executor, did)
        .await
        .map_err(error_status)?;
    Ok(Json(ids))
}
