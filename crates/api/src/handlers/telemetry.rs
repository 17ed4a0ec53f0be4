use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use commands::ops;

use super::error_status;
use crate::AppState;

#[derive(serde::Deserialize)]
pub struct LocationDto {
    pub longitude: String,
    pub latitude: String,
    /// Free-form extra info forwarded verbatim to the store.
    #[serde(default)]
    pub info: String,
}

#[derive(serde::Deserialize)]
pub struct StepsDto {
    pub steps: i64,
}

#[derive(serde::Deserialize)]
pub struct HeartRateDto {
    pub rate: i64,
}

pub async fn location(
    Path(did): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<LocationDto>,
) -> Result<StatusCode, StatusCode> {
    ops::insert_location(
        &state.executor,
        did,
        &payload.longitude,
        &payload.latitude,
        &payload.info,
    )
    .await
    .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn steps(
    Path(did): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<StepsDto>,
) -> Result<StatusCode, StatusCode> {
    ops::insert_step(&state.executor, did, payload.steps)
        .await
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn heart_rate(
    Path(did): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<HeartRateDto>,
) -> Result<StatusCode, StatusCode> {
    ops::insert_heart_rate(&state.executor, did, payload.rate)
        .await
        .map_err(error_status)?;
    Ok(StatusCode::NO_CONTENT)
}
