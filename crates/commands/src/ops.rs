//! Typed operation entry points — one function per catalog command.
//!
//! Every function takes a `&CommandExecutor` and already-parsed
//! identifiers/strings, and returns `Result<T, CommandError>`. This module
//! is the whole boundary the action layer is allowed to cross into the
//! data-access core.

use db::{Param, Row, Value};

use crate::error::CommandError;
use crate::executor::CommandExecutor;

/// Register a watch by IMEI.
///
/// # Errors
/// Re-registering an existing IMEI surfaces as
/// [`CommandError::RemoteExecutionFailed`] (duplicate key) — an expected
/// outcome, not a crash.
pub async fn register_watch(exec: &CommandExecutor, imei: &str) -> Result<(), CommandError> {
    exec.execute("WATCH_INSERT", &[Param::text(imei)]).await?;
    Ok(())
}

/// Application ids bound to a device. A device with no applications yields
/// an empty list.
pub async fn app_ids_for_device(
    exec: &CommandExecutor,
    device_id: i64,
) -> Result<Vec<i64>, CommandError> {
    let rows = exec
        .query("APPIDLIST_SELECT", &[Param::DeviceId(device_id)])
        .await?;
    rows.iter()
        .map(|row| first_long("APPIDLIST_SELECT", row))
        .collect()
}

/// Watch ids bound to an application.
pub async fn watch_ids_for_app(exec: &CommandExecutor, app_id: i64) -> Result<Vec<i64>, CommandError> {
    let rows = exec
        .query("WATCHIDLIST_SELECT", &[Param::DeviceId(app_id)])
        .await?;
    rows.iter()
        .map(|row| first_long("WATCHIDLIST_SELECT", row))
        .collect()
}

/// Bind an application to a watch; returns the relation value reported by
/// the store's procedure (single row, numeric first column).
pub async fn bind_device(
    exec: &CommandExecutor,
    app_id: i64,
    imei: &str,
) -> Result<i64, CommandError> {
    let rows = exec
        .query(
            "DEV_APP_RELATION_INSERT",
            &[Param::DeviceId(app_id), Param::text(imei)],
        )
        .await?;
    let row = rows.first().ok_or_else(|| CommandError::MalformedResult {
        name: "DEV_APP_RELATION_INSERT",
        detail: "expected one result row, got none".into(),
    })?;
    first_long("DEV_APP_RELATION_INSERT", row)
}

/// Remove an application↔device relation.
pub async fn unbind_device(
    exec: &CommandExecutor,
    app_id: i64,
    device_id: i64,
) -> Result<(), CommandError> {
    exec.execute(
        "DEV_APP_RELATION_DELETE",
        &[Param::DeviceId(app_id), Param::DeviceId(device_id)],
    )
    .await?;
    Ok(())
}

/// Persist one location sample.
pub async fn insert_location(
    exec: &CommandExecutor,
    device_id: i64,
    longitude: &str,
    latitude: &str,
    info: &str,
) -> Result<(), CommandError> {
    exec.execute(
        "LOCATION_INSERT",
        &[
            Param::DeviceId(device_id),
            Param::text(longitude),
            Param::text(latitude),
            Param::text(info),
        ],
    )
    .await?;
    Ok(())
}

/// Persist one step-count sample.
pub async fn insert_step(exec: &CommandExecutor, device_id: i64, steps: i64) -> Result<(), CommandError> {
    exec.execute("STEP_INSERT", &[Param::DeviceId(device_id), Param::Int(steps)])
        .await?;
    Ok(())
}

/// Persist one heart-rate sample.
pub async fn insert_heart_rate(
    exec: &CommandExecutor,
    device_id: i64,
    rate: i64,
) -> Result<(), CommandError> {
    exec.execute(
        "HEARTRATE_INSERT",
        &[Param::DeviceId(device_id), Param::Int(rate)],
    )
    .await?;
    Ok(())
}

/// First cell of `row` as a 64-bit id.
fn first_long(name: &'static str, row: &Row) -> Result<i64, CommandError> {
    row.first()
        .and_then(Value::as_long)
        .ok_or_else(|| CommandError::MalformedResult {
            name,
            detail: format!("expected a numeric first column, got {row:?}"),
        })
}
