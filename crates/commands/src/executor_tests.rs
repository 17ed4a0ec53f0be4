//! Integration tests for the command executor and typed operations.
//!
//! Everything runs against the mock backend — no live store required. The
//! mock connector records dials and calls, which is how the release
//! discipline (exactly one release per successful acquire) is verified.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use db::mock::{MockCall, MockConnector};
use db::{Param, Pool, PoolConfig, Value};

use crate::error::CommandError;
use crate::executor::CommandExecutor;
use crate::ops;

type CallLog = Arc<Mutex<Vec<(String, Vec<Param>)>>>;

/// Size-1 pool with a zero acquire timeout so exhaustion fails fast.
fn executor_with(connector: MockConnector) -> (CommandExecutor, Arc<AtomicUsize>, CallLog) {
    let dials = Arc::clone(&connector.dials);
    let calls = Arc::clone(&connector.calls);
    let pool = Pool::new(
        Box::new(connector),
        PoolConfig::default()
            .with_max_size(1)
            .with_acquire_timeout(Duration::ZERO),
    );
    (CommandExecutor::new(pool), dials, calls)
}

// ============================================================
// Catalog misuse — rejected before the pool is touched
// ============================================================

#[tokio::test]
async fn unknown_command_never_touches_the_pool() {
    let (exec, dials, _) = executor_with(MockConnector::healthy());

    let result = exec.execute("UNKNOWN_NAME", &[]).await;
    assert!(matches!(result, Err(CommandError::UnknownCommand(name)) if name == "UNKNOWN_NAME"));
    assert_eq!(dials.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn arity_mismatch_never_touches_the_pool() {
    let (exec, dials, _) = executor_with(MockConnector::healthy());

    let result = exec.execute("STEP_INSERT", &[Param::Int(42)]).await;
    assert!(matches!(
        result,
        Err(CommandError::ArityMismatch { name: "STEP_INSERT", expected: 2, got: 1 })
    ));
    assert_eq!(dials.load(Ordering::SeqCst), 0);
}

// ============================================================
// Release discipline
// ============================================================

#[tokio::test]
async fn successful_execute_reidles_the_session() {
    let (exec, dials, _) = executor_with(MockConnector::healthy());

    exec.execute("STEP_INSERT", &[Param::DeviceId(7), Param::Int(1200)])
        .await
        .expect("first insert");
    assert_eq!(exec.pool().in_use(), 0);
    assert_eq!(exec.pool().idle(), 1);

    exec.execute("STEP_INSERT", &[Param::DeviceId(7), Param::Int(1300)])
        .await
        .expect("second insert");
    // Both commands ran over the same dialed session.
    assert_eq!(dials.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn remote_rejection_releases_the_session_healthy() {
    let connector = MockConnector::scripted(vec![vec![MockCall::FailRemote(
        "duplicate entry '352315052834187'".into(),
    )]]);
    let (exec, dials, _) = executor_with(connector);

    let result = ops::register_watch(&exec, "352315052834187").await;
    assert!(matches!(
        result,
        Err(CommandError::RemoteExecutionFailed { name: "WATCH_INSERT", .. })
    ));
    assert_eq!(exec.pool().idle(), 1);

    // The same session is reused and its script is exhausted, so this works.
    ops::register_watch(&exec, "352315052834188")
        .await
        .expect("second registration");
    assert_eq!(dials.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn connection_fault_discards_the_session() {
    let connector =
        MockConnector::scripted(vec![vec![MockCall::FailConnection("broken pipe".into())]]);
    let (exec, dials, _) = executor_with(connector);

    let result = exec
        .execute("STEP_INSERT", &[Param::DeviceId(7), Param::Int(1200)])
        .await;
    assert!(matches!(result, Err(CommandError::ConnectFailed(_))));

    // Nothing went back to the idle list; the slot itself is free again.
    assert_eq!(exec.pool().idle(), 0);
    assert_eq!(exec.pool().in_use(), 0);

    // The next command dials a fresh session instead of reusing the broken one.
    exec.execute("STEP_INSERT", &[Param::DeviceId(7), Param::Int(1200)])
        .await
        .expect("after redial");
    assert_eq!(dials.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn exhausted_pool_surfaces_without_waiting() {
    let (exec, _, _) = executor_with(MockConnector::healthy());

    let held = exec.pool().acquire().await.expect("holder");
    let result = exec
        .execute("STEP_INSERT", &[Param::DeviceId(7), Param::Int(1)])
        .await;
    assert!(matches!(result, Err(CommandError::PoolExhausted { .. })));
    drop(held);
}

#[tokio::test]
async fn handshake_failure_surfaces_as_connect_failed() {
    let (exec, _, _) = executor_with(MockConnector::refusing("endpoint unreachable"));

    let result = ops::register_watch(&exec, "352315052834187").await;
    assert!(matches!(result, Err(CommandError::ConnectFailed(_))));
}

// ============================================================
// Typed operations
// ============================================================

#[tokio::test]
async fn location_insert_binds_the_declared_parameters() {
    let (exec, _, calls) = executor_with(MockConnector::healthy());

    ops::insert_location(&exec, 239307951255536007, "112.4563212", "23.3456321", "")
        .await
        .expect("location insert");

    let recorded = calls.lock().unwrap();
    let (template, params) = &recorded[0];
    assert_eq!(template, "CALL PROC_LOCATION_DID_INSERT(?, ?, ?, ?)");
    assert_eq!(
        params,
        &vec![
            Param::DeviceId(239307951255536007),
            Param::Text("112.4563212".into()),
            Param::Text("23.3456321".into()),
            Param::Text(String::new()),
        ]
    );
}

#[tokio::test]
async fn device_with_no_applications_yields_empty_list() {
    let (exec, _, _) = executor_with(MockConnector::healthy());

    let ids = ops::app_ids_for_device(&exec, 239307951255536007)
        .await
        .expect("empty select");
    assert!(ids.is_empty());
}

#[tokio::test]
async fn app_id_list_decodes_one_id_per_row() {
    let connector = MockConnector::scripted(vec![vec![MockCall::Rows(vec![
        vec![Value::Long(10794)],
        vec![Value::Long(10795)],
    ])]]);
    let (exec, _, _) = executor_with(connector);

    let ids = ops::app_ids_for_device(&exec, 239307951255536007)
        .await
        .expect("select");
    assert_eq!(ids, vec![10794, 10795]);
}

#[tokio::test]
async fn watch_id_list_decodes_one_id_per_row() {
    let connector = MockConnector::scripted(vec![vec![MockCall::Rows(vec![vec![Value::Long(
        239307951255536007,
    )]])]]);
    let (exec, _, _) = executor_with(connector);

    let ids = ops::watch_ids_for_app(&exec, 10794).await.expect("select");
    assert_eq!(ids, vec![239307951255536007]);
}

#[tokio::test]
async fn bind_device_returns_the_relation_value() {
    let connector =
        MockConnector::scripted(vec![vec![MockCall::Rows(vec![vec![Value::Long(1)]])]]);
    let (exec, _, calls) = executor_with(connector);

    let relation = ops::bind_device(&exec, 10794, "352315052834187")
        .await
        .expect("bind");
    assert_eq!(relation, 1);

    let recorded = calls.lock().unwrap();
    assert_eq!(recorded[0].0, "CALL PROC_DEV_APP_RELATION_REAULT(?, ?)");
}

#[tokio::test]
async fn bind_device_rejects_an_empty_result() {
    let connector = MockConnector::scripted(vec![vec![MockCall::Rows(vec![])]]);
    let (exec, _, _) = executor_with(connector);

    let result = ops::bind_device(&exec, 10794, "352315052834187").await;
    assert!(matches!(
        result,
        Err(CommandError::MalformedResult { name: "DEV_APP_RELATION_INSERT", .. })
    ));
}

#[tokio::test]
async fn bind_device_rejects_a_non_numeric_result() {
    let connector = MockConnector::scripted(vec![vec![MockCall::Rows(vec![vec![Value::Text(
        "oops".into(),
    )]])]]);
    let (exec, _, _) = executor_with(connector);

    let result = ops::bind_device(&exec, 10794, "352315052834187").await;
    assert!(matches!(result, Err(CommandError::MalformedResult { .. })));

    // The malformed shape was a data problem; the session stays pooled.
    assert_eq!(exec.pool().idle(), 1);
}

#[tokio::test]
async fn unbind_and_telemetry_round_trip() {
    let (exec, dials, calls) = executor_with(MockConnector::healthy());

    ops::unbind_device(&exec, 10794, 239307951255536007)
        .await
        .expect("unbind");
    ops::insert_step(&exec, 239307951255536007, 4200)
        .await
        .expect("steps");
    ops::insert_heart_rate(&exec, 239307951255536007, 72)
        .await
        .expect("heart rate");

    // One session served all three commands.
    assert_eq!(dials.load(Ordering::SeqCst), 1);

    let recorded = calls.lock().unwrap();
    let templates: Vec<&str> = recorded.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(
        templates,
        vec![
            "CALL PROC_DEV_APP_RELATION_DELETE(?, ?)",
            "CALL PROC_STEP_DID_INSERT(?, ?)",
            "CALL PROC_HEARTRATE_DID_INSERT(?, ?)",
        ]
    );
}
