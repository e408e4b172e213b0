// tests/invocation_test.rs — Integration test: load → execute → save against a real file

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use wbso::cli::run::{run_invocation, RunContext};
use wbso::cli::Command;
use wbso::core::TimeToken;
use wbso::infra::config::ExportConfig;
use wbso::infra::errors::WbsoError;
use wbso::infra::store::LedgerStore;

const COMPACT_LEDGER: &str = r#"{"sessions":[{"start":"2026-10-15T09:00:00","end":"2026-10-15T10:00:00","description":"coding"}],"open_index":null}"#;

fn ctx(h: u32, m: u32) -> RunContext {
    RunContext {
        now: NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap(),
        export: ExportConfig::default(),
    }
}

async fn invoke(
    store: &LedgerStore,
    command: Command,
    ctx: &RunContext,
) -> (Result<(), WbsoError>, String) {
    let mut out = Vec::new();
    let result = run_invocation(store, command, ctx, &mut out).await.unwrap();
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn test_missing_file_is_created_and_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    let store = LedgerStore::new(&path);

    let (result, out) = invoke(&store, Command::Show, &ctx(9, 0)).await;
    result.unwrap();
    assert_eq!(out, "Created new log file.\nNo sessions.\n");
    assert!(path.exists());

    let (_, out) = invoke(&store, Command::Show, &ctx(9, 5)).await;
    assert_eq!(out, "No sessions.\n");
}

#[tokio::test]
async fn test_command_error_still_saves() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, COMPACT_LEDGER).unwrap();
    let store = LedgerStore::new(&path);

    let (result, out) = invoke(&store, Command::Delete { index: 5 }, &ctx(12, 0)).await;
    assert!(matches!(
        result,
        Err(WbsoError::IndexOutOfRange { index: 5, len: 1 })
    ));
    assert!(out.is_empty());

    // Rewritten by the save, with the same contents.
    let written = std::fs::read_to_string(&path).unwrap();
    assert_ne!(written, COMPACT_LEDGER);
    let ledger = store.load().await.unwrap().unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.sessions()[0].description, "coding");
}

#[tokio::test]
async fn test_noop_close_still_saves() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    std::fs::write(&path, COMPACT_LEDGER).unwrap();
    let store = LedgerStore::new(&path);

    let (result, out) = invoke(&store, Command::Close { end: TimeToken::Now }, &ctx(12, 0)).await;
    result.unwrap();
    assert!(out.starts_with("No session to close.\n"));
    assert_ne!(std::fs::read_to_string(&path).unwrap(), COMPACT_LEDGER);
}

#[tokio::test]
async fn test_start_then_close_persists_across_invocations() {
    let dir = TempDir::new().unwrap();
    let store = LedgerStore::new(dir.path().join("ledger.json"));

    let start = Command::Start {
        start: Some("09:00".parse().unwrap()),
        description: "coding".into(),
    };
    let (result, _) = invoke(&store, start, &ctx(9, 0)).await;
    result.unwrap();
    assert!(store.load().await.unwrap().unwrap().is_open());

    let again = Command::Start {
        start: None,
        description: "meeting".into(),
    };
    let (result, _) = invoke(&store, again, &ctx(9, 30)).await;
    assert!(matches!(result, Err(WbsoError::AlreadyOpen { .. })));

    let (result, out) = invoke(&store, Command::Close { end: TimeToken::Now }, &ctx(10, 0)).await;
    result.unwrap();
    assert_eq!(out, "0. Thu, 15 Oct 09:00:00 - 10:00:00: coding\n");

    let ledger = store.load().await.unwrap().unwrap();
    assert_eq!(ledger.len(), 1);
    assert!(!ledger.is_open());
}
