use oiboard::application::fetch_coordinator::Dataset;
use oiboard::application::system::{Application, SystemHandle};
use oiboard::config::Config;
use oiboard::domain::market::{OiRecord, TradingDate};
use oiboard::infrastructure::MockSnapshotSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

fn date(y: i32, m: u32, d: u32) -> TradingDate {
    TradingDate::from_ymd(y, m, d).unwrap()
}

fn record(underlying: &str, timestamp: i64) -> OiRecord {
    OiRecord {
        symbol: underlying.to_string(),
        underlying: underlying.to_string(),
        underlying_value: 45_000.0,
        timestamp,
        expiry_date: "03-Aug-2023".to_string(),
        ce_coi_total: 10.0,
        pe_coi_total: 20.0,
    }
}

fn start(source: &MockSnapshotSource, initial: TradingDate) -> SystemHandle {
    let config = Config {
        start_date: Some(initial),
        poll_interval: Duration::from_secs(3600),
        ..Config::default()
    };
    let (handle, _task) = Application::with_source(config, Arc::new(source.clone())).start();
    handle
}

async fn wait_for<F>(rx: &mut watch::Receiver<Arc<Dataset>>, predicate: F) -> Arc<Dataset>
where
    F: Fn(&Dataset) -> bool,
{
    let result = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let current = rx.borrow_and_update();
                if predicate(&current) {
                    return Arc::clone(&current);
                }
            }
            rx.changed().await.expect("service stopped");
        }
    })
    .await;
    result.expect("timed out waiting for dataset")
}

#[tokio::test]
async fn test_initial_fetch_loads_start_date() {
    let source = MockSnapshotSource::new();
    let day = date(2023, 7, 28);
    source.insert_day(day, vec![record("BANKNIFTY", 1), record("NIFTY", 2)]).await;

    let mut handle = start(&source, day);
    let dataset = wait_for(&mut handle.dataset_rx, |d| d.is_loaded()).await;

    assert_eq!(dataset.date, day);
    assert_eq!(dataset.records.len(), 2);
    assert!(dataset.seq >= 1);
}

#[tokio::test]
async fn test_stale_response_never_overwrites_newer_date() {
    let source = MockSnapshotSource::new();
    let slow = date(2023, 7, 27);
    let fast = date(2023, 7, 28);
    source.insert_day(slow, vec![record("BANKNIFTY", 1)]).await;
    source.set_delay(slow, Duration::from_millis(300)).await;
    source.insert_day(fast, vec![record("BANKNIFTY", 2), record("BANKNIFTY", 3)]).await;
    source.set_delay(fast, Duration::from_millis(20)).await;

    let mut handle = start(&source, slow);
    // Let the initial (slow) request go out, then switch dates
    tokio::time::sleep(Duration::from_millis(30)).await;
    handle.date_tx.send_replace(fast);

    let dataset = wait_for(&mut handle.dataset_rx, |d| d.is_loaded()).await;
    assert_eq!(dataset.date, fast);
    assert_eq!(dataset.records.len(), 2);

    // The slow response lands after this and must be discarded
    tokio::time::sleep(Duration::from_millis(500)).await;
    let current = Arc::clone(&handle.dataset_rx.borrow());
    assert_eq!(current.date, fast);
    assert_eq!(current.records.len(), 2);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_date_change_clears_previous_rows() {
    let source = MockSnapshotSource::new();
    let first = date(2023, 7, 27);
    let second = date(2023, 7, 28);
    source.insert_day(first, vec![record("BANKNIFTY", 1)]).await;
    source.insert_day(second, vec![record("BANKNIFTY", 2)]).await;
    source.set_delay(second, Duration::from_millis(200)).await;

    let mut handle = start(&source, first);
    wait_for(&mut handle.dataset_rx, |d| d.is_loaded() && d.date == first).await;

    handle.date_tx.send_replace(second);
    let pending = wait_for(&mut handle.dataset_rx, |d| d.date == second).await;
    assert!(!pending.is_loaded());
    assert!(pending.records.is_empty());

    let loaded = wait_for(&mut handle.dataset_rx, |d| d.is_loaded()).await;
    assert_eq!(loaded.date, second);
}

#[tokio::test]
async fn test_failed_fetch_shows_empty_dataset() {
    let source = MockSnapshotSource::new();
    let day = date(2023, 7, 28);
    source.fail_on(day).await;

    let mut handle = start(&source, day);
    let dataset = wait_for(&mut handle.dataset_rx, |d| d.is_loaded()).await;
    assert_eq!(dataset.date, day);
    assert!(dataset.records.is_empty());
}

#[tokio::test]
async fn test_manual_refresh_refetches_same_date() {
    let source = MockSnapshotSource::new();
    let day = date(2023, 7, 28);
    source.insert_day(day, vec![record("BANKNIFTY", 1)]).await;

    let mut handle = start(&source, day);
    let first = wait_for(&mut handle.dataset_rx, |d| d.is_loaded()).await;

    source.insert_day(day, vec![record("BANKNIFTY", 1), record("BANKNIFTY", 2)]).await;
    handle.refresh_tx.send(()).await.unwrap();

    let refreshed = wait_for(&mut handle.dataset_rx, |d| d.seq > first.seq).await;
    assert_eq!(refreshed.records.len(), 2);
    assert_eq!(source.calls(), 2);
}
