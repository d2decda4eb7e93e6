use crate::domain::errors::FetchError;
use crate::domain::market::{OiRecord, TradingDate, Underlying};
use crate::domain::ports::SnapshotSource;
use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveTime, Weekday};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Clone, Default)]
struct MockDay {
    records: Vec<OiRecord>,
    delay: Duration,
    fail: bool,
}

/// In-memory snapshot source. Days can be seeded, delayed or made to fail;
/// unseeded days are either generated (demo mode) or reported missing.
#[derive(Clone)]
pub struct MockSnapshotSource {
    days: Arc<RwLock<HashMap<TradingDate, MockDay>>>,
    generate_missing: bool,
    calls: Arc<AtomicUsize>,
}

impl MockSnapshotSource {
    pub fn new() -> Self {
        Self {
            days: Arc::new(RwLock::new(HashMap::new())),
            generate_missing: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Serves generated intraday data for any weekday that was not seeded.
    pub fn demo() -> Self {
        Self {
            generate_missing: true,
            ..Self::new()
        }
    }

    pub async fn insert_day(&self, date: TradingDate, records: Vec<OiRecord>) {
        let mut days = self.days.write().await;
        days.entry(date).or_default().records = records;
    }

    pub async fn set_delay(&self, date: TradingDate, delay: Duration) {
        let mut days = self.days.write().await;
        days.entry(date).or_default().delay = delay;
    }

    pub async fn fail_on(&self, date: TradingDate) {
        let mut days = self.days.write().await;
        days.entry(date).or_default().fail = true;
    }

    /// Number of `fetch_day` calls served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSnapshotSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotSource for MockSnapshotSource {
    async fn fetch_day(&self, date: TradingDate) -> Result<Vec<OiRecord>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        // Don't hold the lock across the delay
        let day = self.days.read().await.get(&date).cloned();

        match day {
            Some(day) => {
                if !day.delay.is_zero() {
                    tokio::time::sleep(day.delay).await;
                }
                if day.fail {
                    return Err(FetchError::Transport {
                        url: format!("mock://{}", date.file_name()),
                        reason: "injected failure".to_string(),
                    });
                }
                Ok(day.records)
            }
            None if self.generate_missing => {
                let records = demo_day(date);
                info!("MockSnapshotSource: generated {} records for {}", records.len(), date);
                Ok(records)
            }
            None => Err(FetchError::Missing {
                date: date.to_string(),
            }),
        }
    }
}

/// Interval between snapshots in generated data
const DEMO_STEP_MS: i64 = 3 * 60 * 1000;
/// 09:15 IST expressed in UTC
const DEMO_OPEN_UTC: (u32, u32) = (3, 45);
const DEMO_SNAPSHOTS: i64 = 125;

/// Deterministic intraday snapshots for every underlying on a weekday.
/// Weekends have no session and produce an empty list.
pub fn demo_day(date: TradingDate) -> Vec<OiRecord> {
    let day = date.date();
    if matches!(day.weekday(), Weekday::Sat | Weekday::Sun) {
        return Vec::new();
    }

    let open = NaiveTime::from_hms_opt(DEMO_OPEN_UTC.0, DEMO_OPEN_UTC.1, 0).unwrap_or_default();
    let start_ms = day.and_time(open).and_utc().timestamp_millis();
    let expiry = next_thursday(date).format("%d-%b-%Y").to_string();
    let seed = day.num_days_from_ce() as i64;

    let mut records = Vec::with_capacity((DEMO_SNAPSHOTS as usize) * Underlying::all().len());
    for step in 0..DEMO_SNAPSHOTS {
        for (offset, underlying) in Underlying::all().into_iter().enumerate() {
            let phase = (seed + step * 7 + offset as i64 * 13) as f64;
            let base = match underlying {
                Underlying::BankNifty => 45_000.0,
                Underlying::Nifty => 19_600.0,
                Underlying::FinNifty => 20_300.0,
            };
            records.push(OiRecord {
                symbol: underlying.as_str().to_string(),
                underlying: underlying.as_str().to_string(),
                underlying_value: round2(base + (phase / 9.0).sin() * base * 0.004),
                timestamp: start_ms + step * DEMO_STEP_MS,
                expiry_date: expiry.clone(),
                ce_coi_total: ((phase / 5.0).sin() * 40_000.0 + step as f64 * 350.0).round(),
                pe_coi_total: ((phase / 4.0).cos() * 35_000.0 + step as f64 * 420.0).round(),
            });
        }
    }
    records
}

fn next_thursday(date: TradingDate) -> chrono::NaiveDate {
    let day = date.date();
    let today = day.weekday().num_days_from_monday();
    let ahead = (Weekday::Thu.num_days_from_monday() + 7 - today) % 7;
    day.checked_add_days(Days::new(ahead as u64)).unwrap_or(day)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
