use crate::domain::market::{OiRecord, TradingDate};
use chrono::{DateTime, Local};
use std::sync::Arc;
use tracing::debug;

/// Identifies one outstanding snapshot request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub date: TradingDate,
}

/// The snapshot currently on display. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub date: TradingDate,
    /// Sequence number of the request that produced this dataset; 0 before
    /// any request completed
    pub seq: u64,
    pub records: Arc<[OiRecord]>,
    pub fetched_at: Option<DateTime<Local>>,
}

impl Dataset {
    /// Placeholder shown until the first response for `date` lands.
    pub fn pending(date: TradingDate) -> Self {
        Self {
            date,
            seq: 0,
            records: Arc::from(Vec::new()),
            fetched_at: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.fetched_at.is_some()
    }
}

/// Latest-request-wins bookkeeping.
///
/// Every request gets a strictly increasing sequence number. A completion is
/// applied only if it belongs to the most recently requested date and is newer
/// than the dataset already applied.
#[derive(Debug, Default)]
pub struct FetchCoordinator {
    last_issued: u64,
    latest_date: Option<TradingDate>,
    applied_seq: u64,
}

impl FetchCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, date: TradingDate) -> FetchTicket {
        self.last_issued += 1;
        self.latest_date = Some(date);
        FetchTicket {
            seq: self.last_issued,
            date,
        }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.latest_date == Some(ticket.date) && ticket.seq > self.applied_seq
    }

    /// Turns a completion into the next dataset, or `None` if it is stale.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        records: Vec<OiRecord>,
        fetched_at: DateTime<Local>,
    ) -> Option<Dataset> {
        if !self.is_current(&ticket) {
            debug!(
                "Dropping stale snapshot #{} for {} (applied #{}, latest date {:?})",
                ticket.seq, ticket.date, self.applied_seq, self.latest_date
            );
            return None;
        }

        self.applied_seq = ticket.seq;
        Some(Dataset {
            date: ticket.date,
            seq: ticket.seq,
            records: Arc::from(records),
            fetched_at: Some(fetched_at),
        })
    }

    pub fn applied_seq(&self) -> u64 {
        self.applied_seq
    }
}
