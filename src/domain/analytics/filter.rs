use crate::domain::market::OiRecord;

/// Keeps only records whose `underlying` equals `symbol`, in delivery order.
pub fn filter_by_underlying(records: &[OiRecord], symbol: &str) -> Vec<OiRecord> {
    records
        .iter()
        .filter(|record| record.underlying == symbol)
        .cloned()
        .collect()
}
