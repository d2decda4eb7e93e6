use crate::domain::analytics::chunker::Group;
use crate::domain::market::OiRecord;
use serde::Serialize;

/// Totals and cross ratios for one group of records.
///
/// Ratios are `None` whenever their divisor is zero, so a summary never
/// carries `NaN` or an infinity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub ce_total: f64,
    pub pe_total: f64,
    pub ce_by_pe: Option<f64>,
    pub pe_by_ce: Option<f64>,
    pub rows: usize,
    /// Timestamp of the last record in the group
    pub last_timestamp: Option<i64>,
}

/// A group's summary alongside the change from the group before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    pub index: usize,
    pub summary: GroupSummary,
    pub previous: Option<GroupSummary>,
    pub ce_change: Option<f64>,
    pub pe_change: Option<f64>,
    pub ce_change_by_pe_change: Option<f64>,
    pub pe_change_by_ce_change: Option<f64>,
}

impl GroupComparison {
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

/// `numerator / denominator`, or `None` if the divisor is zero or the
/// quotient is not finite.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|value| value.is_finite())
}

/// Neumaier compensated summation.
pub fn stable_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for value in values {
        let total = sum + value;
        if sum.abs() >= value.abs() {
            compensation += (sum - total) + value;
        } else {
            compensation += (value - total) + sum;
        }
        sum = total;
    }
    sum + compensation
}

pub fn summarize_records(records: &[OiRecord]) -> GroupSummary {
    let ce_total = stable_sum(records.iter().map(|r| r.ce_coi_total));
    let pe_total = stable_sum(records.iter().map(|r| r.pe_coi_total));

    GroupSummary {
        ce_total,
        pe_total,
        ce_by_pe: ratio(ce_total, pe_total),
        pe_by_ce: ratio(pe_total, ce_total),
        rows: records.len(),
        last_timestamp: records.last().map(|r| r.timestamp),
    }
}

pub fn summarize(group: &Group<'_>) -> GroupSummary {
    summarize_records(group.records)
}

/// Compares `current` against its predecessor. Every previous-derived field
/// is `None` when there is no predecessor.
pub fn compare(
    index: usize,
    current: GroupSummary,
    previous: Option<GroupSummary>,
) -> GroupComparison {
    let (ce_change, pe_change) = match &previous {
        Some(prev) => (
            Some(current.ce_total - prev.ce_total),
            Some(current.pe_total - prev.pe_total),
        ),
        None => (None, None),
    };

    let ce_change_by_pe_change = ce_change.zip(pe_change).and_then(|(ce, pe)| ratio(ce, pe));
    let pe_change_by_ce_change = pe_change.zip(ce_change).and_then(|(pe, ce)| ratio(pe, ce));

    GroupComparison {
        index,
        summary: current,
        previous,
        ce_change,
        pe_change,
        ce_change_by_pe_change,
        pe_change_by_ce_change,
    }
}

/// Summarizes every group and pairs it with the summary of the group before it.
pub fn summarize_groups(groups: &[Group<'_>]) -> Vec<GroupComparison> {
    let summaries: Vec<GroupSummary> = groups.iter().map(summarize).collect();

    summaries
        .iter()
        .enumerate()
        .map(|(i, summary)| {
            let previous = i.checked_sub(1).map(|p| summaries[p].clone());
            compare(groups[i].index, summary.clone(), previous)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::chunker::{ChunkSize, chunk};

    fn record(ce: f64, pe: f64, timestamp: i64) -> OiRecord {
        OiRecord {
            symbol: "BANKNIFTY".to_string(),
            underlying: "BANKNIFTY".to_string(),
            underlying_value: 45_000.0,
            timestamp,
            expiry_date: "03-Aug-2023".to_string(),
            ce_coi_total: ce,
            pe_coi_total: pe,
        }
    }

    #[test]
    fn test_empty_group_sums_to_zero() {
        let summary = summarize_records(&[]);
        assert_eq!(summary.ce_total, 0.0);
        assert_eq!(summary.pe_total, 0.0);
        assert_eq!(summary.ce_by_pe, None);
        assert_eq!(summary.pe_by_ce, None);
        assert_eq!(summary.rows, 0);
        assert_eq!(summary.last_timestamp, None);
    }

    #[test]
    fn test_totals_and_ratios() {
        let records = vec![record(100.0, 50.0, 1), record(300.0, 150.0, 2)];
        let summary = summarize_records(&records);
        assert_eq!(summary.ce_total, 400.0);
        assert_eq!(summary.pe_total, 200.0);
        assert_eq!(summary.ce_by_pe, Some(2.0));
        assert_eq!(summary.pe_by_ce, Some(0.5));
        assert_eq!(summary.last_timestamp, Some(2));
    }

    #[test]
    fn test_zero_divisor_is_absent_regardless_of_numerator() {
        let summary = summarize_records(&[record(0.0, 200.0, 1), record(0.0, 300.0, 2)]);
        assert_eq!(summary.ce_total, 0.0);
        assert_eq!(summary.pe_total, 500.0);
        assert_eq!(summary.ce_by_pe, Some(0.0));
        assert_eq!(summary.pe_by_ce, None);

        let summary = summarize_records(&[record(120.0, 0.0, 1)]);
        assert_eq!(summary.ce_by_pe, None);
        assert_eq!(summary.pe_by_ce, Some(0.0));
    }

    #[test]
    fn test_stable_sum_compensates() {
        let values = vec![1e16, 1.0, -1e16];
        assert_eq!(stable_sum(values), 1.0);
        assert_eq!(stable_sum(Vec::new()), 0.0);
    }

    #[test]
    fn test_first_group_has_no_previous_fields() {
        let records: Vec<OiRecord> = (0..5).map(|i| record(10.0, 5.0, i)).collect();
        let groups = chunk(&records, ChunkSize::new(10).unwrap());
        let comparisons = summarize_groups(&groups);

        assert_eq!(comparisons.len(), 1);
        let first = &comparisons[0];
        assert!(!first.has_previous());
        assert_eq!(first.ce_change, None);
        assert_eq!(first.pe_change, None);
        assert_eq!(first.ce_change_by_pe_change, None);
        assert_eq!(first.pe_change_by_ce_change, None);
    }

    #[test]
    fn test_changes_against_previous_group() {
        let mut records: Vec<OiRecord> = (0..2).map(|i| record(10.0, 20.0, i)).collect();
        records.extend((2..4).map(|i| record(40.0, 30.0, i)));
        let groups = chunk(&records, ChunkSize::new(2).unwrap());
        let comparisons = summarize_groups(&groups);

        let second = &comparisons[1];
        assert_eq!(second.index, 1);
        assert_eq!(second.previous.as_ref().map(|p| p.ce_total), Some(20.0));
        assert_eq!(second.ce_change, Some(60.0));
        assert_eq!(second.pe_change, Some(20.0));
        assert_eq!(second.ce_change_by_pe_change, Some(3.0));
        assert_eq!(second.pe_change_by_ce_change, Some(20.0 / 60.0));
    }

    #[test]
    fn test_unchanged_totals_give_absent_change_ratios() {
        let records: Vec<OiRecord> = (0..4).map(|i| record(10.0, 20.0, i)).collect();
        let groups = chunk(&records, ChunkSize::new(2).unwrap());
        let second = &summarize_groups(&groups)[1];

        assert_eq!(second.ce_change, Some(0.0));
        assert_eq!(second.pe_change, Some(0.0));
        assert_eq!(second.ce_change_by_pe_change, None);
        assert_eq!(second.pe_change_by_ce_change, None);
    }

    #[test]
    fn test_ratio_rejects_non_finite() {
        assert_eq!(ratio(1.0, 0.0), None);
        assert_eq!(ratio(f64::MAX, 1e-300), None);
        assert_eq!(ratio(3.0, 2.0), Some(1.5));
    }
}
