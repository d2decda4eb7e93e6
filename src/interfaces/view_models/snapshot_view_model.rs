use crate::application::fetch_coordinator::Dataset;
use crate::domain::analytics::{
    ChunkSize, GroupComparison, chunk, filter_by_underlying, summarize_groups,
};
use crate::domain::market::{OiRecord, TradingDate};
use crate::interfaces::columns::{
    ColumnConfig, ColumnSource, comparison_columns, render_row, snapshot_columns,
};
use crate::interfaces::formatting::{Cell, format_timestamp};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHeader {
    pub label: &'static str,
    pub signed: bool,
}

/// Render-ready table for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    pub index: usize,
    pub title: String,
    pub rows: Vec<Vec<Cell>>,
    pub summary: Vec<Cell>,
    /// Summary of the group before this one; `None` for the first group
    pub previous_summary: Option<Vec<Cell>>,
    pub comparison: Vec<Cell>,
    pub comparison_data: GroupComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DashboardView {
    /// No response has landed yet for the selected date
    Loading { date: TradingDate },
    NoData { date: TradingDate, message: String },
    Groups {
        date: TradingDate,
        record_count: usize,
        headers: Vec<ColumnHeader>,
        comparison_headers: Vec<ColumnHeader>,
        groups: Vec<GroupView>,
    },
}

impl DashboardView {
    pub fn groups(&self) -> &[GroupView] {
        match self {
            DashboardView::Groups { groups, .. } => groups,
            _ => &[],
        }
    }
}

pub struct SnapshotViewModel;

impl SnapshotViewModel {
    pub fn no_data_message(date: TradingDate) -> String {
        format!("No data for the date: {}", date)
    }

    /// Filter → chunk → summarize → format, from scratch on every call.
    pub fn build(dataset: &Dataset, underlying: &str, chunk_size: ChunkSize) -> DashboardView {
        if !dataset.is_loaded() {
            return DashboardView::Loading { date: dataset.date };
        }
        Self::build_from_records(dataset.date, &dataset.records, underlying, chunk_size)
    }

    pub fn build_from_records(
        date: TradingDate,
        records: &[OiRecord],
        underlying: &str,
        chunk_size: ChunkSize,
    ) -> DashboardView {
        let filtered = filter_by_underlying(records, underlying);
        if filtered.is_empty() {
            return DashboardView::NoData {
                date,
                message: Self::no_data_message(date),
            };
        }

        let record_columns = snapshot_columns::<OiRecord>();
        let summary_columns = snapshot_columns::<GroupComparison>();
        let change_columns = comparison_columns();

        let groups = chunk(&filtered, chunk_size);
        let comparisons = summarize_groups(&groups);

        let group_views = groups
            .iter()
            .zip(comparisons)
            .map(|(group, comparison)| GroupView {
                index: group.index,
                title: group_title(group.index, group.records),
                rows: group
                    .records
                    .iter()
                    .map(|record| render_row(&record_columns, record))
                    .collect(),
                summary: render_row(&summary_columns, &comparison),
                previous_summary: comparison
                    .previous
                    .as_ref()
                    .map(|previous| render_row(&snapshot_columns(), previous)),
                comparison: render_row(&change_columns, &comparison),
                comparison_data: comparison,
            })
            .collect();

        DashboardView::Groups {
            date,
            record_count: filtered.len(),
            headers: headers(&record_columns),
            comparison_headers: headers(&change_columns),
            groups: group_views,
        }
    }
}

fn headers<T: ColumnSource>(columns: &[ColumnConfig<T>]) -> Vec<ColumnHeader> {
    columns
        .iter()
        .map(|c| ColumnHeader {
            label: c.label,
            signed: c.signed,
        })
        .collect()
}

fn group_title(index: usize, records: &[OiRecord]) -> String {
    let time_of = |record: Option<&OiRecord>| {
        record
            .and_then(|r| format_timestamp(r.timestamp))
            .map(|t| t.get(11..).unwrap_or(&t).to_string())
    };

    match (time_of(records.first()), time_of(records.last())) {
        (Some(first), Some(last)) => format!(
            "Group {} ({} to {}, {} rows)",
            index + 1,
            first,
            last,
            records.len()
        ),
        _ => format!("Group {} ({} rows)", index + 1, records.len()),
    }
}
