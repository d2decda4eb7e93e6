//! Column configuration for the snapshot tables.
//!
//! A column is either a direct projection of a [`Field`] or a pure function of
//! the row. The same column list renders individual records and group
//! summaries; anything a summary lacks projects to [`Cell::Absent`].

use crate::domain::analytics::{GroupComparison, GroupSummary, ratio};
use crate::domain::market::OiRecord;
use crate::interfaces::formatting::{Cell, format_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Underlying,
    UnderlyingValue,
    ExpiryDate,
    CeCoiTotal,
    PeCoiTotal,
}

/// A row the snapshot columns can render.
pub trait ColumnSource {
    fn ce_coi(&self) -> f64;
    fn pe_coi(&self) -> f64;
    fn timestamp_ms(&self) -> Option<i64>;
    fn project(&self, field: Field) -> Cell;
}

impl ColumnSource for OiRecord {
    fn ce_coi(&self) -> f64 {
        self.ce_coi_total
    }

    fn pe_coi(&self) -> f64 {
        self.pe_coi_total
    }

    fn timestamp_ms(&self) -> Option<i64> {
        Some(self.timestamp)
    }

    fn project(&self, field: Field) -> Cell {
        match field {
            Field::Underlying => Cell::Text(self.underlying.clone()),
            Field::UnderlyingValue => Cell::Number(self.underlying_value),
            Field::ExpiryDate => Cell::Text(self.expiry_date.clone()),
            Field::CeCoiTotal => Cell::Number(self.ce_coi_total),
            Field::PeCoiTotal => Cell::Number(self.pe_coi_total),
        }
    }
}

impl ColumnSource for GroupSummary {
    fn ce_coi(&self) -> f64 {
        self.ce_total
    }

    fn pe_coi(&self) -> f64 {
        self.pe_total
    }

    fn timestamp_ms(&self) -> Option<i64> {
        self.last_timestamp
    }

    fn project(&self, field: Field) -> Cell {
        match field {
            Field::CeCoiTotal => Cell::Number(self.ce_total),
            Field::PeCoiTotal => Cell::Number(self.pe_total),
            Field::Underlying | Field::UnderlyingValue | Field::ExpiryDate => Cell::Absent,
        }
    }
}

// A comparison renders as its current group's summary
impl ColumnSource for GroupComparison {
    fn ce_coi(&self) -> f64 {
        self.summary.ce_coi()
    }

    fn pe_coi(&self) -> f64 {
        self.summary.pe_coi()
    }

    fn timestamp_ms(&self) -> Option<i64> {
        self.summary.timestamp_ms()
    }

    fn project(&self, field: Field) -> Cell {
        self.summary.project(field)
    }
}

pub enum ColumnKind<T> {
    Direct(Field),
    Derived(fn(&T) -> Cell),
}

pub struct ColumnConfig<T> {
    pub label: &'static str,
    pub kind: ColumnKind<T>,
    /// Signed values get colored by their sign
    pub signed: bool,
}

impl<T: ColumnSource> ColumnConfig<T> {
    pub fn direct(label: &'static str, field: Field) -> Self {
        Self {
            label,
            kind: ColumnKind::Direct(field),
            signed: false,
        }
    }

    pub fn derived(label: &'static str, render: fn(&T) -> Cell) -> Self {
        Self {
            label,
            kind: ColumnKind::Derived(render),
            signed: false,
        }
    }

    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    pub fn render(&self, row: &T) -> Cell {
        match &self.kind {
            ColumnKind::Direct(field) => row.project(*field),
            ColumnKind::Derived(render) => render(row),
        }
    }
}

fn time_cell<T: ColumnSource>(row: &T) -> Cell {
    Cell::text(row.timestamp_ms().and_then(format_timestamp))
}

/// Columns shared by record rows and summary rows, in display order.
pub fn snapshot_columns<T: ColumnSource>() -> Vec<ColumnConfig<T>> {
    vec![
        ColumnConfig::derived("Time", time_cell::<T>),
        ColumnConfig::direct("CE Change In Open Interest", Field::CeCoiTotal),
        ColumnConfig::direct("PE Change In Open Interest", Field::PeCoiTotal),
        ColumnConfig::derived("Difference: CE - PE", |row: &T| {
            Cell::Number(row.ce_coi() - row.pe_coi())
        })
        .signed(),
        ColumnConfig::derived("Difference: PE - CE", |row: &T| {
            Cell::Number(row.pe_coi() - row.ce_coi())
        })
        .signed(),
        ColumnConfig::derived("CE Total / PE Total", |row: &T| {
            Cell::ratio(ratio(row.ce_coi(), row.pe_coi()))
        }),
        ColumnConfig::derived("PE Total / CE Total", |row: &T| {
            Cell::ratio(ratio(row.pe_coi(), row.ce_coi()))
        }),
        ColumnConfig::direct("Underlying", Field::Underlying),
        ColumnConfig::direct("Underlying Value", Field::UnderlyingValue),
        ColumnConfig::direct("Expiry Date", Field::ExpiryDate),
    ]
}

/// Group-over-previous-group columns.
pub fn comparison_columns() -> Vec<ColumnConfig<GroupComparison>> {
    vec![
        ColumnConfig::derived("CE Change vs Previous", |c: &GroupComparison| {
            Cell::number(c.ce_change)
        })
        .signed(),
        ColumnConfig::derived("PE Change vs Previous", |c: &GroupComparison| {
            Cell::number(c.pe_change)
        })
        .signed(),
        ColumnConfig::derived("CE Change / PE Change", |c: &GroupComparison| {
            Cell::ratio(c.ce_change_by_pe_change)
        }),
        ColumnConfig::derived("PE Change / CE Change", |c: &GroupComparison| {
            Cell::ratio(c.pe_change_by_ce_change)
        }),
    ]
}

pub fn render_row<T: ColumnSource>(columns: &[ColumnConfig<T>], row: &T) -> Vec<Cell> {
    columns.iter().map(|column| column.render(row)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::aggregator::summarize_records;

    fn record(ce: f64, pe: f64) -> OiRecord {
        OiRecord {
            symbol: "BANKNIFTY".to_string(),
            underlying: "BANKNIFTY".to_string(),
            underlying_value: 45_468.5,
            timestamp: 1_690_700_000_000,
            expiry_date: "03-Aug-2023".to_string(),
            ce_coi_total: ce,
            pe_coi_total: pe,
        }
    }

    fn labels<T: ColumnSource>(columns: &[ColumnConfig<T>]) -> Vec<&'static str> {
        columns.iter().map(|c| c.label).collect()
    }

    #[test]
    fn test_column_order() {
        let columns = snapshot_columns::<OiRecord>();
        assert_eq!(
            labels(&columns),
            vec![
                "Time",
                "CE Change In Open Interest",
                "PE Change In Open Interest",
                "Difference: CE - PE",
                "Difference: PE - CE",
                "CE Total / PE Total",
                "PE Total / CE Total",
                "Underlying",
                "Underlying Value",
                "Expiry Date",
            ]
        );
    }

    #[test]
    fn test_record_row() {
        let cells = render_row(&snapshot_columns::<OiRecord>(), &record(1200.0, 800.0));
        let text: Vec<String> = cells.iter().map(|c| c.to_string()).collect();

        assert_eq!(text[0].len(), 19);
        assert_eq!(&text[1..], &[
            "1200",
            "800",
            "400",
            "-400",
            "1.5000",
            "0.6667",
            "BANKNIFTY",
            "45468.5",
            "03-Aug-2023",
        ]);
    }

    #[test]
    fn test_record_row_zero_divisors() {
        let cells = render_row(&snapshot_columns::<OiRecord>(), &record(0.0, 0.0));
        assert!(cells[5].is_absent());
        assert!(cells[6].is_absent());
        assert_eq!(cells[3], Cell::Number(0.0));
    }

    #[test]
    fn test_summary_row_shares_columns() {
        let summary = summarize_records(&[record(0.0, 200.0), record(0.0, 300.0)]);
        let cells = render_row(&snapshot_columns::<GroupSummary>(), &summary);

        assert_eq!(cells[1], Cell::Number(0.0));
        assert_eq!(cells[2], Cell::Number(500.0));
        assert_eq!(cells[3], Cell::Number(-500.0));
        assert_eq!(cells[5], Cell::Ratio(0.0));
        assert!(cells[6].is_absent());
        assert!(cells[7].is_absent());
        assert!(cells[9].is_absent());
    }

    #[test]
    fn test_signed_columns_are_differences() {
        let signed: Vec<&str> = snapshot_columns::<OiRecord>()
            .into_iter()
            .filter(|c| c.signed)
            .map(|c| c.label)
            .collect();
        assert_eq!(signed, vec!["Difference: CE - PE", "Difference: PE - CE"]);
    }
}
