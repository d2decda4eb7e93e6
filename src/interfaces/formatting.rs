use chrono::{Local, TimeZone};
use serde::Serialize;
use std::fmt;

/// Rendered in place of a value that does not exist (zero divisor, no
/// previous group, field not applicable to the row).
pub const ABSENT: &str = "-";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One display value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    Text(String),
    Number(f64),
    Ratio(f64),
    Absent,
}

/// Sign of a numeric cell, used for coloring differences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl Cell {
    pub fn number(value: Option<f64>) -> Self {
        value.map_or(Cell::Absent, Cell::Number)
    }

    pub fn ratio(value: Option<f64>) -> Self {
        value.map_or(Cell::Absent, Cell::Ratio)
    }

    pub fn text(value: Option<String>) -> Self {
        value.map_or(Cell::Absent, Cell::Text)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Cell::Absent)
    }

    pub fn tone(&self) -> Tone {
        match self {
            Cell::Number(v) | Cell::Ratio(v) if *v > 0.0 => Tone::Positive,
            Cell::Number(v) | Cell::Ratio(v) if *v < 0.0 => Tone::Negative,
            _ => Tone::Neutral,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(text) => f.write_str(text),
            Cell::Number(value) => f.write_str(&format_number(*value)),
            Cell::Ratio(value) if value.is_finite() => write!(f, "{:.4}", value),
            Cell::Ratio(_) | Cell::Absent => f.write_str(ABSENT),
        }
    }
}

/// Shortest round-trip form; integral values print without a fraction.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return ABSENT.to_string();
    }
    if value == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", value)
}

/// `YYYY-MM-DD HH:MM:SS` (24-hour) of an epoch-millisecond value in `tz`.
pub fn format_timestamp_in<Tz>(epoch_ms: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    tz.timestamp_millis_opt(epoch_ms)
        .single()
        .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
}

/// Same as [`format_timestamp_in`] in the viewer's local zone.
pub fn format_timestamp(epoch_ms: i64) -> Option<String> {
    format_timestamp_in(epoch_ms, &Local)
}
