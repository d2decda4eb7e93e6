use crate::domain::errors::ParseError;
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Calendar date a snapshot file is keyed by, rendered as `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TradingDate(NaiveDate);

impl TradingDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Today in the viewer's local calendar
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Previous calendar day (saturates at the minimum representable date)
    pub fn previous(&self) -> Self {
        Self(self.0.checked_sub_days(Days::new(1)).unwrap_or(self.0))
    }

    pub fn next(&self) -> Self {
        Self(self.0.checked_add_days(Days::new(1)).unwrap_or(self.0))
    }

    /// Name of the snapshot file for this date, e.g. `2023-07-30.json`
    pub fn file_name(&self) -> String {
        format!("{}.json", self)
    }
}

impl fmt::Display for TradingDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

impl FromStr for TradingDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)
            .map(Self)
            .map_err(|_| ParseError::InvalidDate {
                input: s.to_string(),
            })
    }
}

impl TryFrom<String> for TradingDate {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TradingDate> for String {
    fn from(value: TradingDate) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded_iso() {
        let date = TradingDate::from_ymd(2023, 7, 3).unwrap();
        assert_eq!(date.to_string(), "2023-07-03");
        assert_eq!(date.file_name(), "2023-07-03.json");
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!("30/07/2023".parse::<TradingDate>().is_err());
        assert!("2023-13-01".parse::<TradingDate>().is_err());
        assert_eq!(
            "2023-07-30".parse::<TradingDate>(),
            Ok(TradingDate::from_ymd(2023, 7, 30).unwrap())
        );
    }

    #[test]
    fn test_previous_and_next_cross_month_boundaries() {
        let date = TradingDate::from_ymd(2023, 8, 1).unwrap();
        assert_eq!(date.previous().to_string(), "2023-07-31");
        assert_eq!(date.previous().next(), date);
    }
}
