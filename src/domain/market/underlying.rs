use crate::domain::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Index underlyings published in the daily open-interest snapshots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Underlying {
    #[default]
    #[serde(rename = "BANKNIFTY")]
    BankNifty,
    #[serde(rename = "NIFTY")]
    Nifty,
    #[serde(rename = "FINNIFTY")]
    FinNifty,
}

impl Underlying {
    /// Symbol as it appears in the `underlying` field of a record
    pub fn as_str(&self) -> &'static str {
        match self {
            Underlying::BankNifty => "BANKNIFTY",
            Underlying::Nifty => "NIFTY",
            Underlying::FinNifty => "FINNIFTY",
        }
    }

    pub fn all() -> Vec<Underlying> {
        vec![Underlying::BankNifty, Underlying::Nifty, Underlying::FinNifty]
    }
}

impl fmt::Display for Underlying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Underlying {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BANKNIFTY" => Ok(Underlying::BankNifty),
            "NIFTY" => Ok(Underlying::Nifty),
            "FINNIFTY" => Ok(Underlying::FinNifty),
            _ => Err(ParseError::UnknownUnderlying {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("banknifty".parse::<Underlying>(), Ok(Underlying::BankNifty));
        assert_eq!(" NIFTY ".parse::<Underlying>(), Ok(Underlying::Nifty));
    }

    #[test]
    fn test_parse_unknown() {
        assert!("SENSEX".parse::<Underlying>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for u in Underlying::all() {
            assert_eq!(u.to_string().parse::<Underlying>(), Ok(u));
        }
    }
}
