// Snapshot record model
pub mod record;
pub mod trading_date;
pub mod underlying;

pub use record::OiRecord;
pub use trading_date::TradingDate;
pub use underlying::Underlying;
