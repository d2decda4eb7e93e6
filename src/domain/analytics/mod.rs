//! Pure transforms over a day's records: filter by underlying, chunk into
//! fixed-size groups, and summarize each group against its predecessor.

pub mod aggregator;
pub mod chunker;
pub mod filter;

pub use aggregator::{GroupComparison, GroupSummary, compare, ratio, summarize, summarize_groups};
pub use chunker::{ChunkSize, Group, chunk};
pub use filter::filter_by_underlying;
