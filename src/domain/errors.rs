use thiserror::Error;

/// Errors raised while retrieving a daily open-interest snapshot
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid snapshot URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Snapshot endpoint {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode snapshot from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("No snapshot available for {date}")]
    Missing { date: String },
}

/// Errors related to grouping records
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    #[error("Chunk size must be positive, got {size}")]
    NonPositive { size: i64 },
}

/// Errors raised when parsing a calendar date or an underlying symbol
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("Unknown underlying '{input}'")]
    UnknownUnderlying { input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_formatting() {
        let error = FetchError::Status {
            url: "http://localhost/load-json/2023-07-30.json".to_string(),
            status: 404,
        };

        let msg = error.to_string();
        assert!(msg.contains("2023-07-30.json"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn test_chunk_error_formatting() {
        let error = ChunkError::NonPositive { size: -3 };
        assert_eq!(error.to_string(), "Chunk size must be positive, got -3");
    }
}
