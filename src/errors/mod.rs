use thiserror::Error;

/// Structural failures of a pipeline batch.
///
/// Per-record anomalies (malformed anchors, unparseable heat, unscorable
/// titles) never surface here; they are logged and the record is skipped.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("batch {date} {time} contains no records")]
    EmptyBatch { date: String, time: String },

    #[error("markup could not be read: {0}")]
    UnreadableMarkup(String),

    #[error("title could not be scored: {0}")]
    UnscorableTitle(String),
}

/// Add context to fetch errors
pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Add context to storage errors
pub fn storage_context(operation: &str, table: &str) -> String {
    format!("Failed to {} rows in table: {}", operation, table)
}
