pub mod digest;
pub mod export;
pub mod ingestion;
pub mod processing;
pub mod server;
