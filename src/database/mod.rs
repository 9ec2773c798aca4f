pub mod connection;
pub mod models;
pub mod records;
pub mod reports;
pub mod setup;
pub mod snapshots;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
