pub mod record;
pub mod snapshot;
pub mod tokens;

pub use record::{GroupKey, Record};
pub use snapshot::Snapshot;
pub use tokens::Tokens;
