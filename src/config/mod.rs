pub mod categories;
pub mod settings;
pub mod sources;

pub use categories::CATEGORY_DENYLIST;
pub use settings::{AppConfig, OutputSettings, PipelineSettings, ScraperSettings};
pub use sources::{get_sources, SourceConfig};
