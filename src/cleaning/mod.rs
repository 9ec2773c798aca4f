pub mod category_filter;
pub mod heat;

pub use category_filter::CategoryFilter;
pub use heat::HeatNormalizer;

use anyhow::Result;
use log::info;

use crate::config::{PipelineSettings, CATEGORY_DENYLIST};
use crate::domain::Record;

/// Drops off-topic records and parses heat text into magnitudes
pub struct Cleaner {
    filter: CategoryFilter,
    normalizer: HeatNormalizer,
}

impl Cleaner {
    pub fn new(settings: &PipelineSettings) -> Result<Self> {
        Ok(Self {
            filter: CategoryFilter::new(CATEGORY_DENYLIST)?,
            normalizer: HeatNormalizer::new(settings.heat_unit_multiplier)?,
        })
    }

    pub fn clean(&self, records: Vec<Record>) -> Vec<Record> {
        let before = records.len();
        let mut kept = self.filter.apply(records);
        info!("  → Category filter removed {} records", before - kept.len());

        self.normalizer.apply(&mut kept);
        let missing = kept.iter().filter(|r| r.heat.is_none()).count();
        info!("  → {} records without parseable heat", missing);

        kept
    }
}
