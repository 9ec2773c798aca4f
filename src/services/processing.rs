use anyhow::Result;
use log::{info, warn};

use crate::config::{get_sources, AppConfig};
use crate::database::{self, records, snapshots, DbConn, DbPool};
use crate::domain::Snapshot;
use crate::pipeline::Pipeline;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingSummary {
    pub snapshots: usize,
    pub skipped: usize,
    pub records: usize,
}

pub struct ProcessingService {
    pipeline: Pipeline,
    pool: DbPool,
}

impl ProcessingService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.database_path)?;
        Self::with_pool(config, pool)
    }

    pub fn with_pool(config: &AppConfig, pool: DbPool) -> Result<Self> {
        Ok(Self {
            pipeline: Pipeline::new(&config.pipeline, get_sources())?,
            pool,
        })
    }

    /// Rebuild every scored record from the stored raw snapshots
    pub fn run(&self) -> Result<ProcessingSummary> {
        info!("=== Starting Snapshot Processing ===\n");

        let mut conn = database::get_connection(&self.pool)?;
        database::setup::ensure_schema(&mut conn)?;
        database::setup::reset_records(&mut conn)?;

        let stored = snapshots::list_snapshots(&mut conn)?;
        info!("  → Loaded {} raw snapshots\n", stored.len());

        let mut summary = ProcessingSummary {
            snapshots: stored.len(),
            ..Default::default()
        };

        for snapshot in &stored {
            match self.process_snapshot(&mut conn, snapshot)? {
                Some(count) => summary.records += count,
                None => summary.skipped += 1,
            }
        }

        info!(
            "=== Processing Complete: {} records from {} snapshots ({} skipped) ===",
            summary.records, summary.snapshots, summary.skipped
        );
        Ok(summary)
    }

    fn process_snapshot(&self, conn: &mut DbConn, snapshot: &Snapshot) -> Result<Option<usize>> {
        info!("Processing snapshot {} ({} {})", snapshot.id, snapshot.date, snapshot.time);

        match self.pipeline.run(&snapshot.content, snapshot.date, snapshot.time) {
            Ok(scored) => {
                let saved = records::insert_records(conn, &scored)?;
                info!("  → Saved {} records\n", saved);
                Ok(Some(saved))
            }
            Err(e) => {
                warn!("Nothing to process for snapshot {}: {}", snapshot.id, e);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    const PAGE: &str = r#"
        <div id="node-1">
            <a href="/l?e=1" target="_blank"><span class="s">1</span><span class="t">全国多地迎来降温</span><span class="e">50万</span></a>
            <a href="/l?e=2" target="_blank"><span class="s">2</span><span class="t">新款电影定档</span><span class="e">40万</span></a>
            <a href="/l?e=3" target="_blank"><span class="s">3</span><span class="t">高铁新线路开通运营</span><span class="e"></span></a>
            <a href="/l?e=4" target="_blank"><span class="s">4</span><span class="t">科学家发现新物种</span><span class="e">10万</span></a>
        </div>
    "#;

    #[test]
    fn test_run_rebuilds_records_from_snapshots() {
        let pool = database::create_memory_pool().unwrap();
        {
            let mut conn = database::get_connection(&pool).unwrap();
            database::setup::ensure_schema(&mut conn).unwrap();
            let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
            snapshots::save_snapshot(&mut conn, date, NaiveTime::from_hms_opt(8, 0, 0).unwrap(), PAGE).unwrap();
            snapshots::save_snapshot(&mut conn, date, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), "<html></html>").unwrap();
        }

        let service = ProcessingService::with_pool(&AppConfig::new(), pool.clone()).unwrap();
        let summary = service.run().unwrap();
        assert_eq!(summary, ProcessingSummary { snapshots: 2, skipped: 1, records: 3 });

        // Reprocessing replaces instead of appending
        let summary = service.run().unwrap();
        assert_eq!(summary.records, 3);

        let mut conn = database::get_connection(&pool).unwrap();
        let date = records::latest_date(&mut conn).unwrap().unwrap();
        let stored = records::list_by_date(&mut conn, date).unwrap();
        assert_eq!(stored.len(), 3);
        assert!(stored.iter().all(|r| r.heat.is_some() && r.weighted_sentiment.is_some()));
    }
}
