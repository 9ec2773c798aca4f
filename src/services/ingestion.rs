use anyhow::Result;
use chrono::{Local, Timelike};
use log::info;

use crate::config::{get_sources, AppConfig};
use crate::database::{self, snapshots, DbPool};
use crate::domain::Snapshot;
use crate::fetchers::HotListFetcher;

pub struct IngestionService {
    fetcher: HotListFetcher,
    pool: DbPool,
}

impl IngestionService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            fetcher: HotListFetcher::new(&config.scraper)?,
            pool: database::create_pool(&config.database_path)?,
        })
    }

    pub async fn run(&self) -> Result<Snapshot> {
        info!("=== Starting Snapshot Ingestion ===\n");

        let html = self.fetcher.fetch(&get_sources()).await?;
        let snapshot = self.store(&html)?;
        info!("  → Stored snapshot {} taken {} {}\n", snapshot.id, snapshot.date, snapshot.time);

        info!("=== Ingestion Complete ===");
        Ok(snapshot)
    }

    fn store(&self, html: &str) -> Result<Snapshot> {
        let mut conn = database::get_connection(&self.pool)?;
        database::setup::ensure_schema(&mut conn)?;

        let now = Local::now().naive_local();
        let time = now.time().with_nanosecond(0).unwrap_or(now.time());
        let snapshot = snapshots::save_snapshot(&mut conn, now.date(), time, html)?;
        info!("  → {} snapshots stored in total", snapshots::count_snapshots(&mut conn)?);
        Ok(snapshot)
    }
}
