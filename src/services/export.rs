use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use serde::Serialize;

use crate::config::AppConfig;
use crate::database::{self, reports, DbPool};

/// Writes the chart data for the static dashboard as ES modules
pub struct ExportService {
    pool: DbPool,
    output_dir: PathBuf,
}

impl ExportService {
    pub fn new(config: &AppConfig, output_dir: Option<&str>) -> Result<Self> {
        let pool = database::create_pool(&config.database_path)?;
        let dir = output_dir.unwrap_or(&config.output.export_dir);
        Ok(Self::with_pool(pool, dir))
    }

    pub fn with_pool(pool: DbPool, output_dir: impl AsRef<Path>) -> Self {
        Self {
            pool,
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Export the latest scored day; returns the written files.
    pub fn run(&self) -> Result<Vec<PathBuf>> {
        info!("=== Starting Chart Export ===\n");

        let mut conn = database::get_connection(&self.pool)?;
        database::setup::ensure_schema(&mut conn)?;

        let Some(date) = reports::resolve_date(&mut conn, None)? else {
            warn!("No scored records found, nothing to export");
            return Ok(Vec::new());
        };
        info!("  → Exporting {}", date);

        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;

        let written = vec![
            self.write_module("wordCloudData.js", "wordCloudData", &reports::word_cloud(&mut conn, date)?)?,
            self.write_module("pieChartData.js", "pieChartData", &reports::source_heat(&mut conn, date)?)?,
            self.write_module("lineChartData.js", "lineChartData", &reports::daily_weighted_sentiment(&mut conn)?)?,
            self.write_module("barChartData.js", "barChartData", &reports::source_sentiment(&mut conn, date)?)?,
        ];

        info!("=== Export Complete: {} files in {} ===", written.len(), self.output_dir.display());
        Ok(written)
    }

    fn write_module<T: Serialize>(&self, file_name: &str, variable: &str, data: &T) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        fs::write(&path, render_module(variable, data)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("  → Wrote {}", path.display());
        Ok(path)
    }
}

pub fn render_module<T: Serialize>(variable: &str, data: &T) -> Result<String> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize chart data")?;
    Ok(format!("export const {} = {};\n", variable, json))
}
