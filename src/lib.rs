pub mod api;
pub mod cleaning;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod imputation;
pub mod parser;
pub mod pipeline;
pub mod scoring;
pub mod sentiment;
pub mod services;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::services::digest::DigestService;
use crate::services::export::ExportService;
use crate::services::ingestion::IngestionService;
use crate::services::processing::ProcessingService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_ingest() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = IngestionService::new(&config)?;
        service.run().await.map(|_| ())
    })
}

pub fn handle_process() -> Result<()> {
    let config = AppConfig::new();
    let service = ProcessingService::new(&config)?;
    service.run().map(|_| ())
}

pub fn handle_export(output_dir: Option<&str>) -> Result<()> {
    let config = AppConfig::new();
    let service = ExportService::new(&config, output_dir)?;
    service.run().map(|_| ())
}

pub fn handle_digest(limit: Option<usize>, output: Option<&str>) -> Result<()> {
    let config = AppConfig::new();
    let path = output.unwrap_or(&config.output.digest_path).to_string();
    let service = DigestService::new(&config, limit)?;
    service.run(Path::new(&path)).map(|_| ())
}
