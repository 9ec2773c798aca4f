use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use log::{info, warn};

use crate::cleaning::Cleaner;
use crate::config::{PipelineSettings, SourceConfig};
use crate::domain::record::partition_by_group;
use crate::domain::Record;
use crate::errors::PipelineError;
use crate::imputation::HeatImputer;
use crate::parser::RecordParser;
use crate::scoring::WeightedScoreAggregator;
use crate::sentiment::ScoringContext;

/// Runs one snapshot through parse, clean, impute, score and weight
pub struct Pipeline {
    parser: RecordParser,
    cleaner: Cleaner,
    imputer: HeatImputer,
    scoring: ScoringContext,
    aggregator: WeightedScoreAggregator,
    sources: Vec<SourceConfig>,
}

impl Pipeline {
    pub fn new(settings: &PipelineSettings, sources: Vec<SourceConfig>) -> Result<Self> {
        Ok(Self {
            parser: RecordParser::new()?,
            cleaner: Cleaner::new(settings)?,
            imputer: HeatImputer::new(settings.min_fit_points),
            scoring: ScoringContext::new(settings),
            aggregator: WeightedScoreAggregator::new(settings.rank_decay_exponent),
            sources,
        })
    }

    /// Process one snapshot's markup into fully scored records.
    ///
    /// Fails only when the markup yields no records at all.
    pub fn run(&self, html: &str, date: NaiveDate, time: NaiveTime) -> Result<Vec<Record>, PipelineError> {
        if html.trim().is_empty() {
            return Err(PipelineError::UnreadableMarkup(format!("empty snapshot {} {}", date, time)));
        }

        let parsed = self.parser.parse_snapshot(html, date, time, &self.sources);
        if parsed.is_empty() {
            return Err(PipelineError::EmptyBatch {
                date: date.to_string(),
                time: time.to_string(),
            });
        }
        info!("  → Parsed {} records", parsed.len());

        Ok(self.process(parsed))
    }

    /// Every stage after parsing, over an already materialized batch.
    pub fn process(&self, records: Vec<Record>) -> Vec<Record> {
        let cleaned = self.cleaner.clean(records);
        let imputed = self.impute(cleaned);
        let mut scored = self.score(imputed);
        self.aggregator.apply(&mut scored);

        info!("  → {} records fully scored", scored.len());
        scored
    }

    fn impute(&self, records: Vec<Record>) -> Vec<Record> {
        let before = records.len();

        let imputed: Vec<Record> = partition_by_group(records)
            .into_iter()
            .flat_map(|(_, group)| self.imputer.impute(group))
            .collect();

        let dropped = before - imputed.len();
        if dropped > 0 {
            info!("  → Dropped {} records with unrecoverable heat", dropped);
        }
        imputed
    }

    fn score(&self, records: Vec<Record>) -> Vec<Record> {
        records
            .into_iter()
            .filter_map(|mut record| match self.scoring.score(&record.title) {
                Ok(scored) => {
                    record.sentiment = Some(scored.sentiment);
                    record.tokens = Some(scored.tokens);
                    Some(record)
                }
                Err(e) => {
                    warn!("Skipping {} #{}: {}", record.source, record.rank, e);
                    None
                }
            })
            .collect()
    }
}
