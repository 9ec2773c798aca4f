use std::collections::HashMap;

use crate::domain::{GroupKey, Record};

/// Blends polarity, popularity and rank prominence into one score:
/// `sentiment * sqrt(heat) * (1 - (rank / max_rank)^exponent)`.
pub struct WeightedScoreAggregator {
    exponent: f64,
}

impl WeightedScoreAggregator {
    pub fn new(exponent: f64) -> Self {
        Self { exponent }
    }

    /// Rank prominence in `[0, 1)`; zero at the group's worst rank.
    pub fn rank_factor(&self, rank: u32, max_rank: u32) -> f64 {
        let normalized = rank as f64 / max_rank as f64;
        1.0 - normalized.powf(self.exponent)
    }

    pub fn weighted_sentiment(&self, sentiment: f64, heat: i64, rank: u32, max_rank: u32) -> f64 {
        sentiment * (heat as f64).sqrt() * self.rank_factor(rank, max_rank)
    }

    /// Score every record that has heat and sentiment, normalizing rank by
    /// the maximum rank of its (date, time, source) group.
    pub fn apply(&self, records: &mut [Record]) {
        let max_ranks = max_rank_by_group(records);

        for record in records.iter_mut() {
            let max_rank = max_ranks.get(&record.group_key()).copied();
            record.weighted_sentiment = match (record.sentiment, record.heat, max_rank) {
                (Some(sentiment), Some(heat), Some(max_rank)) => {
                    Some(self.weighted_sentiment(sentiment, heat, record.rank, max_rank))
                }
                _ => None,
            };
        }
    }
}

fn max_rank_by_group(records: &[Record]) -> HashMap<GroupKey, u32> {
    let mut max_ranks = HashMap::new();
    for record in records {
        let entry = max_ranks.entry(record.group_key()).or_insert(record.rank);
        *entry = (*entry).max(record.rank);
    }
    max_ranks
}
