use chrono::NaiveDate;
use serde::Serialize;

/// Token frequency for the word cloud
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCount {
    pub name: String,
    pub value: i64,
}

/// Heat summed over one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceHeat {
    pub name: String,
    pub value: i64,
}

/// Weighted sentiment summed over one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySentiment {
    pub date: NaiveDate,
    pub value: f64,
}

/// Positive and (absolute) negative weighted sentiment of one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSentiment {
    pub category: String,
    pub positive: f64,
    pub negative: f64,
}
