use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Record, Tokens};

/// A date-keyed aggregate; `date` is null when nothing has been stored yet
#[derive(Debug, Serialize)]
pub struct DatedResponse<T: Serialize> {
    pub date: Option<NaiveDate>,
    pub items: Vec<T>,
}

impl<T: Serialize> DatedResponse<T> {
    pub fn empty() -> Self {
        Self { date: None, items: Vec::new() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub time: String,
    pub source: String,
    pub title: String,
    pub rank: u32,
    pub heat: Option<i64>,
    pub link: String,
    pub sentiment: Option<f64>,
    pub weighted_sentiment: Option<f64>,
    pub tokens: Option<Tokens>,
}

impl From<Record> for NewsItem {
    fn from(record: Record) -> Self {
        Self {
            time: record.time.format("%H:%M:%S").to_string(),
            source: record.source,
            title: record.title,
            rank: record.rank,
            heat: record.heat,
            link: record.link,
            sentiment: record.sentiment,
            weighted_sentiment: record.weighted_sentiment,
            tokens: record.tokens,
        }
    }
}
