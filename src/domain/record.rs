use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::tokens::Tokens;

/// One ranked hot list entry, carried through every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub source: String,
    pub title: String,
    pub rank: u32,
    pub raw_heat: String,
    pub heat: Option<i64>,
    pub link: String,
    pub sentiment: Option<f64>,
    pub weighted_sentiment: Option<f64>,
    pub tokens: Option<Tokens>,
}

impl Record {
    pub fn new(
        date: NaiveDate,
        time: NaiveTime,
        source: &str,
        title: &str,
        rank: u32,
        raw_heat: &str,
        link: &str,
    ) -> Self {
        Self {
            date,
            time,
            source: source.to_string(),
            title: title.to_string(),
            rank,
            raw_heat: raw_heat.to_string(),
            heat: None,
            link: link.to_string(),
            sentiment: None,
            weighted_sentiment: None,
            tokens: None,
        }
    }

    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            date: self.date,
            time: self.time,
            source: self.source.clone(),
        }
    }
}

/// Records sharing one snapshot and one source. Imputation and rank
/// normalization never look past this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub source: String,
}

/// Split records into groups, keeping first-appearance order of groups and
/// document order inside each group.
pub fn partition_by_group(records: Vec<Record>) -> Vec<(GroupKey, Vec<Record>)> {
    let mut groups: Vec<(GroupKey, Vec<Record>)> = Vec::new();

    for record in records {
        let key = record.group_key();
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(record),
            None => groups.push((key, vec![record])),
        }
    }

    groups
}
