use chrono::{NaiveDate, NaiveTime};

/// Raw markup of the aggregator page captured at one moment.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub id: i64,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub content: String,
}
