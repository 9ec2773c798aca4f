use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::params;

use super::connection::DbConn;
use super::models::{DailySentiment, SourceHeat, SourceSentiment, WordCount};
use super::records::latest_date;
use crate::domain::Tokens;
use crate::errors::parse_context;

/// The requested date, or the most recent stored date when none is given.
pub fn resolve_date(conn: &mut DbConn, date: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    match date {
        Some(date) => Ok(Some(date)),
        None => latest_date(conn),
    }
}

pub fn word_cloud(conn: &mut DbConn, date: NaiveDate) -> Result<Vec<WordCount>> {
    let mut stmt = conn.prepare("SELECT tokens FROM news WHERE date = ?1")?;
    let token_rows = stmt
        .query_map(params![date], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut counts: HashMap<String, i64> = HashMap::new();
    for json in token_rows {
        let tokens: Tokens = serde_json::from_str(&json).with_context(|| parse_context("stored tokens"))?;
        for word in tokens.words() {
            *counts.entry(word.to_string()).or_insert(0) += 1;
        }
    }

    let mut words: Vec<WordCount> = counts
        .into_iter()
        .map(|(name, value)| WordCount { name, value })
        .collect();
    words.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));

    Ok(words)
}

pub fn source_heat(conn: &mut DbConn, date: NaiveDate) -> Result<Vec<SourceHeat>> {
    let sql = "SELECT source, SUM(heat) FROM news WHERE date = ?1 GROUP BY source ORDER BY source";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![date], |row| {
            Ok(SourceHeat {
                name: row.get(0)?,
                value: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn daily_weighted_sentiment(conn: &mut DbConn) -> Result<Vec<DailySentiment>> {
    let sql = "SELECT date, SUM(weighted_sentiment) FROM news GROUP BY date ORDER BY date";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(DailySentiment {
                date: row.get(0)?,
                value: row.get::<_, Option<f64>>(1)?.unwrap_or(0.0),
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn source_sentiment(conn: &mut DbConn, date: NaiveDate) -> Result<Vec<SourceSentiment>> {
    let sql = "
        SELECT
            source,
            SUM(CASE WHEN weighted_sentiment > 0 THEN weighted_sentiment ELSE 0.0 END),
            SUM(CASE WHEN weighted_sentiment < 0 THEN -weighted_sentiment ELSE 0.0 END)
        FROM news
        WHERE date = ?1
        GROUP BY source
        ORDER BY source
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![date], |row| {
            Ok(SourceSentiment {
                category: row.get(0)?,
                positive: row.get(1)?,
                negative: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}
