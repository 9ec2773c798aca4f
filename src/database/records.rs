use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::{Record, Tokens};
use crate::errors::storage_context;

const SELECT_COLUMNS: &str = "date, time, source, title, rank, raw_heat, heat, link, sentiment, weighted_sentiment, tokens";

/// Persist one batch of fully scored records in a single transaction.
///
/// Records missing heat, sentiment, weighted sentiment or tokens are refused.
pub fn insert_records(conn: &mut DbConn, records: &[Record]) -> Result<usize> {
    let tx = conn.transaction().context("Failed to start transaction")?;

    {
        let sql = format!(
            "INSERT INTO news ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            SELECT_COLUMNS
        );
        let mut stmt = tx.prepare(&sql)?;

        for record in records {
            let (heat, sentiment, weighted, tokens) = complete_fields(record)?;
            stmt.execute(params![
                record.date,
                record.time,
                record.source,
                record.title,
                record.rank,
                record.raw_heat,
                heat,
                record.link,
                sentiment,
                weighted,
                tokens
            ])
            .with_context(|| storage_context("insert", "news"))?;
        }
    }

    tx.commit().context("Failed to commit records")?;
    Ok(records.len())
}

fn complete_fields(record: &Record) -> Result<(i64, f64, f64, String)> {
    let incomplete = || anyhow::anyhow!("Record {} #{} is not fully scored", record.source, record.rank);

    let heat = record.heat.ok_or_else(incomplete)?;
    let sentiment = record.sentiment.ok_or_else(incomplete)?;
    let weighted = record.weighted_sentiment.ok_or_else(incomplete)?;
    let tokens = record.tokens.as_ref().ok_or_else(incomplete)?;
    let tokens_json = serde_json::to_string(tokens).context("Failed to serialize tokens")?;

    Ok((heat, sentiment, weighted, tokens_json))
}

fn parse_record_row(row: &rusqlite::Row) -> rusqlite::Result<Record> {
    let tokens_json: String = row.get(10)?;
    let tokens: Tokens = serde_json::from_str(&tokens_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(10, rusqlite::types::Type::Text, Box::new(e)))?;

    Ok(Record {
        date: row.get(0)?,
        time: row.get(1)?,
        source: row.get(2)?,
        title: row.get(3)?,
        rank: row.get(4)?,
        raw_heat: row.get(5)?,
        heat: row.get(6)?,
        link: row.get(7)?,
        sentiment: row.get(8)?,
        weighted_sentiment: row.get(9)?,
        tokens: Some(tokens),
    })
}

pub fn list_by_date(conn: &mut DbConn, date: NaiveDate) -> Result<Vec<Record>> {
    let sql = format!(
        "SELECT {} FROM news WHERE date = ?1 ORDER BY time, source, rank",
        SELECT_COLUMNS
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![date], parse_record_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn latest_date(conn: &mut DbConn) -> Result<Option<NaiveDate>> {
    conn.query_row("SELECT MAX(date) FROM news", [], |row| row.get(0))
        .context("Failed to query latest date")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{create_memory_pool, get_connection, setup};
    use chrono::NaiveTime;

    fn scored(date: NaiveDate, rank: u32, tokens: Tokens) -> Record {
        let mut r = Record::new(
            date,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            "微博",
            "航天员顺利出舱",
            rank,
            "12万",
            "/l?e=1",
        );
        r.heat = Some(120_000);
        r.sentiment = Some(0.4);
        r.weighted_sentiment = Some(12.5);
        r.tokens = Some(tokens);
        r
    }

    #[test]
    fn test_insert_and_read_back() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::ensure_schema(&mut conn).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let records = vec![
            scored(date, 1, Tokens::Words(vec!["航天员".to_string(), "顺利".to_string()])),
            scored(date, 2, Tokens::Raw("出舱".to_string())),
        ];
        assert_eq!(insert_records(&mut conn, &records).unwrap(), 2);

        let loaded = list_by_date(&mut conn, date).unwrap();
        assert_eq!(loaded, records);
        assert_eq!(latest_date(&mut conn).unwrap(), Some(date));
    }

    #[test]
    fn test_incomplete_record_is_refused() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::ensure_schema(&mut conn).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        let mut record = scored(date, 1, Tokens::Raw("x".to_string()));
        record.heat = None;

        assert!(insert_records(&mut conn, &[record]).is_err());
        assert!(list_by_date(&mut conn, date).unwrap().is_empty());
    }

    #[test]
    fn test_latest_date_of_empty_table() {
        let pool = create_memory_pool().unwrap();
        let mut conn = get_connection(&pool).unwrap();
        setup::ensure_schema(&mut conn).unwrap();

        assert_eq!(latest_date(&mut conn).unwrap(), None);
    }
}
