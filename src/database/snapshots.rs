use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use rusqlite::params;

use super::connection::DbConn;
use crate::domain::Snapshot;

pub fn save_snapshot(conn: &mut DbConn, date: NaiveDate, time: NaiveTime, content: &str) -> Result<Snapshot> {
    let sql = "INSERT INTO raw_snapshots (date, time, content) VALUES (?1, ?2, ?3) RETURNING id, date, time, content";

    conn.query_row(sql, params![date, time, content], parse_snapshot_row)
        .context("Failed to insert raw snapshot")
}

fn parse_snapshot_row(row: &rusqlite::Row) -> rusqlite::Result<Snapshot> {
    Ok(Snapshot {
        id: row.get(0)?,
        date: row.get(1)?,
        time: row.get(2)?,
        content: row.get(3)?,
    })
}

pub fn list_snapshots(conn: &mut DbConn) -> Result<Vec<Snapshot>> {
    let sql = "SELECT id, date, time, content FROM raw_snapshots ORDER BY date, time, id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_snapshot_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count_snapshots(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM raw_snapshots", [], |row| row.get(0))
        .context("Failed to count raw snapshots")
}
