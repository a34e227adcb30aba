//! Daily log CRUD with optional date filtering.

use super::{Database, now_datetime};
use crate::types::DailyTask;
use anyhow::Result;
use rusqlite::{Row, params};

pub(crate) fn parse_daily_task_row(row: &Row) -> rusqlite::Result<DailyTask> {
    Ok(DailyTask {
        id: row.get("id")?,
        name: row.get("name")?,
        score: row.get("score")?,
        date: row.get("date")?,
        timestamp: row.get("timestamp")?,
        created_at: row.get("created_at")?,
    })
}

impl Database {
    /// Log a completed task. `name` and `score` are stored by value;
    /// there is no reference back to any custom task.
    pub fn create_daily_task(
        &self,
        name: &str,
        score: i64,
        date: &str,
        timestamp: &str,
    ) -> Result<DailyTask> {
        let created_at = now_datetime();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO daily_tasks (name, score, date, timestamp, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![name, score, date, timestamp, created_at],
            )?;
            let id = conn.last_insert_rowid();

            Ok(DailyTask {
                id,
                name: name.to_string(),
                score,
                date: date.to_string(),
                timestamp: timestamp.to_string(),
                created_at,
            })
        })
    }

    /// List log entries, newest first, optionally restricted to one
    /// calendar date (exact match on the `YYYY-MM-DD` key).
    pub fn list_daily_tasks(&self, date: Option<&str>) -> Result<Vec<DailyTask>> {
        self.with_conn(|conn| {
            let tasks = match date {
                Some(date) => {
                    let mut stmt = conn.prepare(
                        "SELECT id, name, score, date, timestamp, created_at
                         FROM daily_tasks WHERE date = ?1
                         ORDER BY created_at DESC, id DESC",
                    )?;
                    stmt.query_map(params![date], parse_daily_task_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?
                }
                None => {
                    let mut stmt = conn.prepare(
                        "SELECT id, name, score, date, timestamp, created_at
                         FROM daily_tasks
                         ORDER BY created_at DESC, id DESC",
                    )?;
                    stmt.query_map([], parse_daily_task_row)?
                        .collect::<rusqlite::Result<Vec<_>>>()?
                }
            };
            Ok(tasks)
        })
    }

    /// Delete a log entry by id. Returns false when no row matched.
    pub fn delete_daily_task(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM daily_tasks WHERE id = ?1", params![id])?;
            Ok(changed > 0)
        })
    }
}
