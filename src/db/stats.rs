//! Aggregation queries for statistics and trends.

use super::Database;
use crate::types::{Stats, TrendPoint};
use anyhow::Result;
use chrono::{Duration, Local};
use rusqlite::params;

impl Database {
    /// Aggregate statistics over the whole daily log.
    ///
    /// The average is per *active* day (days with at least one entry),
    /// rounded to the nearest integer, and 0 when the log is empty.
    pub fn get_stats(&self) -> Result<Stats> {
        self.with_conn(|conn| {
            let (total_score, total_tasks, unique_days): (i64, i64, i64) = conn.query_row(
                "SELECT
                    COALESCE(SUM(score), 0) AS total_score,
                    COUNT(*) AS total_tasks,
                    COUNT(DISTINCT date) AS unique_days
                 FROM daily_tasks",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )?;

            let avg_score_per_day = if unique_days > 0 {
                (total_score as f64 / unique_days as f64).round() as i64
            } else {
                0
            };

            Ok(Stats {
                total_score,
                total_tasks,
                unique_days,
                avg_score_per_day,
            })
        })
    }

    /// Per-day score totals over the trailing `window_days` window,
    /// ascending by date. Days without entries are omitted (no
    /// zero-filling); the chart draws only active days.
    pub fn get_trend(&self, window_days: i64) -> Result<Vec<TrendPoint>> {
        let cutoff = (Local::now().date_naive() - Duration::days(window_days))
            .format("%Y-%m-%d")
            .to_string();

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT date, SUM(score) AS score
                 FROM daily_tasks
                 WHERE date >= ?1
                 GROUP BY date
                 ORDER BY date ASC",
            )?;
            let points = stmt
                .query_map(params![cutoff], |row| {
                    Ok(TrendPoint {
                        date: row.get(0)?,
                        score: row.get(1)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(points)
        })
    }
}
