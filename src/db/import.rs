//! Snapshot import.
//!
//! The database stays the source of truth: a snapshot's `stats` field is
//! ignored and recomputed from the imported rows.

use super::Database;
use super::export::Snapshot;
use anyhow::Result;
use rusqlite::params;

/// How imported rows combine with existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Wipe both tables, then insert snapshot rows preserving their ids.
    /// This is the round-trip reconstruction path.
    #[default]
    Replace,
    /// Keep existing rows and append snapshot rows under fresh ids.
    Merge,
}

/// Row counts written by an import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub custom_tasks: usize,
    pub daily_tasks: usize,
}

impl Database {
    /// Import a snapshot in a single transaction.
    pub fn import_snapshot(&self, snapshot: &Snapshot, mode: ImportMode) -> Result<ImportSummary> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            if mode == ImportMode::Replace {
                tx.execute("DELETE FROM custom_tasks", [])?;
                tx.execute("DELETE FROM daily_tasks", [])?;
            }

            for task in &snapshot.custom_tasks {
                match mode {
                    ImportMode::Replace => tx.execute(
                        "INSERT INTO custom_tasks (id, name, score, created_at)
                         VALUES (?1, ?2, ?3, ?4)",
                        params![task.id, task.name, task.score, task.created_at],
                    )?,
                    ImportMode::Merge => tx.execute(
                        "INSERT INTO custom_tasks (name, score, created_at)
                         VALUES (?1, ?2, ?3)",
                        params![task.name, task.score, task.created_at],
                    )?,
                };
            }

            for task in &snapshot.daily_tasks {
                match mode {
                    ImportMode::Replace => tx.execute(
                        "INSERT INTO daily_tasks (id, name, score, date, timestamp, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![
                            task.id,
                            task.name,
                            task.score,
                            task.date,
                            task.timestamp,
                            task.created_at
                        ],
                    )?,
                    ImportMode::Merge => tx.execute(
                        "INSERT INTO daily_tasks (name, score, date, timestamp, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        params![task.name, task.score, task.date, task.timestamp, task.created_at],
                    )?,
                };
            }

            tx.commit()?;

            Ok(ImportSummary {
                custom_tasks: snapshot.custom_tasks.len(),
                daily_tasks: snapshot.daily_tasks.len(),
            })
        })
    }
}
