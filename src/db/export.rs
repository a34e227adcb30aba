//! Snapshot export for the pointlog database.
//!
//! Tables are queried with deterministic ordering to produce stable,
//! diffable output. The snapshot shape matches the JSON dump the
//! front-end downloads: `{customTasks, dailyTasks, stats, exportDate}`.

use super::Database;
use crate::types::{CustomTask, DailyTask, Stats};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Read, Write};
use std::path::Path;

/// A structured export of the database.
///
/// `stats` is derived data, carried for human inspection of the file;
/// import recomputes it and ignores the stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub custom_tasks: Vec<CustomTask>,
    pub daily_tasks: Vec<DailyTask>,
    pub stats: Stats,
    /// ISO 8601 timestamp of the export.
    pub export_date: String,
}

impl Snapshot {
    /// Load a snapshot from a file (plain JSON or gzip).
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let mut reader = BufReader::new(file);

        // Check for gzip magic bytes
        let mut magic = [0u8; 2];
        reader.read_exact(&mut magic)?;

        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);

        if magic == [0x1f, 0x8b] {
            let decoder = flate2::read::GzDecoder::new(reader);
            let snapshot = serde_json::from_reader(decoder)?;
            Ok(snapshot)
        } else {
            let snapshot = serde_json::from_reader(reader)?;
            Ok(snapshot)
        }
    }

    /// Write the snapshot to a file, gzipped when requested.
    pub fn to_file(&self, path: &Path, gzip: bool) -> Result<()> {
        let json = self.to_json_pretty()?;
        if gzip {
            let file = std::fs::File::create(path)?;
            let mut encoder =
                flate2::write::GzEncoder::new(file, flate2::Compression::default());
            encoder.write_all(json.as_bytes())?;
            encoder.finish()?;
        } else {
            std::fs::write(path, json)?;
        }
        Ok(())
    }

    /// Serialize to JSON with pretty formatting.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Database {
    /// Export both tables plus current stats as a snapshot.
    pub fn export_snapshot(&self) -> Result<Snapshot> {
        let custom_tasks = self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, score, created_at FROM custom_tasks ORDER BY id",
            )?;
            let tasks = stmt
                .query_map([], super::custom_tasks::parse_custom_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })?;

        let daily_tasks = self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, score, date, timestamp, created_at
                 FROM daily_tasks ORDER BY id",
            )?;
            let tasks = stmt
                .query_map([], super::daily_tasks::parse_daily_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })?;

        Ok(Snapshot {
            custom_tasks,
            daily_tasks,
            stats: self.get_stats()?,
            export_date: chrono::Utc::now().to_rfc3339(),
        })
    }
}
