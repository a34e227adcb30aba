//! Custom-task CRUD, substring search, and usage-frequency ranking.

use super::{Database, now_datetime};
use crate::types::{CustomTask, RankedCustomTask, SortKey};
use anyhow::Result;
use rusqlite::{Row, params};

pub(crate) fn parse_custom_task_row(row: &Row) -> rusqlite::Result<CustomTask> {
    Ok(CustomTask {
        id: row.get("id")?,
        name: row.get("name")?,
        score: row.get("score")?,
        created_at: row.get("created_at")?,
    })
}

/// Escape LIKE metacharacters so user input matches literally.
/// Unescaped, `%` and `_` in a query act as wildcards.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// ORDER BY clause for a ranked listing. Ties always fall back to
/// newest-first; id breaks same-second created_at collisions.
fn order_clause(sort: SortKey) -> &'static str {
    match sort {
        SortKey::CreatedAt => "ct.created_at DESC, ct.id DESC",
        SortKey::Score => "ct.score DESC, ct.created_at DESC, ct.id DESC",
        SortKey::Frequency => "usage_count DESC, ct.created_at DESC, ct.id DESC",
    }
}

impl Database {
    /// Create a custom task and return the stored row.
    pub fn create_custom_task(&self, name: &str, score: i64) -> Result<CustomTask> {
        let created_at = now_datetime();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO custom_tasks (name, score, created_at) VALUES (?1, ?2, ?3)",
                params![name, score, created_at],
            )?;
            let id = conn.last_insert_rowid();

            Ok(CustomTask {
                id,
                name: name.to_string(),
                score,
                created_at,
            })
        })
    }

    /// List all custom tasks, newest first.
    pub fn list_custom_tasks(&self) -> Result<Vec<CustomTask>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, score, created_at FROM custom_tasks
                 ORDER BY created_at DESC, id DESC",
            )?;
            let tasks = stmt
                .query_map([], parse_custom_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    /// Delete a custom task by id. Returns false when no row matched.
    pub fn delete_custom_task(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM custom_tasks WHERE id = ?1", params![id])?;
            Ok(changed > 0)
        })
    }

    /// Case-insensitive substring search over custom-task names.
    ///
    /// An empty or whitespace-only query returns the full list. LIKE
    /// metacharacters in the query are escaped, so `100%` only matches
    /// names actually containing `100%`.
    pub fn search_custom_tasks(&self, query: &str) -> Result<Vec<CustomTask>> {
        let query = query.trim();
        if query.is_empty() {
            return self.list_custom_tasks();
        }

        let pattern = format!("%{}%", escape_like(query));
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, score, created_at FROM custom_tasks
                 WHERE name LIKE ?1 ESCAPE '\\'
                 ORDER BY created_at DESC, id DESC",
            )?;
            let tasks = stmt
                .query_map(params![pattern], parse_custom_task_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }

    /// List custom tasks with their usage counts, in the requested order.
    ///
    /// Usage is the number of daily log entries whose name exactly equals
    /// the custom task's name; tasks never logged count 0. The link is by
    /// name only, so renaming a template would orphan its history; there
    /// is deliberately no rename operation.
    pub fn list_custom_tasks_ranked(&self, sort: SortKey) -> Result<Vec<RankedCustomTask>> {
        let sql = format!(
            "SELECT ct.id, ct.name, ct.score, ct.created_at,
                    COALESCE(usage.usage_count, 0) AS usage_count
             FROM custom_tasks ct
             LEFT JOIN (
                 SELECT name, COUNT(*) AS usage_count
                 FROM daily_tasks
                 GROUP BY name
             ) usage ON usage.name = ct.name
             ORDER BY {}",
            order_clause(sort)
        );

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let tasks = stmt
                .query_map([], |row| {
                    Ok(RankedCustomTask {
                        task: parse_custom_task_row(row)?,
                        usage_count: row.get("usage_count")?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(tasks)
        })
    }
}
