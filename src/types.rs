//! Core types for the pointlog service.

use serde::{Deserialize, Serialize};

/// A reusable (name, score) template for quick logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTask {
    pub id: i64,
    pub name: String,
    pub score: i64,
    pub created_at: String,
}

/// One completed, dated, scored log record.
///
/// `name` and `score` are copied at creation time; deleting the custom
/// task they came from must not affect past entries. `date` is the
/// `YYYY-MM-DD` grouping key; `timestamp` is a display-only
/// time-of-day string supplied by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: i64,
    pub name: String,
    pub score: i64,
    pub date: String,
    pub timestamp: String,
    pub created_at: String,
}

/// Aggregate statistics over the daily log.
///
/// Serialized camelCase to match the wire format the front-end consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_score: i64,
    pub total_tasks: i64,
    pub unique_days: i64,
    pub avg_score_per_day: i64,
}

/// One point on the score-over-time chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub score: i64,
}

/// A custom task annotated with how many times it has been logged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCustomTask {
    #[serde(flatten)]
    pub task: CustomTask,
    pub usage_count: i64,
}

/// Sort order for the ranked custom-task listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest first (default).
    #[default]
    CreatedAt,
    /// Highest score first, ties broken by newest first.
    Score,
    /// Most-logged first, ties broken by newest first.
    Frequency,
}

impl SortKey {
    /// Parse a sort key from its query-string form.
    /// Unrecognized values fall back to the default ordering.
    pub fn parse(s: &str) -> Self {
        match s {
            "score" => SortKey::Score,
            "frequency" => SortKey::Frequency,
            _ => SortKey::CreatedAt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "created_at",
            SortKey::Score => "score",
            SortKey::Frequency => "frequency",
        }
    }
}

/// Presentation preferences, persisted through the settings store
/// instead of living in ambient client-side globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewPreferences {
    /// "light" or "dark".
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Trend chart window in days.
    #[serde(default = "default_trend_window")]
    pub trend_window_days: i64,
    /// Preferred ordering for the custom-task list.
    #[serde(default)]
    pub custom_task_sort: SortKey,
}

fn default_theme() -> String {
    "light".to_string()
}

fn default_trend_window() -> i64 {
    7
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            trend_window_days: default_trend_window(),
            custom_task_sort: SortKey::default(),
        }
    }
}
