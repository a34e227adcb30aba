//! Request handlers for the REST surface.
//!
//! Validation happens here: the store accepts whatever it is handed, so
//! every 400 is produced before the database is touched. Body structs
//! use `Option` fields so a missing field is reported as a 400 with a
//! message instead of a deserialization rejection.

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::AppState;
use crate::error::ApiError;
use crate::types::{
    CustomTask, DailyTask, RankedCustomTask, SortKey, Stats, TrendPoint, ViewPreferences,
};

/// Trend windows outside this range are clamped, not rejected.
const TREND_WINDOW_MAX_DAYS: i64 = 365;

#[derive(Debug, Deserialize)]
pub struct CreateCustomTaskBody {
    pub name: Option<String>,
    pub score: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateDailyTaskBody {
    pub name: Option<String>,
    pub score: Option<i64>,
    pub date: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct FrequencyQuery {
    pub sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DailyTasksQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrendQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

fn require_name(name: Option<String>) -> Result<String, ApiError> {
    match name {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(ApiError::missing_field("name")),
    }
}

// --- custom tasks ---

pub async fn list_custom_tasks(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomTask>>, ApiError> {
    Ok(Json(state.db().list_custom_tasks()?))
}

pub async fn create_custom_task(
    State(state): State<AppState>,
    Json(body): Json<CreateCustomTaskBody>,
) -> Result<Json<CustomTask>, ApiError> {
    let name = require_name(body.name)?;
    let score = body.score.ok_or_else(|| ApiError::missing_field("score"))?;

    let task = state.db().create_custom_task(&name, score)?;
    Ok(Json(task))
}

pub async fn delete_custom_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if state.db().delete_custom_task(id)? {
        Ok(Json(json!({ "message": "custom task deleted" })))
    } else {
        Err(ApiError::NotFound("custom task not found".to_string()))
    }
}

pub async fn search_custom_tasks(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CustomTask>>, ApiError> {
    Ok(Json(state.db().search_custom_tasks(&query.q)?))
}

pub async fn ranked_custom_tasks(
    State(state): State<AppState>,
    Query(query): Query<FrequencyQuery>,
) -> Result<Json<Vec<RankedCustomTask>>, ApiError> {
    let sort = query
        .sort
        .as_deref()
        .map(SortKey::parse)
        .unwrap_or_default();
    Ok(Json(state.db().list_custom_tasks_ranked(sort)?))
}

// --- daily tasks ---

pub async fn list_daily_tasks(
    State(state): State<AppState>,
    Query(query): Query<DailyTasksQuery>,
) -> Result<Json<Vec<DailyTask>>, ApiError> {
    // An empty ?date= means "no filter", same as omitting it.
    let date = query.date.as_deref().filter(|d| !d.is_empty());
    Ok(Json(state.db().list_daily_tasks(date)?))
}

pub async fn create_daily_task(
    State(state): State<AppState>,
    Json(body): Json<CreateDailyTaskBody>,
) -> Result<Json<DailyTask>, ApiError> {
    let name = require_name(body.name)?;
    let score = body.score.ok_or_else(|| ApiError::missing_field("score"))?;
    let date = body.date.ok_or_else(|| ApiError::missing_field("date"))?;
    let timestamp = body
        .timestamp
        .ok_or_else(|| ApiError::missing_field("timestamp"))?;

    // Every entry belongs to exactly one calendar date; a malformed date
    // would silently fall out of the trend and today views.
    if NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        return Err(ApiError::BadRequest("date must be YYYY-MM-DD".to_string()));
    }

    let task = state
        .db()
        .create_daily_task(&name, score, &date, &timestamp)?;
    Ok(Json(task))
}

pub async fn delete_daily_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if state.db().delete_daily_task(id)? {
        Ok(Json(json!({ "message": "daily task deleted" })))
    } else {
        Err(ApiError::NotFound("daily task not found".to_string()))
    }
}

// --- aggregation ---

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Stats>, ApiError> {
    Ok(Json(state.db().get_stats()?))
}

pub async fn get_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Result<Json<Vec<TrendPoint>>, ApiError> {
    let days = query.days.unwrap_or(7).clamp(1, TREND_WINDOW_MAX_DAYS);
    Ok(Json(state.db().get_trend(days)?))
}

// --- preferences ---

pub async fn get_preferences(
    State(state): State<AppState>,
) -> Result<Json<ViewPreferences>, ApiError> {
    Ok(Json(state.db().get_view_preferences()?))
}

pub async fn put_preferences(
    State(state): State<AppState>,
    Json(prefs): Json<ViewPreferences>,
) -> Result<Json<ViewPreferences>, ApiError> {
    state.db().set_view_preferences(&prefs)?;
    Ok(Json(prefs))
}

// --- health ---

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
