//! Key-value settings store and typed view preferences.
//!
//! Presentation state (theme, chart window, list ordering) lives here
//! rather than in ambient client-side globals, so any front-end sees the
//! same preferences.

use super::{Database, now_datetime};
use crate::types::ViewPreferences;
use anyhow::Result;
use rusqlite::{OptionalExtension, params};
use std::collections::BTreeMap;

/// Settings key holding the serialized [`ViewPreferences`].
const VIEW_PREFERENCES_KEY: &str = "view_preferences";

impl Database {
    /// Read a raw setting value.
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM settings WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    /// Write a setting, replacing any previous value.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, now_datetime()],
            )?;
            Ok(())
        })
    }

    /// All settings, keyed by name.
    pub fn list_settings(&self) -> Result<BTreeMap<String, String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
            let settings = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<rusqlite::Result<BTreeMap<String, String>>>()?;
            Ok(settings)
        })
    }

    /// Load view preferences, falling back to defaults when unset or
    /// when a stored value no longer parses.
    pub fn get_view_preferences(&self) -> Result<ViewPreferences> {
        let prefs = match self.get_setting(VIEW_PREFERENCES_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            None => ViewPreferences::default(),
        };
        Ok(prefs)
    }

    /// Persist view preferences.
    pub fn set_view_preferences(&self, prefs: &ViewPreferences) -> Result<()> {
        let raw = serde_json::to_string(prefs)?;
        self.set_setting(VIEW_PREFERENCES_KEY, &raw)
    }
}
