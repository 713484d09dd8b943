//! Key-value settings access.
//!
//! Values are stored as JSON text, keeping the schema flexible for the
//! handful of flags the flow persists.

use crate::connection::Store;
use crate::error::Result;
use serde_json::Value;

impl Store {
    /// Set a setting, inserting or replacing the value for `key`.
    pub async fn set_setting(&self, key: &str, value: &Value) -> Result<()> {
        let value_str = serde_json::to_string(value)?;

        sqlx::query(
            r"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value_str)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Get a setting, or `None` if the key has never been written.
    pub async fn get_setting(&self, key: &str) -> Result<Option<Value>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM settings WHERE key = ?")
                .bind(key)
                .fetch_optional(self.pool())
                .await?;

        match row {
            Some((value_str,)) => Ok(Some(serde_json::from_str(&value_str)?)),
            None => Ok(None),
        }
    }
}
