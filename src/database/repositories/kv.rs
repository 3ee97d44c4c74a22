use anyhow::Result;
use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use sqlx::SqlitePool;

pub const SHIFTS_KEY: &str = "shifts";
pub const SETTINGS_KEY: &str = "settings";
pub const TEMPLATES_KEY: &str = "templates";

/// JSON documents stored under string keys. Writes are last-write-wins.
#[derive(Clone)]
pub struct KvStore {
    pool: SqlitePool,
}

impl KvStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// A blob that no longer parses is treated as absent so callers fall back
    /// to their defaults.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get_raw(key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log::warn!("Ignoring unreadable '{}' entry: {}", key, e);
                Ok(None)
            }
        }
    }

    pub async fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(raw)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Removes the given keys; returns how many entries existed.
    pub async fn remove(&self, keys: &[&str]) -> Result<u64> {
        let mut removed = 0;
        for key in keys {
            removed += sqlx::query("DELETE FROM kv_store WHERE key = ?1")
                .bind(*key)
                .execute(&self.pool)
                .await?
                .rows_affected();
        }

        Ok(removed)
    }
}
