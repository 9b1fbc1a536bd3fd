//! Analytics Service
//!
//! SQLite-backed analytics store, kept in its own database file so the
//! authoritative pitch data never depends on it.

use std::path::Path;

use async_trait::async_trait;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use tracing::warn;

use super::store::AnalyticsStore;
use crate::models::analytics::{AnalyticsRecord, WordCount};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_parent_dir;

/// Type alias for the analytics connection pool
pub type AnalyticsPool = Pool<SqliteConnectionManager>;

/// Analytics service for per-pitch statistics
pub struct AnalyticsService {
    pool: AnalyticsPool,
}

impl AnalyticsService {
    /// Create a new analytics service with the given connection pool
    pub fn new(pool: AnalyticsPool) -> AppResult<Self> {
        let service = Self { pool };
        service.init_schema()?;
        Ok(service)
    }

    /// Open (or create) the analytics database file
    pub fn open(path: &Path) -> AppResult<Self> {
        ensure_parent_dir(path)?;
        let pool = Pool::builder()
            .max_size(4)
            .build(SqliteConnectionManager::file(path))
            .map_err(|e| AppError::database(format!("Failed to create analytics pool: {}", e)))?;
        Self::new(pool)
    }

    /// In-memory analytics database for tests
    pub fn new_in_memory() -> AppResult<Self> {
        let pool = Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())
            .map_err(|e| AppError::database(format!("Failed to create analytics pool: {}", e)))?;
        Self::new(pool)
    }

    fn get_connection(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Initialize the analytics database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS pitch_analytics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                pitch_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                pitch_type TEXT NOT NULL,
                audience TEXT NOT NULL,
                word_count TEXT NOT NULL,
                total_words INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                UNIQUE(pitch_id, created_at)
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_pitch_analytics_user ON pitch_analytics(user_id)",
            [],
        )?;

        Ok(())
    }

    /// Insert an analytics row
    pub fn insert_record(&self, record: &AnalyticsRecord) -> AppResult<()> {
        let conn = self.get_connection()?;
        let word_count = serde_json::to_string(&record.word_count)?;
        conn.execute(
            "INSERT INTO pitch_analytics
                (pitch_id, user_id, pitch_type, audience, word_count, total_words, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.pitch_id,
                record.user_id,
                record.pitch_type,
                record.audience,
                word_count,
                record.word_count.total as i64,
                record.created_at,
            ],
        )?;
        Ok(())
    }

    /// All rows for one owner, oldest first
    pub fn list_records(&self, user_id: &str) -> AppResult<Vec<AnalyticsRecord>> {
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(
            "SELECT pitch_id, user_id, pitch_type, audience, word_count, created_at
             FROM pitch_analytics WHERE user_id = ?1 ORDER BY created_at ASC, id ASC",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (pitch_id, user_id, pitch_type, audience, word_count, created_at) = row?;
            let word_count: WordCount = match serde_json::from_str(&word_count) {
                Ok(wc) => wc,
                Err(e) => {
                    warn!("Skipping analytics row for pitch {}: bad word_count: {}", pitch_id, e);
                    continue;
                }
            };
            records.push(AnalyticsRecord {
                pitch_id,
                user_id,
                pitch_type,
                audience,
                word_count,
                created_at,
            });
        }
        Ok(records)
    }

    /// Check if the analytics database is reachable
    pub fn is_healthy(&self) -> bool {
        self.get_connection()
            .map(|conn| conn.execute_batch("SELECT 1").is_ok())
            .unwrap_or(false)
    }
}

#[async_trait]
impl AnalyticsStore for AnalyticsService {
    async fn insert(&self, record: &AnalyticsRecord) -> AppResult<()> {
        self.insert_record(record)
    }

    async fn list_for_owner(&self, user_id: &str) -> AppResult<Vec<AnalyticsRecord>> {
        self.list_records(user_id)
    }

    fn is_healthy(&self) -> bool {
        AnalyticsService::is_healthy(self)
    }
}
