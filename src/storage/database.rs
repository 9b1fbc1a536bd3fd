//! SQLite Database
//!
//! Embedded database for persistent storage using rusqlite with r2d2 connection pooling.
//! Holds the authoritative `pitches` table and the `user_sessions` table used
//! to resolve caller identity.

use std::path::Path;

use pitch_writer_core::{PitchFields, PitchPatch, PitchStatus};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Row};

use crate::models::pitch::{NewPitch, PitchRecord};
use crate::utils::clock::{format_timestamp, parse_timestamp, process_clock};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_parent_dir;

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

const PITCH_COLUMNS: &str = "id, user_id, title, description, pitch_type, audience, problem, \
     solution, market_size, target_audience, usp, revenue_model, go_to_market, competition, \
     team, ask, status, created_at, updated_at";

/// Database service for managing SQLite operations
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Create an in-memory database for testing.
    ///
    /// Uses an in-memory SQLite database with the same schema as the
    /// production database. Useful for integration and unit tests.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;
        Ok(db)
    }

    /// Open (or create) the database file with connection pooling
    pub fn open(db_path: &Path) -> AppResult<Self> {
        ensure_parent_dir(db_path)?;

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(10)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool };
        db.init_schema()?;

        Ok(db)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS pitches (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                pitch_type TEXT NOT NULL DEFAULT '',
                audience TEXT NOT NULL DEFAULT '',
                problem TEXT NOT NULL DEFAULT '',
                solution TEXT NOT NULL DEFAULT '',
                market_size TEXT NOT NULL DEFAULT '',
                target_audience TEXT NOT NULL DEFAULT '',
                usp TEXT NOT NULL DEFAULT '',
                revenue_model TEXT NOT NULL DEFAULT '',
                go_to_market TEXT NOT NULL DEFAULT '',
                competition TEXT NOT NULL DEFAULT '',
                team TEXT NOT NULL DEFAULT '',
                ask TEXT NOT NULL DEFAULT '',
                status TEXT NOT NULL DEFAULT 'draft',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_pitches_user_updated
             ON pitches(user_id, updated_at DESC)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS user_sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Check if the database is healthy
    pub fn is_healthy(&self) -> bool {
        if let Ok(conn) = self.get_connection() {
            conn.execute_batch("SELECT 1").is_ok()
        } else {
            false
        }
    }

    // ========================================================================
    // Pitches
    // ========================================================================

    /// List an owner's pitches, most recently updated first
    pub fn list_pitches(&self, user_id: &str) -> AppResult<Vec<PitchRecord>> {
        require("owner", user_id)?;
        let conn = self.get_connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM pitches WHERE user_id = ?1 ORDER BY updated_at DESC, rowid DESC",
            PITCH_COLUMNS
        ))?;

        let rows = stmt.query_map(params![user_id], row_to_pitch)?;
        let mut pitches = Vec::new();
        for row in rows {
            pitches.push(row?);
        }
        Ok(pitches)
    }

    /// Fetch one pitch; `None` when missing or owned by someone else
    pub fn get_pitch(&self, user_id: &str, id: &str) -> AppResult<Option<PitchRecord>> {
        require("owner", user_id)?;
        require("pitch id", id)?;
        let conn = self.get_connection()?;
        let pitch = conn
            .query_row(
                &format!(
                    "SELECT {} FROM pitches WHERE id = ?1 AND user_id = ?2",
                    PITCH_COLUMNS
                ),
                params![id, user_id],
                row_to_pitch,
            )
            .optional()?;
        Ok(pitch)
    }

    /// Insert a new pitch with a fresh id and timestamps
    pub fn insert_pitch(&self, user_id: &str, draft: &NewPitch) -> AppResult<PitchRecord> {
        require("owner", user_id)?;
        draft.validate()?;

        let now = format_timestamp(&process_clock().now());
        let record = PitchRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            fields: draft.fields.clone(),
            status: draft.status,
            created_at: now.clone(),
            updated_at: now,
        };

        let conn = self.get_connection()?;
        let f = &record.fields;
        conn.execute(
            &format!(
                "INSERT INTO pitches ({}) VALUES \
                 (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
                PITCH_COLUMNS
            ),
            params![
                record.id,
                record.user_id,
                f.title,
                f.description,
                f.pitch_type,
                f.audience,
                f.problem,
                f.solution,
                f.market_size,
                f.target_audience,
                f.usp,
                f.revenue_model,
                f.go_to_market,
                f.competition,
                f.team,
                f.ask,
                record.status.as_str(),
                record.created_at,
                record.updated_at,
            ],
        )?;

        Ok(record)
    }

    /// Merge `patch` into an owner's pitch and refresh `updated_at`.
    ///
    /// An empty patch still bumps the timestamp. Returns `None` when the pitch
    /// is missing or owned by someone else.
    pub fn update_pitch(
        &self,
        user_id: &str,
        id: &str,
        patch: &PitchPatch,
    ) -> AppResult<Option<PitchRecord>> {
        require("owner", user_id)?;
        require("pitch id", id)?;

        let mut conn = self.get_connection()?;
        let tx = conn.transaction()?;

        let existing = tx
            .query_row(
                &format!(
                    "SELECT {} FROM pitches WHERE id = ?1 AND user_id = ?2",
                    PITCH_COLUMNS
                ),
                params![id, user_id],
                row_to_pitch,
            )
            .optional()?;

        let Some(mut record) = existing else {
            return Ok(None);
        };

        record.fields.apply(patch);
        if let Some(status) = patch.status {
            record.status = status;
        }
        if record.fields.title.trim().is_empty() {
            return Err(AppError::validation("Pitch title is required"));
        }

        let next = match parse_timestamp(&record.updated_at) {
            Some(previous) => process_clock().now_after(&previous),
            None => process_clock().now(),
        };
        record.updated_at = format_timestamp(&next);

        let f = &record.fields;
        let affected = tx.execute(
            "UPDATE pitches SET title = ?3, description = ?4, pitch_type = ?5, audience = ?6,
                problem = ?7, solution = ?8, market_size = ?9, target_audience = ?10, usp = ?11,
                revenue_model = ?12, go_to_market = ?13, competition = ?14, team = ?15, ask = ?16,
                status = ?17, updated_at = ?18
             WHERE id = ?1 AND user_id = ?2",
            params![
                id,
                user_id,
                f.title,
                f.description,
                f.pitch_type,
                f.audience,
                f.problem,
                f.solution,
                f.market_size,
                f.target_audience,
                f.usp,
                f.revenue_model,
                f.go_to_market,
                f.competition,
                f.team,
                f.ask,
                record.status.as_str(),
                record.updated_at,
            ],
        )?;
        if affected == 0 {
            return Ok(None);
        }

        tx.commit()?;
        Ok(Some(record))
    }

    /// Delete an owner's pitch; `false` when nothing matched
    pub fn delete_pitch(&self, user_id: &str, id: &str) -> AppResult<bool> {
        require("owner", user_id)?;
        require("pitch id", id)?;
        let conn = self.get_connection()?;
        let affected = conn.execute(
            "DELETE FROM pitches WHERE id = ?1 AND user_id = ?2",
            params![id, user_id],
        )?;
        Ok(affected > 0)
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Record a session token for a user
    pub fn insert_session(&self, token: &str, user_id: &str) -> AppResult<()> {
        require("session token", token)?;
        require("owner", user_id)?;
        let conn = self.get_connection()?;
        conn.execute(
            "INSERT INTO user_sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)",
            params![token, user_id, format_timestamp(&process_clock().now())],
        )?;
        Ok(())
    }

    /// Resolve a session token to its user id
    pub fn session_user(&self, token: &str) -> AppResult<Option<String>> {
        let conn = self.get_connection()?;
        let user = conn
            .query_row(
                "SELECT user_id FROM user_sessions WHERE token = ?1",
                params![token],
                |row| row.get(0),
            )
            .optional()?;
        Ok(user)
    }

    /// Remove a session token; `false` when it did not exist
    pub fn delete_session(&self, token: &str) -> AppResult<bool> {
        let conn = self.get_connection()?;
        let affected = conn.execute(
            "DELETE FROM user_sessions WHERE token = ?1",
            params![token],
        )?;
        Ok(affected > 0)
    }
}

fn require(what: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} is required", what)));
    }
    Ok(())
}

fn row_to_pitch(row: &Row<'_>) -> rusqlite::Result<PitchRecord> {
    let status: String = row.get(16)?;
    let status = PitchStatus::from_str_value(&status).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(16, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(PitchRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        fields: PitchFields {
            title: row.get(2)?,
            description: row.get(3)?,
            pitch_type: row.get(4)?,
            audience: row.get(5)?,
            problem: row.get(6)?,
            solution: row.get(7)?,
            market_size: row.get(8)?,
            target_audience: row.get(9)?,
            usp: row.get(10)?,
            revenue_model: row.get(11)?,
            go_to_market: row.get(12)?,
            competition: row.get(13)?,
            team: row.get(14)?,
            ask: row.get(15)?,
        },
        status,
        created_at: row.get(17)?,
        updated_at: row.get(18)?,
    })
}
