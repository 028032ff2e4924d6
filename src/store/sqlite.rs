//! SQLite-backed job store.
//!
//! Single `jobs` table keyed by a unique content fingerprint. The unique
//! constraint is the dedup mechanism: a constraint violation on insert is a
//! normal `Duplicate` outcome, not an error.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::models::{ChannelStatus, ChannelStatuses, ExperienceLevel, JobPosting, RoleCategory, StoredJob};
use crate::store::{InsertOutcome, JobStore};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS jobs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    fingerprint TEXT UNIQUE NOT NULL,
    title TEXT NOT NULL,
    company TEXT NOT NULL,
    location TEXT NOT NULL,
    experience_level TEXT NOT NULL,
    role_category TEXT NOT NULL,
    apply_url TEXT NOT NULL,
    source_name TEXT NOT NULL,
    fetched_at TEXT NOT NULL,
    is_published INTEGER NOT NULL DEFAULT 0,
    chat_status TEXT DEFAULT NULL,
    blog_status TEXT DEFAULT NULL,
    social_status TEXT DEFAULT NULL
);
";

/// SQLite store behind a connection mutex.
///
/// Every operation takes the lock for its full duration, so inserts and
/// updates are atomic with respect to concurrent callers.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at the given path.
    ///
    /// Failure here is fatal to the run; there is no fallback store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;

        log::info!("Job store ready at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (tests and dry runs).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| AppError::store("connection mutex poisoned"))
    }

    /// Total number of stored records.
    pub fn record_count(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))?)
    }

    /// Look up a single record by fingerprint.
    pub fn find_by_fingerprint(&self, fingerprint: &str) -> Result<Option<StoredJob>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, fingerprint, title, company, location, experience_level,
                    role_category, apply_url, source_name, fetched_at, is_published,
                    chat_status, blog_status, social_status
             FROM jobs WHERE fingerprint = ?1",
        )?;

        let mut rows = stmt.query_map([fingerprint], decode_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }
}

fn decode_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredJob> {
    let fetched_at_raw: String = row.get("fetched_at")?;
    let fetched_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&fetched_at_raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(9, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let experience_level: String = row.get("experience_level")?;
    let role_category: String = row.get("role_category")?;

    let status = |column: &str| -> rusqlite::Result<Option<ChannelStatus>> {
        let raw: Option<String> = row.get(column)?;
        Ok(raw.as_deref().and_then(ChannelStatus::parse))
    };

    Ok(StoredJob {
        id: row.get("id")?,
        fingerprint: row.get("fingerprint")?,
        posting: JobPosting {
            title: row.get("title")?,
            company: row.get("company")?,
            location: row.get("location")?,
            apply_url: row.get("apply_url")?,
            source_name: row.get("source_name")?,
            experience_level: ExperienceLevel::parse(&experience_level),
            role_category: RoleCategory::parse(&role_category),
            fetched_at,
        },
        is_published: row.get("is_published")?,
        statuses: ChannelStatuses {
            chat: status("chat_status")?,
            blog: status("blog_status")?,
            social: status("social_status")?,
        },
    })
}

#[async_trait]
impl JobStore for SqliteStore {
    async fn insert(&self, posting: &JobPosting) -> Result<InsertOutcome> {
        let fingerprint = posting.fingerprint();
        let conn = self.conn()?;

        let result = conn.execute(
            "INSERT INTO jobs (
                fingerprint, title, company, location, experience_level,
                role_category, apply_url, source_name, fetched_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                fingerprint,
                posting.title,
                posting.company,
                posting.location,
                posting.experience_level.as_str(),
                posting.role_category.as_str(),
                posting.apply_url,
                posting.source_name,
                posting.fetched_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => {
                log::info!("Saved new job: {} at {}", posting.title, posting.company);
                Ok(InsertOutcome::Inserted)
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn pending_records(&self) -> Result<Vec<StoredJob>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, fingerprint, title, company, location, experience_level,
                    role_category, apply_url, source_name, fetched_at, is_published,
                    chat_status, blog_status, social_status
             FROM jobs WHERE is_published = 0",
        )?;

        let rows = stmt.query_map([], decode_row)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    async fn mark_published(&self, fingerprint: &str, statuses: &ChannelStatuses) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE jobs
             SET is_published = 1, chat_status = ?1, blog_status = ?2, social_status = ?3
             WHERE fingerprint = ?4",
            rusqlite::params![
                statuses.chat.map(|s| s.as_str()),
                statuses.blog.map(|s| s.as_str()),
                statuses.social.map(|s| s.as_str()),
                fingerprint,
            ],
        )?;

        if updated == 0 {
            log::warn!("mark_published matched no record for {fingerprint}");
        }
        Ok(())
    }
}
