// src/store/mod.rs

//! Persistence for job records.
//!
//! The store is the sole owner of persisted job state: deduplication happens
//! through `insert`, and publish state only changes through `mark_published`.
//! Callers always receive structured `StoredJob` records, never raw rows.

pub mod sqlite;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{ChannelStatuses, JobPosting, StoredJob};

// Re-export for convenience
pub use sqlite::SqliteStore;

/// Outcome of an insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// A new record was created
    Inserted,
    /// A record with the same fingerprint already exists; not an error
    Duplicate,
}

/// Trait for job record stores.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a posting if its fingerprint is not already present.
    ///
    /// A fingerprint collision reports `Duplicate`; this is the engine's only
    /// deduplication mechanism, so re-fetching the same posting must be
    /// cheaply absorbed here.
    async fn insert(&self, posting: &JobPosting) -> Result<InsertOutcome>;

    /// All records that have not yet completed a publish pass.
    ///
    /// Order is unspecified; callers that need determinism must sort.
    async fn pending_records(&self) -> Result<Vec<StoredJob>>;

    /// Atomically mark a record published and write its channel statuses.
    ///
    /// Idempotent: repeating the call for an already-published fingerprint
    /// rewrites the same state and must not corrupt anything.
    async fn mark_published(&self, fingerprint: &str, statuses: &ChannelStatuses) -> Result<()>;
}
