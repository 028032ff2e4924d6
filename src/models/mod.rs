// src/models/mod.rs

//! Domain models for the aggregation engine.

mod job;
mod stored;

pub use job::{ExperienceLevel, JobPosting, RoleCategory};
pub use stored::{ChannelStatus, ChannelStatuses, StoredJob};
