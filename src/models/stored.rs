//! Persisted job record and per-channel publish state.

use serde::{Deserialize, Serialize};

use super::JobPosting;

/// Outcome of one publish attempt on one channel.
///
/// The orchestrator only learns a boolean from a channel, so skipped and
/// failed collapse into one label; the distinction lives in the channel's
/// own logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelStatus {
    Success,
    SkippedOrFailed,
}

impl ChannelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelStatus::Success => "SUCCESS",
            ChannelStatus::SkippedOrFailed => "SKIPPED/FAILED",
        }
    }

    /// Parse a stored status label.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUCCESS" => Some(ChannelStatus::Success),
            "SKIPPED/FAILED" | "SKIPPED" | "FAILED" => Some(ChannelStatus::SkippedOrFailed),
            _ => None,
        }
    }

    pub fn from_delivered(delivered: bool) -> Self {
        if delivered {
            ChannelStatus::Success
        } else {
            ChannelStatus::SkippedOrFailed
        }
    }
}

/// Per-channel publish statuses for one record.
///
/// Named fields instead of a channel-name map: the schema carries exactly one
/// status column per channel, and named access keeps column/field mapping in
/// one place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelStatuses {
    pub chat: Option<ChannelStatus>,
    pub blog: Option<ChannelStatus>,
    pub social: Option<ChannelStatus>,
}

impl ChannelStatuses {
    /// Record a status by channel name. Returns false for unknown channels.
    pub fn set(&mut self, channel: &str, status: ChannelStatus) -> bool {
        match channel {
            "chat" => self.chat = Some(status),
            "blog" => self.blog = Some(status),
            "social" => self.social = Some(status),
            _ => return false,
        }
        true
    }

    /// Look up a status by channel name.
    pub fn get(&self, channel: &str) -> Option<ChannelStatus> {
        match channel {
            "chat" => self.chat,
            "blog" => self.blog,
            "social" => self.social,
            _ => None,
        }
    }

    /// Count of channels recorded as SUCCESS.
    pub fn success_count(&self) -> usize {
        [self.chat, self.blog, self.social]
            .iter()
            .filter(|s| **s == Some(ChannelStatus::Success))
            .count()
    }
}

/// A job record as persisted by the store.
///
/// Reconstructed from named columns only; the store never hands positional
/// row tuples to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredJob {
    /// Surrogate row id
    pub id: i64,

    /// Content fingerprint (unique)
    pub fingerprint: String,

    /// The posting fields
    pub posting: JobPosting,

    /// True once one full publish pass has completed for this record
    pub is_published: bool,

    /// Per-channel outcome of the publish pass, null until attempted
    pub statuses: ChannelStatuses,
}
