// src/channels/mod.rs

//! Publish channel abstractions.
//!
//! Every downstream target (chat, blog, social) implements the same
//! render-then-publish contract. Rendering is pure so the exact same payload
//! is produced for a freshly fetched posting and for one reconstructed from
//! the store. `publish` reports a plain delivered/not-delivered boolean; an
//! unconfigured channel logs and returns false so one missing integration
//! never blocks the others.

mod blog;
mod social;
mod telegram;

use async_trait::async_trait;

use crate::config::ChannelsConfig;
use crate::models::JobPosting;

pub use blog::BlogChannel;
pub use social::SocialChannel;
pub use telegram::TelegramChannel;

/// Rendered content for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelPayload {
    /// Post title, for channels that have one
    pub subject: Option<String>,

    /// Main message/content body
    pub body: String,

    /// Free-form tags, for channels that accept them
    pub tags: Vec<String>,
}

/// Trait for publish channels.
#[async_trait]
pub trait PublishChannel: Send + Sync {
    /// Stable channel name; one of `chat`, `blog`, `social`, matching the
    /// store's status columns.
    fn name(&self) -> &'static str;

    /// Render a posting into this channel's payload. Pure.
    fn render(&self, job: &JobPosting) -> ChannelPayload;

    /// Attempt delivery. True means delivered; false covers both failure and
    /// skipped-because-unconfigured, with the distinction logged here.
    async fn publish(&self, payload: &ChannelPayload) -> bool;
}

/// Build the configured channel set.
///
/// All three channels are always constructed; credential checks happen at
/// publish time so every pending record gets a status on every channel.
pub fn build_channels(
    config: &ChannelsConfig,
    client: reqwest::Client,
) -> Vec<Box<dyn PublishChannel>> {
    vec![
        Box::new(TelegramChannel::new(config.telegram.clone(), client.clone())),
        Box::new(BlogChannel::new(config.blog.clone(), client)),
        Box::new(SocialChannel::new(config.social.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChannelsConfig;

    #[test]
    fn test_channel_names_match_status_columns() {
        let channels = build_channels(&ChannelsConfig::default(), reqwest::Client::new());
        let names: Vec<&str> = channels.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["chat", "blog", "social"]);
    }
}
