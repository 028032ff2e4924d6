//! Social "social" channel: share-post rendering.
//!
//! The posting APIs of the big networks need OAuth token flows that are not
//! wired up here, so this channel renders the post and reports not-delivered.
//! It still participates in every publish pass so the record carries a
//! status for the column.

use async_trait::async_trait;

use crate::config::SocialConfig;
use crate::models::JobPosting;

use super::{ChannelPayload, PublishChannel};

/// Social share channel (render-only).
pub struct SocialChannel {
    config: SocialConfig,
}

impl SocialChannel {
    pub fn new(config: SocialConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PublishChannel for SocialChannel {
    fn name(&self) -> &'static str {
        "social"
    }

    fn render(&self, job: &JobPosting) -> ChannelPayload {
        let body = format!(
            "\u{1F680} New Job Alert: {title} at {company}!\n\n\
             \u{1F4CD} Location: {location}\n\
             \u{1F4BC} Experience: {experience}\n\
             \u{1F4BB} Role: {role}\n\n\
             Apply here: {url}\n\n\
             #Hiring #Jobs #TechJobs #Career #Opportunity",
            title = job.title,
            company = job.company,
            location = job.location,
            experience = job.experience_level.as_str(),
            role = job.role_category.as_str(),
            url = job.apply_url,
        );

        ChannelPayload {
            subject: None,
            body,
            tags: Vec::new(),
        }
    }

    async fn publish(&self, payload: &ChannelPayload) -> bool {
        if !self.config.enabled {
            log::debug!("Social channel disabled. Skipping publish.");
            return false;
        }

        // No posting API is configured; surface the rendered post for
        // operators but report not-delivered.
        log::info!("Social publishing not configured. Logging content.");
        log::debug!("Social post preview:\n{}", payload.body);
        false
    }
}
