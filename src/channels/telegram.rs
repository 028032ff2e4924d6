//! Telegram "chat" channel: message sending via the Bot API.

use async_trait::async_trait;

use crate::config::TelegramConfig;
use crate::models::{ExperienceLevel, JobPosting};

use super::{ChannelPayload, PublishChannel};

/// Telegram channel publishing HTML-formatted job alerts.
pub struct TelegramChannel {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramChannel {
    pub fn new(config: TelegramConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn api_url(token: &str) -> String {
        format!("https://api.telegram.org/bot{token}/sendMessage")
    }

    fn experience_icon(level: ExperienceLevel) -> &'static str {
        match level {
            ExperienceLevel::Fresher => "\u{1F331}",
            ExperienceLevel::Experienced => "\u{1F9D1}\u{200D}\u{1F4BB}",
            ExperienceLevel::Unknown => "\u{1F393}",
        }
    }
}

#[async_trait]
impl PublishChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "chat"
    }

    fn render(&self, job: &JobPosting) -> ChannelPayload {
        // Telegram supports basic HTML tags: b, i, a, code, pre
        let exp_icon = Self::experience_icon(job.experience_level);
        let role_hashtag = format!("#{}", job.role_category.as_str().replace([' ', '/'], ""));
        let source_hashtag = format!("#{}", job.source_name.replace('.', ""));

        let body = format!(
            "\u{1F4BC} <b>{title}</b>\n\
             <b>Company:</b> {company}\n\
             <b>Location:</b> {location}\n\
             {exp_icon} <b>Experience:</b> {experience}\n\n\
             \u{1F517} <a href='{url}'><b>APPLY NOW</b></a>\n\n\
             {role_hashtag} #ITJobs {source_hashtag}",
            title = job.title,
            company = job.company,
            location = job.location,
            experience = job.experience_level.as_str(),
            url = job.apply_url,
        );

        ChannelPayload {
            subject: None,
            body,
            tags: Vec::new(),
        }
    }

    async fn publish(&self, payload: &ChannelPayload) -> bool {
        let (Some(token), Some(channel_id)) =
            (&self.config.bot_token, &self.config.channel_id)
        else {
            log::warn!("Telegram credentials missing. Skipping publish.");
            return false;
        };

        let body = serde_json::json!({
            "chat_id": channel_id,
            "text": payload.body,
            "parse_mode": "HTML",
            "disable_web_page_preview": false,
        });

        let result = self
            .client
            .post(Self::api_url(token))
            .json(&body)
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => {
                log::info!("Published to Telegram successfully.");
                true
            }
            Err(e) => {
                log::error!("Failed to publish to Telegram: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleCategory;

    fn channel() -> TelegramChannel {
        TelegramChannel::new(TelegramConfig::default(), reqwest::Client::new())
    }

    fn sample_job() -> JobPosting {
        let mut job = JobPosting::new(
            "Backend Engineer",
            "Acme",
            "Pune",
            "https://x/1",
            "Python.org",
        )
        .unwrap();
        job.role_category = RoleCategory::Backend;
        job.experience_level = ExperienceLevel::Fresher;
        job
    }

    #[test]
    fn test_render_contains_fields_and_hashtags() {
        let payload = channel().render(&sample_job());
        assert!(payload.subject.is_none());
        assert!(payload.body.contains("<b>Backend Engineer</b>"));
        assert!(payload.body.contains("<b>Company:</b> Acme"));
        assert!(payload.body.contains("href='https://x/1'"));
        assert!(payload.body.contains("#Backend"));
        // Dots are stripped from the source hashtag
        assert!(payload.body.contains("#Pythonorg"));
    }

    #[test]
    fn test_render_strips_spaces_from_role_hashtag() {
        let mut job = sample_job();
        job.role_category = RoleCategory::FullStack;
        let payload = channel().render(&job);
        assert!(payload.body.contains("#FullStack"));

        job.role_category = RoleCategory::QaAutomation;
        let payload = channel().render(&job);
        assert!(payload.body.contains("#QAAutomation"));
    }

    #[tokio::test]
    async fn test_unconfigured_publish_returns_false() {
        let payload = channel().render(&sample_job());
        assert!(!channel().publish(&payload).await);
    }
}
