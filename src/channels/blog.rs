//! Blog "blog" channel: WordPress-style REST publishing.

use async_trait::async_trait;

use crate::config::BlogConfig;
use crate::models::JobPosting;

use super::{ChannelPayload, PublishChannel};

/// Blog channel posting rendered HTML articles to a REST endpoint.
pub struct BlogChannel {
    config: BlogConfig,
    client: reqwest::Client,
}

impl BlogChannel {
    pub fn new(config: BlogConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl PublishChannel for BlogChannel {
    fn name(&self) -> &'static str {
        "blog"
    }

    fn render(&self, job: &JobPosting) -> ChannelPayload {
        let subject = format!(
            "{} at {} - {} ({})",
            job.title,
            job.company,
            job.location,
            job.experience_level.as_str()
        );

        let body = format!(
            "<h2>Job Opportunity: {title}</h2>\n\
             <p><strong>Company:</strong> {company}</p>\n\
             <p><strong>Location:</strong> {location}</p>\n\
             <p><strong>Experience Level:</strong> {experience}</p>\n\
             <p><strong>Category:</strong> {category}</p>\n\n\
             <h3>Job Description</h3>\n\
             <p>A new opportunity has been posted by {company}. Click the link below to view full details and apply.</p>\n\n\
             <p><a href=\"{url}\" target=\"_blank\" rel=\"noopener\"><strong>Apply Here</strong></a></p>\n\n\
             <hr>\n\
             <p><em>Disclaimer: This job was automatically aggregated from {source}. Verification is recommended.</em></p>",
            title = job.title,
            company = job.company,
            location = job.location,
            experience = job.experience_level.as_str(),
            category = job.role_category.as_str(),
            url = job.apply_url,
            source = job.source_name,
        );

        ChannelPayload {
            subject: Some(subject),
            body,
            tags: vec![
                job.role_category.as_str().to_string(),
                job.experience_level.as_str().to_string(),
                "IT Jobs".to_string(),
            ],
        }
    }

    async fn publish(&self, payload: &ChannelPayload) -> bool {
        let Some(api_url) = &self.config.api_url else {
            log::warn!("Blog API URL missing. Skipping publish.");
            return false;
        };

        let body = serde_json::json!({
            "title": payload.subject,
            "content": payload.body,
            "status": "publish",
        });

        // WordPress application passwords use HTTP basic auth.
        let mut request = self.client.post(api_url).json(&body);
        if let Some(username) = &self.config.username {
            request = request.basic_auth(username, self.config.password.as_deref());
        }

        let result = request
            .send()
            .await
            .and_then(|response| response.error_for_status());

        match result {
            Ok(_) => {
                log::info!(
                    "Published to blog: {}",
                    payload.subject.as_deref().unwrap_or("(untitled)")
                );
                true
            }
            Err(e) => {
                log::error!("Failed to publish to blog: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExperienceLevel, RoleCategory};

    fn channel() -> BlogChannel {
        BlogChannel::new(BlogConfig::default(), reqwest::Client::new())
    }

    fn sample_job() -> JobPosting {
        let mut job = JobPosting::new(
            "Data Engineer",
            "Acme",
            "Remote",
            "https://x/2",
            "LinkedIn",
        )
        .unwrap();
        job.role_category = RoleCategory::DataAi;
        job.experience_level = ExperienceLevel::Experienced;
        job
    }

    #[test]
    fn test_render_subject_and_tags() {
        let payload = channel().render(&sample_job());
        assert_eq!(
            payload.subject.as_deref(),
            Some("Data Engineer at Acme - Remote (Experienced)")
        );
        assert_eq!(payload.tags, vec!["Data/AI", "Experienced", "IT Jobs"]);
        assert!(payload.body.contains("<h2>Job Opportunity: Data Engineer</h2>"));
        assert!(payload.body.contains("aggregated from LinkedIn"));
    }

    #[tokio::test]
    async fn test_unconfigured_publish_returns_false() {
        let payload = channel().render(&sample_job());
        assert!(!channel().publish(&payload).await);
    }
}
