//! LinkedIn guest search source.
//!
//! Uses the public `seeMoreJobPostings` endpoint, which returns an HTML
//! fragment of job cards and is friendlier to parse than the full search
//! page. Parsing is a pure function over the fetched body so fixtures can
//! exercise it offline.

use async_trait::async_trait;

use crate::config::LinkedInSourceConfig;
use crate::error::Result;
use crate::models::JobPosting;
use crate::utils::strip_query;

use super::{JobSource, normalize_text, parse_selector};

const SOURCE_NAME: &str = "LinkedIn";
const SEARCH_URL: &str =
    "https://www.linkedin.com/jobs-guest/jobs/api/seeMoreJobPostings/search";

/// LinkedIn job card source.
pub struct LinkedInSource {
    config: LinkedInSourceConfig,
    client: reqwest::Client,
}

impl LinkedInSource {
    pub fn new(config: LinkedInSourceConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }
}

/// Parse job cards out of a search-fragment response body.
pub(crate) fn parse_jobs(html: &str) -> Result<Vec<JobPosting>> {
    let document = scraper::Html::parse_document(html);

    let row_sel = parse_selector("li")?;
    let title_sel = parse_selector("h3.base-search-card__title")?;
    let company_sel = parse_selector("h4.base-search-card__subtitle")?;
    let location_sel = parse_selector("span.job-search-card__location")?;
    let link_sel = parse_selector("a.base-card__full-link")?;

    let mut jobs = Vec::new();
    for card in document.select(&row_sel) {
        let Some(title_elem) = card.select(&title_sel).next() else {
            continue;
        };
        let Some(company_elem) = card.select(&company_sel).next() else {
            continue;
        };
        let Some(link_elem) = card.select(&link_sel).next() else {
            continue;
        };

        let title = normalize_text(title_elem.text());
        let company = normalize_text(company_elem.text());
        let location = card
            .select(&location_sel)
            .next()
            .map(|el| normalize_text(el.text()))
            .filter(|loc| !loc.is_empty())
            .unwrap_or_else(|| "Remote".to_string());

        let Some(href) = link_elem.value().attr("href") else {
            continue;
        };
        let apply_url = strip_query(href);

        // Malformed cards (empty title/company) are skipped, not fatal.
        match JobPosting::new(title, company, location, apply_url, SOURCE_NAME) {
            Ok(job) => jobs.push(job),
            Err(e) => log::debug!("Skipping malformed LinkedIn card: {e}"),
        }
    }

    Ok(jobs)
}

#[async_trait]
impl JobSource for LinkedInSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch_jobs(&self) -> Result<Vec<JobPosting>> {
        log::info!("Starting LinkedIn fetch...");

        let html = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("keywords", self.config.keywords.as_str()),
                ("location", self.config.location.as_str()),
                ("start", "0"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let jobs = parse_jobs(&html)?;
        log::info!("Fetched {} jobs from LinkedIn", jobs.len());
        Ok(jobs)
    }
}
