//! python.org jobs board source.
//!
//! Scrapes the public listing at python.org/jobs. Apply links on the board
//! are relative, so they are resolved against the board URL before storage.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::models::JobPosting;
use crate::utils::resolve_url;

use super::{JobSource, normalize_text, parse_selector};

const SOURCE_NAME: &str = "Python.org";
const BASE_URL: &str = "https://www.python.org/jobs/";

/// python.org jobs board source.
pub struct PythonOrgSource {
    client: reqwest::Client,
}

impl PythonOrgSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Parse the recent-jobs listing out of a board page.
pub(crate) fn parse_jobs(html: &str, base_url: &str) -> Result<Vec<JobPosting>> {
    let document = scraper::Html::parse_document(html);

    let row_sel = parse_selector("ol.list-recent-jobs li")?;
    let company_span_sel = parse_selector("span.listing-company-name")?;
    let title_link_sel = parse_selector("span.listing-company-name a")?;
    let location_sel = parse_selector("span.listing-location")?;

    let base = Url::parse(base_url)?;
    let mut jobs = Vec::new();

    for item in document.select(&row_sel) {
        let Some(title_elem) = item.select(&title_link_sel).next() else {
            continue;
        };
        let Some(company_span) = item.select(&company_span_sel).next() else {
            continue;
        };

        let title = normalize_text(title_elem.text());

        // The company span holds "<a>Title</a><br/>Company"; the company is
        // whatever text remains after the title.
        let span_text = normalize_text(company_span.text());
        let company = span_text.replace(&title, "").trim().to_string();

        let location = item
            .select(&location_sel)
            .next()
            .map(|el| normalize_text(el.text()))
            .unwrap_or_default();

        let Some(href) = title_elem.value().attr("href") else {
            continue;
        };
        let apply_url = resolve_url(&base, href);

        match JobPosting::new(title, company, location, apply_url, SOURCE_NAME) {
            Ok(job) => jobs.push(job),
            Err(e) => log::debug!("Skipping malformed python.org listing: {e}"),
        }
    }

    Ok(jobs)
}

#[async_trait]
impl JobSource for PythonOrgSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch_jobs(&self) -> Result<Vec<JobPosting>> {
        log::info!("Starting python.org fetch...");

        let html = self
            .client
            .get(BASE_URL)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let jobs = parse_jobs(&html, BASE_URL)?;
        log::info!("Fetched {} jobs from Python.org", jobs.len());
        Ok(jobs)
    }
}
