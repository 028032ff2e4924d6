// src/sources/mod.rs

//! Fetch sources for job postings.
//!
//! A source is anything that can produce a batch of `JobPosting`s. Concrete
//! sources are selected by configuration; the orchestrator only sees the
//! `JobSource` trait and treats a failing source as an empty contribution
//! for the cycle.

mod linkedin;
mod python_org;

use async_trait::async_trait;
use scraper::Selector;

use crate::config::SourcesConfig;
use crate::error::{AppError, Result};
use crate::models::JobPosting;

pub use linkedin::LinkedInSource;
pub use python_org::PythonOrgSource;

/// Trait for job posting sources.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Source display name, recorded on every posting it produces.
    fn name(&self) -> &'static str;

    /// Fetch one batch of candidate postings. May be empty.
    async fn fetch_jobs(&self) -> Result<Vec<JobPosting>>;
}

/// Build the enabled source set from configuration.
pub fn build_sources(config: &SourcesConfig, client: reqwest::Client) -> Vec<Box<dyn JobSource>> {
    let mut sources: Vec<Box<dyn JobSource>> = Vec::new();

    if config.linkedin.enabled {
        sources.push(Box::new(LinkedInSource::new(
            config.linkedin.clone(),
            client.clone(),
        )));
    }
    if config.python_org.enabled {
        sources.push(Box::new(PythonOrgSource::new(client)));
    }

    sources
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Collapse an element's text runs into one whitespace-normalized string.
pub(crate) fn normalize_text(text: impl Iterator<Item = impl AsRef<str>>) -> String {
    text.flat_map(|t| {
        t.as_ref()
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>()
    })
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourcesConfig;

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector("li h3.title").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
    }

    #[test]
    fn test_normalize_text() {
        let parts = ["  QA ", "\n  Tester\t", ""];
        assert_eq!(normalize_text(parts.iter()), "QA Tester");
    }

    #[test]
    fn test_build_sources_respects_flags() {
        let mut config = SourcesConfig::default();
        config.python_org.enabled = true;
        let sources = build_sources(&config, reqwest::Client::new());
        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["LinkedIn", "Python.org"]);

        config.linkedin.enabled = false;
        config.python_org.enabled = false;
        assert!(build_sources(&config, reqwest::Client::new()).is_empty());
    }
}
