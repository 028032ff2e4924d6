//! Job posting data structure and content fingerprint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AppError, Result};

/// Experience level extracted from a posting's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExperienceLevel {
    Fresher,
    Experienced,
    #[default]
    Unknown,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Fresher => "Fresher",
            ExperienceLevel::Experienced => "Experienced",
            ExperienceLevel::Unknown => "Unknown",
        }
    }

    /// Parse a stored label, falling back to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s {
            "Fresher" => ExperienceLevel::Fresher,
            "Experienced" => ExperienceLevel::Experienced,
            _ => ExperienceLevel::Unknown,
        }
    }
}

/// Role category assigned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoleCategory {
    Backend,
    Frontend,
    #[serde(rename = "Full Stack")]
    FullStack,
    DevOps,
    #[serde(rename = "Data/AI")]
    DataAi,
    #[serde(rename = "QA/Automation")]
    QaAutomation,
    /// Catch-all when no category pattern matches
    #[default]
    #[serde(rename = "Software Engineer")]
    SoftwareEngineer,
}

impl RoleCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::Backend => "Backend",
            RoleCategory::Frontend => "Frontend",
            RoleCategory::FullStack => "Full Stack",
            RoleCategory::DevOps => "DevOps",
            RoleCategory::DataAi => "Data/AI",
            RoleCategory::QaAutomation => "QA/Automation",
            RoleCategory::SoftwareEngineer => "Software Engineer",
        }
    }

    /// Parse a stored label, falling back to `SoftwareEngineer`.
    pub fn parse(s: &str) -> Self {
        match s {
            "Backend" => RoleCategory::Backend,
            "Frontend" => RoleCategory::Frontend,
            "Full Stack" => RoleCategory::FullStack,
            "DevOps" => RoleCategory::DevOps,
            "Data/AI" => RoleCategory::DataAi,
            "QA/Automation" => RoleCategory::QaAutomation,
            _ => RoleCategory::SoftwareEngineer,
        }
    }
}

/// A job posting produced by a fetch source.
///
/// Value type: immutable once inserted into the store. Two postings with the
/// same (title, company, location, apply_url) are the same logical job and
/// share one fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobPosting {
    /// Posting title
    pub title: String,

    /// Hiring company
    pub company: String,

    /// Free-text location as published by the source
    pub location: String,

    /// Full URL to apply
    pub apply_url: String,

    /// Name of the source that produced this posting
    pub source_name: String,

    /// Experience level (classifier output)
    #[serde(default)]
    pub experience_level: ExperienceLevel,

    /// Role category (classifier output)
    #[serde(default)]
    pub role_category: RoleCategory,

    /// When this posting was fetched
    pub fetched_at: DateTime<Utc>,
}

impl JobPosting {
    /// Create a posting with default classification and a fresh timestamp.
    ///
    /// Title, company, apply URL, and source name must be non-empty. Location
    /// may be empty; the location filter rejects such postings downstream.
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        apply_url: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Result<Self> {
        let posting = Self {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            apply_url: apply_url.into(),
            source_name: source_name.into(),
            experience_level: ExperienceLevel::default(),
            role_category: RoleCategory::default(),
            fetched_at: Utc::now(),
        };

        for (field, value) in [
            ("title", &posting.title),
            ("company", &posting.company),
            ("apply_url", &posting.apply_url),
            ("source_name", &posting.source_name),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::validation(format!("posting {field} is empty")));
            }
        }

        Ok(posting)
    }

    /// Content fingerprint used as the dedup key.
    ///
    /// Hex SHA-256 over the concatenation `title + company + location +
    /// apply_url`. The field order is a contract: the same four values must
    /// produce the same digest across processes and releases.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        hasher.update(self.company.as_bytes());
        hasher.update(self.location.as_bytes());
        hasher.update(self.apply_url.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_posting() -> JobPosting {
        JobPosting::new(
            "QA Tester",
            "Acme",
            "Bengaluru",
            "https://x/1",
            "LinkedIn",
        )
        .unwrap()
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let posting = sample_posting();
        assert_eq!(posting.fingerprint(), posting.fingerprint());

        // Classification and timestamp do not affect the fingerprint.
        let mut classified = posting.clone();
        classified.role_category = RoleCategory::QaAutomation;
        classified.fetched_at = Utc::now();
        assert_eq!(posting.fingerprint(), classified.fingerprint());
    }

    #[test]
    fn test_fingerprint_recomputable() {
        let posting = sample_posting();

        // Independent recomputation of the documented concatenation.
        let mut hasher = Sha256::new();
        hasher.update(b"QA Tester");
        hasher.update(b"Acme");
        hasher.update(b"Bengaluru");
        hasher.update(b"https://x/1");
        assert_eq!(posting.fingerprint(), hex::encode(hasher.finalize()));
    }

    #[test]
    fn test_fingerprint_distinguishes_fields() {
        let posting = sample_posting();
        let mut other = posting.clone();
        other.apply_url = "https://x/2".to_string();
        assert_ne!(posting.fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_new_rejects_empty_required_fields() {
        assert!(JobPosting::new("", "Acme", "Pune", "https://x/1", "LinkedIn").is_err());
        assert!(JobPosting::new("Dev", "  ", "Pune", "https://x/1", "LinkedIn").is_err());
        assert!(JobPosting::new("Dev", "Acme", "Pune", "", "LinkedIn").is_err());
        assert!(JobPosting::new("Dev", "Acme", "Pune", "https://x/1", "").is_err());
    }

    #[test]
    fn test_new_allows_empty_location() {
        let posting = JobPosting::new("Dev", "Acme", "", "https://x/1", "LinkedIn").unwrap();
        assert_eq!(posting.experience_level, ExperienceLevel::Unknown);
        assert_eq!(posting.role_category, RoleCategory::SoftwareEngineer);
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in [
            RoleCategory::Backend,
            RoleCategory::Frontend,
            RoleCategory::FullStack,
            RoleCategory::DevOps,
            RoleCategory::DataAi,
            RoleCategory::QaAutomation,
            RoleCategory::SoftwareEngineer,
        ] {
            assert_eq!(RoleCategory::parse(category.as_str()), category);
        }
        assert_eq!(RoleCategory::parse("Other"), RoleCategory::SoftwareEngineer);
        assert_eq!(ExperienceLevel::parse("bogus"), ExperienceLevel::Unknown);
    }
}
