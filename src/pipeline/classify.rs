// src/pipeline/classify.rs

//! Role and experience classification heuristics.
//!
//! Pure keyword matching over the lower-cased title + description text.
//! Role categories are tested in a fixed priority order and the first
//! category with any matching pattern wins; multi-label output is
//! deliberately out of scope.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{ExperienceLevel, RoleCategory};

/// Role patterns in priority order. First match wins.
const ROLE_PATTERNS: &[(RoleCategory, &[&str])] = &[
    (
        RoleCategory::Backend,
        &[
            "backend", "python", "django", "flask", "node", "java", "golang", "ruby",
        ],
    ),
    (
        RoleCategory::Frontend,
        &[
            "frontend",
            "react",
            "angular",
            "vue",
            "javascript",
            "typescript",
            "css",
            "html",
        ],
    ),
    (RoleCategory::FullStack, &[r"full\s*stack", "full-stack"]),
    (
        RoleCategory::DevOps,
        &[
            "devops",
            "aws",
            "cloud",
            "docker",
            "kubernetes",
            "terraform",
            "ci/cd",
        ],
    ),
    (
        RoleCategory::DataAi,
        &[
            "data",
            "machine learning",
            "ai",
            "analytics",
            "pandas",
            "numpy",
            "tensor",
            "pytorch",
        ],
    ),
    (
        RoleCategory::QaAutomation,
        &[
            "qa",
            "quality assurance",
            "automation",
            "tester",
            "selenium",
            "pytest",
        ],
    ),
];

const FRESHER_PATTERNS: &[&str] = &[
    "fresher",
    "entry level",
    "junior",
    "graduate",
    "0-",
    r"0\+ years",
    "intern",
];

const EXPERIENCED_PATTERNS: &[&str] = &[
    "senior",
    "lead",
    "principal",
    "architect",
    r"[2-9]\+ years",
    r"10\+ years",
];

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("classifier pattern must compile"))
        .collect()
}

fn role_matchers() -> &'static Vec<(RoleCategory, Vec<Regex>)> {
    static MATCHERS: OnceLock<Vec<(RoleCategory, Vec<Regex>)>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        ROLE_PATTERNS
            .iter()
            .map(|(category, patterns)| (*category, compile(patterns)))
            .collect()
    })
}

fn experience_matchers() -> &'static (Vec<Regex>, Vec<Regex>) {
    static MATCHERS: OnceLock<(Vec<Regex>, Vec<Regex>)> = OnceLock::new();
    MATCHERS.get_or_init(|| (compile(FRESHER_PATTERNS), compile(EXPERIENCED_PATTERNS)))
}

/// Classify free text into a role category and experience level.
///
/// Deterministic and side-effect free. Fresher patterns are checked before
/// Experienced patterns, so text matching both classifies as Fresher.
pub fn classify(title: &str, description: &str) -> (RoleCategory, ExperienceLevel) {
    let text = format!("{} {}", title, description).to_lowercase();

    let mut role = RoleCategory::SoftwareEngineer;
    for (category, patterns) in role_matchers() {
        if patterns.iter().any(|p| p.is_match(&text)) {
            role = *category;
            break;
        }
    }

    let (fresher, experienced) = experience_matchers();
    let experience = if fresher.iter().any(|p| p.is_match(&text)) {
        ExperienceLevel::Fresher
    } else if experienced.iter().any(|p| p.is_match(&text)) {
        ExperienceLevel::Experienced
    } else {
        ExperienceLevel::Unknown
    };

    (role, experience)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_category_in_priority_order_wins() {
        // "Backend" precedes "QA/Automation" in the priority list even though
        // both could match the full text.
        let (role, experience) = classify("Senior Backend Engineer (Fresher Program)", "");
        assert_eq!(role, RoleCategory::Backend);
        assert_eq!(experience, ExperienceLevel::Fresher);
    }

    #[test]
    fn test_fresher_checked_before_experienced() {
        let (_, experience) = classify("Junior Developer", "senior mentorship available");
        assert_eq!(experience, ExperienceLevel::Fresher);
    }

    #[test]
    fn test_qa_category() {
        let (role, experience) = classify("QA Tester", "");
        assert_eq!(role, RoleCategory::QaAutomation);
        assert_eq!(experience, ExperienceLevel::Unknown);
    }

    #[test]
    fn test_fallback_category() {
        let (role, experience) = classify("Embedded Firmware Wizard", "");
        assert_eq!(role, RoleCategory::SoftwareEngineer);
        assert_eq!(experience, ExperienceLevel::Unknown);
    }

    #[test]
    fn test_description_participates() {
        let (role, _) = classify("Engineer", "experience with kubernetes and terraform");
        assert_eq!(role, RoleCategory::DevOps);
    }

    #[test]
    fn test_full_stack_spacing_variants() {
        assert_eq!(classify("Full Stack Developer", "").0, RoleCategory::FullStack);
        assert_eq!(classify("Fullstack Developer", "").0, RoleCategory::FullStack);
        assert_eq!(classify("Full-Stack Developer", "").0, RoleCategory::FullStack);
    }

    #[test]
    fn test_years_patterns() {
        assert_eq!(
            classify("Developer", "3+ years of experience").1,
            ExperienceLevel::Experienced
        );
        assert_eq!(
            classify("Developer", "0+ years welcome").1,
            ExperienceLevel::Fresher
        );
    }

    #[test]
    fn test_case_insensitive() {
        let (role, experience) = classify("REACT DEVELOPER", "ENTRY LEVEL");
        assert_eq!(role, RoleCategory::Frontend);
        assert_eq!(experience, ExperienceLevel::Fresher);
    }
}
