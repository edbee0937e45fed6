// Technical SEO grading of a finished audit

use crate::audit::ScrapeResult;
use serde::{Deserialize, Serialize};

const TITLE_MIN: usize = 30;
const TITLE_MAX: usize = 60;
const META_DESCRIPTION_MIN: usize = 120;
const META_DESCRIPTION_MAX: usize = 160;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "pass",
            CheckStatus::Warning => "warning",
            CheckStatus::Fail => "fail",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalCheck {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Info,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

impl Recommendation {
    fn new(priority: Priority, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority,
        }
    }
}

pub fn check_title(result: &ScrapeResult) -> TechnicalCheck {
    let status = match result.title_length {
        0 => CheckStatus::Fail,
        len if !(TITLE_MIN..=TITLE_MAX).contains(&len) => CheckStatus::Warning,
        _ => CheckStatus::Pass,
    };
    TechnicalCheck {
        name: "Title Tag".to_string(),
        status,
        detail: format!(
            "{} characters (recommended {}-{})",
            result.title_length, TITLE_MIN, TITLE_MAX
        ),
    }
}

pub fn check_meta_description(result: &ScrapeResult) -> TechnicalCheck {
    let status = match result.meta_description_length {
        0 => CheckStatus::Fail,
        len if len < META_DESCRIPTION_MIN => CheckStatus::Warning,
        _ => CheckStatus::Pass,
    };
    TechnicalCheck {
        name: "Meta Description".to_string(),
        status,
        detail: format!(
            "{} characters (recommended {}-{})",
            result.meta_description_length, META_DESCRIPTION_MIN, META_DESCRIPTION_MAX
        ),
    }
}

pub fn check_h1(result: &ScrapeResult) -> TechnicalCheck {
    let status = match result.h1_count {
        0 => CheckStatus::Fail,
        1 => CheckStatus::Pass,
        _ => CheckStatus::Warning,
    };
    TechnicalCheck {
        name: "H1 Tags".to_string(),
        status,
        detail: format!("{} found (exactly one recommended)", result.h1_count),
    }
}

pub fn check_images(result: &ScrapeResult) -> TechnicalCheck {
    let status = if result.images_without_alt_count == 0 {
        CheckStatus::Pass
    } else {
        CheckStatus::Fail
    };
    TechnicalCheck {
        name: "Image Alt Text".to_string(),
        status,
        detail: format!("{} images without alt text", result.images_without_alt_count),
    }
}

pub fn check_security(result: &ScrapeResult) -> TechnicalCheck {
    let security = &result.security_status;
    let status = if security.is_secure {
        CheckStatus::Pass
    } else {
        CheckStatus::Warning
    };
    let detail = match security.status_code {
        Some(code) if security.https_enforced => format!("HTTPS, status {}", code),
        Some(code) => format!("plain HTTP, status {}", code),
        None => "probe failed, reachability unknown".to_string(),
    };
    TechnicalCheck {
        name: "Security".to_string(),
        status,
        detail,
    }
}

pub fn run_checks(result: &ScrapeResult) -> Vec<TechnicalCheck> {
    vec![
        check_title(result),
        check_meta_description(result),
        check_h1(result),
        check_images(result),
        check_security(result),
    ]
}

/// Priority-ordered fixes for the page.
pub fn recommendations(result: &ScrapeResult) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if result.h1_count == 0 {
        recs.push(Recommendation::new(
            Priority::High,
            "Add H1 Tag",
            "Your page is missing an H1 tag. Add one H1 tag with your main keyword.",
        ));
    }
    if result.images_without_alt_count > 0 {
        recs.push(Recommendation::new(
            Priority::Medium,
            format!("Add alt text to {} images", result.images_without_alt_count),
            "Images without alt text hurt accessibility and SEO. Add descriptive alt text to all images.",
        ));
    }
    if result.title_length == 0 {
        recs.push(Recommendation::new(
            Priority::High,
            "Add a Title Tag",
            "Your page is missing a title tag. Add a title between 50-60 characters.",
        ));
    }
    if result.meta_description_length == 0 {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Add a Meta Description",
            "Add a meta description between 150-160 characters for better click-through rates.",
        ));
    }
    if !result.has_viewport_meta {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Add a Viewport Meta Tag",
            "Without a viewport meta tag the page will not scale on mobile devices.",
        ));
    }
    if !result.has_canonical {
        recs.push(Recommendation::new(
            Priority::Info,
            "Add a Canonical Link",
            "A canonical link tells search engines which URL is the preferred version of this page.",
        ));
    }
    if !result.security_status.is_secure {
        recs.push(Recommendation::new(
            Priority::Medium,
            "Serve the Page over HTTPS",
            "The page did not answer a secure request with status 200. Enable HTTPS and make sure the URL resolves directly.",
        ));
    }

    if run_checks(result)
        .iter()
        .all(|check| check.status == CheckStatus::Pass)
    {
        recs.push(Recommendation::new(
            Priority::Info,
            "Great job!",
            "All technical SEO checks passed. Your page is well-optimized.",
        ));
    }

    recs
}

/// Number of on-page problems the dashboard counts against a page.
pub fn count_issues(result: &ScrapeResult) -> usize {
    [
        !(TITLE_MIN..=TITLE_MAX).contains(&result.title_length),
        !(META_DESCRIPTION_MIN..=META_DESCRIPTION_MAX).contains(&result.meta_description_length),
        result.h1_count == 0,
        result.images_without_alt_count > 0,
    ]
    .into_iter()
    .filter(|issue| *issue)
    .count()
}
