//! The scrape-and-normalize pipeline behind one audit request.
//!
//! Stages run strictly in order: validate, probe, fetch, analyze, rank,
//! assemble. Only validation and the page fetch can end an audit early; the
//! security probe degrades to an "unknown" status on its own.

use chrono::{SecondsFormat, Utc};
use seolens_scanner::{
    FetchConfig, Fetcher, ImageAltIssue, KeywordEntry, KeywordRanker, PageSignals, ScanError,
    SecurityStatus, TargetUrl, analyze_html, validate_url,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Why a submitted URL was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlRejection {
    Malformed(url::ParseError),
    BareHostname(String),
}

impl UrlRejection {
    pub fn message(&self) -> &'static str {
        match self {
            UrlRejection::Malformed(_) => {
                "Invalid URL format. Please enter a valid URL (e.g., https://example.com)"
            }
            UrlRejection::BareHostname(_) => {
                "Invalid URL format. Please enter a valid domain (e.g., example.com)"
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("URL is required")]
    MissingInput,

    #[error("{}", .0.message())]
    InvalidUrlFormat(UrlRejection),

    #[error(
        "Cannot connect to the website. Please check if the URL is correct and the website is accessible."
    )]
    UpstreamUnreachable(String),

    #[error("The website took too long to respond. Please try again or use a different URL.")]
    UpstreamTimeout(String),

    #[error("Failed to fetch the website. Please check if the URL is correct.")]
    FetchFailed(String),

    #[error("Failed to scrape the website")]
    UnexpectedFailure(String),
}

impl AuditError {
    /// HTTP status the API answers with for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            AuditError::MissingInput | AuditError::InvalidUrlFormat(_) => 400,
            AuditError::UpstreamUnreachable(_) | AuditError::FetchFailed(_) => 502,
            AuditError::UpstreamTimeout(_) => 504,
            AuditError::UnexpectedFailure(_) => 500,
        }
    }

    /// Diagnostic text exposed to callers alongside the message.
    pub fn details(&self) -> Option<&str> {
        match self {
            AuditError::FetchFailed(details) | AuditError::UnexpectedFailure(details) => {
                Some(details)
            }
            _ => None,
        }
    }
}

impl From<ScanError> for AuditError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::MissingUrl => AuditError::MissingInput,
            ScanError::InvalidUrl(e) => AuditError::InvalidUrlFormat(UrlRejection::Malformed(e)),
            ScanError::InvalidHost(host) => {
                AuditError::InvalidUrlFormat(UrlRejection::BareHostname(host))
            }
            ScanError::Unreachable(e) => AuditError::UpstreamUnreachable(e.to_string()),
            ScanError::Timeout(e) => AuditError::UpstreamTimeout(e.to_string()),
            ScanError::HttpError(e) => AuditError::FetchFailed(e.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for AuditError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuditError::UnexpectedFailure(err.to_string())
    }
}

/// Everything one audit reports about a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub url: String,
    pub title: String,
    pub title_length: usize,
    pub meta_description: String,
    pub meta_description_length: usize,
    pub h1_count: usize,
    pub h1_tags: Vec<String>,
    pub images_without_alt: Vec<ImageAltIssue>,
    pub images_without_alt_count: usize,
    pub has_viewport_meta: bool,
    pub has_canonical: bool,
    pub security_status: SecurityStatus,
    pub keyword_analysis: Vec<KeywordEntry>,
    pub timestamp: String,
}

impl ScrapeResult {
    pub fn assemble(
        target: &TargetUrl,
        signals: PageSignals,
        security_status: SecurityStatus,
        keyword_analysis: Vec<KeywordEntry>,
    ) -> Self {
        let title_length = signals.title_length();
        let meta_description_length = signals.meta_description_length();
        let h1_count = signals.h1_count();
        let images_without_alt_count = signals.images_without_alt.len();

        Self {
            url: target.as_str().to_string(),
            title: signals.title,
            title_length,
            meta_description: signals.meta_description,
            meta_description_length,
            h1_count,
            h1_tags: signals.h1_tags,
            images_without_alt: signals.images_without_alt,
            images_without_alt_count,
            has_viewport_meta: signals.has_viewport_meta,
            has_canonical: signals.has_canonical,
            security_status,
            keyword_analysis,
            timestamp: iso_timestamp(),
        }
    }
}

/// Current UTC time as ISO-8601 with millisecond precision, e.g.
/// `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Runs audits. Holds only read-only configuration, so one instance can be
/// shared across concurrent requests.
pub struct Auditor {
    fetcher: Fetcher,
    ranker: Arc<KeywordRanker>,
}

impl Auditor {
    pub fn new(config: FetchConfig) -> Result<Self, ScanError> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            ranker: Arc::new(KeywordRanker::default()),
        })
    }

    pub fn with_ranker(mut self, ranker: KeywordRanker) -> Self {
        self.ranker = Arc::new(ranker);
        self
    }

    pub fn fetch_config(&self) -> &FetchConfig {
        self.fetcher.config()
    }

    pub async fn audit(&self, raw_url: Option<&str>) -> Result<ScrapeResult, AuditError> {
        let target = validate_url(raw_url).inspect_err(|e| debug!("Rejected input: {}", e))?;
        info!("Auditing {}", target);

        let security_status = self.fetcher.probe(&target).await;

        let html = self.fetcher.fetch_page(&target).await.map_err(|e| {
            warn!("Fetch failed for {}: {}", target, e);
            AuditError::from(e)
        })?;

        // Parsing is CPU bound and the parsed DOM is not Send
        let ranker = Arc::clone(&self.ranker);
        let (signals, keywords) = tokio::task::spawn_blocking(move || {
            let signals = analyze_html(&html);
            let keywords = ranker.rank(&signals.body_text);
            (signals, keywords)
        })
        .await
        .map_err(|e| {
            error!("Scraping error for {}: {}", target, e);
            AuditError::from(e)
        })?;

        let result = ScrapeResult::assemble(&target, signals, security_status, keywords);
        info!(
            "Audit of {} complete: {} h1, {} images without alt, {} keywords",
            result.url,
            result.h1_count,
            result.images_without_alt_count,
            result.keyword_analysis.len()
        );
        Ok(result)
    }
}
