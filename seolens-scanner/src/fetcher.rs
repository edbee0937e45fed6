//! HTTP access to audit targets.
//!
//! Two calls are made per audit: a HEAD probe that only reports transport
//! security and reachability, and the full GET whose body gets analyzed.

use crate::error::Result;
use crate::result::SecurityStatus;
use crate::target::TargetUrl;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Generic desktop browser user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Redirect hops followed before a fetch gives up.
pub const DEFAULT_MAX_REDIRECTS: usize = 21;

/// Configuration for outbound requests
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string
    pub user_agent: String,
    /// Timeout applied to each request, connection through body
    pub timeout: Duration,
    /// Maximum redirects to follow
    pub max_redirects: usize,
}

impl FetchConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Probe the target with a HEAD request.
    ///
    /// Every status code counts as a response. Transport failures are logged
    /// and produce the unreachable status instead of an error.
    pub async fn probe(&self, target: &TargetUrl) -> SecurityStatus {
        let https_enforced = target.is_https();

        match self.client.head(target.url().as_str()).send().await {
            Ok(response) => {
                let status_code = response.status().as_u16();
                debug!("Security probe of {} returned {}", target, status_code);
                SecurityStatus::from_response(https_enforced, status_code)
            }
            Err(e) => {
                warn!("Security check error for {}: {}", target, e);
                SecurityStatus::unreachable(https_enforced)
            }
        }
    }

    /// Download the target page. Non-2xx responses are errors.
    pub async fn fetch_page(&self, target: &TargetUrl) -> Result<String> {
        debug!("Fetching {}", target);

        let response = self
            .client
            .get(target.url().as_str())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!("Fetched {} bytes from {}", body.len(), target);
        Ok(body)
    }
}
