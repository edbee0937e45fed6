pub mod analyzer;
pub mod error;
pub mod fetcher;
pub mod keywords;
pub mod result;
pub mod target;

pub use analyzer::analyze_html;
pub use error::ScanError;
pub use fetcher::{FetchConfig, Fetcher};
pub use keywords::KeywordRanker;
pub use result::{ImageAltIssue, KeywordEntry, PageSignals, SecurityStatus};
pub use target::{TargetUrl, validate_url};
