pub mod audit;
pub mod checks;
pub mod report;

pub use audit::{AuditError, Auditor, ScrapeResult, UrlRejection, iso_timestamp};
pub use seolens_scanner::{FetchConfig, KeywordRanker};
