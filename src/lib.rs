pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod types;

// Trend dataset parsing and summaries
pub mod parser;
pub mod summary;

// Contact email crawling
pub mod crawler;

// Port traits and their outbound adapters
pub mod app;
pub mod infra;

pub use crawler::{scrape_emails_from_website, EmailCrawler};
pub use parser::{parse_industry_trend_csv, parse_trend_csv};
pub use types::{IndustryDataPoint, ScrapedEmail, Trend, TrendDataset};
