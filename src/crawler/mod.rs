//! Contact email crawler.
//!
//! Starting from an organization's homepage, fetches up to a fixed number of
//! same-origin pages one after another, collecting email addresses and
//! following links that look like contact or about pages. Failures never
//! reach the caller: a page that can't be fetched is skipped, a start URL
//! that can't be used yields no results.

pub mod emails;
pub mod links;

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::app::ports::HttpClientPort;
use crate::constants::DEFAULT_PAGES_LIMIT;
use crate::metrics::CrawlMetrics;
use crate::types::ScrapedEmail;

pub use emails::{extract_emails, format_email_for_display};
pub use links::{discover_contact_links, origin_of};

pub struct EmailCrawler {
    http: Arc<dyn HttpClientPort>,
    pages_limit: usize,
}

impl EmailCrawler {
    pub fn new(http: Arc<dyn HttpClientPort>) -> Self {
        Self {
            http,
            pages_limit: DEFAULT_PAGES_LIMIT,
        }
    }

    pub fn with_pages_limit(mut self, pages_limit: usize) -> Self {
        self.pages_limit = pages_limit;
        self
    }

    pub fn pages_limit(&self) -> usize {
        self.pages_limit
    }

    /// Crawls `url` with the crawler's configured page budget.
    pub async fn crawl(&self, url: &str) -> Vec<ScrapedEmail> {
        self.crawl_with_limit(url, self.pages_limit).await
    }

    #[instrument(skip(self))]
    pub async fn crawl_with_limit(&self, url: &str, pages_limit: usize) -> Vec<ScrapedEmail> {
        if !url.starts_with("http") {
            debug!("Refusing to crawl non-http URL");
            return Vec::new();
        }
        let Some(origin) = origin_of(url) else {
            warn!("Error during email scraping: could not determine origin of {}", url);
            return Vec::new();
        };

        let started = Instant::now();
        let mut results: Vec<ScrapedEmail> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut frontier: VecDeque<String> = VecDeque::from([url.to_string()]);

        while visited.len() < pages_limit {
            let Some(current_url) = frontier.pop_front() else {
                break;
            };
            if !visited.insert(current_url.clone()) {
                continue;
            }

            let resp = match self.http.get(&current_url).await {
                Ok(resp) => resp,
                Err(e) => {
                    warn!("Error scraping {}: {}", current_url, e);
                    CrawlMetrics::record_page_error();
                    continue;
                }
            };
            if !resp.is_success() {
                debug!("Skipping {} (status {})", current_url, resp.status);
                CrawlMetrics::record_page_error();
                continue;
            }
            CrawlMetrics::record_page_fetched(resp.bytes.len());
            let html = resp.text();

            let before = results.len();
            for email in extract_emails(&html) {
                if results.iter().any(|r| r.email == email) {
                    continue;
                }
                results.push(ScrapedEmail {
                    email,
                    source: origin.clone(),
                    page: current_url.clone(),
                });
            }
            debug!("{} new emails on {}", results.len() - before, current_url);

            if visited.len() < pages_limit {
                for link in discover_contact_links(&html, &origin, &current_url) {
                    if !visited.contains(&link) && !frontier.contains(&link) {
                        debug!("Queueing {}", link);
                        frontier.push_back(link);
                    }
                }
            }
        }

        CrawlMetrics::record_emails_found(results.len());
        CrawlMetrics::record_crawl_duration(started.elapsed().as_secs_f64());
        info!(
            "Found {} emails across {} pages of {}",
            results.len(),
            visited.len(),
            origin
        );
        results
    }
}

/// One-shot crawl of `url` through `http`, fetching at most `pages_limit` pages.
pub async fn scrape_emails_from_website(
    http: Arc<dyn HttpClientPort>,
    url: &str,
    pages_limit: usize,
) -> Vec<ScrapedEmail> {
    EmailCrawler::new(http)
        .with_pages_limit(pages_limit)
        .crawl(url)
        .await
}
