//! Counters and histograms for the two extraction routines.
//!
//! Recording goes through the `metrics` facade, so every call is a no-op
//! until [`init_metrics`] installs the Prometheus exporter.

use std::net::SocketAddr;
use tracing::{info, warn};

pub const METRICS_PORT_ENV: &str = "CLE_METRICS_PORT";

/// Installs the Prometheus exporter when `CLE_METRICS_PORT` is set.
///
/// Returns whether an exporter is now listening.
pub fn init_metrics() -> bool {
    let Some(port) = std::env::var(METRICS_PORT_ENV)
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
    else {
        return false;
    };

    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    let builder = metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => {
            info!("Prometheus exporter listening on http://{}/metrics", addr);
            true
        }
        Err(e) => {
            warn!("Prometheus exporter install failed: {}", e);
            false
        }
    }
}

pub struct CrawlMetrics;

impl CrawlMetrics {
    pub fn record_page_fetched(payload_bytes: usize) {
        ::metrics::counter!("cle_crawler_pages_fetched_total").increment(1);
        ::metrics::histogram!("cle_crawler_page_bytes").record(payload_bytes as f64);
    }

    pub fn record_page_error() {
        ::metrics::counter!("cle_crawler_page_errors_total").increment(1);
    }

    pub fn record_emails_found(count: usize) {
        ::metrics::counter!("cle_crawler_emails_found_total").increment(count as u64);
    }

    pub fn record_crawl_duration(duration_secs: f64) {
        ::metrics::histogram!("cle_crawler_duration_seconds").record(duration_secs);
    }
}

pub struct TrendMetrics;

impl TrendMetrics {
    pub fn record_lines_parsed(count: usize) {
        ::metrics::counter!("cle_trends_lines_parsed_total").increment(count as u64);
    }

    pub fn record_points_emitted(count: usize) {
        ::metrics::counter!("cle_trends_points_emitted_total").increment(count as u64);
    }

    pub fn record_industries_dropped(count: usize) {
        ::metrics::counter!("cle_trends_industries_dropped_total").increment(count as u64);
    }

    pub fn record_load_error() {
        ::metrics::counter!("cle_trends_load_errors_total").increment(1);
    }
}
