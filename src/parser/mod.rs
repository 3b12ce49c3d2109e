//! Industry trend CSV parsing.
//!
//! Turns the hand-maintained industry x year research table into a flat list
//! of [`IndustryDataPoint`]s, each normalized against the other points of its
//! own industry. Parsing is best effort: anything that goes wrong yields an
//! empty [`TrendDataset`] and a log line, never an error.

pub mod cell;
pub mod tokenizer;

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::app::ports::HttpClientPort;
use crate::error::{Result, ScraperError};
use crate::metrics::TrendMetrics;
use crate::types::{IndustryDataPoint, TrendDataset};

use cell::read_cell;
use tokenizer::{parse_header, tokenize_row};

/// Minimum number of numeric points an industry needs to be charted
pub const MIN_VALID_POINTS: usize = 2;

/// Parses a trend document, degrading to an empty dataset on malformed input.
pub fn parse_trend_csv(text: &str) -> TrendDataset {
    match try_parse_trend_csv(text) {
        Ok(dataset) => dataset,
        Err(e) => {
            warn!("Error parsing industry trend CSV: {}", e);
            TrendDataset::default()
        }
    }
}

/// Parses a trend document, reporting why it couldn't be read.
pub fn try_parse_trend_csv(text: &str) -> Result<TrendDataset> {
    let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    let header = lines.next().unwrap_or_default();
    let years = parse_header(header);
    if years.is_empty() {
        return Err(ScraperError::Csv("could not parse header row".to_string()));
    }

    let mut points = Vec::new();
    let mut rows = 0usize;
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let Some(row) = tokenize_row(line) else {
            debug!("Skipping row without an industry label: {:?}", line);
            continue;
        };
        rows += 1;

        for (cell, year) in row.cells.iter().zip(years.iter()) {
            let Some(reading) = read_cell(cell) else {
                continue;
            };
            points.push(IndustryDataPoint {
                industry: row.industry.clone(),
                year: year.clone(),
                value: reading.value,
                normalized_value: 0.0,
                unit: reading.unit.to_string(),
                original_text: reading.original_text,
                has_value: reading.has_value,
                trend: reading.trend,
            });
        }
    }
    TrendMetrics::record_lines_parsed(rows);

    let mut data = drop_sparse_industries(points);
    normalize_per_industry(&mut data);
    TrendMetrics::record_points_emitted(data.len());

    debug!("Parsed {} rows into {} data points", rows, data.len());
    Ok(TrendDataset { years, data })
}

fn valid_counts(points: &[IndustryDataPoint]) -> HashMap<&str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for point in points.iter().filter(|p| p.has_value) {
        *counts.entry(point.industry.as_str()).or_default() += 1;
    }
    counts
}

/// Removes every point, numeric or not, of industries with fewer than
/// [`MIN_VALID_POINTS`] numeric points.
fn drop_sparse_industries(points: Vec<IndustryDataPoint>) -> Vec<IndustryDataPoint> {
    let keep: Vec<String> = valid_counts(&points)
        .into_iter()
        .filter(|(_, count)| *count >= MIN_VALID_POINTS)
        .map(|(industry, _)| industry.to_string())
        .collect();

    let before = points.len();
    let mut dropped_industries: Vec<String> = Vec::new();
    let kept: Vec<IndustryDataPoint> = points
        .into_iter()
        .filter(|p| {
            let keep_it = keep.contains(&p.industry);
            if !keep_it && !dropped_industries.contains(&p.industry) {
                dropped_industries.push(p.industry.clone());
            }
            keep_it
        })
        .collect();

    if !dropped_industries.is_empty() {
        debug!(
            "Dropped {} points from industries with too few values: {:?}",
            before - kept.len(),
            dropped_industries
        );
        TrendMetrics::record_industries_dropped(dropped_industries.len());
    }
    kept
}

/// Min-max normalizes numeric points within each industry. A flat series sits at 0.5;
/// non-numeric points keep 0.
fn normalize_per_industry(points: &mut [IndustryDataPoint]) {
    let mut ranges: HashMap<String, (f64, f64, usize)> = HashMap::new();
    for point in points.iter().filter(|p| p.has_value) {
        let entry = ranges
            .entry(point.industry.clone())
            .or_insert((f64::INFINITY, f64::NEG_INFINITY, 0));
        entry.0 = entry.0.min(point.value);
        entry.1 = entry.1.max(point.value);
        entry.2 += 1;
    }

    for point in points.iter_mut().filter(|p| p.has_value) {
        let Some(&(min, max, count)) = ranges.get(&point.industry) else {
            continue;
        };
        if count < MIN_VALID_POINTS {
            continue;
        }
        let range = max - min;
        point.normalized_value = if range == 0.0 {
            0.5
        } else {
            (point.value - min) / range
        };
    }
}

fn is_http_source(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_source(http: &dyn HttpClientPort, source: &str) -> Result<String> {
    if is_http_source(source) {
        let resp = http.get(source).await.map_err(ScraperError::Fetch)?;
        if !resp.is_success() {
            return Err(ScraperError::Status {
                url: source.to_string(),
                status: resp.status,
            });
        }
        Ok(resp.text())
    } else {
        Ok(tokio::fs::read_to_string(Path::new(source)).await?)
    }
}

/// Loads the trend document from an `http(s)` URL or a local path and parses it.
///
/// Never fails: an unreachable source, an error status or an unreadable file all
/// produce an empty dataset.
#[instrument(skip(http))]
pub async fn parse_industry_trend_csv(http: &dyn HttpClientPort, source: &str) -> TrendDataset {
    let text = match fetch_source(http, source).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Error loading industry trend CSV: {}", e);
            TrendMetrics::record_load_error();
            return TrendDataset::default();
        }
    };

    let dataset = parse_trend_csv(&text);
    info!(
        "Parsed {} years and {} data points across {} industries",
        dataset.years.len(),
        dataset.data.len(),
        dataset.industries().len()
    );
    dataset
}
