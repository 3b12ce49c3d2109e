//! Earliest-vs-latest comparison per industry, ranked growth first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{IndustryDataPoint, Trend, TrendDataset};

static CITATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[0-9]+\]").expect("citation pattern is valid"));
static US_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bu\.?s\.?\b").expect("us pattern is valid"));

/// Geography a data point talks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Global,
    #[serde(rename = "US")]
    Us,
    Ohio,
    Cleveland,
}

impl Scope {
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("cleveland") {
            Scope::Cleveland
        } else if text.contains("ohio") {
            Scope::Ohio
        } else if text.contains("us") || US_RE.is_match(&text) {
            Scope::Us
        } else {
            Scope::Global
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub industry: String,
    pub earliest_year: String,
    pub latest_year: String,
    pub earliest_value: String,
    pub latest_value: String,
    pub trend: Trend,
    pub percent_change: Option<String>,
    pub unit: String,
    pub scope: Scope,
}

fn year_key(point: &IndustryDataPoint) -> i64 {
    point.year.trim().parse().unwrap_or(0)
}

/// Renders a point for display: numbers as numbers, text without its citations
/// and parenthetical tail.
pub fn display_value(point: &IndustryDataPoint) -> String {
    if point.has_value {
        if point.value.fract() == 0.0 {
            format!("{}", point.value as i64)
        } else {
            format!("{}", point.value)
        }
    } else {
        let stripped = CITATION_RE.replace_all(&point.original_text, "");
        stripped.split('(').next().unwrap_or_default().trim().to_string()
    }
}

fn percent_change(earliest: f64, latest: f64) -> Option<String> {
    if earliest == 0.0 {
        return None;
    }
    let change = (latest - earliest) / earliest * 100.0;
    let sign = if change > 0.0 { "+" } else { "" };
    Some(format!("{}{:.1}%", sign, change))
}

fn summarize_industry(industry: &str, points: &[&IndustryDataPoint]) -> Option<TrendSummary> {
    let mut valid: Vec<&IndustryDataPoint> =
        points.iter().copied().filter(|p| p.has_value).collect();
    valid.sort_by_key(|p| year_key(p));

    let earliest = *valid.first()?;
    let latest = *valid.last()?;
    if earliest.year == latest.year {
        return None;
    }

    let trend = if latest.value > earliest.value {
        Trend::Up
    } else if latest.value < earliest.value {
        Trend::Down
    } else {
        Trend::Stable
    };

    let unit = if earliest.unit.is_empty() {
        latest.unit.clone()
    } else {
        earliest.unit.clone()
    };

    Some(TrendSummary {
        industry: industry.to_string(),
        earliest_year: earliest.year.clone(),
        latest_year: latest.year.clone(),
        earliest_value: display_value(earliest),
        latest_value: display_value(latest),
        trend,
        percent_change: percent_change(earliest.value, latest.value),
        unit,
        scope: Scope::from_text(&earliest.original_text),
    })
}

/// One summary per industry with at least two distinct valued years, growth first
/// and alphabetical within a trend.
pub fn summarize_trends(dataset: &TrendDataset) -> Vec<TrendSummary> {
    let mut summaries: Vec<TrendSummary> = dataset
        .industries()
        .into_iter()
        .filter_map(|industry| {
            let points: Vec<&IndustryDataPoint> = dataset
                .data
                .iter()
                .filter(|p| p.industry == industry)
                .collect();
            summarize_industry(industry, &points)
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.trend
            .rank()
            .cmp(&a.trend.rank())
            .then_with(|| a.industry.cmp(&b.industry))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_trend_csv;

    #[test]
    fn summaries_compare_earliest_and_latest() {
        let dataset = parse_trend_csv(
            "\"\",2020,2021,2022\n\
             Banking,\"20 Million (Ohio)\",Stable,15 Million\n\
             Healthcare IT,10 Billion USD,12.5 Billion USD,\n",
        );

        let summaries = summarize_trends(&dataset);
        assert_eq!(summaries.len(), 2);

        let health = &summaries[0];
        assert_eq!(health.industry, "Healthcare IT");
        assert_eq!(health.trend, Trend::Up);
        assert_eq!(health.earliest_value, "10");
        assert_eq!(health.latest_value, "12.5");
        assert_eq!(health.percent_change.as_deref(), Some("+25.0%"));
        assert_eq!(health.unit, "Billion USD");

        let banking = &summaries[1];
        assert_eq!(banking.trend, Trend::Down);
        assert_eq!(banking.earliest_year, "2020");
        assert_eq!(banking.latest_year, "2022");
        assert_eq!(banking.percent_change.as_deref(), Some("-25.0%"));
        assert_eq!(banking.scope, Scope::Ohio);
    }

    #[test]
    fn ties_sort_by_name() {
        let dataset = parse_trend_csv("\"\",2020,2021\nZeta,1,2\nAlpha,3,4\n");
        let names: Vec<_> = summarize_trends(&dataset)
            .into_iter()
            .map(|s| s.industry)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }

    #[test]
    fn zero_baseline_has_no_percent_change() {
        assert_eq!(percent_change(0.0, 5.0), None);
        assert_eq!(percent_change(4.0, 4.0).as_deref(), Some("0.0%"));
    }

    #[test]
    fn text_values_lose_citations_and_parentheticals() {
        let point = IndustryDataPoint {
            industry: "AI".to_string(),
            year: "2021".to_string(),
            value: 0.0,
            normalized_value: 0.0,
            unit: String::new(),
            original_text: "Rapid Growth [4] (regional)".to_string(),
            has_value: false,
            trend: Trend::Up,
        };
        assert_eq!(display_value(&point), "Rapid Growth");
    }

    #[test]
    fn scope_detection() {
        assert_eq!(Scope::from_text("Cleveland Clinic spend"), Scope::Cleveland);
        assert_eq!(Scope::from_text("Northeast Ohio"), Scope::Ohio);
        assert_eq!(Scope::from_text("U.S. market"), Scope::Us);
        assert_eq!(Scope::from_text("worldwide"), Scope::Global);
    }
}
