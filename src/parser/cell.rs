use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    UNIT_BILLION_USD, UNIT_COUNT, UNIT_HOUSEHOLDS, UNIT_MILLION, UNIT_PERCENT_GROWTH,
};
use crate::types::Trend;

// ASCII digits only; cell text may contain other numerals that shouldn't count.
static NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("number pattern is valid"));
static PERCENT_HINT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+%").expect("percent hint pattern is valid"));
static PERCENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+\.?[0-9]*)%").expect("percent pattern is valid"));

/// What a single cell says once its text has been read
#[derive(Debug, Clone, PartialEq)]
pub struct CellReading {
    pub original_text: String,
    pub value: f64,
    pub unit: &'static str,
    pub has_value: bool,
    pub trend: Trend,
}

/// Reads a raw cell. Returns `None` for cells that are blank once quotes are removed.
pub fn read_cell(cell: &str) -> Option<CellReading> {
    let original_text = cell.replace('"', "").trim().to_string();
    if original_text.is_empty() {
        return None;
    }

    let trend = trend_from_keywords(&original_text);

    let Some(number) = NUMBER_RE.find(&original_text) else {
        return Some(CellReading {
            original_text,
            value: 0.0,
            unit: "",
            has_value: false,
            trend,
        });
    };

    let mut value = parse_number(number.as_str());
    let unit = if original_text.contains(UNIT_BILLION_USD) {
        UNIT_BILLION_USD
    } else if original_text.contains(UNIT_MILLION) {
        UNIT_MILLION
    } else if PERCENT_HINT_RE.is_match(&original_text) || original_text.contains("Growth") {
        // An explicit percentage beats whatever number happened to come first
        if let Some(pct) = PERCENT_RE.captures(&original_text).and_then(|c| c.get(1)) {
            value = parse_number(pct.as_str());
        }
        UNIT_PERCENT_GROWTH
    } else if original_text.contains(UNIT_HOUSEHOLDS) {
        UNIT_HOUSEHOLDS
    } else {
        UNIT_COUNT
    };

    Some(CellReading {
        original_text,
        value,
        unit,
        has_value: true,
        trend,
    })
}

pub fn trend_from_keywords(text: &str) -> Trend {
    if text.contains("Growth") || text.contains("Increase") {
        Trend::Up
    } else if text.contains("Decline") || text.contains("Decrease") {
        Trend::Down
    } else if text.contains("Stable") || text.contains("Unchanged") {
        Trend::Stable
    } else {
        Trend::Unknown
    }
}

/// Matches are digit runs with an optional single dot, so a trailing dot is the only
/// shape `f64::from_str` might disagree about.
fn parse_number(matched: &str) -> f64 {
    matched.trim_end_matches('.').parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_overrides_first_number() {
        let reading = read_cell("Growth 12.5% increase").unwrap();
        assert_eq!(reading.value, 12.5);
        assert_eq!(reading.unit, "% Growth");
        assert_eq!(reading.trend, Trend::Up);
        assert!(reading.has_value);
    }

    #[test]
    fn percentage_wins_even_after_an_earlier_number() {
        let reading = read_cell("2023 saw 7% more jobs").unwrap();
        assert_eq!(reading.value, 7.0);
        assert_eq!(reading.unit, "% Growth");
        assert_eq!(reading.trend, Trend::Unknown);
    }

    #[test]
    fn billion_usd_takes_precedence_over_percentages() {
        let reading = read_cell("\"4.2 Billion USD (5% Growth) [2]\"").unwrap();
        assert_eq!(reading.original_text, "4.2 Billion USD (5% Growth) [2]");
        assert_eq!(reading.value, 4.2);
        assert_eq!(reading.unit, "Billion USD");
        assert_eq!(reading.trend, Trend::Up);
    }

    #[test]
    fn unit_fallbacks() {
        assert_eq!(read_cell("3 Million users").unwrap().unit, "Million");
        assert_eq!(read_cell("1200 Households").unwrap().unit, "Households");
        assert_eq!(read_cell("Growth of 3 firms").unwrap().unit, "% Growth");
        let count = read_cell("350 companies").unwrap();
        assert_eq!(count.unit, "Count");
        assert_eq!(count.value, 350.0);
    }

    #[test]
    fn citation_number_counts_as_a_value() {
        let reading = read_cell("Strong demand [3]").unwrap();
        assert!(reading.has_value);
        assert_eq!(reading.value, 3.0);
        assert_eq!(reading.unit, "Count");
    }

    #[test]
    fn text_only_cell() {
        let reading = read_cell("Significant Decline").unwrap();
        assert!(!reading.has_value);
        assert_eq!(reading.value, 0.0);
        assert_eq!(reading.unit, "");
        assert_eq!(reading.trend, Trend::Down);
    }

    #[test]
    fn trailing_dot_number() {
        assert_eq!(read_cell("About 40. Stable").unwrap().value, 40.0);
        assert_eq!(read_cell("About 40. Stable").unwrap().trend, Trend::Stable);
    }

    #[test]
    fn blank_cells_are_skipped() {
        assert!(read_cell("").is_none());
        assert!(read_cell("\"\"").is_none());
        assert!(read_cell("  \" \" ").is_none());
    }

    #[test]
    fn growth_checked_before_decline() {
        assert_eq!(trend_from_keywords("Growth then Decline"), Trend::Up);
        assert_eq!(trend_from_keywords("Unchanged"), Trend::Stable);
        assert_eq!(trend_from_keywords("growth"), Trend::Unknown);
    }
}
