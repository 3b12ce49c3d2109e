use serde::{Deserialize, Serialize};

/// Direction a cell's wording points to, independent of its numeric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
    Unknown,
}

impl Trend {
    /// Ordering used when ranking industries: growth first, unknown last
    pub fn rank(self) -> u8 {
        match self {
            Trend::Up => 3,
            Trend::Stable => 2,
            Trend::Down => 1,
            Trend::Unknown => 0,
        }
    }
}

/// One industry x year cell of the trend dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryDataPoint {
    pub industry: String,
    pub year: String,
    pub value: f64,
    /// Min-max position within this industry's valid points, in [0, 1]
    pub normalized_value: f64,
    pub unit: String,
    pub original_text: String,
    pub has_value: bool,
    pub trend: Trend,
}

/// Parsed trend document: the header's years plus every surviving data point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendDataset {
    pub years: Vec<String>,
    pub data: Vec<IndustryDataPoint>,
}

impl TrendDataset {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty() && self.data.is_empty()
    }

    /// Distinct industries in first-seen order
    pub fn industries(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for point in &self.data {
            if !seen.contains(&point.industry.as_str()) {
                seen.push(point.industry.as_str());
            }
        }
        seen
    }
}

/// An address found during one crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedEmail {
    pub email: String,
    /// Origin (scheme + host) of the crawl's start URL
    pub source: String,
    /// Page the address was first seen on
    pub page: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_point_serializes_with_dashboard_keys() {
        let point = IndustryDataPoint {
            industry: "Healthcare".to_string(),
            year: "2021".to_string(),
            value: 12.5,
            normalized_value: 1.0,
            unit: "% Growth".to_string(),
            original_text: "Growth 12.5%".to_string(),
            has_value: true,
            trend: Trend::Up,
        };

        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["normalizedValue"], 1.0);
        assert_eq!(json["originalText"], "Growth 12.5%");
        assert_eq!(json["hasValue"], true);
        assert_eq!(json["trend"], "up");
    }

    #[test]
    fn trend_rank_orders_growth_first() {
        let mut trends = vec![Trend::Unknown, Trend::Down, Trend::Up, Trend::Stable];
        trends.sort_by_key(|t| std::cmp::Reverse(t.rank()));
        assert_eq!(trends, vec![Trend::Up, Trend::Stable, Trend::Down, Trend::Unknown]);
    }
}
