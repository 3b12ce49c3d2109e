/// Identifying user agent sent with every crawl request
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 Cleveland Tech Dashboard (Conference Outreach Tool)";

/// Pages fetched per crawl when the caller doesn't say otherwise
pub const DEFAULT_PAGES_LIMIT: usize = 3;

/// Where the dashboard keeps its trend dataset
pub const DEFAULT_TREND_SOURCE: &str = "datasets/tech-industry-trends-2020-2024.csv";

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Addresses containing any of these are template filler, not real contacts
pub const PLACEHOLDER_EMAIL_MARKERS: &[&str] = &["example.com", "domain.com", "yourdomain"];

/// Link labels that usually lead to a page listing contact addresses
pub const CONTACT_LINK_KEYWORDS: &[&str] = &[
    "contact",
    "about",
    "team",
    "connect",
    "get in touch",
    "reach us",
    "support",
];

// Unit labels assigned by the trend parser
pub const UNIT_BILLION_USD: &str = "Billion USD";
pub const UNIT_MILLION: &str = "Million";
pub const UNIT_PERCENT_GROWTH: &str = "% Growth";
pub const UNIT_HOUSEHOLDS: &str = "Households";
pub const UNIT_COUNT: &str = "Count";
