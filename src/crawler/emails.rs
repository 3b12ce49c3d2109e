use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::PLACEHOLDER_EMAIL_MARKERS;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email pattern is valid")
});

pub fn is_placeholder(email: &str) -> bool {
    PLACEHOLDER_EMAIL_MARKERS
        .iter()
        .any(|marker| email.contains(marker))
}

/// Email-like strings in `body`, in document order, placeholders removed.
/// Duplicates are kept; the crawler dedupes across pages.
pub fn extract_emails(body: &str) -> Vec<String> {
    EMAIL_RE
        .find_iter(body)
        .map(|m| m.as_str())
        .filter(|email| !is_placeholder(email))
        .map(str::to_string)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `info@company.com` -> `Info at Company`. Input without an `@` comes back unchanged.
pub fn format_email_for_display(email: &str) -> String {
    let mut parts = email.split('@');
    let (Some(username), Some(domain)) = (parts.next(), parts.next()) else {
        return email.to_string();
    };

    let formatted_username = username
        .split(['.', '-', '_'])
        .filter(|piece| !piece.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    let domain_name = domain.split('.').next().unwrap_or_default();

    format!("{} at {}", formatted_username, capitalize(domain_name))
}
