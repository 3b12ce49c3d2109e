use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::constants::CONTACT_LINK_KEYWORDS;

static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// Scheme + host (+ non-default port) of `url`, e.g. `https://clevelandtech.org`.
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    match parsed.origin() {
        origin @ url::Origin::Tuple(..) => Some(origin.ascii_serialization()),
        url::Origin::Opaque(_) => None,
    }
}

/// True when `url` lives under `origin` itself, not merely under a host that
/// shares its prefix (`https://a.com` vs `https://a.com.evil.net`).
pub fn is_same_origin(url: &str, origin: &str) -> bool {
    match url.strip_prefix(origin) {
        Some(rest) => rest.is_empty() || rest.starts_with(['/', '?', '#']),
        None => false,
    }
}

/// Makes an `href` absolute: root-relative paths hang off the crawl origin,
/// other non-`http` forms resolve against the page they were found on.
pub fn resolve_link(href: &str, origin: &str, current_url: &str) -> Option<String> {
    if href.starts_with('/') {
        return Some(format!("{}{}", origin, href));
    }
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    let base = Url::parse(current_url).ok()?;
    match base.join(href) {
        Ok(joined) => Some(joined.to_string()),
        Err(e) => {
            debug!("Could not resolve link {:?} on {}: {}", href, current_url, e);
            None
        }
    }
}

fn looks_like_contact(anchor_html: &str) -> bool {
    let lowered = anchor_html.to_lowercase();
    CONTACT_LINK_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Raw `href`s of anchors whose content mentions contact-ish words, in document order.
pub fn contact_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter(|anchor| looks_like_contact(&anchor.inner_html()))
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect()
}

/// Absolute, same-origin URLs of the contact-like links on a page.
pub fn discover_contact_links(html: &str, origin: &str, current_url: &str) -> Vec<String> {
    contact_hrefs(html)
        .iter()
        .filter_map(|href| resolve_link(href, origin, current_url))
        .filter(|url| is_same_origin(url, origin))
        .collect()
}
