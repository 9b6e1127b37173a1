use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use quick_xml::escape::{resolve_html5_entity, resolve_predefined_entity, unescape_with};
use regex::Regex;
use url::Url;

/// Label used when a page can be fetched but carries no `<title>`.
pub const TITLE_NOT_FOUND: &str = "Page title was not found";

const USER_AGENT: &str = "Mozilla/5.0 (compatible; bkb/0.1)";

/// What came back from asking a web page for its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page answered; holds its title or [`TITLE_NOT_FOUND`].
    Title(String),
    /// The server refused scripted access (HTTP 403).
    Forbidden,
    /// No HTTP answer at all: bad host, refused connection, timeout.
    Unreachable(String),
    /// Any other non-success status.
    Status(u16),
}

/// Source of page titles. Implemented over HTTP by [`HttpFetcher`]; tests plug in canned answers.
pub trait Fetch {
    fn fetch_title(&self, url: &Url) -> FetchOutcome;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch_title(&self, url: &Url) -> FetchOutcome {
        (**self).fetch_title(url)
    }
}

/// Blocking HTTP fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    timeout: Duration,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        HttpFetcher {
            timeout: Duration::from_secs(10),
        }
    }
}

impl HttpFetcher {
    pub fn with_timeout(timeout: Duration) -> Self {
        HttpFetcher { timeout }
    }
}

impl Fetch for HttpFetcher {
    fn fetch_title(&self, url: &Url) -> FetchOutcome {
        let cfg = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build();
        let agent = ureq::Agent::new_with_config(cfg);

        let res = match agent
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .call()
        {
            Ok(res) => res,
            Err(ureq::Error::StatusCode(403)) => return FetchOutcome::Forbidden,
            Err(ureq::Error::StatusCode(code)) => return FetchOutcome::Status(code),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "error getting page title");
                return FetchOutcome::Unreachable(e.to_string());
            }
        };

        match res.into_body().read_to_string() {
            Ok(html) => {
                let title = page_title(&html).unwrap_or_else(|| TITLE_NOT_FOUND.to_string());
                tracing::debug!(url = %url, title = %title, "fetched page title");
                FetchOutcome::Title(title)
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "error reading page body");
                FetchOutcome::Unreachable(e.to_string())
            }
        }
    }
}

/// Fetcher for runs without network access: every page is unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl Fetch for Offline {
    fn fetch_title(&self, _url: &Url) -> FetchOutcome {
        FetchOutcome::Unreachable("offline".to_string())
    }
}

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());

/// Text of the first `<title>` element, entities decoded and whitespace collapsed.
pub fn page_title(html: &str) -> Option<String> {
    let raw = TITLE_RE.captures(html)?.get(1)?.as_str();
    let decoded = unescape_with(raw, |e| {
        resolve_predefined_entity(e).or_else(|| resolve_html5_entity(e))
    })
    .map(|t| t.into_owned())
    .unwrap_or_else(|_| raw.to_string());
    let title = normalize_ws(&decoded);
    (!title.is_empty()).then_some(title)
}

/// Render a minimal `@online` record for a page, readable by [`crate::bibtex::parse`].
///
/// The access date doubles as the year since pages rarely expose a reliable publication date.
pub fn online_entry(title: &str, url: &Url, accessed: NaiveDate) -> String {
    let fields = [
        ("title", sanitize(title)),
        ("url", url.as_str().to_string()),
        ("year", accessed.year().to_string()),
        ("urldate", accessed.format("%Y-%m-%d").to_string()),
    ];

    let mut out = String::new();
    out.push_str("@online{");
    out.push_str(&build_key(url));
    out.push_str(",\n");
    for (k, v) in fields {
        out.push_str("    ");
        out.push_str(k);
        out.push_str(" = {");
        out.push_str(&v);
        out.push_str("},\n");
    }
    out.push_str("}\n");
    out
}

fn build_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or("site");
    let path = url.path().trim_matches('/');
    let slug = if path.is_empty() {
        "root".to_string()
    } else {
        path.replace('/', "-")
    };
    format!("web:{host}:{slug}")
}

// Values must stay on one line and keep their own braces out of the record.
fn sanitize(s: &str) -> String {
    normalize_ws(&s.replace(['{', '}'], ""))
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
