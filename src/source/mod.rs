//! Source labels.
//!
//! A source is entered as a single label which is either a free-text description (usually a
//! book) or a URL. Before the source is stored, a URL label is replaced by something readable:
//! a page title, a digital-library title and page, or a placeholder. The URL itself moves to the
//! source URL, and the label finally gets a suffix naming the kind of source.

use url::Url;

pub mod page;

use page::{Fetch, FetchOutcome, TITLE_NOT_FOUND};

/// Host of the Slovak Academy of Sciences' digital library.
pub const DIGITAL_LIBRARY_HOST: &str = "digitalna-kniznica.beliana.sav.sk";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// No URL: a printed book or other offline text.
    Book,
    Pdf,
    Web,
    DigitalLibrary,
}

impl SourceKind {
    /// Suffix appended to labels of this kind, without parentheses.
    pub fn suffix(self) -> &'static str {
        match self {
            SourceKind::Book => "kniha",
            SourceKind::Pdf => "pdf",
            SourceKind::Web => "web",
            SourceKind::DigitalLibrary => "DK EnÚ",
        }
    }
}

/// Severity of a message meant for the person saving the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    fn warning(text: impl Into<String>) -> Self {
        Notice {
            level: Level::Warning,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Notice {
            level: Level::Error,
            text: text.into(),
        }
    }
}

/// How a label should be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub label: String,
    pub source_url: Option<String>,
    pub notices: Vec<Notice>,
    /// The URL could not be followed; the label stays as typed.
    pub halted: bool,
    /// The label is final as it stands and gets no kind suffix.
    pub keep_label: bool,
}

/// Parse `label` as an absolute URL of a scheme a source may point to.
pub fn is_url(label: &str) -> Option<Url> {
    let url = Url::parse(label.trim()).ok()?;
    let scheme_ok = matches!(url.scheme(), "http" | "https" | "ftp" | "feed");
    (scheme_ok && url.host_str().is_some_and(|h| !h.is_empty())).then_some(url)
}

/// Kind of a source, judged from its stored URL.
pub fn classify(source_url: Option<&str>) -> SourceKind {
    match source_url.filter(|u| !u.is_empty()) {
        None => SourceKind::Book,
        Some(u) if u.contains(DIGITAL_LIBRARY_HOST) => SourceKind::DigitalLibrary,
        Some(u) if u.ends_with(".pdf") => SourceKind::Pdf,
        Some(_) => SourceKind::Web,
    }
}

/// Append the kind suffix, unless the label already carries it.
pub fn decorate_label(label: &str, source_url: Option<&str>) -> String {
    let tag = format!("({})", classify(source_url).suffix());
    if label.contains(&tag) {
        label.to_string()
    } else {
        format!("{label} {tag}")
    }
}

/// Readable label for a digital-library link, taken from its `title` and `cv` (page) parameters.
pub fn digital_library_label(url: &Url) -> Option<String> {
    let mut title = None;
    let mut page = None;
    for (k, v) in url.query_pairs() {
        match k.as_ref() {
            "title" => title = Some(v.into_owned()),
            "cv" => page = Some(v.into_owned()),
            _ => {}
        }
    }
    let (title, page) = (title?, page?);
    Some(format!("{} , page {}", title, page_number(&page)))
}

// `page_12` -> 12; anything without leading digits counts as page 0.
fn page_number(cv: &str) -> u32 {
    let digits: String = cv
        .replace("page_", "")
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Work out what to store for a freshly entered `label`.
///
/// `previous_url` is the source URL stored so far. A label that is not a URL, or that repeats
/// the stored URL, is left alone and nothing is fetched.
pub fn resolve_label<F: Fetch>(label: &str, previous_url: Option<&str>, fetcher: F) -> Resolution {
    let label = label.trim();
    let mut res = Resolution {
        label: label.to_string(),
        source_url: previous_url.map(str::to_string),
        notices: Vec::new(),
        halted: false,
        keep_label: false,
    };

    let Some(url) = is_url(label) else {
        return res;
    };
    if previous_url == Some(label) {
        return res;
    }

    if label.contains(DIGITAL_LIBRARY_HOST) {
        match digital_library_label(&url) {
            Some(derived) => {
                res.label = derived;
                res.source_url = Some(label.to_string());
            }
            None => res.notices.push(Notice::error("Error, contact the programmer.")),
        }
    } else if label.ends_with(".pdf") {
        res.label = TITLE_NOT_FOUND.to_string();
        res.source_url = Some(label.to_string());
        res.notices.push(Notice::warning(format!(
            "Page title was not found for this source automatically. \
             Copy it from the PDF ({label}) and update the source."
        )));
    } else {
        match fetcher.fetch_title(&url) {
            FetchOutcome::Title(title) => {
                res.label = title;
                res.source_url = Some(label.to_string());
            }
            FetchOutcome::Forbidden => {
                res.label = "Downloading failed".to_string();
                res.source_url = Some(label.to_string());
                res.keep_label = true;
                res.notices.push(Notice::warning(format!(
                    "Downloading of content of the article ({label}) failed owing to access \
                     restrictions. Print its content to a PDF file and upload it manually to \
                     the source. Set also the source title."
                )));
            }
            FetchOutcome::Unreachable(reason) => {
                tracing::debug!(url = %url, reason = %reason, "source URL unreachable");
                res.notices.push(Notice::warning(
                    "The URL given in the source is incorrect, verify and fix it.",
                ));
                res.halted = true;
                res.keep_label = true;
            }
            FetchOutcome::Status(code) => {
                tracing::debug!(url = %url, code, "unexpected status for source URL");
                res.notices.push(Notice::error(
                    "Unexpected error in source, verify and fix it.",
                ));
                res.halted = true;
                res.keep_label = true;
            }
        }
    }

    res
}

/// Resolve `label`, then append the kind suffix unless the resolved label is final.
pub fn prepare<F: Fetch>(label: &str, previous_url: Option<&str>, fetcher: F) -> Resolution {
    let mut res = resolve_label(label, previous_url, fetcher);
    if !res.keep_label {
        res.label = decorate_label(&res.label, res.source_url.as_deref());
    }
    res
}
