use crate::{
    bibtex::{self, BibEntry},
    error::ConvertError,
};

pub mod article;
pub mod authors;
pub mod book;
pub mod online;

use article::Article;
use book::Book;
use online::Online;

/// A Harvard formatting rule for one family of entry types.
pub trait Rule {
    /// Type tags handled by this rule, written the way the parser captures them (with the `@`).
    const TYPES: &'static [&'static str];

    fn format(entry: &BibEntry) -> Result<String, ConvertError>;
}

type FormatFn = fn(&BibEntry) -> Result<String, ConvertError>;

/// Dispatch table. Type tags are matched exactly, so `@Book` is not `@book`.
static RULES: &[(&[&str], FormatFn)] = &[rule::<Book>(), rule::<Article>(), rule::<Online>()];

const fn rule<R: Rule>() -> (&'static [&'static str], FormatFn) {
    let f: FormatFn = R::format;
    (R::TYPES, f)
}

/// Format a single entry with whichever rule claims its type.
pub fn format_entry(entry: &BibEntry) -> Result<String, ConvertError> {
    let (_, format) = RULES
        .iter()
        .find(|(types, _)| types.contains(&entry.entry_type.as_str()))
        .ok_or_else(|| ConvertError::UnsupportedEntryType {
            entry_type: entry.entry_type.clone(),
            entry_id: entry.entry_id.clone(),
        })?;
    format(entry)
}

/// Result of converting a batch of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    /// One citation per successfully formatted entry, in input order.
    pub citations: Vec<String>,
    /// Entries that were left out, in input order.
    pub skipped: Vec<ConvertError>,
}

impl Conversion {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Convert entries to citations, keeping track of the ones that could not be formatted.
///
/// A failing entry never affects the others; it is logged and listed in
/// [`Conversion::skipped`].
pub fn convert(entries: &[BibEntry]) -> Conversion {
    let mut out = Conversion::default();
    for entry in entries {
        match format_entry(entry) {
            Ok(citation) => out.citations.push(citation),
            Err(err) => {
                tracing::warn!(entry_id = %entry.entry_id, error = %err, "skipping entry");
                out.skipped.push(err);
            }
        }
    }
    out
}

/// Convert entries to citations, dropping (and logging) the ones that cannot be formatted.
pub fn convert_to_harvard(entries: &[BibEntry]) -> Vec<String> {
    convert(entries).citations
}

/// Parse `text` and convert every entry in it.
pub fn harvard(text: &str) -> Conversion {
    convert(&bibtex::parse(text))
}

/// Holds the entries of one BibTeX text so they can be converted on demand.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    entries: Vec<BibEntry>,
}

impl Converter {
    pub fn new(text: &str) -> Self {
        Converter {
            entries: bibtex::parse(text),
        }
    }

    pub fn entries(&self) -> &[BibEntry] {
        &self.entries
    }

    pub fn convert(&self) -> Conversion {
        convert(&self.entries)
    }

    pub fn convert_to_harvard(&self) -> Vec<String> {
        convert_to_harvard(&self.entries)
    }

    /// The citation a source record keeps: the first one that could be formatted.
    pub fn first_citation(&self) -> Option<String> {
        self.entries.iter().find_map(|e| format_entry(e).ok())
    }
}
