use crate::{bibtex::BibEntry, citation::Rule, error::ConvertError};

use super::authors::format_authors;

/// Web pages and other online-only resources.
pub struct Online;

impl Rule for Online {
    const TYPES: &'static [&'static str] = &["@online", "@url"];

    fn format(entry: &BibEntry) -> Result<String, ConvertError> {
        // Without an author the citation starts with a bare space before the year.
        let authors = entry.field("author").map(format_authors).unwrap_or_default();
        let title = entry.require("title")?;
        let url = entry.require("url")?;
        let year = entry.require("year")?;
        let accessed = entry
            .field("urldate")
            .map(|date| format!(" (accessed {date})"))
            .unwrap_or_default();

        Ok(format!(
            "{authors} ({year}) {title}. Available at: {url}{accessed}"
        ))
    }
}
