use crate::{bibtex::BibEntry, citation::Rule, error::ConvertError};

use super::authors::format_authors;

pub struct Article;

impl Rule for Article {
    const TYPES: &'static [&'static str] = &["@article"];

    fn format(entry: &BibEntry) -> Result<String, ConvertError> {
        let authors = format_authors(entry.require("author")?);
        let title = entry.require("title")?;
        let journal = entry.require("journal")?;
        let volume = entry.require("volume")?;
        let pages = entry.require("pages")?;
        let year = entry.require("year")?;
        // An absent issue number still prints as `()`; downstream text relies on that shape.
        let number = entry.field("number").unwrap_or_default();

        Ok(format!(
            "{authors} ({year}) {title}. {journal}, {volume}({number}): {pages}"
        ))
    }
}
