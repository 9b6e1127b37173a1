use crate::{bibtex::BibEntry, citation::Rule, error::ConvertError};

use super::authors::format_authors;

pub struct Book;

impl Rule for Book {
    const TYPES: &'static [&'static str] = &["@book"];

    fn format(entry: &BibEntry) -> Result<String, ConvertError> {
        let authors = format_authors(entry.require("author")?);
        let title = entry.require("title")?;
        let publisher = entry.require("publisher")?;
        let year = entry.require("year")?;

        Ok(format!("{authors} ({year}) {title}. {publisher}."))
    }
}
