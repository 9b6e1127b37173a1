//! Bibliographic helpers for the BKB knowledge base.
//!
//! - [`bibtex`] reads BibTeX-like text into [`BibEntry`] records.
//! - [`citation`] turns those records into Harvard-style citations.
//! - [`source`] decides how a source label (free text or URL) is stored and shown.

pub mod bibtex;
pub mod citation;
pub mod error;
pub mod source;

pub use bibtex::BibEntry;
pub use citation::{Conversion, Converter, convert, convert_to_harvard, harvard};
pub use error::ConvertError;
