use std::collections::BTreeMap;

use crate::error::ConvertError;

/// One bibliographic record as read from BibTeX-like text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BibEntry {
    /// Type tag exactly as written, leading `@` included (e.g. `@book`).
    pub entry_type: String,
    /// Citation key. Only used to name the entry in diagnostics.
    pub entry_id: String,
    pub fields: BTreeMap<String, String>,
}

impl BibEntry {
    pub fn new(entry_type: impl Into<String>, entry_id: impl Into<String>) -> Self {
        BibEntry {
            entry_type: entry_type.into(),
            entry_id: entry_id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field setter, mostly useful in tests.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Look up a field a formatting rule cannot do without.
    pub fn require(&self, key: &'static str) -> Result<&str, ConvertError> {
        self.field(key).ok_or_else(|| ConvertError::MissingField {
            field: key,
            entry_id: self.entry_id.clone(),
        })
    }
}

/// Read every entry out of `text`, in input order.
///
/// The reader is line-based and forgiving: an entry starts at a line beginning with `@` and runs
/// until the next such line or the end of input. Closing braces are never treated as terminators,
/// so a field line that follows a `}` still belongs to the entry above it. Lines that are neither
/// headers nor `key = value` pairs are dropped. Reading never fails.
pub fn parse(text: &str) -> Vec<BibEntry> {
    let mut entries = Vec::new();
    let mut current: Option<BibEntry> = None;

    for line in text.split('\n') {
        let line = line.trim();

        if line.starts_with('@') {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            let (entry_type, entry_id) = match line.split_once('{') {
                Some((ty, rest)) => (ty.trim(), rest.trim_matches(',')),
                None => (line, ""),
            };
            tracing::debug!(entry_type, entry_id, "entry header");
            current = Some(BibEntry::new(entry_type, entry_id));
        } else if let Some((key, value)) = line.split_once('=') {
            // Fields ahead of any header still form an entry; it gets an empty type and is
            // reported as unsupported later on.
            current
                .get_or_insert_with(BibEntry::default)
                .fields
                .insert(key.trim().to_string(), clean_value(value).to_string());
        }
    }

    if let Some(done) = current {
        entries.push(done);
    }

    entries
}

/// Strip the BibTeX delimiters around a raw field value.
fn clean_value(raw: &str) -> &str {
    let mut value = raw.trim_matches(|c: char| matches!(c, ' ' | '{' | '}' | ','));
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value = &value[1..value.len() - 1];
    }
    // Reference managers sometimes leave the `@` of a macro reference on URLs and names.
    value.trim_start_matches('@')
}
