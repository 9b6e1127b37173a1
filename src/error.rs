use thiserror::Error;

/// Why an entry did not produce a citation.
///
/// Neither variant aborts a conversion: the entry is left out of the output and the error is
/// reported next to the citations that did succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// No formatting rule exists for the entry's type tag.
    #[error("unsupported entry type `{entry_type}` (entry `{entry_id}`)")]
    UnsupportedEntryType { entry_type: String, entry_id: String },

    /// A field the matching rule cannot do without is absent.
    #[error("entry `{entry_id}` is missing required field `{field}`")]
    MissingField {
        field: &'static str,
        entry_id: String,
    },
}

impl ConvertError {
    /// Citation key of the entry this error is about.
    pub fn entry_id(&self) -> &str {
        match self {
            ConvertError::UnsupportedEntryType { entry_id, .. }
            | ConvertError::MissingField { entry_id, .. } => entry_id,
        }
    }
}
