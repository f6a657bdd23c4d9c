// Direct Chat core — deep links over WhatsApp's public URL schemes
//
// "Does this help a human start a WhatsApp conversation
//  without typing a number into their phone?"
//
// If the answer is no, it doesn't belong here.

pub mod countries;
pub mod geo;
pub mod lang;
pub mod link;
pub mod sheet;
pub mod store;
pub mod validate;

use thiserror::Error;

pub use countries::Country;
pub use lang::Lang;
pub use link::{OpenMethod, Platform};
pub use store::contacts::{Contact, ContactBook, ImportReport};
pub use store::messages::{QuickMessage, QuickMessages};
pub use validate::ValidationError;

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("contact already saved with phone {phone} and country code {country}")]
    DuplicateContact { phone: String, country: String },

    #[error("contact not found: {0}")]
    ContactNotFound(String),

    #[error("contact query '{query}' is ambiguous ({matches} matches)")]
    AmbiguousContact { query: String, matches: usize },

    #[error("message not found: {0}")]
    MessageNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unsupported file type: {0} (expected .csv, .xls or .xlsx)")]
    UnsupportedFile(String),

    #[error("missing required columns: {0}")]
    MissingColumns(String),

    #[error("no contacts found in file")]
    NoContactsInFile,

    #[error("no contacts to export")]
    NothingToExport,

    #[error("spreadsheet error: {0}")]
    Sheet(String),
}

impl From<sled::Error> for CoreError {
    fn from(err: sled::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

pub(crate) fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
