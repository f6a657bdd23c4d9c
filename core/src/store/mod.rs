// Store module — contact and quick-message persistence

pub mod backend;
pub mod contacts;
pub mod messages;

pub use backend::{open_database, MemoryStorage, SledStorage, StorageBackend};
pub use contacts::{Contact, ContactBook, ImportReport};
pub use messages::{QuickMessage, QuickMessages};
