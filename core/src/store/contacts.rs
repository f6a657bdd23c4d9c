// Contact book
//
// Contacts store the LOCAL number and the dial code separately; the full
// international number only exists at link-building time. Two contacts are
// the same contact when their (phone, country_code) pair matches.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::backend::StorageBackend;
use crate::{current_timestamp, CoreError};

// Reserved slot for the single-step undo; never listed.
const UNDO_KEY: &str = "~undo";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    /// Local digits only, without the dial code.
    pub phone: String,
    /// Dial code (e.g. `+34`), stored separately from the number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default)]
    pub added_at: u64,
}

impl Contact {
    pub fn new(name: String, phone: String, country_code: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            phone,
            country_code,
            added_at: current_timestamp(),
        }
    }

    /// `+34 612345678`, or just the local number when no dial code is known.
    pub fn display_number(&self) -> String {
        match &self.country_code {
            Some(code) => format!("{code} {}", self.phone),
            None => self.phone.clone(),
        }
    }

    fn dedup_key(&self) -> (String, String) {
        (
            self.phone.clone(),
            self.country_code.clone().unwrap_or_default(),
        )
    }
}

/// Outcome of a batch import: `added + skipped` equals the rows offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub added: usize,
    pub skipped: usize,
}

#[derive(Clone)]
pub struct ContactBook {
    backend: Arc<dyn StorageBackend>,
}

impl ContactBook {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Save a new contact. Fails when an entry with the same
    /// (phone, country_code) pair already exists.
    pub fn add(&self, contact: Contact) -> Result<(), CoreError> {
        if self.is_duplicate(&contact.phone, contact.country_code.as_deref())? {
            return Err(CoreError::DuplicateContact {
                phone: contact.phone,
                country: contact.country_code.unwrap_or_default(),
            });
        }
        self.put(&contact)?;
        self.backend.flush()?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<Contact>, CoreError> {
        if id == UNDO_KEY {
            return Ok(None);
        }
        match self.backend.get(id)? {
            Some(data) => Ok(serde_json::from_slice(&data)?),
            None => Ok(None),
        }
    }

    /// Delete a contact and remember it as the undo candidate.
    pub fn remove(&self, id: &str) -> Result<Contact, CoreError> {
        let contact = self
            .get(id)?
            .ok_or_else(|| CoreError::ContactNotFound(id.to_string()))?;

        self.backend.remove(id)?;
        self.backend.put(UNDO_KEY, &serde_json::to_vec(&contact)?)?;
        self.backend.flush()?;
        Ok(contact)
    }

    /// Re-insert the most recently deleted contact. One step only; a second
    /// call is a no-op returning `None`. The duplicate check still applies:
    /// if an equal contact was saved since the deletion, this fails instead
    /// of silently duplicating it.
    pub fn restore_last(&self) -> Result<Option<Contact>, CoreError> {
        let Some(data) = self.backend.get(UNDO_KEY)? else {
            return Ok(None);
        };
        let contact: Contact = serde_json::from_slice(&data)?;

        if self.is_duplicate(&contact.phone, contact.country_code.as_deref())? {
            return Err(CoreError::DuplicateContact {
                phone: contact.phone,
                country: contact.country_code.unwrap_or_default(),
            });
        }

        self.put(&contact)?;
        self.backend.remove(UNDO_KEY)?;
        self.backend.flush()?;
        Ok(Some(contact))
    }

    /// All contacts, sorted by name (case-insensitive), then phone.
    pub fn list(&self) -> Result<Vec<Contact>, CoreError> {
        let mut contacts = self.entries()?;
        contacts.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.phone.cmp(&b.phone))
        });
        Ok(contacts)
    }

    /// Case-insensitive substring match on name or phone.
    pub fn find(&self, query: &str) -> Result<Vec<Contact>, CoreError> {
        let query_lower = query.to_lowercase();
        let mut results: Vec<Contact> = self
            .list()?
            .into_iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&query_lower) || c.phone.contains(query)
            })
            .collect();
        results.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(results)
    }

    /// Resolve a query to exactly one contact: by id, then exact name
    /// (case-insensitive), then unique substring match.
    pub fn resolve(&self, query: &str) -> Result<Contact, CoreError> {
        if let Some(contact) = self.get(query)? {
            return Ok(contact);
        }

        let all = self.list()?;
        let exact: Vec<&Contact> = all
            .iter()
            .filter(|c| c.name.eq_ignore_ascii_case(query))
            .collect();
        if exact.len() == 1 {
            return Ok(exact[0].clone());
        }

        let mut matches = self.find(query)?;
        match matches.len() {
            0 => Err(CoreError::ContactNotFound(query.to_string())),
            1 => Ok(matches.remove(0)),
            n => Err(CoreError::AmbiguousContact {
                query: query.to_string(),
                matches: n,
            }),
        }
    }

    pub fn is_duplicate(&self, phone: &str, country_code: Option<&str>) -> Result<bool, CoreError> {
        let key = (phone.to_string(), country_code.unwrap_or_default().to_string());
        Ok(self.entries()?.iter().any(|c| c.dedup_key() == key))
    }

    /// Merge a batch of imported contacts: duplicates within the batch are
    /// collapsed first (first occurrence wins), then anything already in the
    /// book is dropped. Everything dropped counts as skipped.
    pub fn import(&self, batch: Vec<Contact>) -> Result<ImportReport, CoreError> {
        let offered = batch.len();
        let mut seen = std::collections::HashSet::new();
        let mut added = 0usize;

        for contact in batch {
            if !seen.insert(contact.dedup_key()) {
                continue;
            }
            if self.is_duplicate(&contact.phone, contact.country_code.as_deref())? {
                continue;
            }
            self.put(&contact)?;
            added += 1;
        }

        self.backend.flush()?;
        Ok(ImportReport {
            added,
            skipped: offered - added,
        })
    }

    pub fn count(&self) -> usize {
        self.entries().map(|e| e.len()).unwrap_or(0)
    }

    fn put(&self, contact: &Contact) -> Result<(), CoreError> {
        self.backend.put(&contact.id, &serde_json::to_vec(contact)?)
    }

    // Every live contact; the undo slot is skipped and corrupt values are
    // logged and dropped rather than failing the whole read.
    fn entries(&self) -> Result<Vec<Contact>, CoreError> {
        let mut contacts = Vec::new();
        for (key, value) in self.backend.iter_all()? {
            if key == UNDO_KEY {
                continue;
            }
            match serde_json::from_slice(&value) {
                Ok(contact) => contacts.push(contact),
                Err(e) => tracing::warn!("skipping corrupt contact record {key}: {e}"),
            }
        }
        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::MemoryStorage;

    fn book() -> ContactBook {
        ContactBook::new(Arc::new(MemoryStorage::new()))
    }

    fn contact(name: &str, phone: &str, country: &str) -> Contact {
        Contact::new(name.to_string(), phone.to_string(), Some(country.to_string()))
    }

    #[test]
    fn test_add_and_list_sorted() -> Result<(), CoreError> {
        let book = book();
        book.add(contact("carol", "333", "+1"))?;
        book.add(contact("Alice", "111", "+1"))?;
        book.add(contact("bob", "222", "+1"))?;

        let names: Vec<String> = book.list()?.into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Alice", "bob", "carol"]);
        Ok(())
    }

    #[test]
    fn test_duplicate_detection() -> Result<(), CoreError> {
        let book = book();
        book.add(contact("Alice", "612345678", "+34"))?;

        // Same pair, different name: duplicate
        let err = book.add(contact("Alicia", "612345678", "+34")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateContact { .. }));

        // Same local number under a different dial code is a different contact
        book.add(contact("Alice US", "612345678", "+1"))?;
        assert_eq!(book.count(), 2);
        Ok(())
    }

    #[test]
    fn test_remove_and_restore() -> Result<(), CoreError> {
        let book = book();
        let alice = contact("Alice", "612345678", "+34");
        let id = alice.id.clone();
        book.add(alice)?;

        let removed = book.remove(&id)?;
        assert_eq!(removed.name, "Alice");
        assert_eq!(book.count(), 0);

        let restored = book.restore_last()?.unwrap();
        assert_eq!(restored.id, id);
        assert_eq!(book.count(), 1);

        // Single-step: nothing left to undo
        assert!(book.restore_last()?.is_none());
        Ok(())
    }

    #[test]
    fn test_restore_respects_duplicate_invariant() -> Result<(), CoreError> {
        let book = book();
        let alice = contact("Alice", "612345678", "+34");
        let id = alice.id.clone();
        book.add(alice)?;
        book.remove(&id)?;

        // Equal contact re-added before the undo
        book.add(contact("Alicia", "612345678", "+34"))?;

        assert!(matches!(
            book.restore_last(),
            Err(CoreError::DuplicateContact { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_find_by_name_and_phone() -> Result<(), CoreError> {
        let book = book();
        book.add(contact("Alice Johnson", "612345678", "+34"))?;
        book.add(contact("Bob", "5551234567", "+1"))?;

        assert_eq!(book.find("alice")?.len(), 1);
        assert_eq!(book.find("5551")?.len(), 1);
        assert_eq!(book.find("zzz")?.len(), 0);
        Ok(())
    }

    #[test]
    fn test_resolve() -> Result<(), CoreError> {
        let book = book();
        let alice = contact("Alice", "612345678", "+34");
        let id = alice.id.clone();
        book.add(alice)?;
        book.add(contact("Alina", "5551234567", "+1"))?;

        assert_eq!(book.resolve(&id)?.name, "Alice");
        assert_eq!(book.resolve("alice")?.phone, "612345678");
        assert!(matches!(
            book.resolve("ali"),
            Err(CoreError::AmbiguousContact { matches: 2, .. })
        ));
        assert!(matches!(
            book.resolve("nobody"),
            Err(CoreError::ContactNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_import_dedup_and_counts() -> Result<(), CoreError> {
        let book = book();
        book.add(contact("Existing", "111", "+1"))?;

        let report = book.import(vec![
            contact("Existing again", "111", "+1"), // already in the book
            contact("New", "222", "+1"),
            contact("New twice", "222", "+1"), // duplicate within the batch
            contact("Other", "333", "+34"),
        ])?;

        assert_eq!(report, ImportReport { added: 2, skipped: 2 });
        assert_eq!(book.count(), 3);
        Ok(())
    }

    #[test]
    fn test_corrupt_record_skipped() -> Result<(), CoreError> {
        let storage = MemoryStorage::new();
        storage.put("broken", b"not json")?;
        let book = ContactBook::new(Arc::new(storage));

        book.add(contact("Alice", "612345678", "+34"))?;
        assert_eq!(book.list()?.len(), 1);
        assert_eq!(book.count(), 1);
        Ok(())
    }

    #[test]
    fn test_sled_backed_book() -> Result<(), CoreError> {
        let dir = tempfile::tempdir().unwrap();
        let db = crate::store::backend::open_database(&dir.path().join("store"))?;
        let book = ContactBook::new(Arc::new(crate::store::backend::SledStorage::tree(
            &db, "contacts",
        )?));

        book.add(contact("Alice", "612345678", "+34"))?;
        assert_eq!(book.list()?.len(), 1);
        Ok(())
    }
}
