// Quick messages — reusable texts offered when composing a chat
//
// Defaults are seeded per language under stable ids (default-0, default-1,
// ...) so a language switch can rewrite their text in place. User-added
// messages get UUID ids and are never touched by localization.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::backend::StorageBackend;
use crate::validate::validate_message;
use crate::{current_timestamp, CoreError, Lang};

const UNDO_KEY: &str = "~undo";
const DEFAULT_ID_PREFIX: &str = "default-";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickMessage {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub created_at: u64,
}

impl QuickMessage {
    pub fn new(text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text,
            is_default: false,
            created_at: current_timestamp(),
        }
    }

    fn default_entry(index: usize, text: &str) -> Self {
        Self {
            id: format!("{DEFAULT_ID_PREFIX}{index}"),
            text: text.to_string(),
            is_default: true,
            created_at: 0,
        }
    }

    /// Seed position for default entries, parsed back out of the id.
    pub fn default_index(&self) -> Option<usize> {
        self.id.strip_prefix(DEFAULT_ID_PREFIX)?.parse().ok()
    }
}

#[derive(Clone)]
pub struct QuickMessages {
    backend: Arc<dyn StorageBackend>,
}

impl QuickMessages {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Populate the locale defaults, but only into an empty store.
    pub fn seed(&self, lang: Lang) -> Result<usize, CoreError> {
        if !self.entries()?.is_empty() {
            return Ok(0);
        }
        let suggestions = lang.suggestions();
        for (index, text) in suggestions.iter().enumerate() {
            self.put(&QuickMessage::default_entry(index, text))?;
        }
        self.backend.flush()?;
        Ok(suggestions.len())
    }

    pub fn add(&self, text: &str) -> Result<QuickMessage, CoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(crate::ValidationError::MessageRequired.into());
        }
        validate_message(trimmed)?;
        let message = QuickMessage::new(trimmed.to_string());
        self.put(&message)?;
        self.backend.flush()?;
        Ok(message)
    }

    pub fn edit(&self, id: &str, text: &str) -> Result<QuickMessage, CoreError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(crate::ValidationError::MessageRequired.into());
        }
        validate_message(trimmed)?;
        let mut message = self
            .get(id)?
            .ok_or_else(|| CoreError::MessageNotFound(id.to_string()))?;
        message.text = trimmed.to_string();
        self.put(&message)?;
        self.backend.flush()?;
        Ok(message)
    }

    pub fn get(&self, id: &str) -> Result<Option<QuickMessage>, CoreError> {
        if id == UNDO_KEY {
            return Ok(None);
        }
        match self.backend.get(id)? {
            Some(data) => Ok(serde_json::from_slice(&data)?),
            None => Ok(None),
        }
    }

    /// Delete a message and remember it as the undo candidate.
    pub fn remove(&self, id: &str) -> Result<QuickMessage, CoreError> {
        let message = self
            .get(id)?
            .ok_or_else(|| CoreError::MessageNotFound(id.to_string()))?;

        self.backend.remove(id)?;
        self.backend.put(UNDO_KEY, &serde_json::to_vec(&message)?)?;
        self.backend.flush()?;
        Ok(message)
    }

    /// Re-insert the most recently deleted message. Single-step; returns
    /// `None` when there is nothing to undo.
    pub fn restore_last(&self) -> Result<Option<QuickMessage>, CoreError> {
        let Some(data) = self.backend.get(UNDO_KEY)? else {
            return Ok(None);
        };
        let message: QuickMessage = serde_json::from_slice(&data)?;
        self.put(&message)?;
        self.backend.remove(UNDO_KEY)?;
        self.backend.flush()?;
        Ok(Some(message))
    }

    /// Defaults first in seed order, then user messages oldest first.
    pub fn list(&self) -> Result<Vec<QuickMessage>, CoreError> {
        let mut messages = self.entries()?;
        messages.sort_by(|a, b| match (a.default_index(), b.default_index()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)),
        });
        Ok(messages)
    }

    /// Wipe everything (the undo slot included) and re-seed the defaults.
    pub fn reset(&self, lang: Lang) -> Result<usize, CoreError> {
        self.backend.clear()?;
        self.seed(lang)
    }

    /// Rewrite surviving default entries to the given language's text.
    /// Returns how many were rewritten.
    pub fn relocalize(&self, lang: Lang) -> Result<usize, CoreError> {
        let suggestions = lang.suggestions();
        let mut rewritten = 0usize;

        for message in self.entries()? {
            if !message.is_default {
                continue;
            }
            let Some(index) = message.default_index() else {
                continue;
            };
            if let Some(text) = suggestions.get(index) {
                let mut updated = message;
                updated.text = text.to_string();
                self.put(&updated)?;
                rewritten += 1;
            }
        }

        self.backend.flush()?;
        Ok(rewritten)
    }

    pub fn count(&self) -> usize {
        self.entries().map(|e| e.len()).unwrap_or(0)
    }

    fn put(&self, message: &QuickMessage) -> Result<(), CoreError> {
        self.backend.put(&message.id, &serde_json::to_vec(message)?)
    }

    fn entries(&self) -> Result<Vec<QuickMessage>, CoreError> {
        let mut messages = Vec::new();
        for (key, value) in self.backend.iter_all()? {
            if key == UNDO_KEY {
                continue;
            }
            match serde_json::from_slice(&value) {
                Ok(message) => messages.push(message),
                Err(e) => tracing::warn!("skipping corrupt message record {key}: {e}"),
            }
        }
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::MemoryStorage;

    fn board() -> QuickMessages {
        QuickMessages::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_seed_only_when_empty() -> Result<(), CoreError> {
        let messages = board();
        assert_eq!(messages.seed(Lang::Es)?, 5);
        assert_eq!(messages.seed(Lang::En)?, 0); // already seeded
        assert_eq!(messages.list()?[0].text, Lang::Es.suggestions()[0]);
        Ok(())
    }

    #[test]
    fn test_add_edit_list_order() -> Result<(), CoreError> {
        let messages = board();
        messages.seed(Lang::En)?;

        let added = messages.add("  custom text  ")?;
        assert_eq!(added.text, "custom text");
        assert!(!added.is_default);

        let list = messages.list()?;
        assert_eq!(list.len(), 6);
        assert!(list[..5].iter().all(|m| m.is_default));
        assert_eq!(list[5].text, "custom text");

        messages.edit(&added.id, "edited")?;
        assert_eq!(messages.get(&added.id)?.unwrap().text, "edited");
        Ok(())
    }

    #[test]
    fn test_edit_unknown_id() {
        let messages = board();
        assert!(matches!(
            messages.edit("missing", "text"),
            Err(CoreError::MessageNotFound(_))
        ));
    }

    #[test]
    fn test_remove_and_restore() -> Result<(), CoreError> {
        let messages = board();
        messages.seed(Lang::En)?;

        let removed = messages.remove("default-2")?;
        assert_eq!(messages.count(), 4);

        let restored = messages.restore_last()?.unwrap();
        assert_eq!(restored.id, removed.id);
        assert_eq!(messages.count(), 5);
        assert!(messages.restore_last()?.is_none());
        Ok(())
    }

    #[test]
    fn test_reset_discards_user_messages() -> Result<(), CoreError> {
        let messages = board();
        messages.seed(Lang::En)?;
        messages.add("mine")?;
        messages.remove("default-0")?;

        assert_eq!(messages.reset(Lang::En)?, 5);
        let list = messages.list()?;
        assert_eq!(list.len(), 5);
        assert!(list.iter().all(|m| m.is_default));
        Ok(())
    }

    #[test]
    fn test_relocalize_touches_only_defaults() -> Result<(), CoreError> {
        let messages = board();
        messages.seed(Lang::Es)?;
        let mine = messages.add("mi mensaje")?;
        messages.remove("default-1")?; // deleted defaults stay deleted

        assert_eq!(messages.relocalize(Lang::En)?, 4);

        let list = messages.list()?;
        assert_eq!(list[0].text, Lang::En.suggestions()[0]);
        assert!(list.iter().all(|m| m.id != "default-1"));
        assert_eq!(messages.get(&mine.id)?.unwrap().text, "mi mensaje");
        Ok(())
    }

    #[test]
    fn test_message_length_limit() {
        let messages = board();
        assert!(messages.add(&"x".repeat(501)).is_err());
    }
}
