//! Bounded memo of successful field translations.
//!
//! Keyed by `(item id, field name, SHA-256 of the source text, source,
//! target)` so an edited field never serves a stale translation. Failures
//! are never stored.

use lru::LruCache;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::Mutex;

use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoKey {
    item_id: String,
    field: String,
    text_hash: [u8; 32],
    source: Locale,
    target: Locale,
}

impl MemoKey {
    pub fn new(item_id: &str, field: &str, text: &str, source: &Locale, target: &Locale) -> Self {
        let digest = Sha256::digest(text.as_bytes());
        let mut text_hash = [0u8; 32];
        text_hash.copy_from_slice(&digest);
        Self {
            item_id: item_id.to_string(),
            field: field.to_string(),
            text_hash,
            source: source.clone(),
            target: target.clone(),
        }
    }
}

pub struct TranslationMemo {
    inner: Mutex<LruCache<MemoKey, String>>,
}

impl TranslationMemo {
    /// `None` for a zero capacity (memoization disabled).
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        let capacity = NonZeroUsize::new(capacity)?;
        Some(Self {
            inner: Mutex::new(LruCache::new(capacity)),
        })
    }

    pub fn get(&self, key: &MemoKey) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: MemoKey, translated: String) {
        self.lock().put(key, translated);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<MemoKey, String>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::error!("[TRANSLATE] Memo mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str, text: &str, target: &str) -> MemoKey {
        MemoKey::new(
            id,
            "title",
            text,
            &Locale::parse("en").unwrap(),
            &Locale::parse(target).unwrap(),
        )
    }

    #[test]
    fn zero_capacity_disables_memo() {
        assert!(TranslationMemo::with_capacity(0).is_none());
    }

    #[test]
    fn edited_text_misses() {
        let memo = TranslationMemo::with_capacity(8).unwrap();
        memo.insert(key("1", "Hello", "fr"), "Bonjour".into());
        assert_eq!(memo.get(&key("1", "Hello", "fr")).as_deref(), Some("Bonjour"));
        assert!(memo.get(&key("1", "Hello!", "fr")).is_none());
        assert!(memo.get(&key("1", "Hello", "de")).is_none());
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let memo = TranslationMemo::with_capacity(2).unwrap();
        memo.insert(key("1", "a", "fr"), "A".into());
        memo.insert(key("2", "b", "fr"), "B".into());
        // Touch 1 so 2 becomes the eviction candidate.
        assert!(memo.get(&key("1", "a", "fr")).is_some());
        memo.insert(key("3", "c", "fr"), "C".into());
        assert_eq!(memo.len(), 2);
        assert!(memo.get(&key("2", "b", "fr")).is_none());
        assert!(memo.get(&key("1", "a", "fr")).is_some());
    }
}
