use std::collections::BTreeMap;

use crate::error::StorageError;

/// String-keyed, string-valued persistent store scoped to one application.
///
/// Mirrors the browser's local storage contract: a missing key reads as
/// `None`, writes replace the whole value, and `clear` drops every key in the
/// namespace regardless of who wrote it.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Volatile backend with an optional byte quota, used for tests and dry runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the combined size of all keys and values, in bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// While disabled every operation fails with `StorageError::Unavailable`.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn check_enabled(&self) -> Result<(), StorageError> {
        if self.disabled {
            return Err(StorageError::Unavailable {
                message: "storage is disabled".to_string(),
            });
        }
        Ok(())
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_enabled()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        if let Some(limit) = self.quota {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_enabled()?;
        self.items.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.check_enabled()?;
        self.items.clear();
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.check_enabled()?;
        Ok(self.items.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut s = MemoryStorage::new();
        assert!(s.get_item("a").unwrap().is_none());
        s.set_item("a", "1").unwrap();
        s.set_item("a", "2").unwrap();
        assert_eq!(s.get_item("a").unwrap().as_deref(), Some("2"));
        s.remove_item("a").unwrap();
        assert!(s.get_item("a").unwrap().is_none());
        // Removing a missing key is fine
        s.remove_item("a").unwrap();
    }

    #[test]
    fn test_clear_drops_every_key() {
        let mut s = MemoryStorage::new();
        s.set_item("fitlife_notes", "[]").unwrap();
        s.set_item("unrelated", "x").unwrap();
        s.clear().unwrap();
        assert!(s.is_empty());
        assert!(s.keys().unwrap().is_empty());
    }

    #[test]
    fn test_quota_exceeded() {
        let mut s = MemoryStorage::with_quota(10);
        s.set_item("k", "12345").unwrap();
        let err = s.set_item("j", "123456").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                needed: 13,
                limit: 10,
                ..
            }
        ));
        // Overwriting an existing key only counts the new value
        s.set_item("k", "123456789").unwrap();
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_disabled_storage_fails() {
        let mut s = MemoryStorage::new();
        s.set_item("a", "1").unwrap();
        s.set_disabled(true);
        assert!(matches!(
            s.get_item("a"),
            Err(StorageError::Unavailable { .. })
        ));
        assert!(s.set_item("a", "2").is_err());
        s.set_disabled(false);
        assert_eq!(s.get_item("a").unwrap().as_deref(), Some("1"));
    }
}
