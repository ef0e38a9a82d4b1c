//! Keyed record collection.

use std::collections::HashMap;
use uuid::Uuid;

/// One `Uuid`-keyed mapping of the entity store.
///
/// Enforces nothing across collections; repositories sequence multi-map
/// mutations themselves while holding the store lock.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    entries: HashMap<Uuid, T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<T: Clone> Collection<T> {
    pub fn get(&self, id: &Uuid) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut T> {
        self.entries.get_mut(id)
    }

    /// Inserts or replaces the record stored under `id`.
    pub fn put(&mut self, id: Uuid, value: T) -> Option<T> {
        self.entries.insert(id, value)
    }

    pub fn remove(&mut self, id: &Uuid) -> Option<T> {
        self.entries.remove(id)
    }

    pub fn contains_key(&self, id: &Uuid) -> bool {
        self.entries.contains_key(id)
    }

    /// Returns a snapshot of all records. Order is unspecified.
    pub fn values(&self) -> Vec<T> {
        self.entries.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Collection;
    use uuid::Uuid;

    #[test]
    fn put_get_remove_cycle() {
        let mut names = Collection::<String>::default();
        let id = Uuid::new_v4();

        assert!(names.put(id, "first".to_string()).is_none());
        assert_eq!(names.put(id, "second".to_string()).as_deref(), Some("first"));
        assert_eq!(names.get(&id).map(String::as_str), Some("second"));
        assert!(names.contains_key(&id));
        assert_eq!(names.len(), 1);

        assert_eq!(names.remove(&id).as_deref(), Some("second"));
        assert!(names.is_empty());
        assert!(names.remove(&id).is_none());
    }

    #[test]
    fn values_is_a_detached_snapshot() {
        let mut names = Collection::<String>::default();
        let id = Uuid::new_v4();
        names.put(id, "kept".to_string());

        let snapshot = names.values();
        names.remove(&id);

        assert_eq!(snapshot, vec!["kept".to_string()]);
        assert!(names.values().is_empty());
    }
}
