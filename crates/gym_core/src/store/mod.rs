//! In-memory entity store.
//!
//! # Responsibility
//! - Own the five keyed collections (users, trainees, trainers, trainings,
//!   training types).
//! - Serialize every repository operation behind one lock.
//!
//! # Invariants
//! - Collections are only reachable inside `read`/`write` closures, so no
//!   raw map reference outlives a lock acquisition.
//! - One lock guards all collections; cross-collection invariants are never
//!   observed half-applied.

pub mod collection;
pub mod keys;

use crate::config::StoreOptions;
use crate::model::trainee::Trainee;
use crate::model::trainer::Trainer;
use crate::model::training::{Training, TrainingType, TrainingTypeId};
use crate::model::user::{User, UserId};
use collection::Collection;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The set of keyed collections guarded by `EntityStore`.
#[derive(Debug, Default)]
pub struct Collections {
    pub users: Collection<User>,
    pub trainees: Collection<Trainee>,
    pub trainers: Collection<Trainer>,
    pub trainings: Collection<Training>,
    pub training_types: Collection<TrainingType>,
}

impl Collections {
    fn counts(&self) -> StoreCounts {
        StoreCounts {
            users: self.users.len(),
            trainees: self.trainees.len(),
            trainers: self.trainers.len(),
            trainings: self.trainings.len(),
            training_types: self.training_types.len(),
        }
    }
}

/// Per-collection record counts at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreCounts {
    pub users: usize,
    pub trainees: usize,
    pub trainers: usize,
    pub trainings: usize,
    pub training_types: usize,
}

/// Thread-safe owner of all in-memory records.
///
/// Share it between threads with `Arc<EntityStore>`; repositories borrow it.
#[derive(Debug, Default)]
pub struct EntityStore {
    options: StoreOptions,
    collections: Mutex<Collections>,
}

impl EntityStore {
    /// Creates an empty store with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with caller-provided options.
    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            options,
            collections: Mutex::new(Collections::default()),
        }
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Runs `f` with shared access to every collection under the store lock.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> R {
        f(&self.lock())
    }

    /// Runs `f` with exclusive access to every collection under the store lock.
    ///
    /// `f` must validate before it mutates: a returned error never leaves a
    /// partial write behind.
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Collections) -> R) -> R {
        f(&mut self.lock())
    }

    /// Returns the user stored under `id`.
    pub fn user(&self, id: UserId) -> Option<User> {
        self.read(|c| c.users.get(&id).cloned())
    }

    /// Returns a snapshot of all users.
    pub fn users(&self) -> Vec<User> {
        self.read(|c| c.users.values())
    }

    /// Returns the training type stored under `id`.
    pub fn training_type(&self, id: TrainingTypeId) -> Option<TrainingType> {
        self.read(|c| c.training_types.get(&id).cloned())
    }

    /// Returns a snapshot of all training types.
    pub fn training_types(&self) -> Vec<TrainingType> {
        self.read(|c| c.training_types.values())
    }

    pub fn counts(&self) -> StoreCounts {
        self.read(Collections::counts)
    }

    // Every writer validates before mutating, so a poisoned lock still
    // guards consistent collections.
    fn lock(&self) -> MutexGuard<'_, Collections> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::{EntityStore, StoreCounts};
    use crate::config::{StoreOptions, UnknownRolePolicy};
    use crate::model::training::TrainingType;
    use uuid::Uuid;

    #[test]
    fn new_store_is_empty() {
        let store = EntityStore::new();
        assert_eq!(store.counts(), StoreCounts::default());
        assert_eq!(store.options().password_length, 10);
    }

    #[test]
    fn write_is_visible_to_later_reads() {
        let store = EntityStore::new();
        let id = Uuid::new_v4();
        store.write(|c| {
            c.training_types.put(
                id,
                TrainingType {
                    id,
                    type_name: "Yoga".to_string(),
                },
            )
        });

        assert_eq!(
            store.training_type(id).map(|t| t.type_name),
            Some("Yoga".to_string())
        );
        assert_eq!(store.counts().training_types, 1);
    }

    #[test]
    fn store_recovers_from_poisoned_lock() {
        let store = EntityStore::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.write(|_| panic!("writer panicked"));
        }));
        assert!(result.is_err());
        assert_eq!(store.counts(), StoreCounts::default());
    }

    #[test]
    fn with_options_keeps_caller_options() {
        let store = EntityStore::with_options(StoreOptions {
            password_length: 16,
            unknown_role: UnknownRolePolicy::Skip,
        });
        assert_eq!(store.options().password_length, 16);
        assert_eq!(store.options().unknown_role, UnknownRolePolicy::Skip);
    }
}
