//! Repository layer over the in-memory entity store.
//!
//! # Responsibility
//! - Define per-entity CRUD contracts.
//! - Sequence cross-collection mutations (owned users, cascades) under one
//!   store lock.
//!
//! # Invariants
//! - Every failing operation returns before its first mutation.
//! - Repositories never call each other while holding the store lock.

pub mod merge;
pub mod trainee_repo;
pub mod trainer_repo;
pub mod training_repo;
pub mod user_catalog;

use crate::model::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Required create input is missing or malformed.
    InvalidInput(String),
    /// The targeted (or referenced) record does not exist.
    NotFound { entity: EntityKind, id: Uuid },
    /// A record references something the store does not hold.
    InconsistentState(&'static str),
}

impl RepoError {
    pub(crate) fn not_found(entity: EntityKind, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} with id {id} not found"),
            Self::InconsistentState(details) => write!(f, "inconsistent store state: {details}"),
        }
    }
}

impl Error for RepoError {}
